use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/resono/config.toml` or `~/.config/resono/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RESONO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub visualizer: VisualizerSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Initial master volume, 0.0 to 1.0.
    pub volume: f32,
    /// How long a metadata load may take before it is reported as failed
    /// (milliseconds).
    pub load_patience_ms: u64,
    /// Progress clock tick (milliseconds).
    pub progress_tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 0.7,
            load_patience_ms: 3000,
            progress_tick_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualizerSettings {
    /// Whether the reactive backdrop runs at all.
    pub enabled: bool,
    /// How often the playing/stopped verdict is re-evaluated (milliseconds).
    pub poll_ms: u64,
    /// EMA weight of the previous energy value, 0.0 (no smoothing) to
    /// just under 1.0 (very sluggish).
    pub smoothing: f32,
    /// Theme preset selection.
    pub theme: ThemeSetting,
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_ms: 350,
            smoothing: 0.85,
            theme: ThemeSetting::Auto,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeSetting {
    Light,
    Dark,
    /// Detect from the terminal, falling back to dark.
    #[serde(alias = "detect", alias = "system")]
    Auto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when seeking with the arrow keys.
    pub seek_step_secs: u64,
    /// Volume change per key press.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step_secs: 5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Directory probed for a bundled default track when the playlist would
    /// otherwise start empty.
    pub probe_dir: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            recursive: true,
            max_depth: None,
            probe_dir: "audio".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ resono ~ ".to_string(),
        }
    }
}
