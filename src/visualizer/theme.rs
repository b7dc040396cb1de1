use std::env;

/// Terminal color scheme the backdrop adapts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn preset(self) -> ThemePreset {
        match self {
            ThemeMode::Light => ThemePreset::light(),
            ThemeMode::Dark => ThemePreset::dark(),
        }
    }
}

/// Per-theme rendering parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ThemePreset {
    /// Backdrop opacity while idle or paused.
    pub idle_opacity: f32,
    /// Maximum energy-driven opacity boost on top of the idle baseline.
    pub max_boost: f32,
    /// Lightness of the backdrop color; dark terminals want dim colors,
    /// light terminals want washed-out pastels.
    pub lightness: f32,
}

impl ThemePreset {
    pub fn dark() -> Self {
        Self {
            idle_opacity: 0.10,
            max_boost: 0.60,
            lightness: 0.35,
        }
    }

    pub fn light() -> Self {
        Self {
            idle_opacity: 0.06,
            max_boost: 0.40,
            lightness: 0.72,
        }
    }
}

/// Best-effort terminal theme detection from `COLORFGBG` ("fg;bg", set by
/// several terminal emulators). Unknown or missing means dark, the common
/// case for terminals.
pub fn detect_terminal_theme() -> ThemeMode {
    let Ok(value) = env::var("COLORFGBG") else {
        return ThemeMode::Dark;
    };
    match value.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()) {
        Some(bg) if bg == 7 || bg >= 9 => ThemeMode::Light,
        _ => ThemeMode::Dark,
    }
}
