use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_resono_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("RESONO_CONFIG_PATH", "/tmp/resono-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/resono-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("resono")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("resono")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_theme_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 0.4
load_patience_ms = 1500
progress_tick_ms = 500

[visualizer]
enabled = false
poll_ms = 200
smoothing = 0.9
theme = "system"

[controls]
seek_step_secs = 9
volume_step = 0.1

[library]
extensions = ["mp3"]
recursive = false
follow_links = false
probe_dir = "assets"

[ui]
header_text = "hello"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RESONO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("RESONO__AUDIO__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.volume, 0.4);
    assert_eq!(s.audio.load_patience_ms, 1500);
    assert_eq!(s.audio.progress_tick_ms, 500);
    assert!(!s.visualizer.enabled);
    assert_eq!(s.visualizer.poll_ms, 200);
    assert_eq!(s.visualizer.smoothing, 0.9);
    assert_eq!(s.visualizer.theme, ThemeSetting::Auto);
    assert_eq!(s.controls.seek_step_secs, 9);
    assert_eq!(s.controls.volume_step, 0.1);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.probe_dir, "assets");
    assert_eq!(s.ui.header_text, "hello");
    s.validate().unwrap();
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 0.9
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RESONO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("RESONO__AUDIO__VOLUME", "0.2");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.volume, 0.2);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.validate().unwrap();

    s.audio.volume = 1.5;
    assert!(s.validate().is_err());
    s.audio.volume = 0.7;

    s.visualizer.smoothing = 1.0;
    assert!(s.validate().is_err());
    s.visualizer.smoothing = 0.85;

    s.visualizer.poll_ms = 5;
    assert!(s.validate().is_err());
    s.visualizer.poll_ms = 350;

    s.controls.volume_step = 0.0;
    assert!(s.validate().is_err());
}
