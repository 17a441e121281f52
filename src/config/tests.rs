use super::load::{MAX_VISUALIZER_BARS, default_config_path, resolve_config_path};
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
fn resolve_config_path_prefers_nada_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("NADA_CONFIG_PATH", "/tmp/nada-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/nada-test-config.toml")
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
            .join("nada")
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
            .join("nada")
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
[player]
default_title = "Untitled"
default_artist = "Nobody"
duration_secs = 180
tick_ms = 250
start_volume = 40

[ui]
header_text = "hello"
theme = "day"
visualizer_bars = 12
visualizer_refresh_ms = 100
loading_fade_ms = 0
now_playing_time_fields = ["elapsed", "remaining"]
now_playing_time_separator = " | "

[controls]
scrub_seconds = 9
volume_step = 10

[catalog]
path = "/tmp/catalog.toml"

[logging]
file = "/tmp/nada.log"
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("NADA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("NADA__PLAYER__TICK_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.default_title, "Untitled");
    assert_eq!(s.player.default_artist, "Nobody");
    assert_eq!(s.player.duration_secs, 180.0);
    assert_eq!(s.player.tick_ms, 250);
    assert_eq!(s.player.start_volume, 40);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.theme, ThemeSetting::Light);
    assert_eq!(s.ui.visualizer_bars, 12);
    assert_eq!(s.ui.visualizer_refresh_ms, 100);
    assert_eq!(s.ui.loading_fade_ms, 0);
    assert_eq!(s.ui.now_playing_time_fields.len(), 2);
    assert!(matches!(s.ui.now_playing_time_fields[0], TimeField::Elapsed));
    assert!(matches!(s.ui.now_playing_time_fields[1], TimeField::Remaining));
    assert_eq!(s.ui.now_playing_time_separator, " | ");
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.controls.volume_step, 10);
    assert_eq!(
        s.catalog.path,
        Some(std::path::PathBuf::from("/tmp/catalog.toml"))
    );
    assert_eq!(s.logging.file, Some(std::path::PathBuf::from("/tmp/nada.log")));
    assert_eq!(s.logging.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[player]
tick_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("NADA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("NADA__PLAYER__TICK_MS", "500");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.tick_ms, 500);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("does-not-exist.toml");
    let _g1 = EnvGuard::set("NADA_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("NADA__PLAYER__TICK_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.player.duration_secs, 225.0);
    assert_eq!(s.player.tick_ms, 1000);
    assert_eq!(s.ui.theme, ThemeSetting::Dark);
    assert_eq!(s.ui.visualizer_bars, 50);
    assert!(s.catalog.path.is_none());
    assert!(s.logging.file.is_none());
}

#[test]
fn validate_accepts_defaults() {
    assert!(Settings::default().validate().is_ok());
}

#[test]
fn validate_rejects_bad_durations() {
    for bad in [-1.0, 12.5, f64::INFINITY, 1e20] {
        let mut s = Settings::default();
        s.player.duration_secs = bad;
        let err = s.validate().unwrap_err();
        assert!(err.starts_with("player.duration_secs"), "{err}");
    }
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.player.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.player.start_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.visualizer_bars = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.visualizer_bars = MAX_VISUALIZER_BARS + 1;
    assert!(s.validate().is_err());
    s.ui.visualizer_bars = MAX_VISUALIZER_BARS;
    assert!(s.validate().is_ok());

    let mut s = Settings::default();
    s.controls.volume_step = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.logging.level = "loud".to_string();
    assert!(s.validate().is_err());
}
