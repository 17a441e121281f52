use std::{env, path::PathBuf, str::FromStr};

use crate::clock::duration_from_secs_f64;

use super::schema::Settings;

/// Upper bound on `ui.visualizer_bars`; wider than any realistic terminal.
pub const MAX_VISUALIZER_BARS: usize = 512;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `NADA__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("NADA")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        duration_from_secs_f64(self.player.duration_secs)
            .map_err(|e| format!("player.duration_secs: {e}"))?;
        if self.player.tick_ms == 0 {
            return Err("player.tick_ms must be >= 1".to_string());
        }
        if self.player.start_volume > 100 {
            return Err("player.start_volume must be <= 100".to_string());
        }
        if !(1..=MAX_VISUALIZER_BARS).contains(&self.ui.visualizer_bars) {
            return Err(format!(
                "ui.visualizer_bars must be between 1 and {MAX_VISUALIZER_BARS}"
            ));
        }
        if self.ui.visualizer_refresh_ms == 0 {
            return Err("ui.visualizer_refresh_ms must be >= 1".to_string());
        }
        if !(1..=100).contains(&self.controls.volume_step) {
            return Err("controls.volume_step must be between 1 and 100".to_string());
        }
        if tracing::Level::from_str(&self.logging.level).is_err() {
            return Err(format!("logging.level: unknown level {:?}", self.logging.level));
        }
        Ok(())
    }
}

/// Resolve the config path from `NADA_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("NADA_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/nada/config.toml`
/// or `~/.config/nada/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("nada").join("config.toml"))
}
