use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/nada/config.toml` or `~/.config/nada/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `NADA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub catalog: CatalogSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Title shown before any song has been picked.
    pub default_title: String,
    /// Artist shown before any song has been picked.
    pub default_artist: String,
    /// Length of every simulated track, in whole seconds.
    pub duration_secs: f64,
    /// Interval between clock ticks (milliseconds). Each tick is one second
    /// of simulated playback.
    pub tick_ms: u64,
    /// Volume level at startup (0-100).
    pub start_volume: u8,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            default_title: "Song Title".to_string(),
            default_artist: "Artist Name".to_string(),
            duration_secs: 225.0,
            tick_ms: 1000,
            start_volume: 80,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Theme used at startup; `t` toggles it at runtime.
    pub theme: ThemeSetting,

    /// Number of visualizer bars.
    pub visualizer_bars: usize,
    /// How often the visualizer re-rolls its bars while playing (milliseconds).
    pub visualizer_refresh_ms: u64,

    /// How long catalog sections stay dimmed after startup (milliseconds).
    /// Set to 0 to skip the fade-in.
    pub loading_fade_ms: u64,

    /// Which time fields to show in the player box, and in what order.
    ///
    /// Example: ["elapsed", "total", "remaining"]
    pub now_playing_time_fields: Vec<TimeField>,

    /// Separator used to join `now_playing_time_fields`.
    pub now_playing_time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Discover music you love ~ ".to_string(),
            theme: ThemeSetting::Dark,
            visualizer_bars: 50,
            visualizer_refresh_ms: 200,
            loading_fade_ms: 1000,
            now_playing_time_fields: vec![TimeField::Elapsed, TimeField::Total],
            now_playing_time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change per `+` / `-` press.
    pub volume_step: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Optional TOML file replacing the built-in catalog.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file. Logging is disabled when unset since the terminal belongs to the UI.
    pub file: Option<PathBuf>,
    /// Maximum level: trace, debug, info, warn or error.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeSetting {
    #[serde(alias = "night")]
    Dark,
    #[serde(alias = "day")]
    Light,
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeField {
    Elapsed,
    Total,
    Remaining,
}
