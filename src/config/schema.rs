use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playbar/config.toml` or
/// `~/.config/playbar/config.toml`.
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYBAR__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Root of the catalog service, without the `/api` suffix.
    pub base_url: String,
    /// Per-request timeout for catalog calls and audio downloads.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Starting volume in `[0, 1]`.
    pub volume: f32,
    /// Change applied by `+` / `-`.
    pub volume_step: f32,
    /// Seconds to scrub when pressing `h` / `l`.
    pub seek_step_secs: u64,
    /// How often the output reports its position (milliseconds).
    pub position_interval_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 0.75,
            volume_step: 0.05,
            seek_step_secs: 5,
            position_interval_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Song loaded into the player bar at startup, if any.
    pub startup_song_id: Option<i64>,
    /// Redraw interval (milliseconds).
    pub tick_rate_ms: u64,
    /// How many songs the track list requests.
    pub list_limit: u32,
    /// Capture mouse clicks on the progress and volume gauges.
    pub mouse: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            startup_song_id: None,
            tick_rate_ms: 33,
            list_limit: 50,
            mouse: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive used when `PLAYBAR_LOG` is unset.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
