use std::{env, path::PathBuf};

use super::{error::SettingsError, schema::Settings};

impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PLAYBAR")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Reject values the player cannot run with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(SettingsError::invalid(
                "api.base_url",
                format!("must be an http(s) URL, got {base:?}"),
            ));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(SettingsError::invalid("audio.volume", "must be within [0, 1]"));
        }
        if !(self.audio.volume_step > 0.0 && self.audio.volume_step <= 1.0) {
            return Err(SettingsError::invalid("audio.volume_step", "must be within (0, 1]"));
        }
        if self.audio.position_interval_ms == 0 {
            return Err(SettingsError::invalid("audio.position_interval_ms", "must be >= 1"));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(SettingsError::invalid("ui.tick_rate_ms", "must be >= 1"));
        }
        Ok(())
    }
}

/// Resolve the config path from `PLAYBAR_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PLAYBAR_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/playbar/config.toml`, or `~/.config/playbar/config.toml`
/// when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = match env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) => Some(PathBuf::from(xdg)),
        None => env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")),
    };

    config_home.map(|d| d.join("playbar").join("config.toml"))
}
