use super::error::SettingsError;
use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
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
fn resolve_config_path_prefers_explicit_path() {
    let _lock = env_lock();
    let _g = EnvGuard::set("PLAYBAR_CONFIG_PATH", "/tmp/playbar-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/playbar-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home/playbar/config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.config/playbar/config.toml")
    );
}

#[test]
fn defaults_are_valid() {
    let settings = Settings::default();
    assert_eq!(settings.audio.volume, 0.75);
    assert_eq!(settings.audio.seek_step_secs, 5);
    assert_eq!(settings.ui.tick_rate_ms, 33);
    assert_eq!(settings.ui.startup_song_id, None);
    assert_eq!(settings.log.level, "info");
    assert!(settings.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[api]
base_url = "https://music.example.com"

[audio]
volume = 0.4
seek_step_secs = 10

[ui]
startup_song_id = 42
mouse = false
"#,
    )
    .unwrap();

    let _g = EnvGuard::set("PLAYBAR_CONFIG_PATH", cfg_path.to_str().unwrap());
    let settings = Settings::load().unwrap();

    assert_eq!(settings.api.base_url, "https://music.example.com");
    assert_eq!(settings.api.timeout_secs, 30);
    assert_eq!(settings.audio.volume, 0.4);
    assert_eq!(settings.audio.seek_step_secs, 10);
    assert_eq!(settings.audio.position_interval_ms, 250);
    assert_eq!(settings.ui.startup_song_id, Some(42));
    assert!(!settings.ui.mouse);
}

#[test]
fn env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "[audio]\nseek_step_secs = 10\n").unwrap();

    let _g1 = EnvGuard::set("PLAYBAR_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("PLAYBAR__AUDIO__SEEK_STEP_SECS", "15");

    let settings = Settings::load().unwrap();
    assert_eq!(settings.audio.seek_step_secs, 15);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let _g = EnvGuard::set(
        "PLAYBAR_CONFIG_PATH",
        dir.path().join("absent.toml").to_str().unwrap(),
    );

    let settings = Settings::load().unwrap();
    assert_eq!(settings.api.base_url, "http://localhost:3000");
    assert_eq!(settings.audio.volume_step, 0.05);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut settings = Settings::default();
    settings.audio.volume = 1.5;
    let err = settings.validate().unwrap_err();
    assert_eq!(err.field(), Some("audio.volume"));

    let mut settings = Settings::default();
    settings.api.base_url = "localhost:3000".to_string();
    let err = settings.validate().unwrap_err();
    assert!(matches!(err, SettingsError::Invalid { field: "api.base_url", .. }));
    assert!(err.to_string().contains("localhost:3000"));

    let mut settings = Settings::default();
    settings.ui.tick_rate_ms = 0;
    assert_eq!(settings.validate().unwrap_err().field(), Some("ui.tick_rate_ms"));

    let mut settings = Settings::default();
    settings.audio.volume_step = 0.0;
    assert_eq!(settings.validate().unwrap_err().field(), Some("audio.volume_step"));

    let mut settings = Settings::default();
    settings.audio.position_interval_ms = 0;
    assert_eq!(
        settings.validate().unwrap_err().field(),
        Some("audio.position_interval_ms")
    );
}

#[test]
fn malformed_config_file_is_a_load_error() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "[audio]\nvolume = \"loud\"\n").unwrap();

    let _g = EnvGuard::set("PLAYBAR_CONFIG_PATH", cfg_path.to_str().unwrap());
    let err = Settings::load().unwrap_err();
    assert!(matches!(err, SettingsError::Load(_)));
    assert_eq!(err.field(), None);
}
