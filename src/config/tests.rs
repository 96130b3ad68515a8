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
fn resolve_config_path_prefers_ghostwave_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("GHOSTWAVE_CONFIG_PATH", "/tmp/ghostwave-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/ghostwave-test-config.toml")
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
            .join("ghostwave")
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
            .join("ghostwave")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_documented_baseline() {
    let s = Settings::default();
    assert_eq!(s.source.extensions, vec!["mp3".to_string()]);
    assert_eq!(s.source.manifest_file, "manifest.json");
    assert_eq!(s.probe.timeout_ms, 5_000);
    assert_eq!(s.volume.initial, 0.85);
    assert_eq!(s.wave.glitch_chance, 0.05);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.volume.initial = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.wave.ghost_fade = 1.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.probe.timeout_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.source.extensions.clear();
    assert!(s.validate().is_err());
}

#[test]
fn settings_deserialize_from_toml_fragment() {
    let parsed: Settings = toml::from_str(
        r#"
        [source]
        extensions = ["mp3", "ogg"]

        [playback]
        shuffle = true
        "#,
    )
    .unwrap();

    assert_eq!(parsed.source.extensions.len(), 2);
    assert!(parsed.playback.shuffle);
    // Untouched sections keep their defaults.
    assert_eq!(parsed.probe.timeout_ms, 5_000);
}
