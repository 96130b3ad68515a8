use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries an optional config file first, then environment
/// variables (prefix `GHOSTWAVE__`) and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("GHOSTWAVE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.volume.initial) {
            return Err("volume.initial must be within [0, 1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.wave.glitch_chance) {
            return Err("wave.glitch_chance must be within [0, 1]".to_string());
        }
        if !(0.0..1.0).contains(&self.wave.ghost_fade) {
            return Err("wave.ghost_fade must be within [0, 1)".to_string());
        }
        if self.probe.timeout_ms == 0 {
            return Err("probe.timeout_ms must be >= 1".to_string());
        }
        if self.source.extensions.is_empty() {
            return Err("source.extensions must not be empty".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `GHOSTWAVE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("GHOSTWAVE_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/ghostwave/config.toml`
/// or `~/.config/ghostwave/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("ghostwave").join("config.toml"))
}
