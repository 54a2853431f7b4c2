use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::Settings;
use crate::source::{MAX_ARTIST_BATCH, MAX_TOP_TRACKS};

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file and then environment
/// variables (prefix `PERFORMATIVIFY__`), falling back to struct defaults.
impl Settings {
    /// Load settings from the resolved config path and the environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Load settings from an explicit config file (missing file is fine) and the environment.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PERFORMATIVIFY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch.limit == 0 {
            return Err("fetch.limit must be >= 1".to_string());
        }
        if self.fetch.limit > MAX_TOP_TRACKS {
            return Err(format!("fetch.limit must be <= {MAX_TOP_TRACKS}"));
        }
        if self.report.bar_width == 0 {
            return Err("report.bar_width must be >= 1".to_string());
        }
        if !(1..=MAX_ARTIST_BATCH).contains(&self.spotify.artist_batch_size) {
            return Err(format!(
                "spotify.artist_batch_size must be between 1 and {MAX_ARTIST_BATCH}"
            ));
        }
        Ok(())
    }
}

/// Resolve the config path from `PERFORMATIVIFY_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PERFORMATIVIFY_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/performativify/config.toml`
/// or `~/.config/performativify/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("performativify").join("config.toml"))
}
