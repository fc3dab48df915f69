//! Layered loading

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};

use crate::error::{ConfigError, ConfigResult};
use crate::settings::Settings;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "KEYROT_";

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "KEYROT_CONFIG";

/// Defaults, then the TOML file at `path` (if any), then `KEYROT_*` variables.
pub fn figment(path: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));
    if let Some(path) = path {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
}

impl Settings {
    /// Load and validate settings.
    ///
    /// A `path` given explicitly must exist. Run-specific checks
    /// ([`Settings::validate_for_run`]) are left to the caller.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = path
            && !path.is_file()
        {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let settings: Settings = figment(path).extract()?;
        settings.validate()?;

        tracing::debug!(
            config = ?path,
            roster = settings.roster.len(),
            max_keys = settings.policy.max_keys,
            "loaded configuration"
        );
        Ok(settings)
    }
}
