//! keyrot Config
//!
//! Settings are layered, later sources winning:
//!
//! 1. Built-in defaults (90/100/110 day thresholds, Asana API root)
//! 2. An optional TOML file
//! 3. `KEYROT_`-prefixed environment variables, `__` separating nested keys
//!    (`KEYROT_POLICY__MAX_KEYS=2`, `KEYROT_AWS__TOPIC_ARN=arn:...`)
//!
//! The result is an immutable [`Settings`] value built once at startup.
//! Roster entries are loaded as-is; an incomplete entry is rejected by the job
//! when it reaches it, not here.
#![forbid(unsafe_code)]

mod error;
mod loader;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_PATH_ENV, ENV_PREFIX, figment};
pub use settings::{AsanaSettings, AwsSettings, PolicySettings, Settings};
