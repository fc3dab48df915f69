//! Logger configuration

use serde::{Deserialize, Serialize};

/// Filter directives variable
const LEVEL_ENV: &str = "KEYROT_LOG";
/// Output format variable
const FORMAT_ENV: &str = "KEYROT_LOG_FORMAT";
const SOURCE_ENV: &str = "KEYROT_LOG_SOURCE";
const COLORS_ENV: &str = "KEYROT_LOG_COLORS";
const ENV_NAME_ENV: &str = "KEYROT_ENV";

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filter directives (`info`, `keyrot_engine=debug`)
    pub level: String,
    pub format: Format,
    pub writer: WriterConfig,
    pub display: DisplayConfig,
    /// Fields attached to every event through the root span
    pub fields: Fields,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Multi-line, human oriented
    Pretty,
    /// Single line per event
    #[default]
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

/// Output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterConfig {
    /// Standard error; stdout stays free for reports
    #[default]
    Stderr,
    Stdout,
}

/// Display options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct DisplayConfig {
    pub source: bool,
    pub target: bool,
    pub thread_ids: bool,
    pub thread_names: bool,
    pub colors: bool,
    /// Include the span stack (JSON only)
    pub span_list: bool,
    /// Flatten event fields into the top-level object (JSON only)
    pub flatten: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            source: false,
            target: true,
            thread_ids: false,
            thread_names: false,
            colors: true,
            span_list: true,
            flatten: true,
        }
    }
}

/// Global fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    pub service: Option<String>,
    pub env: Option<String>,
}

impl Fields {
    /// Whether any field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.env.is_none()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::default(),
            writer: WriterConfig::default(),
            display: DisplayConfig::default(),
            fields: Fields::default(),
        }
    }
}

impl Config {
    /// Environment when any logging variable is set, otherwise the preset for
    /// this build profile
    #[must_use]
    pub fn from_env_or_preset() -> Self {
        Self::select(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// [`Config::from_lookup`] if `lookup` has a level or format variable,
    /// else [`Config::development`] or [`Config::production`].
    #[must_use]
    pub fn select(lookup: impl Fn(&str) -> Option<String>, debug_build: bool) -> Self {
        let configured = [LEVEL_ENV, "RUST_LOG", FORMAT_ENV]
            .into_iter()
            .any(|key| lookup(key).is_some());
        if configured {
            Self::from_lookup(lookup)
        } else if debug_build {
            Self::development()
        } else {
            Self::production()
        }
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Unparseable values are ignored and leave the default in place.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup(LEVEL_ENV).or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }
        if let Some(format) = lookup(FORMAT_ENV).and_then(|v| v.parse().ok()) {
            config.format = format;
        }
        if let Some(source) = lookup(SOURCE_ENV).and_then(|v| parse_bool(&v)) {
            config.display.source = source;
        }
        if let Some(colors) = lookup(COLORS_ENV).and_then(|v| parse_bool(&v)) {
            config.display.colors = colors;
        }
        config.fields.env = lookup(ENV_NAME_ENV);
        config
    }

    /// Verbose, colored, with source locations
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// JSON for log shipping
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                ..DisplayConfig::default()
            },
            fields: Fields {
                service: Some("keyrot".to_string()),
                env: None,
            },
            ..Self::default()
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
