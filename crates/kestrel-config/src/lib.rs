//! Configuration for kestrel (`kestrel.toml`).
//!
//! ```toml
//! [logging]
//! level = "info"
//! json = false
//! stderr = true
//! file = "/tmp/kestrel.log"
//!
//! [resolve]
//! cache = true
//! implicit_imports = ["java.lang"]
//! ```
//!
//! Every key is optional; a missing key takes its default.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod diagnostics;
mod logging;
mod schema;

pub use diagnostics::{ConfigDiagnostics, ConfigWarning};
pub use logging::{init_tracing, LoggingConfig};
pub use schema::json_schema;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KestrelConfig {
    /// Logging settings shared by all kestrel crates.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Symbol resolution settings.
    #[serde(default)]
    pub resolve: ResolveConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct ResolveConfig {
    /// Memoize successful type lookups against the declaration providers.
    #[serde(default = "ResolveConfig::default_cache")]
    pub cache: bool,

    /// Packages every compilation unit imports on demand without an `import` declaration.
    #[serde(default = "ResolveConfig::default_implicit_imports")]
    pub implicit_imports: Vec<String>,
}

impl ResolveConfig {
    fn default_cache() -> bool {
        true
    }

    fn default_implicit_imports() -> Vec<String> {
        vec!["java.lang".to_owned()]
    }
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            cache: Self::default_cache(),
            implicit_imports: Self::default_implicit_imports(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` embeds a snippet of the input; keep just the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl KestrelConfig {
    /// Load a config file from TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = read_config(path.as_ref())?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file from TOML and report unknown keys and suspicious values.
    pub fn load_from_path_with_diagnostics(
        path: impl AsRef<Path>,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let text = read_config(path.as_ref())?;
        Self::load_from_str_with_diagnostics(&text)
    }

    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, unknown_keys) =
            diagnostics::deserialize_toml_with_unknown_keys::<KestrelConfig>(text)?;

        let mut diagnostics = ConfigDiagnostics {
            unknown_keys,
            ..ConfigDiagnostics::default()
        };
        diagnostics.warnings.extend(config.validate());

        for key in &diagnostics.unknown_keys {
            tracing::warn!(target: "kestrel.config", key = %key, "unknown config key");
        }
        Ok((config, diagnostics))
    }

    fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let normalized = LoggingConfig::normalize_level_directives(&self.logging.level);
        if tracing_subscriber::EnvFilter::try_new(&normalized).is_err() {
            warnings.push(ConfigWarning::LoggingLevelInvalid {
                value: self.logging.level.clone(),
                normalized,
            });
        }

        for (idx, package) in self.resolve.implicit_imports.iter().enumerate() {
            let valid = !package.is_empty()
                && package
                    .split('.')
                    .all(|segment| !segment.is_empty() && !segment.contains(char::is_whitespace));
            if !valid {
                warnings.push(ConfigWarning::InvalidValue {
                    toml_path: format!("resolve.implicit_imports[{idx}]"),
                    message: format!("`{package}` is not a dotted package name"),
                });
            }
        }

        warnings
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}
