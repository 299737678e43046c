//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config PATH`, or `config.toml` in the platform config dir)
//! 3. `PATHDEDUP_*` environment variables
//! 4. Command-line flags (applied with [`Config::with_overrides`])
//!
//! ```toml
//! precision = 2
//! scope = "selection"
//! parallel_threshold = 512
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::ScopeArg;
use crate::duplicates::DEFAULT_PARALLEL_THRESHOLD;
use crate::fingerprint::Precision;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "PATHDEDUP_";

/// Configuration loading errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A provider failed or a key has the wrong type or range.
    #[error("invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A value parsed but is not acceptable.
    #[error("invalid configuration value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },

    /// An explicitly requested file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Decimal digits kept when fingerprinting (0..=9).
    pub precision: Precision,
    /// Path item scope.
    pub scope: ScopeArg,
    /// Candidate count at which fingerprinting goes parallel.
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            scope: ScopeArg::Auto,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl Config {
    /// Defaults, optional TOML file and environment, merged in that order.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load from a specific file (or none) plus the environment.
    ///
    /// A missing file contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed TOML, wrongly typed keys or
    /// out-of-range values.
    pub fn load_from_path(file: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Config = Self::figment(file).extract()?;
        config.validate()?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Load using an explicit path or the platform default location.
    ///
    /// # Errors
    ///
    /// `NotFound` if `explicit` names a file that does not exist, otherwise
    /// as [`Config::load_from_path`].
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::load_from_path(Some(path)),
            None => {
                let default = Self::default_path();
                match &default {
                    Some(path) => log::trace!("Looking for config at {}", path.display()),
                    None => log::debug!("No platform config directory, using defaults"),
                }
                Self::load_from_path(default.as_deref())
            }
        }
    }

    /// The platform-specific configuration file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "pathdedup", "pathdedup")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply command-line flags on top of the loaded values.
    #[must_use]
    pub fn with_overrides(mut self, precision: Option<Precision>, scope: Option<ScopeArg>) -> Self {
        if let Some(precision) = precision {
            self.precision = precision;
        }
        if let Some(scope) = scope {
            self.scope = scope;
        }
        self
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel_threshold == 0 {
            return Err(ConfigError::Invalid {
                key: "parallel_threshold",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
