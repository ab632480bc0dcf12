//! Layered configuration for the algebra's tunables.
//!
//! Two knobs exist: the loop protector's limit used by
//! [`Producer`](crate::sequence::Producer), and the default
//! [`MinOutput`] used by set operations when the caller does not pass one.
//!
//! [`ConfigLoader`] resolves them with precedence (lowest first):
//!
//! 1. Profile defaults
//! 2. TOML file (requires the `config-file` feature)
//! 3. `OUTCOMES_*` environment variables
//! 4. Programmatic overrides
//!
//! ```toml
//! loop_limit = 4096      # or "none"
//! min_output = "all"     # or a positive count
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::elemental::MinOutput;

/// Environment variable prefix consulted by [`ConfigLoader`].
pub const ENV_PREFIX: &str = "OUTCOMES_";

/// Resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgebraConfig {
    /// Items a producer may pull before aborting; `None` disables the guard.
    pub loop_limit: Option<usize>,
    /// Default minimum output for set operations.
    pub min_output: MinOutput,
}

impl Default for AlgebraConfig {
    fn default() -> Self {
        Profile::Default.to_config()
    }
}

impl AlgebraConfig {
    /// Sets the loop limit.
    #[must_use]
    pub const fn loop_limit(mut self, limit: Option<usize>) -> Self {
        self.loop_limit = limit;
        self
    }

    /// Sets the default minimum output.
    #[must_use]
    pub const fn min_output(mut self, min_output: MinOutput) -> Self {
        self.min_output = min_output;
        self
    }

    /// Rejects a zero loop limit and a zero minimum.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loop_limit == Some(0) {
            return Err(ConfigError::ZeroLoopLimit);
        }
        if self.min_output == MinOutput::AtLeast(0) {
            return Err(ConfigError::ZeroMinOutput);
        }
        Ok(())
    }
}

/// Built-in configuration profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Generous loop limit, exhaustive set operations.
    #[default]
    Default,
    /// Tight loop limit, set operations stop after the first element.
    Strict,
    /// No loop protection, exhaustive set operations.
    Unbounded,
}

impl Profile {
    /// The profile's configuration.
    #[must_use]
    pub const fn to_config(self) -> AlgebraConfig {
        match self {
            Self::Default => AlgebraConfig {
                loop_limit: Some(1 << 20),
                min_output: MinOutput::All,
            },
            Self::Strict => AlgebraConfig {
                loop_limit: Some(4096),
                min_output: MinOutput::AtLeast(1),
            },
            Self::Unbounded => AlgebraConfig {
                loop_limit: None,
                min_output: MinOutput::All,
            },
        }
    }
}

/// Configuration loader with layered sources.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    profile: Profile,
    file_path: Option<PathBuf>,
    overrides: BTreeMap<String, String>,
}

impl ConfigLoader {
    /// Creates a loader with the default profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base profile.
    #[must_use]
    pub const fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets a TOML file to layer over the profile.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Adds a programmatic override (highest precedence). Keys are the
    /// bare names (`loop_limit`, `min_output`) or their `OUTCOMES_` forms.
    #[must_use]
    pub fn override_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Resolves and validates the configuration.
    pub fn load(&self) -> Result<AlgebraConfig, ConfigError> {
        self.load_with_env(std::env::vars())
    }

    /// Like [`load`](Self::load) with an explicit environment.
    pub fn load_with_env<I>(&self, env: I) -> Result<AlgebraConfig, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = self.profile.to_config();
        if let Some(path) = &self.file_path {
            load_file(&mut config, path)?;
        }
        for (key, value) in env {
            if key.starts_with(ENV_PREFIX) {
                apply_kv(&mut config, &key, &value)?;
            }
        }
        for (key, value) in &self.overrides {
            apply_kv(&mut config, key, value)?;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading configuration.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// An override named an unknown key.
    #[error("invalid override: {0}")]
    InvalidOverride(String),
    /// A known key had an unusable value.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// The key being set.
        key: String,
        /// The rejected value.
        value: String,
    },
    /// A loop limit of zero would reject every sequence.
    #[error("loop_limit must be > 0")]
    ZeroLoopLimit,
    /// A minimum output of zero is meaningless.
    #[error("min_output must be > 0")]
    ZeroMinOutput,
    /// A file was given but the `config-file` feature is disabled.
    #[error("config file support requires the `config-file` feature")]
    FileSupportDisabled,
}

#[cfg(feature = "config-file")]
fn load_file(config: &mut AlgebraConfig, path: &Path) -> Result<(), ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let table: toml::Table =
        toml::from_str(&contents).map_err(|err| ConfigError::Parse(err.to_string()))?;
    for (key, value) in &table {
        let value = match value {
            toml::Value::String(s) => s.clone(),
            toml::Value::Integer(i) => i.to_string(),
            other => {
                return Err(ConfigError::InvalidValue {
                    key: key.clone(),
                    value: other.to_string(),
                });
            }
        };
        apply_kv(config, key, &value)?;
    }
    Ok(())
}

#[cfg(not(feature = "config-file"))]
fn load_file(_config: &mut AlgebraConfig, _path: &Path) -> Result<(), ConfigError> {
    Err(ConfigError::FileSupportDisabled)
}

fn apply_kv(config: &mut AlgebraConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let name = key.strip_prefix(ENV_PREFIX).unwrap_or(key).to_ascii_lowercase();
    match name.as_str() {
        "loop_limit" => config.loop_limit = parse_limit(value, key)?,
        "min_output" => config.min_output = parse_min_output(value, key)?,
        _ => return Err(ConfigError::InvalidOverride(key.to_string())),
    }
    Ok(())
}

fn parse_limit(value: &str, key: &str) -> Result<Option<usize>, ConfigError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    parse_usize(value, key).map(Some)
}

fn parse_min_output(value: &str, key: &str) -> Result<MinOutput, ConfigError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("all") {
        return Ok(MinOutput::All);
    }
    parse_usize(value, key).map(MinOutput::AtLeast)
}

fn parse_usize(value: &str, key: &str) -> Result<usize, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
