//! Transform configuration.
//!
//! Settings can be built in code with the `with_*` methods or loaded from a JSON file:
//!
//! ```json
//! {
//!   "accessor_prefixes": ["m", "_"],
//!   "reserved_prefix": "$",
//!   "marker_names": ["FieldConstants", "lombok.FieldConstants"],
//!   "print": { "indent_width": 2 }
//! }
//! ```
//!
//! Missing keys keep their defaults; unknown keys are rejected.

use std::path::{Path, PathBuf};

use fieldconst_core::NamingPolicy;
use fieldconst_core::policy::DEFAULT_RESERVED_PREFIX;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::printer::PrintConfig;

/// Marker annotation names recognized by default.
pub const DEFAULT_MARKER_NAMES: [&str; 2] = ["FieldConstants", "lombok.FieldConstants"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    accessor_prefixes: Vec<String>,
    reserved_prefix: String,
    marker_names: Vec<String>,
    print: PrintConfig,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            accessor_prefixes: Vec::new(),
            reserved_prefix: DEFAULT_RESERVED_PREFIX.to_string(),
            marker_names: DEFAULT_MARKER_NAMES.iter().map(|s| s.to_string()).collect(),
            print: PrintConfig::default(),
        }
    }
}

/// Settings consulted by the transform and the printer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigFile", into = "ConfigFile")]
pub struct TransformConfig {
    policy: NamingPolicy,
    marker_names: Vec<String>,
    print: PrintConfig,
}

impl From<ConfigFile> for TransformConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            policy: NamingPolicy::new(file.accessor_prefixes, file.reserved_prefix),
            marker_names: file.marker_names,
            print: file.print,
        }
    }
}

impl From<TransformConfig> for ConfigFile {
    fn from(config: TransformConfig) -> Self {
        Self {
            accessor_prefixes: config.policy.accessor_prefixes().to_vec(),
            reserved_prefix: config.policy.reserved_prefix().to_string(),
            marker_names: config.marker_names,
            print: config.print,
        }
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        ConfigFile::default().into()
    }
}

impl TransformConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn policy(&self) -> &NamingPolicy {
        &self.policy
    }

    pub fn marker_names(&self) -> &[String] {
        &self.marker_names
    }

    pub fn print(&self) -> &PrintConfig {
        &self.print
    }

    /// Set the accessor prefix list
    pub fn with_accessor_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reserved = self.policy.reserved_prefix().to_string();
        self.policy = NamingPolicy::new(prefixes.into_iter().map(Into::into).collect(), reserved);
        self
    }

    /// Set the reserved internal-field prefix
    pub fn with_reserved_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefixes = self.policy.accessor_prefixes().to_vec();
        self.policy = NamingPolicy::new(prefixes, prefix);
        self
    }

    /// Set the recognized marker annotation names
    pub fn with_marker_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.marker_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the printer configuration
    pub fn with_print(mut self, print: PrintConfig) -> Self {
        self.print = print;
        self
    }
}
