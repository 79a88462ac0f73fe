//! Configuration for resolution and policy.
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via the builder's `with_*` methods)
//! 2. Environment variables (`FSALIAS_*`)
//! 3. An explicit YAML file passed to the builder
//! 4. The user config file (`~/.fsalias/config.yaml`), if present
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use fsalias::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .with_env(false)
//!     .with_max_symlink_depth(64)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.max_symlink_depth, 64);
//! ```

mod environment;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Resolved configuration for resource resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum symlink chain length followed during canonicalization.
    pub max_symlink_depth: usize,
    /// Whether policy may exempt pure symlink redirection.
    pub allow_symlink_aliases: bool,
    /// Base directory for relative requested forms; the process
    /// current directory when unset.
    pub base_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_symlink_depth: 40,
            allow_symlink_aliases: false,
            base_dir: None,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when a field is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.max_symlink_depth == 0 {
            return Err(Error::Validation {
                field: "max_symlink_depth".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(base) = &self.base_dir {
            if !base.is_absolute() {
                return Err(Error::Validation {
                    field: "base_dir".to_string(),
                    message: "must be an absolute path".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Partial configuration as read from a file or the environment.
///
/// Unset fields leave the lower-precedence value in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct PartialConfig {
    pub(crate) max_symlink_depth: Option<usize>,
    pub(crate) allow_symlink_aliases: Option<bool>,
    pub(crate) base_dir: Option<PathBuf>,
}

impl PartialConfig {
    fn apply_to(&self, config: &mut Config) {
        if let Some(depth) = self.max_symlink_depth {
            config.max_symlink_depth = depth;
        }
        if let Some(allow) = self.allow_symlink_aliases {
            config.allow_symlink_aliases = allow;
        }
        if let Some(base) = &self.base_dir {
            config.base_dir = Some(base.clone());
        }
    }
}

/// Builder merging configuration sources by precedence.
///
/// # Examples
///
/// ```no_run
/// use fsalias::ConfigBuilder;
/// use std::path::Path;
///
/// let config = ConfigBuilder::new()
///     .with_config_file(Path::new("/etc/fsalias/config.yaml"))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config_file: Option<PathBuf>,
    skip_user_config: bool,
    skip_env: bool,
    overrides: PartialConfig,
}

impl ConfigBuilder {
    /// Create a builder with no sources beyond the defaults, the user
    /// config file and the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge an explicit YAML configuration file.
    ///
    /// Unlike the user config file, an explicit file must exist;
    /// `build` fails otherwise.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Control whether the user config file is consulted.
    #[must_use]
    pub fn with_user_config(mut self, enabled: bool) -> Self {
        self.skip_user_config = !enabled;
        self
    }

    /// Control whether `FSALIAS_*` environment variables are applied.
    #[must_use]
    pub fn with_env(mut self, enabled: bool) -> Self {
        self.skip_env = !enabled;
        self
    }

    /// Override the maximum symlink depth.
    #[must_use]
    pub fn with_max_symlink_depth(mut self, depth: usize) -> Self {
        self.overrides.max_symlink_depth = Some(depth);
        self
    }

    /// Override whether symlink aliases may be exempted by policy.
    #[must_use]
    pub fn with_allow_symlink_aliases(mut self, allow: bool) -> Self {
        self.overrides.allow_symlink_aliases = Some(allow);
        self
    }

    /// Override the base directory for relative requested forms.
    #[must_use]
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        self.overrides.base_dir = Some(base.to_path_buf());
        self
    }

    /// Merge all sources and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for unparsable YAML,
    /// [`Error::Io`] for an unreadable explicit file, and
    /// [`Error::Validation`] for out-of-range values (including
    /// malformed environment variables).
    pub fn build(&self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_user_config {
            if let Some(user_file) = user_config_path() {
                if user_file.exists() {
                    load_file(&user_file)?.apply_to(&mut config);
                }
            }
        }

        if let Some(file) = &self.config_file {
            load_file(file)?.apply_to(&mut config);
        }

        if !self.skip_env {
            environment::from_env()?.apply_to(&mut config);
        }

        self.overrides.apply_to(&mut config);

        config.validate()?;
        Ok(config)
    }
}

fn user_config_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".fsalias").join("config.yaml"))
}

fn load_file(path: &Path) -> Result<PartialConfig> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}
