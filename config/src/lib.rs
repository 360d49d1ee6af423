//! Configuration loading for deferlint.
//!
//! ```toml
//! [convention]
//! module = "panik"
//! function = "Catch"
//!
//! [scan]
//! exclude = ["vendor/**"]
//! respect_gitignore = false
//! include_hidden = true
//! ```
//!
//! Lookup: an explicit path, then `<root>/deferlint.toml`, then
//! `<config_dir>/deferlint/config.toml`. With no file, defaults apply.
//! Convention names resolve as flag > `DEFERLINT_*` env var > file > default.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use deferlint_types::{ConventionError, ConventionSpec, DEFAULT_FUNCTION, DEFAULT_MODULE};
use deferlint_utils::ScanOptions;

pub const CONFIG_FILE_NAME: &str = "deferlint.toml";
pub const MODULE_ENV: &str = "DEFERLINT_MODULE";
pub const FUNCTION_ENV: &str = "DEFERLINT_FUNCTION";

// Default value function for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} does not exist", .path.display())]
    Missing { path: PathBuf },
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid convention: {0}")]
    Convention(#[from] ConventionError),
    #[error("invalid exclude pattern: {0}")]
    Glob(#[from] globset::Error),
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Missing { path } | Self::Read { path, .. } | Self::Parse { path, .. } => {
                Some(path)
            }
            Self::Convention(_) | Self::Glob(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeferlintConfig {
    pub convention: Option<ConventionConfig>,
    pub scan: Option<ScanConfig>,
}

/// Recovery call every launched task must start with.
#[derive(Debug, Default, Deserialize)]
pub struct ConventionConfig {
    /// Package of the recovery function. Default: "panik".
    pub module: Option<String>,
    /// Recovery function name. Default: "Catch".
    pub function: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub respect_gitignore: bool,
    #[serde(default = "default_true")]
    pub include_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            respect_gitignore: false,
            include_hidden: true,
        }
    }
}

/// Values given on the command line. They win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub module: Option<String>,
    pub function: Option<String>,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub convention: ConventionSpec,
    pub scan: ScanOptions,
    /// File the settings came from, if any.
    pub source: Option<PathBuf>,
}

/// User-level config file: `<config_dir>/deferlint/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deferlint").join("config.toml"))
}

impl DeferlintConfig {
    pub fn from_toml_str(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };
        Self::from_toml_str(path, &content)
    }

    /// Find and load the config for a scan of `root`.
    ///
    /// Returns the file used alongside the parsed config.
    pub fn load(
        explicit: Option<&Path>,
        root: &Path,
    ) -> Result<(Option<PathBuf>, Self), ConfigError> {
        Self::load_with_user_path(explicit, root, config_path())
    }

    fn load_with_user_path(
        explicit: Option<&Path>,
        root: &Path,
        user_path: Option<PathBuf>,
    ) -> Result<(Option<PathBuf>, Self), ConfigError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::Missing {
                    path: path.to_path_buf(),
                });
            }
            return Ok((Some(path.to_path_buf()), Self::load_from(path)?));
        }

        let candidates = std::iter::once(root.join(CONFIG_FILE_NAME)).chain(user_path);
        for candidate in candidates {
            if candidate.is_file() {
                let config = Self::load_from(&candidate)?;
                tracing::debug!(path = %candidate.display(), "Loaded config");
                return Ok((Some(candidate), config));
            }
        }
        Ok((None, Self::default()))
    }

    pub fn resolve(
        self,
        source: Option<PathBuf>,
        overrides: &Overrides,
    ) -> Result<ResolvedConfig, ConfigError> {
        self.resolve_with_env(source, overrides, |key| env::var(key).ok())
    }

    fn resolve_with_env(
        self,
        source: Option<PathBuf>,
        overrides: &Overrides,
        env_var: impl Fn(&str) -> Option<String>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let convention = self.convention.unwrap_or_default();
        let module = overrides
            .module
            .clone()
            .or_else(|| env_var(MODULE_ENV))
            .or(convention.module)
            .unwrap_or_else(|| DEFAULT_MODULE.to_string());
        let function = overrides
            .function
            .clone()
            .or_else(|| env_var(FUNCTION_ENV))
            .or(convention.function)
            .unwrap_or_else(|| DEFAULT_FUNCTION.to_string());
        let convention = ConventionSpec::new(module, function)?;

        let scan = self.scan.unwrap_or_default();
        let scan = ScanOptions {
            respect_gitignore: scan.respect_gitignore,
            include_hidden: scan.include_hidden,
            ..ScanOptions::default()
        }
        .with_excludes(&scan.exclude)?;

        Ok(ResolvedConfig {
            convention,
            scan,
            source,
        })
    }
}
