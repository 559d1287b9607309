//! Configuration for source transforms.
//!
//! Provides [`SourceCodeConfig`], which hosts build in code or load from a
//! TOML file using the `confyg` crate. Only the file layer is consulted;
//! the transform never reads environment variables.

use confyg::Confygery;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Options for a [`SourceTransform`](crate::SourceTransform).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceCodeConfig {
    /// Root against which local references are resolved.
    ///
    /// `None` means the process working directory, captured once when the
    /// transform is constructed.
    pub base_dir: Option<PathBuf>,

    /// Upper bound on in-flight fetches per document.
    ///
    /// `None` starts every fetch at once.
    pub max_concurrency: Option<usize>,

    /// User-Agent header sent with remote requests.
    pub user_agent: Option<String>,
}

impl SourceCodeConfig {
    /// Create a config with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base directory for local references.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Bound the number of fetches in flight at once.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    /// Set the User-Agent header for remote requests.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        builder
            .add_file(&path.to_string_lossy())
            .map_err(|e| Error::config(format!("config file: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from an inline TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| Error::config(format!("config parse: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Check option values that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == Some(0) {
            return Err(Error::config("max_concurrency must be at least 1"));
        }
        Ok(())
    }

    /// The concurrency bound, if any.
    pub fn concurrency_limit(&self) -> Result<Option<NonZeroUsize>> {
        self.validate()?;
        Ok(self.max_concurrency.and_then(NonZeroUsize::new))
    }

    /// Resolve the base directory to an absolute path.
    ///
    /// Relative base directories are anchored at the current working
    /// directory; a missing one is the working directory itself.
    pub fn resolve_base_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(dir) if dir.is_absolute() => Ok(crate::resolve::normalize(dir)),
            Some(dir) => Ok(crate::resolve::normalize(&current_dir()?.join(dir))),
            None => current_dir(),
        }
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| Error::config(format!("Could not determine base directory: {e}")))
}
