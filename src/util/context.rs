//! Global context for generator runs.
//!
//! Provides centralized access to the working directory and the
//! configuration locations derived from it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{self, Config, CONFIG_DIR, CONFIG_FILE};

/// Global context containing configuration paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global settings (~/.jcompile/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_dirs(cwd, Self::default_home()))
    }

    /// Create a GlobalContext with explicit working and home directories.
    pub fn with_dirs(cwd: PathBuf, home: PathBuf) -> Self {
        GlobalContext { cwd, home }
    }

    fn default_home() -> PathBuf {
        config::global_config_dir().unwrap_or_else(|| PathBuf::from(CONFIG_DIR))
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join(CONFIG_FILE)
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        config::project_config_path(&self.cwd)
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self) -> Config {
        let global = self.config_path();
        let project = self.project_config_path();
        tracing::debug!(
            "loading config from {} and {}",
            global.display(),
            project.display()
        );
        config::load_config(&global, &project)
    }

    /// Resolve a path against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
