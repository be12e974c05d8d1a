//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.jcompile/config.toml` - User-wide defaults
//! - Project: `.jcompile/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::plugin::RpmLabels;
use crate::ops::build::BuildSettings;

/// Name of the configuration directory, both global and per project.
pub const CONFIG_DIR: &str = ".jcompile";

/// Name of the configuration file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub generate: GenerateConfig,

    /// Java compiler settings
    pub java: JavaConfig,

    /// GraalVM native-image settings
    pub native: NativeConfig,

    /// Linux packaging settings
    pub packaging: PackagingConfig,
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Where the generated POM is written
    pub output: Option<PathBuf>,
}

/// Java compiler configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaConfig {
    /// Value for `maven.compiler.source` and `maven.compiler.target`
    pub release: Option<String>,

    /// Value for `project.build.sourceEncoding`
    pub encoding: Option<String>,
}

/// Native-image configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NativeConfig {
    /// Pinned `native-maven-plugin` version
    pub plugin_version: Option<String>,
}

/// RPM packaging labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingConfig {
    pub packager: Option<String>,
    pub group: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.generate.output.is_some() {
            self.generate.output = other.generate.output;
        }

        if other.java.release.is_some() {
            self.java.release = other.java.release;
        }
        if other.java.encoding.is_some() {
            self.java.encoding = other.java.encoding;
        }

        if other.native.plugin_version.is_some() {
            self.native.plugin_version = other.native.plugin_version;
        }

        if other.packaging.packager.is_some() {
            self.packaging.packager = other.packaging.packager;
        }
        if other.packaging.group.is_some() {
            self.packaging.group = other.packaging.group;
        }
    }

    /// Generation settings with unset values filled from the defaults.
    pub fn build_settings(&self) -> BuildSettings {
        let defaults = BuildSettings::default();
        let rpm_defaults = RpmLabels::default();

        BuildSettings {
            java_release: self.java.release.clone().unwrap_or(defaults.java_release),
            encoding: self.java.encoding.clone().unwrap_or(defaults.encoding),
            native_plugin_version: self
                .native
                .plugin_version
                .clone()
                .unwrap_or(defaults.native_plugin_version),
            rpm: RpmLabels {
                group: self.packaging.group.clone().unwrap_or(rpm_defaults.group),
                packager: self
                    .packaging
                    .packager
                    .clone()
                    .unwrap_or(rpm_defaults.packager),
            },
        }
    }

    /// Configured output path, if any.
    pub fn output(&self) -> Option<&Path> {
        self.generate.output.as_deref()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.jcompile/config.toml)
/// 2. Global config (~/.jcompile/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global config directory (~/.jcompile).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the project config path (.jcompile/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}
