//! Host platform classification.
//!
//! Only the Linux case changes what gets generated; every other value,
//! including an unrecognized OS, means "no packaging plugins".

use std::fmt;
use std::str::FromStr;

/// Operating system family of the machine the POM is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Unknown,
}

impl Platform {
    /// Classify the running host.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Classify an OS identifier as reported by `std::env::consts::OS`.
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            _ => Platform::Unknown,
        }
    }

    pub fn is_linux(&self) -> bool {
        matches!(self, Platform::Linux)
    }

    /// Short identifier used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "mac",
            Platform::Windows => "windows",
            Platform::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Platform::Linux),
            "mac" | "macos" | "darwin" => Ok(Platform::MacOs),
            "windows" => Ok(Platform::Windows),
            "unknown" => Ok(Platform::Unknown),
            _ => Err(format!(
                "invalid platform '{}'; expected 'linux', 'macos', 'windows', or 'unknown'",
                s
            )),
        }
    }
}
