//! Test utilities for unit tests.
//!
//! Fixture documents live in [`fixtures`]; the helpers here place them in
//! temporary project directories.

pub mod fixtures;

use std::path::{Path, PathBuf};

use crate::core::manifest::Manifest;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Helper to create a temporary project directory.
///
/// When `existing` is given it is written as `pom.xml` inside the
/// directory. Dropping the TempDir cleans everything up.
pub fn create_test_project(existing: Option<&str>) -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().expect("failed to create temp dir");
    if let Some(content) = existing {
        write_fixture(tmp.path(), "pom.xml", content);
    }
    tmp
}

/// Write `content` to `dir/name` and return the full path.
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write fixture");
    path
}

/// Parse a fixture document, panicking on failure.
pub fn parse_fixture(content: &str) -> Manifest {
    Manifest::parse(content, Path::new("fixture.xml")).expect("fixture must parse")
}

/// Read back and parse a generated POM.
pub fn read_generated(path: &Path) -> Manifest {
    Manifest::load(path).expect("generated POM must parse")
}

/// Assertion helpers for testing.
pub mod assertions {
    use crate::core::manifest::Manifest;

    /// Assert that a result is Ok and return the value.
    pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("expected Ok, got Err: {:?}", e),
        }
    }

    /// Assert that an error message contains a substring.
    pub fn assert_error_contains<T: std::fmt::Debug>(
        result: Result<T, anyhow::Error>,
        substring: &str,
    ) {
        match result {
            Ok(v) => panic!("expected Err containing '{}', got Ok: {:?}", substring, v),
            Err(e) => {
                let msg = format!("{:#}", e);
                assert!(
                    msg.contains(substring),
                    "error '{}' does not contain '{}'",
                    msg,
                    substring
                );
            }
        }
    }

    /// Assert the artifact ids of the declared plugins, in order.
    pub fn assert_plugins(manifest: &Manifest, expected: &[&str]) {
        let actual: Vec<_> = manifest
            .plugin_coordinates()
            .into_iter()
            .map(|c| c.artifact_id)
            .collect();
        assert_eq!(actual, expected, "unexpected plugin list");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_project() {
        let project = create_test_project(Some(IDENTITY_POM));
        assert!(project.path().join("pom.xml").exists());

        let empty = create_test_project(None);
        assert!(!empty.path().join("pom.xml").exists());
    }

    #[test]
    fn test_fixtures_parse() {
        for fixture in [IDENTITY_POM, PROPERTIES_POM, DEPENDENCIES_POM, PLAIN_POM] {
            parse_fixture(fixture);
        }
        assert!(Manifest::parse(MALFORMED_POM, Path::new("x")).is_err());
    }
}
