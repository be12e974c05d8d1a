//! Implementation of POM generation.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::manifest::MANIFEST_NAME;
use crate::core::platform::Platform;
use crate::core::plugin::{Coordinate, PluginKind};
use crate::ops::build::{build_manifest, BuildSettings};
use crate::ops::merge::{merge, MergeOutcome};
use crate::util::fs::write_atomic;

/// Options for generating a POM.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Existing POM to merge with
    pub existing: Option<PathBuf>,

    /// Where to write the result
    pub output: PathBuf,

    /// Platform the POM targets
    pub platform: Platform,

    /// Values for the canonical tree
    pub settings: BuildSettings,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            existing: None,
            output: PathBuf::from(MANIFEST_NAME),
            platform: Platform::current(),
            settings: BuildSettings::default(),
        }
    }
}

/// Result of a generation run.
#[derive(Debug)]
pub struct GenerateResult {
    /// Path the POM was written to
    pub output: PathBuf,

    /// Platform the POM was generated for
    pub platform: Platform,

    /// Coordinates of the plugins in the written POM, in order
    pub plugins: Vec<Coordinate>,

    /// Property keys in the written POM, in order
    pub properties: Vec<String>,

    /// Coordinates of the dependencies in the written POM, in order
    pub dependencies: Vec<Coordinate>,

    /// What happened with the existing POM
    pub merge: MergeOutcome,
}

impl GenerateResult {
    /// Known plugins present in the output.
    pub fn plugin_kinds(&self) -> Vec<PluginKind> {
        self.plugins.iter().filter_map(PluginKind::identify).collect()
    }

    /// Whether the output carries the Linux packaging plugins.
    pub fn has_packaging(&self) -> bool {
        self.plugin_kinds()
            .iter()
            .any(|kind| matches!(kind, PluginKind::Rpm | PluginKind::Deb))
    }
}

/// Generate a POM, merge it with an existing one if given, and write it.
///
/// The output file is replaced atomically once the document is complete.
/// A missing or unusable existing POM is not an error; see
/// [`GenerateResult::merge`].
pub fn generate(opts: &GenerateOptions) -> Result<GenerateResult> {
    tracing::debug!(
        platform = %opts.platform,
        existing = ?opts.existing,
        "generating {}",
        opts.output.display()
    );

    let mut manifest = build_manifest(opts.platform, &opts.settings);
    let outcome = merge(&mut manifest, opts.existing.as_deref());

    let xml = manifest.to_xml();
    write_atomic(&opts.output, &xml)
        .with_context(|| format!("failed to write POM to {}", opts.output.display()))?;

    tracing::debug!("wrote {}", opts.output.display());

    Ok(GenerateResult {
        output: opts.output.clone(),
        platform: opts.platform,
        plugins: manifest.plugin_coordinates(),
        properties: manifest
            .property_keys()
            .into_iter()
            .map(str::to_string)
            .collect(),
        dependencies: manifest.dependency_coordinates(),
        merge: outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::assertions::{assert_error_contains, assert_ok, assert_plugins};
    use crate::test_support::{
        create_test_project, read_generated, write_fixture, DEPENDENCIES_POM, IDENTITY_POM,
        MALFORMED_POM, PROPERTIES_POM,
    };
    use std::path::Path;

    fn opts_in(dir: &Path, platform: Platform) -> GenerateOptions {
        GenerateOptions {
            existing: None,
            output: dir.join(MANIFEST_NAME),
            platform,
            settings: BuildSettings::default(),
        }
    }

    #[test]
    fn test_generate_linux_writes_three_plugins() {
        let project = create_test_project(None);
        let opts = opts_in(project.path(), Platform::Linux);

        let result = assert_ok(generate(&opts));
        assert_eq!(result.output, project.path().join("pom.xml"));
        assert_eq!(result.plugins.len(), 3);
        assert!(result.has_packaging());
        assert!(matches!(result.merge, MergeOutcome::NoExisting));

        let written = read_generated(&result.output);
        assert_plugins(&written, &["native-maven-plugin", "rpm-maven-plugin", "jdeb"]);
        assert_eq!(written.group_id(), Some("com.example"));
    }

    #[test]
    fn test_generate_macos_writes_one_plugin() {
        let project = create_test_project(None);
        let result = assert_ok(generate(&opts_in(project.path(), Platform::MacOs)));

        assert_eq!(result.plugin_kinds(), vec![PluginKind::NativeImage]);
        assert!(!result.has_packaging());
        assert_plugins(&read_generated(&result.output), &["native-maven-plugin"]);
    }

    #[test]
    fn test_generate_output_text() {
        let project = create_test_project(None);
        let result = assert_ok(generate(&opts_in(project.path(), Platform::MacOs)));

        let text = std::fs::read_to_string(&result.output).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" ?>\n<project xmlns=\"http://maven.apache.org/POM/4.0.0\""));
        assert!(text.contains("xsi:schemaLocation=\"http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd\""));
        assert!(text.contains("\n  <modelVersion>4.0.0</modelVersion>\n"));
        assert!(text.contains("<version>${native.maven.plugin.version}</version>"));
        assert!(text.lines().all(|line| !line.trim().is_empty()));
    }

    #[test]
    fn test_generate_merges_existing_into_same_file() {
        let project = create_test_project(Some(IDENTITY_POM));
        let mut opts = opts_in(project.path(), Platform::Linux);
        opts.existing = Some(project.path().join("pom.xml"));

        let result = assert_ok(generate(&opts));
        assert!(result.merge.report().is_some());
        assert_eq!(result.properties.last().map(String::as_str), Some("mainClass"));
        assert!(result.dependencies.is_empty());

        let written = read_generated(&result.output);
        assert_eq!(written.group_id(), Some("com.test"));
        assert_eq!(written.artifact_id(), Some("test-app"));
        assert_eq!(written.version(), Some("3.0.0"));
        assert_eq!(written.property("mainClass"), Some("com.test.Main"));
        assert_eq!(written.plugins().len(), 3);
    }

    #[test]
    fn test_generate_with_properties() {
        let project = create_test_project(None);
        let existing = write_fixture(project.path(), "old.xml", PROPERTIES_POM);
        let mut opts = opts_in(project.path(), Platform::MacOs);
        opts.existing = Some(existing);

        let result = assert_ok(generate(&opts));
        let written = read_generated(&result.output);
        assert_eq!(written.property("custom.property"), Some("custom-value"));
        assert_eq!(written.property("maven.compiler.source"), Some("11"));
    }

    #[test]
    fn test_generate_reports_carried_dependencies() {
        let project = create_test_project(None);
        let existing = write_fixture(project.path(), "old.xml", DEPENDENCIES_POM);
        let mut opts = opts_in(project.path(), Platform::MacOs);
        opts.existing = Some(existing);

        let result = assert_ok(generate(&opts));
        let deps: Vec<_> = result.dependencies.iter().map(|c| c.to_string()).collect();
        assert_eq!(deps.len(), 3);
        assert_eq!(deps[0], deps[2]);
        assert_eq!(result.properties.len(), 4);
    }

    #[test]
    fn test_generate_malformed_existing_still_writes() {
        let project = create_test_project(None);
        let existing = write_fixture(project.path(), "broken.xml", MALFORMED_POM);
        let mut opts = opts_in(project.path(), Platform::Linux);
        opts.existing = Some(existing);

        let result = assert_ok(generate(&opts));
        assert!(result.merge.error().is_some());

        let written = read_generated(&result.output);
        assert_eq!(written.group_id(), Some("com.example"));
        assert_eq!(written.plugins().len(), 3);
    }

    #[test]
    fn test_generate_missing_existing_is_ignored() {
        let project = create_test_project(None);
        let mut opts = opts_in(project.path(), Platform::Linux);
        opts.existing = Some(project.path().join("nonexistent.xml"));

        let result = assert_ok(generate(&opts));
        assert!(matches!(result.merge, MergeOutcome::NoExisting));
        assert_eq!(read_generated(&result.output).group_id(), Some("com.example"));
    }

    #[test]
    fn test_generate_unwritable_output_fails() {
        let project = create_test_project(None);
        let mut opts = opts_in(project.path(), Platform::Linux);
        opts.output = project.path().join("no-such-dir").join("pom.xml");

        assert_error_contains(generate(&opts), "failed to write POM");
        assert!(!opts.output.exists());
    }

    #[test]
    fn test_generate_is_idempotent() {
        let project = create_test_project(None);
        let opts = opts_in(project.path(), Platform::Linux);

        assert_ok(generate(&opts));
        let first = std::fs::read_to_string(&opts.output).unwrap();
        assert_ok(generate(&opts));
        let second = std::fs::read_to_string(&opts.output).unwrap();
        assert_eq!(first, second);
    }
}
