//! Assembly of the canonical POM for a platform.

use crate::core::manifest::{pom_leaf, Manifest, PomTag, MODEL_VERSION};
use crate::core::node::ManifestNode;
use crate::core::platform::Platform;
use crate::core::plugin::{
    deb_plugin, native_image_plugin, rpm_plugin, RpmLabels, NATIVE_PLUGIN_VERSION_PROPERTY,
};

/// Identity written when no existing POM provides one.
pub const DEFAULT_GROUP_ID: &str = "com.example";
pub const DEFAULT_ARTIFACT_ID: &str = "my-app";
pub const DEFAULT_VERSION: &str = "1.0-SNAPSHOT";

/// Values of the generated tree that configuration may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// Java release for `maven.compiler.source` and `maven.compiler.target`
    pub java_release: String,

    /// `project.build.sourceEncoding`
    pub encoding: String,

    /// Pinned `native-maven-plugin` version
    pub native_plugin_version: String,

    /// Labels for the RPM package
    pub rpm: RpmLabels,
}

impl Default for BuildSettings {
    fn default() -> Self {
        BuildSettings {
            java_release: "11".to_string(),
            encoding: "UTF-8".to_string(),
            native_plugin_version: "0.9.28".to_string(),
            rpm: RpmLabels::default(),
        }
    }
}

/// Build the canonical descriptor.
///
/// The native-image plugin is always present. The RPM and DEB packaging
/// plugins follow it only when `platform` is Linux. Child order is fixed:
/// `modelVersion`, identity, `properties`, `build`.
pub fn build_manifest(platform: Platform, settings: &BuildSettings) -> Manifest {
    let mut manifest = Manifest::new();
    let root = manifest.root_mut();

    root.push(pom_leaf(PomTag::ModelVersion.local_name(), MODEL_VERSION));
    root.push(pom_leaf(PomTag::GroupId.local_name(), DEFAULT_GROUP_ID));
    root.push(pom_leaf(PomTag::ArtifactId.local_name(), DEFAULT_ARTIFACT_ID));
    root.push(pom_leaf(PomTag::Version.local_name(), DEFAULT_VERSION));

    let properties = ManifestNode::new(PomTag::Properties.qname())
        .with_child(pom_leaf("maven.compiler.source", settings.java_release.as_str()))
        .with_child(pom_leaf("maven.compiler.target", settings.java_release.as_str()))
        .with_child(pom_leaf("project.build.sourceEncoding", settings.encoding.as_str()))
        .with_child(pom_leaf(
            NATIVE_PLUGIN_VERSION_PROPERTY,
            settings.native_plugin_version.as_str(),
        ));
    root.push(properties);

    let mut plugins = ManifestNode::new(PomTag::Plugins.qname()).with_child(native_image_plugin());
    if platform.is_linux() {
        plugins.push(rpm_plugin(&settings.rpm));
        plugins.push(deb_plugin());
        tracing::debug!("added Linux packaging plugins (RPM and DEB)");
    }
    root.push(ManifestNode::new(PomTag::Build.qname()).with_child(plugins));

    tracing::debug!(
        platform = %platform,
        plugins = manifest.plugins().len(),
        "built canonical POM"
    );

    manifest
}
