//! Plugin blocks wired into the generated POM.
//!
//! Each plugin the generator knows about has one constructor here, so its
//! exact shape is a named unit that can be tested on its own.

use std::fmt;

use crate::core::manifest::{pom_leaf, pom_name, PomTag};
use crate::core::node::ManifestNode;

/// Group Maven assumes for plugins declared without a `groupId`.
pub const DEFAULT_PLUGIN_GROUP: &str = "org.apache.maven.plugins";

/// Property holding the pinned native-image plugin version.
pub const NATIVE_PLUGIN_VERSION_PROPERTY: &str = "native.maven.plugin.version";

/// Maven coordinates of a plugin or dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

impl Coordinate {
    pub fn new(group_id: &str, artifact_id: &str, version: Option<&str>) -> Self {
        Coordinate {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.map(str::to_string),
        }
    }

    /// Read coordinates from a `plugin` or `dependency` node.
    ///
    /// A missing `groupId` falls back to `default_group`; without one the
    /// node yields `None`, as do nodes without an `artifactId`.
    pub fn from_node(node: &ManifestNode, default_group: Option<&str>) -> Option<Self> {
        let text = |tag: PomTag| node.child(&tag.qname()).and_then(ManifestNode::text);

        let artifact_id = text(PomTag::ArtifactId)?;
        let group_id = text(PomTag::GroupId).or(default_group)?;
        Some(Coordinate::new(group_id, artifact_id, text(PomTag::Version)))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        Ok(())
    }
}

/// The plugins the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind {
    /// GraalVM `native-maven-plugin`.
    NativeImage,
    /// Codehaus `rpm-maven-plugin`.
    Rpm,
    /// `jdeb` Debian packaging.
    Deb,
}

impl PluginKind {
    pub fn group_id(&self) -> &'static str {
        match self {
            PluginKind::NativeImage => "org.graalvm.buildtools",
            PluginKind::Rpm => "org.codehaus.mojo",
            PluginKind::Deb => "org.vafer",
        }
    }

    pub fn artifact_id(&self) -> &'static str {
        match self {
            PluginKind::NativeImage => "native-maven-plugin",
            PluginKind::Rpm => "rpm-maven-plugin",
            PluginKind::Deb => "jdeb",
        }
    }

    /// Version as written in the POM. The native-image version goes
    /// through a property so it can be bumped in one place.
    pub fn version_expr(&self) -> String {
        match self {
            PluginKind::NativeImage => format!("${{{}}}", NATIVE_PLUGIN_VERSION_PROPERTY),
            PluginKind::Rpm => "2.2.0".to_string(),
            PluginKind::Deb => "1.10".to_string(),
        }
    }

    /// Coordinates as written in the POM.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(
            self.group_id(),
            self.artifact_id(),
            Some(self.version_expr().as_str()),
        )
    }

    /// Maven goal invocation that drives this plugin.
    pub fn goal_hint(&self) -> &'static str {
        match self {
            PluginKind::NativeImage => "mvn clean package native:compile",
            PluginKind::Rpm => "mvn rpm:rpm",
            PluginKind::Deb => "mvn jdeb:jdeb",
        }
    }

    /// Find which known plugin, if any, a coordinate refers to.
    pub fn identify(coordinate: &Coordinate) -> Option<PluginKind> {
        [PluginKind::NativeImage, PluginKind::Rpm, PluginKind::Deb]
            .into_iter()
            .find(|kind| {
                kind.group_id() == coordinate.group_id
                    && kind.artifact_id() == coordinate.artifact_id
            })
    }
}

/// RPM packaging labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpmLabels {
    /// RPM `Group:` header.
    pub group: String,
    /// RPM `Packager:` header.
    pub packager: String,
}

impl Default for RpmLabels {
    fn default() -> Self {
        RpmLabels {
            group: "Applications/Development".to_string(),
            packager: "JDevtools".to_string(),
        }
    }
}

fn plugin_head(kind: PluginKind) -> ManifestNode {
    ManifestNode::new(PomTag::Plugin.qname())
        .with_child(pom_leaf("groupId", kind.group_id()))
        .with_child(pom_leaf("artifactId", kind.artifact_id()))
        .with_child(pom_leaf("version", kind.version_expr()))
}

/// GraalVM native-image plugin.
///
/// `mainClass` is deliberately left as the unresolved `${mainClass}`
/// property for the project to define.
pub fn native_image_plugin() -> ManifestNode {
    let build_args = ManifestNode::new(pom_name("buildArgs"))
        .with_child(pom_leaf("buildArg", "--no-fallback"))
        .with_child(pom_leaf("buildArg", "--enable-url-protocols=http,https"));

    let configuration = ManifestNode::new(PomTag::Configuration.qname())
        .with_child(pom_leaf("imageName", "${project.artifactId}"))
        .with_child(pom_leaf("mainClass", "${mainClass}"))
        .with_child(build_args);

    plugin_head(PluginKind::NativeImage)
        .with_child(pom_leaf(PomTag::Extensions.local_name(), "true"))
        .with_child(configuration)
}

/// RPM packaging plugin.
pub fn rpm_plugin(labels: &RpmLabels) -> ManifestNode {
    let configuration = ManifestNode::new(PomTag::Configuration.qname())
        .with_child(pom_leaf("name", "${project.artifactId}"))
        .with_child(pom_leaf("version", "${project.version}"))
        .with_child(pom_leaf("group", labels.group.as_str()))
        .with_child(pom_leaf("packager", labels.packager.as_str()));

    plugin_head(PluginKind::Rpm).with_child(configuration)
}

/// DEB packaging plugin, installing the built jar under `/usr/share/<artifact>`.
pub fn deb_plugin() -> ManifestNode {
    let mapper = ManifestNode::new(pom_name("mapper"))
        .with_child(pom_leaf("type", "perm"))
        .with_child(pom_leaf("prefix", "/usr/share/${project.artifactId}"));

    let data = ManifestNode::new(pom_name("data"))
        .with_child(pom_leaf(
            "src",
            "${project.build.directory}/${project.build.finalName}.jar",
        ))
        .with_child(pom_leaf("type", "file"))
        .with_child(mapper);

    let configuration = ManifestNode::new(PomTag::Configuration.qname())
        .with_child(ManifestNode::new(pom_name("dataSet")).with_child(data));

    plugin_head(PluginKind::Deb).with_child(configuration)
}
