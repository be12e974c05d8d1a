//! The `pom.xml` descriptor and its typed accessors.
//!
//! A [`Manifest`] owns a [`ManifestNode`] tree rooted at `project`. Known
//! POM tags are addressed through [`PomTag`] so lookups never rebuild
//! namespaced tag strings, and only children in the POM namespace count.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::node::{ManifestNode, QName, XSI_NAMESPACE};
use crate::core::plugin::{Coordinate, DEFAULT_PLUGIN_GROUP};
use crate::core::render::{render, RenderOptions};
use crate::util::diagnostic::{suggestions, Diagnostic, MalformedManifestError};

/// Namespace of every element in a POM 4.0.0 document.
pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";

/// Value of the root `xsi:schemaLocation` attribute.
pub const POM_SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd";

/// The only supported POM model version.
pub const MODEL_VERSION: &str = "4.0.0";

/// Conventional file name of the descriptor.
pub const MANIFEST_NAME: &str = "pom.xml";

/// POM tags the crate reads or writes directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PomTag {
    Project,
    ModelVersion,
    GroupId,
    ArtifactId,
    Version,
    Name,
    Description,
    Properties,
    Build,
    Plugins,
    Plugin,
    Extensions,
    Configuration,
    Dependencies,
    Dependency,
}

impl PomTag {
    /// Local element name of this tag.
    pub fn local_name(&self) -> &'static str {
        match self {
            PomTag::Project => "project",
            PomTag::ModelVersion => "modelVersion",
            PomTag::GroupId => "groupId",
            PomTag::ArtifactId => "artifactId",
            PomTag::Version => "version",
            PomTag::Name => "name",
            PomTag::Description => "description",
            PomTag::Properties => "properties",
            PomTag::Build => "build",
            PomTag::Plugins => "plugins",
            PomTag::Plugin => "plugin",
            PomTag::Extensions => "extensions",
            PomTag::Configuration => "configuration",
            PomTag::Dependencies => "dependencies",
            PomTag::Dependency => "dependency",
        }
    }

    /// Qualified name of this tag in the POM namespace.
    pub fn qname(&self) -> QName {
        pom_name(self.local_name())
    }
}

/// Identity fields in the order the merge visits them.
pub const IDENTITY_FIELDS: [PomTag; 5] = [
    PomTag::GroupId,
    PomTag::ArtifactId,
    PomTag::Version,
    PomTag::Name,
    PomTag::Description,
];

/// Qualified name for an arbitrary local name in the POM namespace.
pub fn pom_name(local: &str) -> QName {
    QName::new(POM_NAMESPACE, local)
}

/// A POM element holding only text.
pub fn pom_leaf(local: &str, text: impl Into<String>) -> ManifestNode {
    ManifestNode::leaf(pom_name(local), text)
}

/// Errors loading an existing descriptor.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        text: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("`{}` is not a POM: root element is `{found}`, expected `project`", path.display())]
    NotAProject { path: PathBuf, found: String },
}

impl ManifestError {
    /// Path of the document that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            ManifestError::Read { path, .. }
            | ManifestError::Parse { path, .. }
            | ManifestError::NotAProject { path, .. } => path,
        }
    }

    /// Source-annotated report for parse errors.
    pub fn to_source_report(&self) -> Option<MalformedManifestError> {
        match self {
            ManifestError::Parse { path, text, source } => {
                let pos = source.pos();
                Some(MalformedManifestError::new(
                    &path.display().to_string(),
                    text,
                    pos.row,
                    pos.col,
                    source.to_string(),
                ))
            }
            _ => None,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ManifestError::Read { path, source } => {
                Diagnostic::warning("could not read existing POM; generating without merge")
                    .with_location(path)
                    .with_context(source.to_string())
                    .with_suggestion(suggestions::CHECK_EXISTING)
            }
            ManifestError::Parse { path, source, .. } => {
                let pos = source.pos();
                Diagnostic::warning("existing POM is not well-formed XML; generating without merge")
                    .with_location(path)
                    .with_context(format!("{} (line {}, column {})", source, pos.row, pos.col))
                    .with_suggestion(suggestions::FIX_EXISTING)
            }
            ManifestError::NotAProject { path, found } => {
                Diagnostic::warning("existing document is not a POM; generating without merge")
                    .with_location(path)
                    .with_context(format!("root element is `{}`", found))
                    .with_suggestion(suggestions::CHECK_EXISTING)
            }
        }
    }
}

/// A `pom.xml` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    root: ManifestNode,
}

impl Manifest {
    /// Create an empty `project` root with the schema location hint.
    pub fn new() -> Self {
        let root = ManifestNode::new(PomTag::Project.qname())
            .with_attribute(QName::new(XSI_NAMESPACE, "schemaLocation"), POM_SCHEMA_LOCATION);
        Manifest { root }
    }

    /// Wrap an already-parsed root element.
    ///
    /// The root must be named `project`; its namespace is not verified.
    pub fn from_root(root: ManifestNode, path: &Path) -> Result<Self, ManifestError> {
        if root.name().local != PomTag::Project.local_name() {
            return Err(ManifestError::NotAProject {
                path: path.to_path_buf(),
                found: root.name().local.clone(),
            });
        }
        Ok(Manifest { root })
    }

    /// Parse a descriptor from text. `path` is only used for error reporting.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ManifestError> {
        let root = ManifestNode::parse(text).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            text: text.to_string(),
            source,
        })?;
        Self::from_root(root, path)
    }

    /// Read and parse a descriptor from disk.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    pub fn root(&self) -> &ManifestNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut ManifestNode {
        &mut self.root
    }

    pub fn into_root(self) -> ManifestNode {
        self.root
    }

    /// Direct child of the root for a known tag.
    pub fn child(&self, tag: PomTag) -> Option<&ManifestNode> {
        self.root.child(&tag.qname())
    }

    pub fn child_mut(&mut self, tag: PomTag) -> Option<&mut ManifestNode> {
        self.root.child_mut(&tag.qname())
    }

    /// Text of a direct child of the root.
    pub fn field(&self, tag: PomTag) -> Option<&str> {
        self.child(tag).and_then(ManifestNode::text)
    }

    pub fn group_id(&self) -> Option<&str> {
        self.field(PomTag::GroupId)
    }

    pub fn artifact_id(&self) -> Option<&str> {
        self.field(PomTag::ArtifactId)
    }

    pub fn version(&self) -> Option<&str> {
        self.field(PomTag::Version)
    }

    pub fn properties(&self) -> Option<&ManifestNode> {
        self.child(PomTag::Properties)
    }

    /// Value of a property in the `properties` block.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties()
            .and_then(|props| props.child(&pom_name(key)))
            .and_then(ManifestNode::text)
    }

    /// Property keys in declaration order.
    pub fn property_keys(&self) -> Vec<&str> {
        self.properties()
            .map(|props| {
                props
                    .children()
                    .iter()
                    .map(|p| p.name().local.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Plugin nodes under `build/plugins`.
    pub fn plugins(&self) -> Vec<&ManifestNode> {
        let path = [PomTag::Build.qname(), PomTag::Plugins.qname()];
        let plugin = PomTag::Plugin.qname();
        match self.root.descend(&path) {
            Some(plugins) => plugins
                .children()
                .iter()
                .filter(|c| c.name() == &plugin)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Coordinates of every declared plugin, in order.
    pub fn plugin_coordinates(&self) -> Vec<Coordinate> {
        self.plugins()
            .into_iter()
            .filter_map(|node| Coordinate::from_node(node, Some(DEFAULT_PLUGIN_GROUP)))
            .collect()
    }

    pub fn dependencies(&self) -> Option<&ManifestNode> {
        self.child(PomTag::Dependencies)
    }

    /// Coordinates of every declared dependency, in order.
    pub fn dependency_coordinates(&self) -> Vec<Coordinate> {
        let dependency = PomTag::Dependency.qname();
        self.dependencies()
            .map(|deps| {
                deps.children_named(&dependency)
                    .filter_map(|node| Coordinate::from_node(node, None))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Render to pretty-printed XML text.
    pub fn to_xml(&self) -> String {
        render(
            &self.root,
            &RenderOptions {
                default_namespace: Some(POM_NAMESPACE),
                declaration: true,
            },
        )
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}
