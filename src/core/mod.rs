//! Core data structures.
//!
//! - The owned XML tree (`node`) and its renderer (`render`)
//! - The POM descriptor with typed tag accessors (`manifest`)
//! - Plugin block constructors (`plugin`)
//! - Host platform classification (`platform`)

pub mod manifest;
pub mod node;
pub mod platform;
pub mod plugin;
pub mod render;

pub use manifest::{Manifest, ManifestError, PomTag, MANIFEST_NAME, POM_NAMESPACE};
pub use node::{Attribute, ManifestNode, QName};
pub use platform::Platform;
pub use plugin::{Coordinate, PluginKind, RpmLabels};
