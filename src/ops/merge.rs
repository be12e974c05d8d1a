//! Reconciling a generated POM with an existing one.
//!
//! Three rules apply, in order:
//!
//! 1. Identity fields (`groupId`, `artifactId`, `version`, `name`,
//!    `description`) from the existing document win.
//! 2. Properties are unioned; keys the generator already set are kept.
//! 3. Dependencies from the existing document are carried over as-is.
//!
//! An existing document that cannot be read or parsed is reported through
//! [`MergeOutcome::Unreadable`] and leaves the generated tree untouched.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::manifest::{Manifest, ManifestError, PomTag, IDENTITY_FIELDS};

/// What the merge did.
#[derive(Debug)]
pub enum MergeOutcome {
    /// No existing document was given, or the path does not exist.
    NoExisting,

    /// The existing document could not be used; nothing was merged.
    Unreadable { path: PathBuf, error: ManifestError },

    /// The existing document was merged in.
    Merged(MergeReport),
}

impl MergeOutcome {
    /// The load error, when the existing document was unusable.
    pub fn error(&self) -> Option<&ManifestError> {
        match self {
            MergeOutcome::Unreadable { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<&MergeReport> {
        match self {
            MergeOutcome::Merged(report) => Some(report),
            _ => None,
        }
    }
}

/// Counts of the changes made by a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Identity fields whose generated text was replaced
    pub identity_overwritten: usize,
    /// Identity fields copied in because the generated tree lacked them
    pub identity_inserted: usize,
    /// Properties appended from the existing document
    pub properties_added: usize,
    /// Dependency nodes carried over
    pub dependencies_carried: usize,
    /// Whether the whole `dependencies` block was attached
    pub dependencies_attached: bool,
}

impl MergeReport {
    /// True when the existing document contributed nothing.
    pub fn is_empty(&self) -> bool {
        *self == MergeReport::default()
    }
}

/// Merge the document at `existing` into `generated`.
///
/// Never fails: a missing path yields [`MergeOutcome::NoExisting`] and an
/// unreadable or malformed document yields [`MergeOutcome::Unreadable`].
pub fn merge(generated: &mut Manifest, existing: Option<&Path>) -> MergeOutcome {
    let path = match existing {
        Some(path) => path,
        None => return MergeOutcome::NoExisting,
    };

    if !path.exists() {
        tracing::debug!("existing POM {} not found, skipping merge", path.display());
        return MergeOutcome::NoExisting;
    }

    match Manifest::load(path) {
        Ok(existing) => {
            let report = merge_manifests(generated, existing);
            tracing::debug!(?report, "merged {}", path.display());
            MergeOutcome::Merged(report)
        }
        Err(error) => {
            tracing::debug!("could not merge with {}: {}", path.display(), error);
            MergeOutcome::Unreadable {
                path: path.to_path_buf(),
                error,
            }
        }
    }
}

/// Apply the merge rules with an already-parsed existing document.
pub fn merge_manifests(generated: &mut Manifest, existing: Manifest) -> MergeReport {
    let mut report = MergeReport::default();
    let mut existing = existing.into_root();

    // Identity fields
    let model_version = PomTag::ModelVersion.qname();
    for tag in IDENTITY_FIELDS {
        let qname = tag.qname();
        let Some(node) = existing.remove_child(&qname) else {
            continue;
        };

        let root = generated.root_mut();
        if let Some(target) = root.child_mut(&qname) {
            target.set_text(node.text().map(str::to_string));
            report.identity_overwritten += 1;
        } else {
            // Each insertion lands directly after modelVersion, so later
            // fields end up ahead of earlier ones.
            match root.position(&model_version) {
                Some(index) => root.insert(index + 1, node),
                None => root.push(node),
            }
            report.identity_inserted += 1;
        }
        tracing::debug!("identity field `{}` taken from existing POM", tag.local_name());
    }

    // Properties
    let properties = PomTag::Properties.qname();
    if let (Some(existing_props), Some(generated_props)) = (
        existing.child(&properties),
        generated.root_mut().child_mut(&properties),
    ) {
        for prop in existing_props.children() {
            if generated_props.child(prop.name()).is_none() {
                generated_props.push(prop.clone());
                report.properties_added += 1;
            }
        }
    }

    // Dependencies
    let dependencies = PomTag::Dependencies.qname();
    if let Some(mut existing_deps) = existing.remove_child(&dependencies) {
        let root = generated.root_mut();
        match root.child_mut(&dependencies) {
            Some(generated_deps) => {
                for dep in existing_deps.take_children() {
                    generated_deps.push(dep);
                    report.dependencies_carried += 1;
                }
            }
            None => {
                report.dependencies_carried = existing_deps.children().len();
                report.dependencies_attached = true;
                root.push(existing_deps);
            }
        }
    }

    report
}
