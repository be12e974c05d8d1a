//! High-level operations.
//!
//! This module contains the implementation of POM generation: building the
//! canonical tree, merging an existing POM into it, and writing the result.

pub mod build;
pub mod generate;
pub mod merge;

pub use build::{build_manifest, BuildSettings};
pub use generate::{generate, GenerateOptions, GenerateResult};
pub use merge::{merge, merge_manifests, MergeOutcome, MergeReport};
