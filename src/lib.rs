//! jcompile - Maven POM generation for GraalVM native-image projects
//!
//! This crate builds a `pom.xml` wired for the GraalVM native-image plugin,
//! adds RPM and DEB packaging plugins on Linux, and can merge the result
//! with a project's existing POM.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities for unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use core::{manifest::Manifest, platform::Platform};
pub use ops::{generate, GenerateOptions, GenerateResult, MergeOutcome};
pub use util::context::GlobalContext;
