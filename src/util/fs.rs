//! Filesystem utilities.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Mode for files that did not exist before, before the umask applies.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Replace `path` with `contents` in one step.
///
/// The data is written to a temporary file in the same directory and then
/// renamed over the destination, so readers never see a partial file. The
/// parent directory must already exist. An existing file keeps its
/// permissions; a new one is created `0644` (less the umask) on unix.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let previous = fs::metadata(path).ok().map(|m| m.permissions());

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if previous.is_none() {
            builder.permissions(fs::Permissions::from_mode(NEW_FILE_MODE));
        }
    }

    let mut tmp = builder
        .tempfile_in(parent)
        .with_context(|| format!("failed to create temporary file in {}", parent.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    if let Some(permissions) = previous {
        tmp.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(())
}
