//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents with standardized error handling.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
/// Files that are not valid UTF-8 fail like any other read.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Permission bits of `metadata`, or `None` on platforms without Unix modes.
pub fn permission_bits(metadata: &fs::Metadata) -> Option<u32> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(metadata.permissions().mode() & 0o7777)
    }

    #[cfg(not(unix))]
    {
        let _ = metadata;
        None
    }
}

/// Write content to an existing or new file.
///
/// Opening with truncate keeps the inode, so an existing file keeps its owner
/// and permission bits.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Make sure `path` carries `mode`, changing it only when the bits differ.
///
/// Returns `Ok(false)` when the mode already matched. `mode` is ignored on
/// platforms without Unix permission bits.
pub fn ensure_mode(path: &Path, mode: u32, operation: &str) -> Result<bool> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let current = fs::metadata(path).ok().and_then(|m| permission_bits(&m));
        if current == Some(mode & 0o7777) {
            return Ok(false);
        }
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("{} (set permissions)", operation)))
        })?;
        Ok(true)
    }

    #[cfg(not(unix))]
    {
        let _ = (path, mode, operation);
        Ok(false)
    }
}
