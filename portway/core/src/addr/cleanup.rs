//! Stale Socket Cleanup
//!
//! A previous process that bound a path-based Unix socket and died leaves
//! its socket file behind, and a fresh bind at the same path fails until
//! the entry is gone. [`unlink_stale_socket`] removes such leftovers before
//! a (re)bind.
//!
//! The contract is strictly best-effort: the check-then-remove sequence is
//! racy against concurrent processes touching the same path, and that race
//! is acceptable - the subsequent bind reports the authoritative outcome.
//! Filesystem errors are swallowed (logged at debug level), never surfaced.

use std::fs;
use std::os::unix::fs::FileTypeExt;

use super::resolved::{LocalAddress, ResolvedAddress};

/// Remove a leftover socket file for a path-based Unix address
///
/// No-op for every family except `UnixPath`: abstract names live in a
/// kernel namespace and have no filesystem entry, and other families are
/// opaque to this subsystem. For `UnixPath`, the entry is removed only when
/// it exists and is of socket type; a missing entry, an entry of any other
/// type, or any filesystem error leaves the filesystem untouched and
/// reports nothing.
pub fn unlink_stale_socket(addr: &ResolvedAddress) {
    let Some(LocalAddress::UnixPath(path)) = LocalAddress::from_resolved(addr) else {
        return;
    };

    match fs::metadata(&path) {
        Ok(meta) if meta.file_type().is_socket() => {
            if let Err(e) = fs::remove_file(&path) {
                tracing::debug!(path = ?path, error = %e, "Failed to remove stale socket file");
            } else {
                tracing::debug!(path = ?path, "Removed stale socket file");
            }
        }
        // Entry of another type: not ours to delete.
        Ok(_) => {}
        // Missing or unreadable: nothing to clean.
        Err(_) => {}
    }
}
