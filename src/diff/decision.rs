//! Per-entry decisions for the copy and prune phases

use crate::diff::files_identical;
use crate::types::EntryKind;
use std::fs;
use std::io;
use std::path::Path;

/// Copy-phase decision for one source entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDecision {
    /// Create the replica directory, missing ancestors included
    CreateDir,

    /// Copy the source file into the replica
    CopyFile {
        /// Whether an existing (differing) replica file is being replaced
        overwrite: bool,
    },

    /// Directory on one side, file on the other - left untouched
    KindConflict,

    /// Replica already matches this source entry
    Noop,
}

/// Decide what the copy phase does for one source entry
///
/// Implements the decision table:
///
/// | Source kind | Replica state            | Decision               |
/// |-------------|--------------------------|------------------------|
/// | directory   | missing                  | CreateDir              |
/// | directory   | directory                | Noop                   |
/// | directory   | file                     | KindConflict           |
/// | file        | missing                  | CopyFile (new)         |
/// | file        | directory                | KindConflict           |
/// | file        | identical content        | Noop                   |
/// | file        | differing content        | CopyFile (overwrite)   |
///
/// Content identity is established by full byte comparison, never by
/// metadata. The replica state is read through symlinks, matching how the
/// copy primitive sees the destination.
///
/// # Errors
/// An unreadable replica path (other than absence) or a failing content
/// comparison propagates as `io::Error`; the caller treats it as a
/// per-entry failure, not a pass abort.
pub fn decide_change(
    kind: EntryKind,
    source_path: &Path,
    replica_path: &Path,
) -> io::Result<ChangeDecision> {
    let replica_state = match fs::metadata(replica_path) {
        Ok(metadata) => Some(metadata),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };

    match kind {
        EntryKind::Dir => match replica_state {
            None => Ok(ChangeDecision::CreateDir),
            Some(m) if m.is_dir() => Ok(ChangeDecision::Noop),
            Some(_) => Ok(ChangeDecision::KindConflict),
        },
        EntryKind::File => match replica_state {
            None => Ok(ChangeDecision::CopyFile { overwrite: false }),
            Some(m) if m.is_dir() => Ok(ChangeDecision::KindConflict),
            Some(_) => {
                if files_identical(source_path, replica_path)? {
                    Ok(ChangeDecision::Noop)
                } else {
                    Ok(ChangeDecision::CopyFile { overwrite: true })
                }
            }
        },
    }
}

/// Prune-phase decision for one replica entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneDecision {
    /// Remove the extraneous replica file
    DeleteFile,

    /// Remove the extraneous replica directory and everything beneath it
    DeleteDirRecursive,

    /// Keep: the source has an entry at this path, or the replica entry is
    /// already gone
    Noop,
}

/// Decide what the prune phase does for one replica entry
///
/// Any source entry at the corresponding relative path keeps the replica
/// entry, whatever its kind - kind conflicts belong to the copy phase. The
/// replica side is read with `symlink_metadata` so a replica symlink is
/// deleted as a file, never traversed. An entry that vanished because an
/// ancestor directory was deleted earlier in this phase decides `Noop`.
pub fn decide_prune(source_path: &Path, replica_path: &Path) -> PruneDecision {
    if source_path.exists() {
        return PruneDecision::Noop;
    }

    match fs::symlink_metadata(replica_path) {
        Ok(m) if m.is_dir() => PruneDecision::DeleteDirRecursive,
        Ok(_) => PruneDecision::DeleteFile,
        Err(_) => PruneDecision::Noop,
    }
}
