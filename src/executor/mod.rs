//! Filesystem mutation primitives
//!
//! Everything the engine does to the replica tree goes through this module:
//! atomic file copies, directory creation, and idempotent deletion.

pub mod copy;

pub use copy::copy_file_atomic;

use crate::types::MirraError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Create a replica directory, including any missing ancestors
pub fn create_dir(path: &Path) -> Result<(), MirraError> {
    fs::create_dir_all(path).map_err(MirraError::Io)
}

/// Remove a replica file
///
/// An already-absent file is success: a parent directory deleted earlier in
/// the same phase may have taken this entry with it.
pub fn delete_file(path: &Path) -> Result<(), MirraError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(MirraError::Io(e)),
    }
}

/// Remove a replica directory and everything beneath it
///
/// Already absent is success, same as `delete_file`.
pub fn delete_dir_all(path: &Path) -> Result<(), MirraError> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(MirraError::Io(e)),
    }
}
