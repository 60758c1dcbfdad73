//! Atomic file copy implementation

use crate::types::MirraError;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Streaming buffer size for file copies
const COPY_BUFFER_SIZE: usize = 128 * 1024;

/// Copy a file atomically, preserving modification time and permission bits
///
/// The content is streamed into a hidden `.part` sibling of the
/// destination, flushed to disk, stamped with the source's permission bits
/// and mtime, then renamed into place. A reader never observes a partially
/// written destination: it sees either the previous file or the complete
/// new one. The staging file is removed on failure.
///
/// # Arguments
/// * `source` - Source file path
/// * `replica` - Destination file path; parent directories are created
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(MirraError)` - IO failure while staging, stamping, or renaming
pub fn copy_file_atomic(source: &Path, replica: &Path) -> Result<u64, MirraError> {
    if let Some(parent) = replica.parent() {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(replica);

    let result = stage_copy(source, &staging).and_then(|bytes| {
        // Atomic on POSIX: the destination flips in a single syscall
        fs::rename(&staging, replica)?;
        Ok(bytes)
    });

    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }

    result
}

/// Write the staged copy and stamp source metadata onto it
fn stage_copy(source: &Path, staging: &Path) -> Result<u64, MirraError> {
    let mut source_file = File::open(source)?;
    let mut staging_file = File::create(staging)?;

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = source_file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        staging_file.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    staging_file.sync_all()?;
    // Close the handle before rename (required on Windows)
    drop(staging_file);

    let source_metadata = fs::metadata(source)?;
    fs::set_permissions(staging, source_metadata.permissions())?;

    let mtime = filetime::FileTime::from_system_time(source_metadata.modified()?);
    filetime::set_file_mtime(staging, mtime)?;

    Ok(total_bytes)
}

/// Hidden in-flight name next to the destination
///
/// Staying inside the destination directory keeps the final rename on one
/// filesystem.
fn staging_path(replica: &Path) -> PathBuf {
    let name = replica
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();

    let mut staged = std::ffi::OsString::from(".");
    staged.push(name);
    staged.push(".part");

    replica.with_file_name(staged)
}
