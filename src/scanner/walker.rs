//! Sequential directory walker

use crate::types::{Entry, MirraError};
use ignore::WalkBuilder;
use std::fs;
use std::path::Path;

/// List every file and directory under `root` as relative-path entries
///
/// The walk is depth-first, so a directory always precedes everything
/// beneath it - downstream copy logic relies on this to create replica
/// directories before their contents arrive. There is no filtering of any
/// kind: hidden files and ignore files are listed like everything else.
///
/// Symlinks are classified through the same lens the copy primitive uses: a
/// link resolving to a file is listed as a file, a link resolving to a
/// directory is listed as a directory but not descended into. Entries whose
/// metadata cannot be read (broken links, files vanishing mid-walk) are
/// skipped with a warning, as are traversal errors; the walk continues.
///
/// # Arguments
/// * `root` - The tree root to enumerate; the root itself is not yielded
///
/// # Returns
/// * `Ok(Vec<Entry>)` - All reachable entries in parent-before-child order
pub fn list_entries(root: &Path) -> Result<Vec<Entry>, MirraError> {
    let mut entries = Vec::new();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for result in walker {
        let dir_entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!(
                    "Warning: Error during directory traversal: {}. \
                     Remaining entries will still be processed.",
                    e
                );
                continue;
            }
        };

        // The root itself is not an entry
        if dir_entry.depth() == 0 {
            continue;
        }

        let relative_path = match dir_entry.path().strip_prefix(root) {
            Ok(p) => p.to_path_buf(),
            Err(_) => {
                eprintln!(
                    "Warning: Failed to calculate relative path for {}. Entry will be skipped.",
                    dir_entry.path().display()
                );
                continue;
            }
        };

        let metadata = match fs::metadata(dir_entry.path()) {
            Ok(m) => m,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to read metadata for {}: {}. \
                     Broken symlinks and entries removed mid-walk are skipped.",
                    dir_entry.path().display(),
                    e
                );
                continue;
            }
        };

        if metadata.is_dir() {
            entries.push(Entry::dir(relative_path));
        } else if metadata.is_file() {
            entries.push(Entry::file(relative_path));
        }
        // Special files (sockets, pipes, devices) are not mirrored
    }

    Ok(entries)
}
