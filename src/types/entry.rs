//! Entry - a single file or directory location in a tree

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kind tag for a tree entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory (or a symlink resolving to one)
    Dir,
    /// A regular file (or a symlink resolving to one)
    File,
}

/// A file or directory identified by its path relative to a tree root
///
/// Entries are produced fresh on every pass; nothing is cached across passes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// Path relative to the tree root
    pub path: PathBuf,

    /// Directory or file
    pub kind: EntryKind,
}

impl Entry {
    /// Create a directory entry
    pub fn dir(path: PathBuf) -> Self {
        Self {
            path,
            kind: EntryKind::Dir,
        }
    }

    /// Create a file entry
    pub fn file(path: PathBuf) -> Self {
        Self {
            path,
            kind: EntryKind::File,
        }
    }

    /// Check whether this entry is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Check whether this entry is a file
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Resolve this entry against a tree root
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.path)
    }
}
