//! Event stream emitted by the sync engine

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

/// Mutating action applied (or refused) by a pass
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ChangeAction {
    /// Directory created on the replica side (missing ancestors included)
    DirCreated,

    /// File copied to the replica (new or overwriting a stale copy)
    FileCopied,

    /// Extraneous replica file removed
    FileDeleted,

    /// Extraneous replica directory removed recursively
    DirDeleted,

    /// Entry left untouched: a directory on one side is a file on the other
    ConflictSkipped,
}

impl ChangeAction {
    /// Short label used in console lines and the journal
    pub fn label(&self) -> &'static str {
        match self {
            ChangeAction::DirCreated => "Create",
            ChangeAction::FileCopied => "Copy",
            ChangeAction::FileDeleted => "Delete",
            ChangeAction::DirDeleted => "Delete",
            ChangeAction::ConflictSkipped => "Skip",
        }
    }
}

/// One mutating change applied to the replica tree
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChangeEvent {
    /// What happened
    pub action: ChangeAction,

    /// Absolute source path the change originated from (absent for deletes)
    pub source_path: Option<PathBuf>,

    /// Absolute replica path that was mutated (or skipped)
    pub replica_path: PathBuf,

    /// When the change completed
    pub timestamp: DateTime<Local>,
}

impl ChangeEvent {
    /// Create a change event stamped with the current local time
    pub fn new(action: ChangeAction, source_path: Option<PathBuf>, replica_path: PathBuf) -> Self {
        Self {
            action,
            source_path,
            replica_path,
            timestamp: Local::now(),
        }
    }

    /// Directory created on the replica
    pub fn dir_created(source_path: Option<PathBuf>, replica_path: PathBuf) -> Self {
        Self::new(ChangeAction::DirCreated, source_path, replica_path)
    }

    /// File copied from source to replica
    pub fn file_copied(source_path: PathBuf, replica_path: PathBuf) -> Self {
        Self::new(ChangeAction::FileCopied, Some(source_path), replica_path)
    }

    /// Extraneous replica file deleted
    pub fn file_deleted(replica_path: PathBuf) -> Self {
        Self::new(ChangeAction::FileDeleted, None, replica_path)
    }

    /// Extraneous replica directory deleted recursively
    pub fn dir_deleted(replica_path: PathBuf) -> Self {
        Self::new(ChangeAction::DirDeleted, None, replica_path)
    }

    /// Kind conflict left untouched
    pub fn conflict_skipped(source_path: PathBuf, replica_path: PathBuf) -> Self {
        Self::new(ChangeAction::ConflictSkipped, Some(source_path), replica_path)
    }
}

/// Which half of a pass an event belongs to
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum SyncPhase {
    /// Source enumeration + copy decisions
    Copy,
    /// Replica enumeration + delete decisions
    Prune,
}

impl SyncPhase {
    /// Human-readable phase name
    pub fn label(&self) -> &'static str {
        match self {
            SyncPhase::Copy => "Syncing",
            SyncPhase::Prune => "Pruning",
        }
    }
}

/// Counters accumulated over one pass
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PassStats {
    /// Entries examined across both phases (including no-ops)
    pub entries_examined: u64,

    /// Directories created on the replica
    pub dirs_created: u64,

    /// Files copied (new + overwritten)
    pub files_copied: u64,

    /// Aggregate bytes written by file copies
    pub bytes_copied: u64,

    /// Extraneous files removed
    pub files_deleted: u64,

    /// Extraneous directories removed recursively
    pub dirs_deleted: u64,

    /// Kind conflicts left untouched
    pub conflicts_skipped: u64,

    /// Per-entry actions that failed (pass continued)
    pub failed_actions: u64,
}

impl PassStats {
    /// Total number of mutations applied to the replica tree
    pub fn total_changes(&self) -> u64 {
        self.dirs_created + self.files_copied + self.files_deleted + self.dirs_deleted
    }

    /// Check whether any per-entry action failed
    pub fn has_failures(&self) -> bool {
        self.failed_actions > 0
    }
}

/// Events emitted while running a pass
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// Pass-boundary marker: the pass began
    PassStarted { timestamp: DateTime<Local> },

    /// A phase began; `total_entries` sizes progress reporting
    PhaseStarted { phase: SyncPhase, total_entries: u64 },

    /// One entry was examined (mutated or not)
    EntryProcessed { phase: SyncPhase, path: PathBuf },

    /// A mutation (or conflict skip) happened
    Changed(ChangeEvent),

    /// A per-entry action failed; the pass continues
    ActionFailed {
        action: ChangeAction,
        path: PathBuf,
        error: String,
    },

    /// Pass-boundary marker: the pass ran to completion
    PassCompleted {
        timestamp: DateTime<Local>,
        stats: PassStats,
    },
}

/// Callback used to receive sync events
pub type EventCallback = dyn Fn(&SyncEvent) + Send + Sync;
