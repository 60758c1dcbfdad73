//! Append-only sync journal
//!
//! One text file (`<log_dir>/mirra.log`), bootstrapped on first open.
//! Every pass contributes a timestamped start marker, one line per
//! mutating action or failure, and an end marker; fatal pass outcomes are
//! recorded too. The journal never truncates - history accumulates across
//! runs.

use crate::types::{ChangeAction, ChangeEvent, MirraError, SyncEvent};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name inside the configured log directory
const JOURNAL_FILE: &str = "mirra.log";

/// Marker line closing every completed pass
const PASS_END_MARKER: &str = "***** ***** ***** ***** *****";

/// The append-only journal collaborator
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    /// Open the journal under `log_dir`, creating the directory if absent
    pub fn open(log_dir: &Path) -> Result<Self, MirraError> {
        fs::create_dir_all(log_dir)?;
        Ok(Self {
            path: log_dir.join(JOURNAL_FILE),
        })
    }

    /// Path of the journal file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line to the journal
    pub fn record(&self, line: &str) -> Result<(), MirraError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Record a sync event, if it is one the journal keeps
    ///
    /// Progress events (`PhaseStarted`, `EntryProcessed`) are console
    /// concerns and are not journaled.
    pub fn record_event(&self, event: &SyncEvent) -> Result<(), MirraError> {
        match event {
            SyncEvent::PassStarted { timestamp } => self.record(&pass_start_marker(timestamp)),
            SyncEvent::Changed(change) => self.record(&change_line(change)),
            SyncEvent::ActionFailed {
                action,
                path,
                error,
            } => self.record(&format!(
                "{} {} failed: {}",
                action.label(),
                path.display(),
                error
            )),
            SyncEvent::PassCompleted { .. } => self.record(PASS_END_MARKER),
            SyncEvent::PhaseStarted { .. } | SyncEvent::EntryProcessed { .. } => Ok(()),
        }
    }

    /// Record a fatal pass outcome
    pub fn record_fatal(&self, error: &MirraError) -> Result<(), MirraError> {
        self.record(&format!("Pass aborted: {}", error))
    }
}

fn pass_start_marker(timestamp: &DateTime<Local>) -> String {
    format!("***** {} *****", timestamp.format("%Y-%m-%d %H:%M:%S"))
}

fn change_line(change: &ChangeEvent) -> String {
    let replica = change.replica_path.display();
    match change.action {
        ChangeAction::DirCreated => format!("{} created", replica),
        ChangeAction::FileCopied => match &change.source_path {
            Some(source) => format!("{} copied to {}", source.display(), replica),
            None => format!("{} copied", replica),
        },
        ChangeAction::FileDeleted | ChangeAction::DirDeleted => format!("{} deleted", replica),
        ChangeAction::ConflictSkipped => {
            format!("{} skipped: kind conflict with source", replica)
        }
    }
}
