//! Pass orchestration
//!
//! One pass walks the source tree and replays it onto the replica
//! (CopyPhase), then optionally walks the replica and removes what the
//! source no longer has (PrunePhase). Per-entry failures are reported as
//! events and never stop a phase; the only fatal condition is a missing
//! source root, which aborts before any mutation.

use crate::config::Config;
use crate::diff::{decide_change, decide_prune, ChangeDecision, PruneDecision};
use crate::executor;
use crate::scanner::list_entries;
use crate::types::{
    ChangeAction, ChangeEvent, Entry, EventCallback, MirraError, PassStats, SyncEvent, SyncPhase,
};
use chrono::Local;
use std::path::PathBuf;

/// The synchronization engine
///
/// Holds the resolved configuration for the lifetime of the run; every
/// `run_pass` call re-enumerates both trees from scratch - no state is
/// carried between passes.
pub struct SyncEngine {
    config: Config,
}

impl SyncEngine {
    /// Create an engine over a validated configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this engine runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one full pass: Validating, CopyPhase, then PrunePhase if
    /// deletes are enabled
    ///
    /// A missing source root aborts immediately with zero mutations and
    /// zero events. Otherwise the pass always emits `PassStarted` and
    /// `PassCompleted` boundary markers, one `PhaseStarted` per phase, an
    /// `EntryProcessed` per examined entry, and a `Changed`/`ActionFailed`
    /// per mutation or per-entry failure.
    pub fn run_pass(&self, on_event: Option<&EventCallback>) -> Result<PassStats, MirraError> {
        // Validating: the fatal check precedes any event or mutation
        if !self.config.source.is_dir() {
            return Err(MirraError::SourceMissing {
                path: self.config.source.clone(),
            });
        }

        let replica_bootstrap = !self.config.replica.exists();
        if replica_bootstrap {
            executor::create_dir(&self.config.replica)?;
        }

        emit(
            on_event,
            SyncEvent::PassStarted {
                timestamp: Local::now(),
            },
        );

        let mut stats = PassStats::default();

        // Surface the replica-root bootstrap so the journal records it
        if replica_bootstrap {
            stats.dirs_created += 1;
            emit(
                on_event,
                SyncEvent::Changed(ChangeEvent::dir_created(
                    None,
                    self.config.replica.clone(),
                )),
            );
        }

        self.copy_phase(&mut stats, on_event)?;

        if self.config.delete {
            self.prune_phase(&mut stats, on_event)?;
        }

        emit(
            on_event,
            SyncEvent::PassCompleted {
                timestamp: Local::now(),
                stats: stats.clone(),
            },
        );

        Ok(stats)
    }

    /// Enumerate the source once and apply the change decision to every
    /// entry in listing order
    fn copy_phase(
        &self,
        stats: &mut PassStats,
        on_event: Option<&EventCallback>,
    ) -> Result<(), MirraError> {
        let entries = list_entries(&self.config.source)?;

        emit(
            on_event,
            SyncEvent::PhaseStarted {
                phase: SyncPhase::Copy,
                total_entries: entries.len() as u64,
            },
        );

        for entry in &entries {
            self.copy_step(entry, stats, on_event);
            stats.entries_examined += 1;
            emit(
                on_event,
                SyncEvent::EntryProcessed {
                    phase: SyncPhase::Copy,
                    path: entry.path.clone(),
                },
            );
        }

        Ok(())
    }

    /// Enumerate the replica once and apply the prune decision to every
    /// entry in listing order
    fn prune_phase(
        &self,
        stats: &mut PassStats,
        on_event: Option<&EventCallback>,
    ) -> Result<(), MirraError> {
        let entries = list_entries(&self.config.replica)?;

        emit(
            on_event,
            SyncEvent::PhaseStarted {
                phase: SyncPhase::Prune,
                total_entries: entries.len() as u64,
            },
        );

        for entry in &entries {
            self.prune_step(entry, stats, on_event);
            stats.entries_examined += 1;
            emit(
                on_event,
                SyncEvent::EntryProcessed {
                    phase: SyncPhase::Prune,
                    path: entry.path.clone(),
                },
            );
        }

        Ok(())
    }

    /// Decide and apply the copy-phase action for one source entry
    fn copy_step(&self, entry: &Entry, stats: &mut PassStats, on_event: Option<&EventCallback>) {
        let source_path = entry.resolve(&self.config.source);
        let replica_path = entry.resolve(&self.config.replica);

        let intended = if entry.is_dir() {
            ChangeAction::DirCreated
        } else {
            ChangeAction::FileCopied
        };

        let decision = match decide_change(entry.kind, &source_path, &replica_path) {
            Ok(decision) => decision,
            Err(e) => {
                record_failure(stats, on_event, intended, replica_path, &e.to_string());
                return;
            }
        };

        match decision {
            ChangeDecision::Noop => {}
            ChangeDecision::CreateDir => match executor::create_dir(&replica_path) {
                Ok(()) => {
                    stats.dirs_created += 1;
                    emit(
                        on_event,
                        SyncEvent::Changed(ChangeEvent::dir_created(
                            Some(source_path),
                            replica_path,
                        )),
                    );
                }
                Err(e) => {
                    record_failure(
                        stats,
                        on_event,
                        ChangeAction::DirCreated,
                        replica_path,
                        &e.to_string(),
                    );
                }
            },
            ChangeDecision::CopyFile { .. } => {
                match executor::copy_file_atomic(&source_path, &replica_path) {
                    Ok(bytes) => {
                        stats.files_copied += 1;
                        stats.bytes_copied += bytes;
                        emit(
                            on_event,
                            SyncEvent::Changed(ChangeEvent::file_copied(
                                source_path,
                                replica_path,
                            )),
                        );
                    }
                    Err(e) => {
                        record_failure(
                            stats,
                            on_event,
                            ChangeAction::FileCopied,
                            replica_path,
                            &e.to_string(),
                        );
                    }
                }
            }
            ChangeDecision::KindConflict => {
                stats.conflicts_skipped += 1;
                emit(
                    on_event,
                    SyncEvent::Changed(ChangeEvent::conflict_skipped(source_path, replica_path)),
                );
            }
        }
    }

    /// Decide and apply the prune-phase action for one replica entry
    fn prune_step(&self, entry: &Entry, stats: &mut PassStats, on_event: Option<&EventCallback>) {
        let source_path = entry.resolve(&self.config.source);
        let replica_path = entry.resolve(&self.config.replica);

        match decide_prune(&source_path, &replica_path) {
            PruneDecision::Noop => {}
            PruneDecision::DeleteFile => match executor::delete_file(&replica_path) {
                Ok(()) => {
                    stats.files_deleted += 1;
                    emit(
                        on_event,
                        SyncEvent::Changed(ChangeEvent::file_deleted(replica_path)),
                    );
                }
                Err(e) => {
                    record_failure(
                        stats,
                        on_event,
                        ChangeAction::FileDeleted,
                        replica_path,
                        &e.to_string(),
                    );
                }
            },
            PruneDecision::DeleteDirRecursive => match executor::delete_dir_all(&replica_path) {
                Ok(()) => {
                    stats.dirs_deleted += 1;
                    emit(
                        on_event,
                        SyncEvent::Changed(ChangeEvent::dir_deleted(replica_path)),
                    );
                }
                Err(e) => {
                    record_failure(
                        stats,
                        on_event,
                        ChangeAction::DirDeleted,
                        replica_path,
                        &e.to_string(),
                    );
                }
            },
        }
    }
}

fn emit(on_event: Option<&EventCallback>, event: SyncEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}

fn record_failure(
    stats: &mut PassStats,
    on_event: Option<&EventCallback>,
    action: ChangeAction,
    path: PathBuf,
    error: &str,
) {
    stats.failed_actions += 1;
    emit(
        on_event,
        SyncEvent::ActionFailed {
            action,
            path,
            error: error.to_string(),
        },
    );
}
