//! Main sync command

use crate::config::Config;
use crate::engine::SyncEngine;
use crate::journal::Journal;
use crate::scheduler::{PassOutcome, Scheduler, SchedulerControl};
use crate::types::{MirraError, SyncEvent};
use crate::ui::ProgressReporter;
use console::style;
use std::sync::{Arc, Mutex};

/// Run the mirroring schedule until stopped
///
/// Wires the engine's event stream into the journal and the console
/// reporter, then drives the scheduler. Retry policy: a fatal first pass
/// ends the run with an error (nothing was ever mirrored, matching the
/// startup check of classic mirror tools); later fatal passes are retried
/// on the next tick, since the source may reappear.
pub fn run(config: Config) -> Result<(), MirraError> {
    let journal = Arc::new(Journal::open(&config.log_dir)?);
    let reporter = Arc::new(Mutex::new(ProgressReporter::new()));

    let interval = config.interval;
    let engine = SyncEngine::new(config);

    let on_event = {
        let journal = Arc::clone(&journal);
        let reporter = Arc::clone(&reporter);
        move |event: &SyncEvent| {
            // A journal hiccup must not take down the pass
            if let Err(e) = journal.record_event(event) {
                eprintln!("Warning: journal write failed: {}", e);
            }

            if let Ok(mut progress) = reporter.lock() {
                match event {
                    SyncEvent::PassStarted { .. } => progress.start_pass(),
                    SyncEvent::PhaseStarted {
                        phase,
                        total_entries,
                    } => progress.start_phase(*phase, *total_entries),
                    SyncEvent::EntryProcessed { path, .. } => progress.entry_processed(path),
                    SyncEvent::Changed(change) => progress.change(change),
                    SyncEvent::ActionFailed {
                        action,
                        path,
                        error,
                    } => progress.action_error(*action, path, error),
                    SyncEvent::PassCompleted { stats, .. } => progress.finish_pass(stats),
                }
            }
        }
    };

    let first_pass_error: Arc<Mutex<Option<MirraError>>> = Arc::new(Mutex::new(None));
    let on_outcome = {
        let journal = Arc::clone(&journal);
        let first_pass_error = Arc::clone(&first_pass_error);
        move |index: u64, outcome: &PassOutcome| match outcome {
            Ok(_) => SchedulerControl::Continue,
            Err(error) => {
                let _ = journal.record_fatal(error);
                eprintln!("{} {}", style("Pass failed:").red().bold(), error);

                if index == 1 {
                    if let Ok(mut slot) = first_pass_error.lock() {
                        *slot = Some(clone_pass_error(error));
                    }
                    SchedulerControl::Stop
                } else {
                    // The source may reappear - keep the schedule alive
                    SchedulerControl::Continue
                }
            }
        }
    };

    let (scheduler, _stop_handle) = Scheduler::new(engine, interval);
    scheduler.run(Some(&on_event), &on_outcome);

    if let Some(error) = first_pass_error.lock().ok().and_then(|mut slot| slot.take()) {
        return Err(error);
    }

    Ok(())
}

/// Rebuild a pass error for returning out of the run
///
/// `MirraError` carries `std::io::Error` and cannot derive `Clone`.
fn clone_pass_error(error: &MirraError) -> MirraError {
    match error {
        MirraError::Io(e) => MirraError::Io(std::io::Error::new(e.kind(), e.to_string())),
        MirraError::Config(msg) => MirraError::Config(msg.clone()),
        MirraError::SourceMissing { path } => MirraError::SourceMissing { path: path.clone() },
    }
}
