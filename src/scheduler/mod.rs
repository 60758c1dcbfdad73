//! Periodic pass scheduling

use crate::engine::SyncEngine;
use crate::types::{EventCallback, MirraError, PassStats};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

/// Outcome of one scheduled pass
pub type PassOutcome = Result<PassStats, MirraError>;

/// Caller verdict after each pass outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerControl {
    /// Wait out the interval, then run the next pass
    Continue,
    /// End the loop now
    Stop,
}

/// Handler invoked after every pass with the pass index (starting at 1)
/// and the outcome
///
/// The handler owns the retry policy: the scheduler itself never decides
/// whether a fatal pass is worth retrying.
pub type OutcomeHandler = dyn Fn(u64, &PassOutcome) -> SchedulerControl + Send + Sync;

/// Periodic driver for the sync engine
///
/// Runs one pass immediately, then one per interval, until the stop handle
/// fires or the outcome handler says stop. Passes never overlap: the wait
/// starts only after a pass completes, and stop takes effect between
/// passes - there is no mid-pass cancellation.
pub struct Scheduler {
    engine: SyncEngine,
    interval: Duration,
    stop_rx: Receiver<()>,
}

/// Handle ending a scheduler loop between passes
///
/// Dropping the handle also ends the loop at the next wait; hold it for as
/// long as the schedule should keep running.
pub struct StopHandle {
    stop_tx: Sender<()>,
}

impl StopHandle {
    /// Ask the scheduler to end after the current pass
    ///
    /// Stopping a scheduler that already ended is a no-op.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(());
    }
}

impl Scheduler {
    /// Create a scheduler around an engine and its interval
    pub fn new(engine: SyncEngine, interval: Duration) -> (Self, StopHandle) {
        let (stop_tx, stop_rx) = mpsc::channel();
        (
            Self {
                engine,
                interval,
                stop_rx,
            },
            StopHandle { stop_tx },
        )
    }

    /// Run the schedule loop; returns when stopped
    pub fn run(&self, on_event: Option<&EventCallback>, on_outcome: &OutcomeHandler) {
        let mut pass_index: u64 = 0;

        loop {
            pass_index += 1;
            let outcome = self.engine.run_pass(on_event);

            if on_outcome(pass_index, &outcome) == SchedulerControl::Stop {
                break;
            }

            match self.stop_rx.recv_timeout(self.interval) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }
    }
}
