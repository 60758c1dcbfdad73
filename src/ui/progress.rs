//! Progress reporting

use crate::types::{ChangeAction, ChangeEvent, PassStats, SyncPhase};
use console::style;
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::path::Path;

/// Progress reporter for sync passes
///
/// One bar per phase, sized to the phase's entry count and ticked once per
/// processed entry; mutations and failures are printed above the bar so
/// they survive it.
pub struct ProgressReporter {
    phase_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        Self { phase_bar: None }
    }

    /// Announce the start of a pass
    pub fn start_pass(&self) {
        println!("{}", style("Starting sync pass...").dim());
    }

    /// Begin a phase bar sized to the entry count
    pub fn start_phase(&mut self, phase: SyncPhase, total_entries: u64) {
        self.finish_current_bar();

        let bar = ProgressBar::new(total_entries);
        if let Ok(bar_style) = ProgressStyle::with_template(&format!(
            "{} {{bar:30.cyan/blue}} {{pos}}/{{len}} entries | {{msg}}",
            phase.label()
        )) {
            bar.set_style(bar_style.progress_chars("=>-"));
        }

        self.phase_bar = Some(bar);
    }

    /// Tick the bar for one examined entry
    pub fn entry_processed(&self, path: &Path) {
        if let Some(bar) = &self.phase_bar {
            bar.set_message(path.display().to_string());
            bar.inc(1);
        }
    }

    /// Print a mutating change above the bar
    pub fn change(&self, change: &ChangeEvent) {
        let line = match change.action {
            ChangeAction::FileCopied => match &change.source_path {
                Some(source) => format!(
                    "Copying {} to {}",
                    source.display(),
                    change.replica_path.display()
                ),
                None => format!("Copying {}", change.replica_path.display()),
            },
            ChangeAction::DirCreated => {
                format!("Creating {}", change.replica_path.display())
            }
            ChangeAction::FileDeleted | ChangeAction::DirDeleted => {
                format!("Deleting {}", change.replica_path.display())
            }
            ChangeAction::ConflictSkipped => format!(
                "{} {} (kind conflict with source)",
                style("Skipping").yellow(),
                change.replica_path.display()
            ),
        };
        self.println(&line);
    }

    /// Surface a per-entry failure above the bar
    pub fn action_error(&self, action: ChangeAction, path: &Path, error: &str) {
        self.println(&format!(
            "{} {} {}: {}",
            style("ERROR").red().bold(),
            action.label(),
            path.display(),
            error
        ));
    }

    /// Close the current phase bar, if any, and print the pass summary
    pub fn finish_pass(&mut self, stats: &PassStats) {
        self.finish_current_bar();

        if stats.total_changes() == 0 && !stats.has_failures() {
            println!("Synchronization complete. Nothing to do.");
            return;
        }

        let mut summary = format!(
            "Synchronization complete: {} created, {} copied ({}), {} deleted",
            stats.dirs_created,
            stats.files_copied,
            HumanBytes(stats.bytes_copied),
            stats.files_deleted + stats.dirs_deleted,
        );
        if stats.conflicts_skipped > 0 {
            summary.push_str(&format!(", {} conflicts skipped", stats.conflicts_skipped));
        }
        if stats.has_failures() {
            summary.push_str(&format!(
                ", {}",
                style(format!("{} failed", stats.failed_actions)).red()
            ));
        }
        println!("{}", summary);
    }

    /// Print a line without disturbing an active bar
    fn println(&self, line: &str) {
        match &self.phase_bar {
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    }

    fn finish_current_bar(&mut self) {
        if let Some(bar) = self.phase_bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
