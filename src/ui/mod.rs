//! Console presentation

mod progress;

pub use progress::ProgressReporter;
