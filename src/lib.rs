//! # mirra - One-Way Directory Mirroring
//!
//! Full replicas, no surprises.
//!
//! mirra replays a source directory tree onto a replica tree on a fixed
//! interval. Every pass walks the whole source, copies what is new or
//! changed, and (optionally) prunes replica entries that no longer exist
//! in the source.

// Module declarations
pub mod commands;
pub mod config;
pub mod diff;
pub mod engine;
pub mod executor;
pub mod journal;
pub mod scanner;
pub mod scheduler;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use engine::SyncEngine;
pub use scheduler::{Scheduler, StopHandle};
pub use types::{
    ChangeAction, ChangeEvent, Entry, EntryKind, EventCallback, MirraError, PassStats, SyncEvent,
    SyncPhase,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
