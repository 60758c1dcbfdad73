//! Core type definitions for mirra

mod entry;
mod error;
mod event;

pub use entry::{Entry, EntryKind};
pub use error::MirraError;
pub use event::{ChangeAction, ChangeEvent, EventCallback, PassStats, SyncEvent, SyncPhase};
