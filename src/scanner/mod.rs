//! Directory scanning logic

mod walker;

pub use walker::list_entries;
