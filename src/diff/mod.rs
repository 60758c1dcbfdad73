//! Decision logic - content comparison and per-entry phase decisions

mod compare;
mod decision;

pub use compare::files_identical;
pub use decision::{decide_change, decide_prune, ChangeDecision, PruneDecision};
