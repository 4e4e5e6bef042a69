//! Clause-level and frame-level parsing
//!
//! [`line`] splits one raw clause line into its structural parts,
//! [`clause`] is the tag-dispatched codec turning those parts into typed
//! clauses, and [`frame`] assembles whole header and entity frames.
//! Frame parsing is pure and stateless: it consumes only the text of its
//! own segment, which is what makes frames safe to parse in parallel.

pub mod clause;
pub mod frame;
pub mod line;
