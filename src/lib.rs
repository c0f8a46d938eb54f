//! Wave function collapse board generation driven by a declarative adjacency rule table
//!
//! The system loads directional adjacency rules from JSON, then fills a fixed-size
//! board by repeatedly collapsing the least-constrained cell to a weighted random
//! choice among the tile types its resolved neighbors still admit. A cell with no
//! admissible tile discards the whole board and generation starts over.

#![forbid(unsafe_code)]

/// Core algorithm implementation including candidate evaluation, collapse, and the generation loop
pub mod algorithm;
/// Input/output operations, error handling, and board rendering
pub mod io;
/// Adjacency rule table loading, validation, and directional dispatch
pub mod rules;
/// Board grid storage and cell queries
pub mod spatial;

pub use io::error::{GenerationError, Result};
