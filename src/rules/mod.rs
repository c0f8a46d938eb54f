//! Adjacency rule handling
//!
//! This module contains everything the rule table provides to the rest of
//! the system:
//! - Cardinal directions and their reciprocals
//! - The raw JSON file schema
//! - The validated, immutable rule table with directional dispatch

/// Cardinal directions on the board
pub mod direction;
/// Raw serde shapes for the rule file
pub mod schema;
/// Validated rule table and admissibility queries
pub mod table;

pub use direction::Direction;
pub use table::{RuleTable, TileId};
