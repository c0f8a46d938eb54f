//! Spatial data structures for the board
//!
//! The board is a fixed-size rectangular grid of cells; each cell either
//! holds a resolved tile type or is still unset.

/// Board grid storage and cell queries
pub mod grid;

pub use grid::Grid;
