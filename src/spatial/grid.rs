//! Fixed-size board grid with set-once cells
//!
//! Positions use screen conventions: x grows east, y grows south, and the
//! cell array is indexed row-major as `[y, x]`. Out-of-bounds queries do
//! not allocate or mutate anything; they simply report an unset cell, which
//! the candidate evaluator treats as imposing no constraint.

use ndarray::Array2;

use crate::rules::TileId;

/// A width x height board of cells, each resolved to at most one tile type
///
/// Cells start unset and are resolved exactly once; a contradiction never
/// rolls individual cells back, the whole grid is replaced instead.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Array2<Option<TileId>>,
}

impl Grid {
    /// Create a grid with every cell unset
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), None),
        }
    }

    /// Board width in cells
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Board height in cells
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn total(&self) -> usize {
        self.cells.len()
    }

    /// The resolved tile type at `(x, y)`, if any
    ///
    /// Returns `None` both for unresolved cells and for positions outside
    /// the board; either way the cell constrains nothing.
    pub fn get(&self, x: i32, y: i32) -> Option<TileId> {
        let row = usize::try_from(y).ok()?;
        let col = usize::try_from(x).ok()?;
        self.cells.get([row, col]).copied().flatten()
    }

    /// Resolve the cell at `(x, y)` to `tile`
    ///
    /// Returns whether the cell was actually resolved; already-resolved
    /// cells and out-of-bounds positions are left untouched.
    pub fn resolve(&mut self, x: i32, y: i32, tile: TileId) -> bool {
        let Ok(row) = usize::try_from(y) else {
            return false;
        };
        let Ok(col) = usize::try_from(x) else {
            return false;
        };
        match self.cells.get_mut([row, col]) {
            Some(cell) if cell.is_none() => {
                *cell = Some(tile);
                true
            }
            _ => false,
        }
    }

    /// Whether every cell has been resolved
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Number of cells resolved so far
    pub fn resolved_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Positions of all cells still unset, in row-major order
    pub fn unresolved_positions(&self) -> impl Iterator<Item = [i32; 2]> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_none())
            .map(|((row, col), _)| [col as i32, row as i32])
    }

    /// Positions of all cells, in row-major order
    pub fn positions(&self) -> impl Iterator<Item = [i32; 2]> + '_ {
        let width = self.width() as i32;
        let height = self.height() as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| [x, y]))
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::rules::RuleTable;

    fn sample_tile() -> (RuleTable, crate::rules::TileId) {
        let table =
            RuleTable::from_json_str(r#"{"a": {"directionality": "none", "valid_neighbors": []}}"#)
                .unwrap();
        let id = table.id("a").unwrap();
        (table, id)
    }

    #[test]
    fn test_new_grid_is_fully_unset() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.total(), 12);
        assert_eq!(grid.resolved_count(), 0);
        assert!(!grid.is_complete());
        assert_eq!(grid.unresolved_positions().count(), 12);
    }

    #[test]
    fn test_out_of_bounds_reads_are_unset_and_harmless() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, -1), None);
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.resolved_count(), 0);
    }

    #[test]
    fn test_resolve_sets_a_cell_exactly_once() {
        let (_table, id) = sample_tile();
        let mut grid = Grid::new(2, 1);
        assert!(grid.resolve(0, 0, id));
        assert_eq!(grid.get(0, 0), Some(id));
        // Second write is refused, the cell keeps its first value
        assert!(!grid.resolve(0, 0, id));
        assert!(!grid.resolve(5, 5, id));
        assert_eq!(grid.resolved_count(), 1);
    }

    #[test]
    fn test_grid_completes_when_every_cell_resolves() {
        let (_table, id) = sample_tile();
        let mut grid = Grid::new(2, 2);
        for position in grid.positions().collect::<Vec<_>>() {
            assert!(grid.resolve(position[0], position[1], id));
        }
        assert!(grid.is_complete());
        assert_eq!(grid.unresolved_positions().count(), 0);
    }
}
