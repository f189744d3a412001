// Grid - Canonical monochrome pixel state
//
// The virtual machine has a resolution of 64×32 cells. Each cell is either
// lit or unlit; every frame buffer encoding is decoded into this form.

/// Display width in cells
pub const GRID_WIDTH: usize = 64;

/// Display height in cells
pub const GRID_HEIGHT: usize = 32;

/// Total number of cells in the grid
pub const GRID_SIZE: usize = GRID_WIDTH * GRID_HEIGHT;

/// Canonical boolean pixel grid, indexed `[row][col]`
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[bool; GRID_WIDTH]; GRID_HEIGHT],
}

impl Grid {
    /// Create a grid with every cell unlit
    pub fn new() -> Self {
        Self {
            cells: [[false; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    /// Set a cell
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, lit: bool) {
        assert!(row < GRID_HEIGHT, "Row {} out of bounds", row);
        assert!(col < GRID_WIDTH, "Column {} out of bounds", col);

        self.cells[row][col] = lit;
    }

    /// Get a cell
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < GRID_HEIGHT, "Row {} out of bounds", row);
        assert!(col < GRID_WIDTH, "Column {} out of bounds", col);

        self.cells[row][col]
    }

    /// Unlight every cell
    pub fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(false);
        }
    }

    /// Rows of the grid, top to bottom
    pub fn rows(&self) -> &[[bool; GRID_WIDTH]; GRID_HEIGHT] {
        &self.cells
    }

    /// Number of lit cells
    pub fn popcount(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&lit| lit).count())
            .sum()
    }

    /// Iterate `(row, col)` of every lit cell in row-major order
    pub fn lit_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, lit)| **lit)
                .map(move |(col, _)| (row, col))
        })
    }

    /// Re-encode as packed rows (column 0 is the most significant bit)
    pub fn to_packed_rows(&self) -> Vec<u64> {
        self.cells
            .iter()
            .map(|row| {
                row.iter().enumerate().fold(0u64, |acc, (col, &lit)| {
                    if lit {
                        acc | (1u64 << (GRID_WIDTH - 1 - col))
                    } else {
                        acc
                    }
                })
            })
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid {{")?;
        for row in &self.cells {
            let line: String = row.iter().map(|&lit| if lit { '#' } else { '.' }).collect();
            writeln!(f, "    {}", line)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new();
        assert_eq!(grid.popcount(), 0);
        assert_eq!(grid.rows().len(), GRID_HEIGHT);
        assert_eq!(grid.rows()[0].len(), GRID_WIDTH);
    }

    #[test]
    fn test_set_get() {
        let mut grid = Grid::new();
        grid.set(31, 63, true);
        assert!(grid.get(31, 63));
        assert!(!grid.get(0, 0));
        assert_eq!(grid.popcount(), 1);
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::new();
        grid.set(0, 0, true);
        grid.set(10, 20, true);
        grid.clear();
        assert_eq!(grid.popcount(), 0);
    }

    #[test]
    fn test_lit_cells_row_major() {
        let mut grid = Grid::new();
        grid.set(5, 1, true);
        grid.set(0, 63, true);
        grid.set(5, 0, true);

        let lit: Vec<_> = grid.lit_cells().collect();
        assert_eq!(lit, vec![(0, 63), (5, 0), (5, 1)]);
    }

    #[test]
    fn test_to_packed_rows() {
        let mut grid = Grid::new();
        grid.set(0, 0, true);
        grid.set(1, 63, true);

        let rows = grid.to_packed_rows();
        assert_eq!(rows.len(), GRID_HEIGHT);
        assert_eq!(rows[0], 0x8000_0000_0000_0000);
        assert_eq!(rows[1], 0x0000_0000_0000_0001);
        assert!(rows[2..].iter().all(|&r| r == 0));
    }

    #[test]
    #[should_panic]
    fn test_set_out_of_bounds_col() {
        let mut grid = Grid::new();
        grid.set(0, 64, true);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_bounds_row() {
        let grid = Grid::new();
        grid.get(32, 0);
    }
}
