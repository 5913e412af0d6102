//! Grid: tile occupancy for tower placement.

use csdefense_core::enums::CellState;
use csdefense_core::error::CommandError;
use csdefense_core::types::GridCell;

use crate::error::MapError;
use crate::path::Path;

/// Occupancy of every build cell, row-major.
///
/// Path cells are stamped at construction and never change. Only placement
/// and sale toggle cells between `Empty` and `Occupied`.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(columns: u32, rows: u32, path: &Path) -> Result<Self, MapError> {
        if columns == 0 || rows == 0 {
            return Err(MapError::EmptyGrid);
        }
        let mut grid = Self {
            columns,
            rows,
            cells: vec![CellState::Empty; columns as usize * rows as usize],
        };
        for cell in path.cells() {
            let idx = grid
                .index(cell)
                .ok_or(MapError::PathOutOfBounds { cell: *cell })?;
            grid.cells[idx] = CellState::Path;
        }
        Ok(grid)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// State of a cell, or None if it lies outside the grid.
    pub fn state(&self, cell: &GridCell) -> Option<CellState> {
        self.index(cell).map(|idx| self.cells[idx])
    }

    /// Whether a tower could stand on `cell` right now.
    pub fn check_buildable(&self, cell: &GridCell) -> Result<(), CommandError> {
        match self.state(cell) {
            None | Some(CellState::Path) => Err(CommandError::InvalidCell { cell: *cell }),
            Some(CellState::Occupied) => Err(CommandError::CellOccupied { cell: *cell }),
            Some(CellState::Empty) => Ok(()),
        }
    }

    /// Mark a buildable cell as occupied.
    pub fn occupy(&mut self, cell: &GridCell) -> Result<(), CommandError> {
        self.check_buildable(cell)?;
        if let Some(idx) = self.index(cell) {
            self.cells[idx] = CellState::Occupied;
        }
        Ok(())
    }

    /// Free an occupied cell. Returns false if it was not occupied.
    pub fn vacate(&mut self, cell: &GridCell) -> bool {
        match self.index(cell) {
            Some(idx) if self.cells[idx] == CellState::Occupied => {
                self.cells[idx] = CellState::Empty;
                true
            }
            _ => false,
        }
    }

    /// Number of cells in a given state.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    fn index(&self, cell: &GridCell) -> Option<usize> {
        if cell.column < 0
            || cell.row < 0
            || cell.column as u32 >= self.columns
            || cell.row as u32 >= self.rows
        {
            return None;
        }
        Some(cell.row as usize * self.columns as usize + cell.column as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 6×4 grid with a straight path along row 1.
    fn make_test_grid() -> Grid {
        let path = Path::new(&[GridCell::new(0, 1), GridCell::new(5, 1)], 32.0).unwrap();
        Grid::new(6, 4, &path).unwrap()
    }

    #[test]
    fn test_path_cells_stamped() {
        let grid = make_test_grid();
        assert_eq!(grid.count(CellState::Path), 6);
        assert_eq!(grid.count(CellState::Empty), 18);
        assert_eq!(grid.state(&GridCell::new(3, 1)), Some(CellState::Path));
        assert_eq!(grid.state(&GridCell::new(3, 2)), Some(CellState::Empty));
        assert_eq!(grid.state(&GridCell::new(6, 0)), None);
        assert_eq!(grid.state(&GridCell::new(-1, 0)), None);
    }

    #[test]
    fn test_buildable_checks() {
        let mut grid = make_test_grid();
        let cell = GridCell::new(2, 0);
        assert!(grid.check_buildable(&cell).is_ok());
        grid.occupy(&cell).unwrap();
        assert_eq!(
            grid.check_buildable(&cell),
            Err(CommandError::CellOccupied { cell })
        );

        let on_path = GridCell::new(2, 1);
        assert_eq!(
            grid.occupy(&on_path),
            Err(CommandError::InvalidCell { cell: on_path })
        );
        let outside = GridCell::new(0, 9);
        assert_eq!(
            grid.check_buildable(&outside),
            Err(CommandError::InvalidCell { cell: outside })
        );
    }

    #[test]
    fn test_occupy_then_vacate_touches_one_cell() {
        let mut grid = make_test_grid();
        let before = grid.cells.clone();
        let cell = GridCell::new(4, 3);
        grid.occupy(&cell).unwrap();
        assert_eq!(grid.state(&cell), Some(CellState::Occupied));
        assert_eq!(grid.count(CellState::Occupied), 1);
        assert!(grid.vacate(&cell));
        assert_eq!(grid.cells, before);
        // Path and empty cells are not vacated.
        assert!(!grid.vacate(&cell));
        assert!(!grid.vacate(&GridCell::new(0, 1)));
        assert_eq!(grid.state(&GridCell::new(0, 1)), Some(CellState::Path));
    }

    #[test]
    fn test_path_outside_grid_rejected() {
        let path = Path::new(&[GridCell::new(0, 0), GridCell::new(8, 0)], 32.0).unwrap();
        assert_eq!(
            Grid::new(6, 4, &path).unwrap_err(),
            MapError::PathOutOfBounds {
                cell: GridCell::new(6, 0)
            }
        );
        assert_eq!(Grid::new(0, 4, &path).unwrap_err(), MapError::EmptyGrid);
    }
}
