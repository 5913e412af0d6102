//! Path: the fixed route enemies walk, expanded to unit grid steps.

use csdefense_core::components::PathProgress;
use csdefense_core::types::{GridCell, Position};

use crate::error::MapError;

/// Immutable enemy route.
///
/// Corner waypoints are expanded once into every cell along the route, so
/// neighbouring entries are exactly one tile apart and movement is a constant
/// time index bump plus a linear blend.
#[derive(Debug, Clone)]
pub struct Path {
    cells: Vec<GridCell>,
    /// Pixel centers of `cells`.
    points: Vec<Position>,
    tile_size: f64,
}

impl Path {
    /// Build a path from corner waypoints.
    ///
    /// Fails if fewer than two waypoints are given or if any step is diagonal
    /// or zero-length.
    pub fn new(waypoints: &[GridCell], tile_size: f64) -> Result<Self, MapError> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(MapError::InvalidTileSize);
        }
        if waypoints.len() < 2 {
            return Err(MapError::TooFewWaypoints {
                count: waypoints.len(),
            });
        }

        let mut cells = vec![waypoints[0]];
        for (index, pair) in waypoints.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            let dc = to.column - from.column;
            let dr = to.row - from.row;
            // Exactly one axis changes.
            if (dc == 0) == (dr == 0) {
                return Err(MapError::MalformedPath {
                    index: index + 1,
                    from,
                    to,
                });
            }
            let step = GridCell::new(dc.signum(), dr.signum());
            let mut cell = from;
            while cell != to {
                cell = GridCell::new(cell.column + step.column, cell.row + step.row);
                cells.push(cell);
            }
        }

        let points = cells.iter().map(|c| c.center(tile_size)).collect();
        Ok(Self {
            cells,
            points,
            tile_size,
        })
    }

    /// Number of cells in the expanded route.
    pub fn total_waypoints(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Spawn point.
    pub fn start(&self) -> Position {
        self.points[0]
    }

    /// Total route length in pixels.
    pub fn length(&self) -> f64 {
        self.last_index() as f64 * self.tile_size
    }

    /// Pixel position for a progress value.
    pub fn point_at(&self, progress: &PathProgress) -> Position {
        let last = self.last_index();
        if progress.index >= last {
            return self.points[last];
        }
        let a = self.points[progress.index].as_vec();
        let b = self.points[progress.index + 1].as_vec();
        let t = (progress.offset / self.tile_size).clamp(0.0, 1.0);
        a.lerp(b, t).into()
    }

    /// Move `progress` forward by `distance` pixels, stopping at the end.
    ///
    /// Returns true once the final cell has been reached.
    pub fn advance(&self, progress: &mut PathProgress, distance: f64) -> bool {
        let last = self.last_index();
        if progress.reached_end {
            return true;
        }
        if distance.is_finite() && distance > 0.0 {
            progress.offset += distance;
        }
        while progress.offset >= self.tile_size && progress.index < last {
            progress.offset -= self.tile_size;
            progress.index += 1;
        }
        if progress.index >= last {
            progress.index = last;
            progress.offset = 0.0;
            progress.reached_end = true;
        }
        progress.reached_end
    }

    /// Pixels travelled along the route. Ranks targeting priority.
    pub fn distance_traveled(&self, progress: &PathProgress) -> f64 {
        progress.index.min(self.last_index()) as f64 * self.tile_size + progress.offset
    }

    pub fn contains(&self, cell: &GridCell) -> bool {
        self.cells.contains(cell)
    }

    fn last_index(&self) -> usize {
        self.cells.len() - 1
    }
}
