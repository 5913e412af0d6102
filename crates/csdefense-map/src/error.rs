use csdefense_core::types::GridCell;

/// Board construction failure. Fatal: the simulation does not start.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// Consecutive waypoints must differ in exactly one axis.
    #[error("malformed path: waypoint {index} steps from {from} to {to}, which is not axis-aligned")]
    MalformedPath {
        index: usize,
        from: GridCell,
        to: GridCell,
    },

    #[error("path needs at least 2 waypoints, got {count}")]
    TooFewWaypoints { count: usize },

    #[error("path cell {cell} lies outside the grid")]
    PathOutOfBounds { cell: GridCell },

    #[error("grid must have at least one column and one row")]
    EmptyGrid,

    #[error("tile size must be positive and finite")]
    InvalidTileSize,
}
