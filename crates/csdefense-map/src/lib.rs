//! Board geometry for csdefense.
//!
//! The fixed enemy path and the tower-placement grid.

pub use csdefense_core as core;

pub mod error;
pub mod grid;
pub mod path;

// Re-export key types for convenience.
pub use error::MapError;
pub use grid::Grid;
pub use path::Path;
