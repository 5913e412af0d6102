//! Player commands sent from a frontend to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, before any
//! system runs.

use serde::{Deserialize, Serialize};

use crate::enums::TowerKind;
use crate::types::{GridCell, TowerId};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start the next wave. Only valid while no wave is running.
    StartWave,
    /// Buy a tower and place it on a grid cell.
    PlaceTower { kind: TowerKind, cell: GridCell },
    /// Remove a tower and refund part of its cost.
    SellTower { tower: TowerId },
    /// Select a tower for the info display, or clear the selection.
    SelectTower { tower: Option<TowerId> },
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = frozen).
    SetSpeedMultiplier { value: f64 },
}
