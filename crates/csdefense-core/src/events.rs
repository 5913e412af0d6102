//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, TowerKind};
use crate::error::CommandError;
use crate::types::{EnemyId, GridCell, TowerId};

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted {
        wave_number: u32,
        enemy_count: usize,
    },
    WaveCompleted {
        wave_number: u32,
        bonus: i64,
    },
    EnemySpawned {
        enemy: EnemyId,
        kind: EnemyKind,
    },
    EnemyKilled {
        enemy: EnemyId,
        kind: EnemyKind,
        tower: TowerId,
        reward: u32,
    },
    /// An enemy reached the end of the path.
    EnemyLeaked {
        enemy: EnemyId,
        kind: EnemyKind,
        damage: u32,
    },
    TowerFired {
        tower: TowerId,
        enemy: EnemyId,
    },
    TowerPlaced {
        tower: TowerId,
        kind: TowerKind,
        cell: GridCell,
    },
    TowerSold {
        tower: TowerId,
        refund: u32,
    },
    /// A queued command failed validation.
    CommandRejected { error: CommandError },
    /// Lives dropped to zero or below this tick.
    LivesDepleted { lives: i64 },
}
