//! Game state snapshot: the complete visible state handed to a frontend each tick.

use serde::{Deserialize, Serialize};

use crate::components::TowerStats;
use crate::enums::{EnemyKind, TowerKind, WavePhase};
use crate::events::GameEvent;
use crate::types::{EnemyId, GridCell, Position, ProjectileId, SimTime, TowerId};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub money: i64,
    pub lives: i64,
    /// Lives at or below zero. Ending the session is the caller's decision.
    pub game_over: bool,
    pub speed_multiplier: f64,
    pub wave: WaveView,
    /// Sorted by id, which is spawn order.
    pub enemies: Vec<EnemyView>,
    /// Sorted by id.
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub selected_tower: Option<TowerId>,
    /// Events produced since the previous snapshot.
    pub events: Vec<GameEvent>,
}

/// Wave progress for the start-wave control and the HUD.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// Last started wave, 1-based. 0 before the first wave.
    pub number: u32,
    pub total: u32,
    pub phase: WavePhase,
    pub in_progress: bool,
    /// Entries still waiting in the spawn queue.
    pub pending_spawns: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
    /// Pixels travelled along the path.
    pub distance_traveled: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: TowerId,
    pub kind: TowerKind,
    pub cell: GridCell,
    pub position: Position,
    pub damage: u32,
    pub range: f64,
    pub cooldown_secs: f64,
    pub cooldown_remaining: f64,
    pub selected: bool,
    pub target: Option<EnemyId>,
    pub stats: TowerStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub position: Position,
    pub target_point: Position,
    pub owner: TowerId,
}
