//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::config::TowerSpec;
use crate::enums::{EnemyKind, TowerKind};
use crate::types::{EnemyId, GridCell, Position, ProjectileId, TowerId};

/// Marker component for enemies.
#[derive(Debug, Clone, Copy)]
pub struct EnemyMarker;

/// Marker component for towers.
#[derive(Debug, Clone, Copy)]
pub struct TowerMarker;

/// Marker component for projectiles.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileMarker;

/// Enemy state with wave-scaled stats baked in at spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub max_health: u32,
    /// Decreases only; 0 means killed.
    pub health: u32,
    /// Pixels per reference frame.
    pub speed: f64,
    pub reward: u32,
    /// Lives lost on reaching the end of the path.
    pub damage: u32,
    /// Cleared when killed or leaked; the entity is compacted after the phase.
    pub alive: bool,
}

/// Where an enemy is along the expanded path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathProgress {
    /// Index of the path cell the enemy last passed.
    pub index: usize,
    /// Pixels travelled past that cell toward the next one.
    pub offset: f64,
    /// Set once the final path cell is reached.
    pub reached_end: bool,
}

/// A placed tower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub id: TowerId,
    pub kind: TowerKind,
    pub cell: GridCell,
    /// Price paid at placement; the refund is computed from this.
    pub cost: u32,
    /// Seconds until the tower may fire again. Never negative.
    pub cooldown_remaining: f64,
    pub selected: bool,
    /// Lookup only. Resolved through the pool each tick.
    pub target: Option<EnemyId>,
}

/// Combat parameters copied from the tower table at placement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: u32,
    pub range: f64,
    pub cooldown_secs: f64,
}

impl From<TowerSpec> for Weapon {
    fn from(spec: TowerSpec) -> Self {
        Self {
            damage: spec.damage,
            range: spec.range,
            cooldown_secs: spec.cooldown_secs,
        }
    }
}

/// Cumulative per-tower statistics for the info display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerStats {
    pub shots_fired: u32,
    pub enemies_defeated: u32,
    /// Sum of the max health of every enemy this tower finished off.
    pub damage_dealt: u64,
}

/// A projectile in flight toward a fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub origin: Position,
    /// Aim point, fixed at launch.
    pub target_point: Position,
    pub damage: u32,
    /// Pixels per simulated second.
    pub speed: f64,
    pub owner: TowerId,
    /// Cleared on hit or on reaching the aim point.
    pub live: bool,
}
