//! Entity spawn factories.
//!
//! Build component bundles from the config tables and hand them to the pool.

use csdefense_core::components::*;
use csdefense_core::config::GameConfig;
use csdefense_core::enums::TowerKind;
use csdefense_core::types::{EnemyId, GridCell, Position, TowerId};
use csdefense_map::Path;
use csdefense_waves::SpawnOrder;

use crate::pool::EntityPool;

/// Spawn an enemy at the start of the path with wave-scaled stats.
///
/// Health and reward scale with the health factor, speed with the speed
/// factor. Scaled integers truncate; health never drops below 1.
pub fn spawn_enemy(
    pool: &mut EntityPool,
    config: &GameConfig,
    path: &Path,
    order: &SpawnOrder,
) -> EnemyId {
    let stats = config.enemies.get(order.kind);
    let health = ((stats.health as f64 * order.health_scale) as u32).max(1);
    let id = pool.next_enemy_id();
    let enemy = Enemy {
        id,
        kind: order.kind,
        max_health: health,
        health,
        speed: stats.speed * order.speed_scale,
        reward: (stats.reward as f64 * order.health_scale) as u32,
        damage: stats.damage,
        alive: true,
    };
    pool.add_enemy(enemy, PathProgress::default(), path.start());
    id
}

/// Spawn a tower centered in `cell`. Placement rules are checked by the caller.
pub fn spawn_tower(
    pool: &mut EntityPool,
    config: &GameConfig,
    kind: TowerKind,
    cell: GridCell,
) -> TowerId {
    let spec = *config.towers.get(kind);
    let id = pool.next_tower_id();
    let tower = Tower {
        id,
        kind,
        cell,
        cost: spec.cost,
        cooldown_remaining: 0.0,
        selected: false,
        target: None,
    };
    pool.add_tower(tower, Weapon::from(spec), cell.center(config.grid.tile_size));
    id
}

/// Launch a projectile from `origin` toward a fixed aim point.
pub fn spawn_projectile(
    pool: &mut EntityPool,
    config: &GameConfig,
    owner: TowerId,
    origin: Position,
    target_point: Position,
    damage: u32,
) {
    let id = pool.next_projectile_id();
    pool.add_projectile(Projectile {
        id,
        origin,
        target_point,
        damage,
        speed: config.per_second(config.combat.projectile_speed),
        owner,
        live: true,
    });
}
