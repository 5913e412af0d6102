//! Snapshot system: reads the pool and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use csdefense_core::components::*;
use csdefense_core::events::GameEvent;
use csdefense_core::state::*;
use csdefense_core::types::{Position, SimTime, TowerId};
use csdefense_map::Path;
use csdefense_waves::WaveDirector;

use crate::economy::Economy;
use crate::pool::EntityPool;

/// Non-entity state the snapshot reports alongside the pool.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub economy: &'a Economy,
    pub director: &'a WaveDirector,
    pub path: &'a Path,
    pub speed_multiplier: f64,
    pub selected_tower: Option<TowerId>,
}

pub fn build_snapshot(
    pool: &EntityPool,
    ctx: &SnapshotContext<'_>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: ctx.time,
        money: ctx.economy.money,
        lives: ctx.economy.lives,
        game_over: ctx.economy.is_depleted(),
        speed_multiplier: ctx.speed_multiplier,
        wave: WaveView {
            number: ctx.director.wave_number(),
            total: ctx.director.total_waves(),
            phase: ctx.director.phase(),
            in_progress: ctx.director.in_progress(),
            pending_spawns: ctx.director.pending_spawns(),
        },
        enemies: build_enemies(pool, ctx.path),
        towers: build_towers(pool),
        projectiles: build_projectiles(pool),
        selected_tower: ctx.selected_tower,
        events,
    }
}

/// Live enemies in pool order. Dead ones are compacted before snapshots,
/// except when a snapshot is taken mid-tick.
fn build_enemies(pool: &EntityPool, path: &Path) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = pool
        .world()
        .query::<(&EnemyMarker, &Enemy, &PathProgress, &Position)>()
        .iter()
        .filter(|(_, (_, enemy, _, _))| enemy.alive)
        .map(|(_, (_, enemy, progress, pos))| EnemyView {
            id: enemy.id,
            kind: enemy.kind,
            position: *pos,
            health: enemy.health,
            max_health: enemy.max_health,
            distance_traveled: path.distance_traveled(progress),
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_towers(pool: &EntityPool) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = pool
        .world()
        .query::<(&TowerMarker, &Tower, &Weapon, &TowerStats, &Position)>()
        .iter()
        .map(|(_, (_, tower, weapon, stats, pos))| TowerView {
            id: tower.id,
            kind: tower.kind,
            cell: tower.cell,
            position: *pos,
            damage: weapon.damage,
            range: weapon.range,
            cooldown_secs: weapon.cooldown_secs,
            cooldown_remaining: tower.cooldown_remaining,
            selected: tower.selected,
            target: tower.target,
            stats: *stats,
        })
        .collect();

    towers.sort_by_key(|t| t.id);
    towers
}

fn build_projectiles(pool: &EntityPool) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = pool
        .world()
        .query::<(&ProjectileMarker, &Projectile, &Position)>()
        .iter()
        .filter(|(_, (_, projectile, _))| projectile.live)
        .map(|(_, (_, projectile, pos))| ProjectileView {
            id: projectile.id,
            position: *pos,
            target_point: projectile.target_point,
            owner: projectile.owner,
        })
        .collect();

    projectiles.sort_by_key(|p| p.id);
    projectiles
}
