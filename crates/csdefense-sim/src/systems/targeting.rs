//! Tower targeting and firing.
//!
//! Each tower picks the live enemy furthest along the path inside its range,
//! then fires at that enemy's current position if its cooldown has run out.

use csdefense_core::components::{Enemy, EnemyMarker, PathProgress, Tower, TowerMarker, TowerStats, Weapon};
use csdefense_core::config::GameConfig;
use csdefense_core::events::GameEvent;
use csdefense_core::types::{EnemyId, Position, TowerId};
use csdefense_map::Path;

use crate::pool::EntityPool;
use crate::world_setup;

/// Cooldowns within this of zero count as expired.
const COOLDOWN_EPSILON: f64 = 1e-9;

/// A live enemy as seen by towers this tick.
#[derive(Debug, Clone, Copy)]
pub struct TargetCandidate {
    pub id: EnemyId,
    pub position: Position,
    pub distance_traveled: f64,
}

/// Live enemies in pool order.
pub fn collect_candidates(pool: &EntityPool, path: &Path) -> Vec<TargetCandidate> {
    let world = pool.world();
    pool.enemy_entities()
        .filter_map(|(id, entity)| {
            let mut query = world
                .query_one::<(&EnemyMarker, &Enemy, &PathProgress, &Position)>(entity)
                .ok()?;
            let (_, enemy, progress, pos) = query.get()?;
            enemy.alive.then(|| TargetCandidate {
                id,
                position: *pos,
                distance_traveled: path.distance_traveled(progress),
            })
        })
        .collect()
}

/// Pick the candidate strictly inside `range` with the greatest path
/// progress. Ties go to the earlier candidate.
pub fn select_target(
    origin: &Position,
    range: f64,
    candidates: &[TargetCandidate],
) -> Option<TargetCandidate> {
    let mut best: Option<TargetCandidate> = None;
    for candidate in candidates {
        if origin.distance_to(&candidate.position) >= range {
            continue;
        }
        match best {
            Some(b) if candidate.distance_traveled <= b.distance_traveled => {}
            _ => best = Some(*candidate),
        }
    }
    best
}

struct Shot {
    tower: TowerId,
    enemy: EnemyId,
    origin: Position,
    aim: Position,
    damage: u32,
}

pub fn run(
    pool: &mut EntityPool,
    path: &Path,
    config: &GameConfig,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    let candidates = collect_candidates(pool, path);
    let mut shots = Vec::new();

    let towers: Vec<_> = pool.tower_entities().map(|(_, e)| e).collect();
    for entity in towers {
        let Ok((_marker, tower, weapon, stats, pos)) = pool
            .world_mut()
            .query_one_mut::<(&TowerMarker, &mut Tower, &Weapon, &mut TowerStats, &Position)>(entity)
        else {
            continue;
        };
        let target = select_target(pos, weapon.range, &candidates);
        tower.target = target.map(|t| t.id);

        if tower.cooldown_remaining > 0.0 {
            tower.cooldown_remaining -= dt;
            if tower.cooldown_remaining <= COOLDOWN_EPSILON {
                tower.cooldown_remaining = 0.0;
            }
            continue;
        }

        let Some(target) = target else {
            continue;
        };
        stats.shots_fired += 1;
        tower.cooldown_remaining = weapon.cooldown_secs;
        shots.push(Shot {
            tower: tower.id,
            enemy: target.id,
            origin: *pos,
            aim: target.position,
            damage: weapon.damage,
        });
    }

    // Launched in tower order after the sweep.
    for shot in shots {
        world_setup::spawn_projectile(pool, config, shot.tower, shot.origin, shot.aim, shot.damage);
        tracing::debug!(tower = %shot.tower, enemy = %shot.enemy, "tower fired");
        events.push(GameEvent::TowerFired {
            tower: shot.tower,
            enemy: shot.enemy,
        });
    }
}
