//! Path-following system.
//!
//! Advances every live enemy along the path by `speed * dt`, with speeds
//! given per reference frame. Enemies that reach the end are marked dead and
//! recorded as a leak for the ledger.

use csdefense_core::components::{Enemy, EnemyMarker, PathProgress};
use csdefense_core::config::GameConfig;
use csdefense_core::types::Position;
use csdefense_map::Path;

use crate::economy::LedgerEntry;
use crate::pool::EntityPool;

pub fn run(
    pool: &mut EntityPool,
    path: &Path,
    config: &GameConfig,
    dt: f64,
    ledger: &mut Vec<LedgerEntry>,
) {
    let frame_rate = config.combat.reference_frame_rate;
    let enemies: Vec<_> = pool.enemy_entities().map(|(_, e)| e).collect();
    for entity in enemies {
        let Ok((_marker, enemy, progress, pos)) = pool
            .world_mut()
            .query_one_mut::<(&EnemyMarker, &mut Enemy, &mut PathProgress, &mut Position)>(entity)
        else {
            continue;
        };
        if !enemy.alive {
            continue;
        }
        let reached_end = path.advance(progress, enemy.speed * frame_rate * dt);
        *pos = path.point_at(progress);
        if reached_end {
            enemy.alive = false;
            ledger.push(LedgerEntry::Leak {
                enemy: enemy.id,
                kind: enemy.kind,
                damage: enemy.damage,
            });
        }
    }
}
