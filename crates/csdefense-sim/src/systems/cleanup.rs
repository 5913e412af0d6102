//! Cleanup system: compacts dead enemies and spent projectiles.

use hecs::Entity;

use csdefense_core::components::Tower;

use crate::pool::EntityPool;

/// Remove everything marked dead this tick. Uses a pre-allocated buffer to
/// avoid per-tick allocation.
pub fn run(pool: &mut EntityPool, despawn_buffer: &mut Vec<Entity>) {
    let removed = pool.compact(despawn_buffer);
    if removed == 0 {
        return;
    }

    // Drop targets that no longer resolve.
    let stale: Vec<Entity> = pool
        .world()
        .query::<&Tower>()
        .iter()
        .filter(|(_, tower)| tower.target.is_some_and(|id| pool.enemy(id).is_none()))
        .map(|(entity, _)| entity)
        .collect();
    for entity in stale {
        if let Ok(mut tower) = pool.world().get::<&mut Tower>(entity) {
            tower.target = None;
        }
    }
}
