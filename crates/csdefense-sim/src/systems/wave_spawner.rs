//! Wave spawning system. Drip-feeds the active wave into the pool.

use csdefense_core::config::GameConfig;
use csdefense_core::events::GameEvent;
use csdefense_map::Path;
use csdefense_waves::WaveDirector;

use crate::pool::EntityPool;

/// Advance the spawn timer and create at most one enemy.
pub fn run(
    director: &mut WaveDirector,
    pool: &mut EntityPool,
    config: &GameConfig,
    path: &Path,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    let Some(order) = director.tick(dt) else {
        return;
    };
    let enemy = crate::world_setup::spawn_enemy(pool, config, path, &order);
    tracing::debug!(
        %enemy,
        kind = ?order.kind,
        wave = director.wave_number(),
        pending = director.pending_spawns(),
        "enemy spawned"
    );
    events.push(GameEvent::EnemySpawned {
        enemy,
        kind: order.kind,
    });
}
