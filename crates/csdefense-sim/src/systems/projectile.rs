//! Projectile motion and hit resolution.
//!
//! Projectiles fly straight at a fixed aim point. A projectile hits the first
//! live enemy in pool order whose hit circle overlaps the segment it swept
//! this tick; failing that it is spent once it reaches the aim point.

use glam::DVec2;
use hecs::Entity;

use csdefense_core::components::{Enemy, Projectile, TowerStats};
use csdefense_core::config::GameConfig;
use csdefense_core::types::Position;

use crate::economy::LedgerEntry;
use crate::pool::EntityPool;

/// Step `from` toward `to` by at most `step` pixels. Returns the new position
/// and whether `to` was reached.
pub fn step_toward(from: &Position, to: &Position, step: f64) -> (Position, bool) {
    let from: DVec2 = from.as_vec();
    let delta = to.as_vec() - from;
    let remaining = delta.length();
    if remaining <= step {
        return (*to, true);
    }
    ((from + delta / remaining * step).into(), false)
}

/// Distance from `point` to the segment `a`-`b`.
pub fn distance_to_segment(point: &Position, a: &Position, b: &Position) -> f64 {
    let (p, a, b) = (point.as_vec(), a.as_vec(), b.as_vec());
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

pub fn run(pool: &mut EntityPool, config: &GameConfig, dt: f64, ledger: &mut Vec<LedgerEntry>) {
    let hit_distance = config.combat.enemy_hit_radius + config.combat.projectile_radius;
    let projectiles: Vec<Entity> = pool.projectile_entities().map(|(_, e)| e).collect();
    let enemies: Vec<Entity> = pool.enemy_entities().map(|(_, e)| e).collect();

    for entity in projectiles {
        let world = pool.world();
        let (Ok(mut projectile), Ok(mut pos)) = (
            world.get::<&mut Projectile>(entity),
            world.get::<&mut Position>(entity),
        ) else {
            continue;
        };
        if !projectile.live {
            continue;
        }

        let from = *pos;
        let (next, arrived) = step_toward(&from, &projectile.target_point, projectile.speed * dt);
        *pos = next;

        let victim = enemies.iter().copied().find(|&e| {
            match (world.get::<&Enemy>(e), world.get::<&Position>(e)) {
                (Ok(enemy), Ok(enemy_pos)) => {
                    enemy.alive
                        && distance_to_segment(&enemy_pos, &from, &next) <= hit_distance
                }
                _ => false,
            }
        });

        if let Some(victim) = victim {
            projectile.live = false;
            let Ok(mut enemy) = world.get::<&mut Enemy>(victim) else {
                continue;
            };
            enemy.health = enemy.health.saturating_sub(projectile.damage);
            if enemy.health == 0 {
                enemy.alive = false;
                // Kill credit is the victim's full max health.
                if let Some(owner) = pool.tower(projectile.owner) {
                    if let Ok(mut stats) = world.get::<&mut TowerStats>(owner) {
                        stats.enemies_defeated += 1;
                        stats.damage_dealt += u64::from(enemy.max_health);
                    }
                }
                ledger.push(LedgerEntry::Bounty {
                    enemy: enemy.id,
                    kind: enemy.kind,
                    tower: projectile.owner,
                    reward: enemy.reward,
                });
            }
        } else if arrived {
            projectile.live = false;
        }
    }
}
