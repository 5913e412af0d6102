//! Wave composition from wave-generation parameters.
//!
//! Pure functions of the 0-based wave index.

use serde::{Deserialize, Serialize};

use csdefense_core::config::WaveParams;
use csdefense_core::enums::EnemyKind;

/// A run of identical enemies within a wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnGroup {
    pub kind: EnemyKind,
    pub count: u32,
}

/// Everything needed to run one wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    /// 0-based generation index.
    pub index: u32,
    /// Spawned group by group, in order.
    pub groups: Vec<SpawnGroup>,
    pub health_scale: f64,
    pub speed_scale: f64,
    pub spawn_interval_secs: f64,
    pub boss: bool,
}

impl WaveDefinition {
    pub fn enemy_count(&self) -> usize {
        self.groups.iter().map(|g| g.count as usize).sum()
    }
}

/// `multiplier ^ (index / step)`. A zero step disables the scaling.
fn stepped(multiplier: f64, index: u32, step: u32) -> f64 {
    match index.checked_div(step) {
        Some(steps) => multiplier.powi(steps as i32),
        None => 1.0,
    }
}

pub fn health_scale(index: u32, params: &WaveParams) -> f64 {
    stepped(params.health_multiplier, index, params.health_step)
}

pub fn count_scale(index: u32, params: &WaveParams) -> f64 {
    stepped(params.count_multiplier, index, params.count_step)
}

pub fn speed_scale(index: u32, params: &WaveParams) -> f64 {
    stepped(params.speed_multiplier, index, params.speed_step)
}

/// Seconds between spawns: shrinks linearly with the index down to the floor.
pub fn spawn_interval(index: u32, params: &WaveParams) -> f64 {
    (params.spawn_interval_base - params.spawn_interval_decay * index as f64)
        .max(params.spawn_interval_floor)
}

pub fn is_boss_wave(index: u32, params: &WaveParams) -> bool {
    params.boss_interval > 0 && index > 0 && index % params.boss_interval == 0
}

/// Compose the wave at a 0-based index.
///
/// Boss waves replace the unlock-based mix entirely. Counts truncate toward
/// zero and empty groups are dropped.
pub fn compose_wave(index: u32, params: &WaveParams) -> WaveDefinition {
    let cs = count_scale(index, params);
    let boss = is_boss_wave(index, params);

    let groups: Vec<SpawnGroup> = if boss {
        params
            .boss_groups
            .iter()
            .map(|g| SpawnGroup {
                kind: g.kind,
                count: (g.base_count as f64 * cs) as u32,
            })
            .filter(|g| g.count > 0)
            .collect()
    } else {
        params
            .unlocks
            .iter()
            .filter(|rule| index >= rule.from_wave)
            .map(|rule| SpawnGroup {
                kind: rule.kind,
                count: (rule.base_count as f64 * cs * rule.count_factor) as u32,
            })
            .filter(|g| g.count > 0)
            .collect()
    };

    WaveDefinition {
        index,
        groups,
        health_scale: health_scale(index, params),
        speed_scale: speed_scale(index, params),
        spawn_interval_secs: spawn_interval(index, params),
        boss,
    }
}

/// Every wave of a session, index 0 first.
pub fn generate_schedule(params: &WaveParams) -> Vec<WaveDefinition> {
    (0..params.total_waves)
        .map(|index| compose_wave(index, params))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_wave_is_syntax_errors_only() {
        let def = compose_wave(0, &WaveParams::default());
        assert_eq!(
            def.groups,
            vec![SpawnGroup {
                kind: EnemyKind::SyntaxError,
                count: 10
            }]
        );
        assert_eq!(def.health_scale, 1.0);
        assert_eq!(def.speed_scale, 1.0);
        assert_eq!(def.spawn_interval_secs, 1.0);
        assert!(!def.boss);
    }

    #[test]
    fn test_unlocks_follow_declared_order() {
        let def = compose_wave(15, &WaveParams::default());
        let kinds: Vec<EnemyKind> = def.groups.iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EnemyKind::SyntaxError,
                EnemyKind::LogicError,
                EnemyKind::Trojan,
                EnemyKind::MemoryLeak
            ]
        );
    }

    #[test]
    fn test_wave_difficulty_increases_with_index() {
        let params = WaveParams::default();
        let early = compose_wave(1, &params);
        let late = compose_wave(29, &params);
        assert!(late.enemy_count() > early.enemy_count());
        assert!(late.health_scale > early.health_scale);
        assert!(late.spawn_interval_secs < early.spawn_interval_secs);
    }

    #[test]
    fn test_boss_wave_overrides_mix() {
        let params = WaveParams::default();
        let def = compose_wave(10, &params);
        assert!(def.boss);
        // count scale 1.15^3
        assert_eq!(
            def.groups,
            vec![
                SpawnGroup {
                    kind: EnemyKind::MemoryLeak,
                    count: 15
                },
                SpawnGroup {
                    kind: EnemyKind::Trojan,
                    count: 22
                },
                SpawnGroup {
                    kind: EnemyKind::LogicError,
                    count: 30
                },
            ]
        );
        assert!(!compose_wave(0, &params).boss);
    }
}
