//! Startup configuration: content tables, board layout and tuning.
//!
//! Owned by an external loader; the simulation consumes a validated
//! [`GameConfig`] once at construction. `Default` reproduces the stock game.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{EnemyKind, TowerKind};
use crate::error::ConfigError;
use crate::types::GridCell;

/// Base stats for one enemy kind, before wave scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: u32,
    /// Pixels per reference frame.
    pub speed: f64,
    /// Money awarded on kill.
    pub reward: u32,
    /// Lives lost when the enemy reaches the end of the path.
    pub damage: u32,
}

/// Static parameters for one tower kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerSpec {
    pub cost: u32,
    pub damage: u32,
    /// Targeting radius in pixels.
    pub range: f64,
    /// Seconds between shots.
    pub cooldown_secs: f64,
}

/// One stats entry per enemy kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTable {
    pub syntax_error: EnemyStats,
    pub logic_error: EnemyStats,
    pub trojan: EnemyStats,
    pub memory_leak: EnemyStats,
}

impl EnemyTable {
    pub fn get(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::SyntaxError => &self.syntax_error,
            EnemyKind::LogicError => &self.logic_error,
            EnemyKind::Trojan => &self.trojan,
            EnemyKind::MemoryLeak => &self.memory_leak,
        }
    }
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            syntax_error: EnemyStats {
                health: 100,
                speed: 2.0,
                reward: 10,
                damage: 1,
            },
            logic_error: EnemyStats {
                health: 200,
                speed: 1.5,
                reward: 20,
                damage: 2,
            },
            trojan: EnemyStats {
                health: 150,
                speed: 3.0,
                reward: 25,
                damage: 2,
            },
            memory_leak: EnemyStats {
                health: 400,
                speed: 1.0,
                reward: 35,
                damage: 3,
            },
        }
    }
}

/// One spec entry per tower kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerTable {
    pub firewall: TowerSpec,
    pub debugger: TowerSpec,
    pub antivirus: TowerSpec,
    pub encryption: TowerSpec,
    pub sandbox: TowerSpec,
    pub honeypot: TowerSpec,
    pub proxy: TowerSpec,
    pub compiler: TowerSpec,
    pub linter: TowerSpec,
    pub profiler: TowerSpec,
    pub load_balancer: TowerSpec,
    pub garbage_collector: TowerSpec,
}

impl TowerTable {
    pub fn get(&self, kind: TowerKind) -> &TowerSpec {
        match kind {
            TowerKind::Firewall => &self.firewall,
            TowerKind::Debugger => &self.debugger,
            TowerKind::Antivirus => &self.antivirus,
            TowerKind::Encryption => &self.encryption,
            TowerKind::Sandbox => &self.sandbox,
            TowerKind::Honeypot => &self.honeypot,
            TowerKind::Proxy => &self.proxy,
            TowerKind::Compiler => &self.compiler,
            TowerKind::Linter => &self.linter,
            TowerKind::Profiler => &self.profiler,
            TowerKind::LoadBalancer => &self.load_balancer,
            TowerKind::GarbageCollector => &self.garbage_collector,
        }
    }
}

const fn tower(cost: u32, damage: u32, range: f64, cooldown_secs: f64) -> TowerSpec {
    TowerSpec {
        cost,
        damage,
        range,
        cooldown_secs,
    }
}

impl Default for TowerTable {
    fn default() -> Self {
        Self {
            firewall: tower(100, 20, 150.0, 0.3),
            debugger: tower(200, 50, 180.0, 0.8),
            antivirus: tower(350, 30, 140.0, 0.2),
            encryption: tower(300, 15, 120.0, 0.3),
            sandbox: tower(150, 25, 130.0, 0.5),
            honeypot: tower(250, 10, 200.0, 0.15),
            proxy: tower(175, 35, 160.0, 0.6),
            compiler: tower(400, 80, 170.0, 1.2),
            linter: tower(120, 12, 110.0, 0.25),
            profiler: tower(450, 40, 220.0, 0.5),
            load_balancer: tower(500, 45, 190.0, 0.4),
            garbage_collector: tower(700, 150, 250.0, 2.0),
        }
    }
}

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: u32,
    pub rows: u32,
    /// Pixels per cell edge.
    pub tile_size: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            rows: GRID_ROWS,
            tile_size: TILE_SIZE,
        }
    }
}

/// Money and lives rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyParams {
    pub starting_money: i64,
    pub starting_lives: i64,
    pub sell_refund_percent: u32,
    pub wave_bonus_base: i64,
    pub wave_bonus_per_wave: i64,
}

impl Default for EconomyParams {
    fn default() -> Self {
        Self {
            starting_money: STARTING_MONEY,
            starting_lives: STARTING_LIVES,
            sell_refund_percent: SELL_REFUND_PERCENT,
            wave_bonus_base: WAVE_BONUS_BASE,
            wave_bonus_per_wave: WAVE_BONUS_PER_WAVE,
        }
    }
}

impl EconomyParams {
    /// Money returned when selling a tower that cost `cost`. Truncates.
    pub fn refund_for(&self, cost: u32) -> u32 {
        (u64::from(cost) * u64::from(self.sell_refund_percent) / 100) as u32
    }

    /// Bonus paid when wave `wave_number` (1-based) completes.
    pub fn wave_bonus(&self, wave_number: u32) -> i64 {
        self.wave_bonus_base + self.wave_bonus_per_wave * i64::from(wave_number)
    }
}

/// Projectile and hit-region tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatParams {
    /// Pixels per reference frame.
    pub projectile_speed: f64,
    pub projectile_radius: f64,
    pub enemy_hit_radius: f64,
    /// Frame rate the per-frame speeds were tuned at.
    pub reference_frame_rate: f64,
}

impl Default for CombatParams {
    fn default() -> Self {
        Self {
            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
            enemy_hit_radius: ENEMY_HIT_RADIUS,
            reference_frame_rate: REFERENCE_FRAME_RATE,
        }
    }
}

/// Enemy kind that joins the regular mix from a given wave index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnlockRule {
    pub kind: EnemyKind,
    /// First 0-based wave index the kind appears in.
    pub from_wave: u32,
    pub base_count: u32,
    /// Fraction of the count scale applied to this kind.
    pub count_factor: f64,
}

/// One group of a boss composition: `int(base_count * count_scale)` enemies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossGroup {
    pub kind: EnemyKind,
    pub base_count: u32,
}

/// Wave generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    pub total_waves: u32,
    pub health_multiplier: f64,
    pub health_step: u32,
    pub count_multiplier: f64,
    pub count_step: u32,
    pub speed_multiplier: f64,
    pub speed_step: u32,
    /// Regular mix, in declared spawn order.
    pub unlocks: Vec<UnlockRule>,
    /// 0 disables boss waves.
    pub boss_interval: u32,
    pub boss_groups: Vec<BossGroup>,
    pub spawn_interval_base: f64,
    pub spawn_interval_decay: f64,
    pub spawn_interval_floor: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            total_waves: WAVE_COUNT,
            health_multiplier: HEALTH_MULTIPLIER,
            health_step: HEALTH_STEP,
            count_multiplier: COUNT_MULTIPLIER,
            count_step: COUNT_STEP,
            speed_multiplier: SPEED_MULTIPLIER,
            speed_step: SPEED_STEP,
            unlocks: vec![
                UnlockRule {
                    kind: EnemyKind::SyntaxError,
                    from_wave: 0,
                    base_count: 10,
                    count_factor: 1.0,
                },
                UnlockRule {
                    kind: EnemyKind::LogicError,
                    from_wave: 5,
                    base_count: 5,
                    count_factor: 0.8,
                },
                UnlockRule {
                    kind: EnemyKind::Trojan,
                    from_wave: 10,
                    base_count: 3,
                    count_factor: 0.6,
                },
                UnlockRule {
                    kind: EnemyKind::MemoryLeak,
                    from_wave: 15,
                    base_count: 2,
                    count_factor: 0.4,
                },
            ],
            boss_interval: BOSS_WAVE_INTERVAL,
            boss_groups: vec![
                BossGroup {
                    kind: EnemyKind::MemoryLeak,
                    base_count: 10,
                },
                BossGroup {
                    kind: EnemyKind::Trojan,
                    base_count: 15,
                },
                BossGroup {
                    kind: EnemyKind::LogicError,
                    base_count: 20,
                },
            ],
            spawn_interval_base: SPAWN_INTERVAL_BASE,
            spawn_interval_decay: SPAWN_INTERVAL_DECAY,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
        }
    }
}

/// Complete startup configuration for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridConfig,
    /// Corner waypoints of the enemy path, in grid cells.
    pub path: Vec<GridCell>,
    pub economy: EconomyParams,
    pub enemies: EnemyTable,
    pub towers: TowerTable,
    pub waves: WaveParams,
    pub combat: CombatParams,
    pub max_speed_multiplier: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            path: PATH_WAYPOINTS
                .iter()
                .map(|&(column, row)| GridCell::new(column, row))
                .collect(),
            economy: EconomyParams::default(),
            enemies: EnemyTable::default(),
            towers: TowerTable::default(),
            waves: WaveParams::default(),
            combat: CombatParams::default(),
            max_speed_multiplier: MAX_SPEED_MULTIPLIER,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing sections fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check the numeric invariants the simulation relies on.
    ///
    /// Path geometry is checked separately when the path is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid.tile_size.is_finite() && self.grid.tile_size > 0.0) {
            return Err(ConfigError::invalid("grid.tile_size must be positive"));
        }
        if self.economy.sell_refund_percent > 100 {
            return Err(ConfigError::invalid(
                "economy.sell_refund_percent must not exceed 100",
            ));
        }
        for kind in EnemyKind::ALL {
            let stats = self.enemies.get(kind);
            if stats.health == 0 {
                return Err(ConfigError::invalid(format!("{kind:?} health must be non-zero")));
            }
            if !(stats.speed.is_finite() && stats.speed > 0.0) {
                return Err(ConfigError::invalid(format!("{kind:?} speed must be positive")));
            }
        }
        for kind in TowerKind::ALL {
            let spec = self.towers.get(kind);
            if !(spec.range.is_finite() && spec.range >= 0.0) {
                return Err(ConfigError::invalid(format!("{kind:?} range must be non-negative")));
            }
            if !(spec.cooldown_secs.is_finite() && spec.cooldown_secs >= 0.0) {
                return Err(ConfigError::invalid(format!(
                    "{kind:?} cooldown must be non-negative"
                )));
            }
        }
        let combat = &self.combat;
        if !(combat.projectile_speed.is_finite() && combat.projectile_speed > 0.0) {
            return Err(ConfigError::invalid("combat.projectile_speed must be positive"));
        }
        if !(combat.reference_frame_rate.is_finite() && combat.reference_frame_rate > 0.0) {
            return Err(ConfigError::invalid(
                "combat.reference_frame_rate must be positive",
            ));
        }
        if !(non_negative(combat.projectile_radius) && non_negative(combat.enemy_hit_radius)) {
            return Err(ConfigError::invalid("combat radii must be non-negative"));
        }
        let waves = &self.waves;
        if !(non_negative(waves.spawn_interval_floor)
            && non_negative(waves.spawn_interval_base)
            && non_negative(waves.spawn_interval_decay))
        {
            return Err(ConfigError::invalid("spawn intervals must be non-negative"));
        }
        if !(non_negative(waves.health_multiplier)
            && non_negative(waves.count_multiplier)
            && non_negative(waves.speed_multiplier))
        {
            return Err(ConfigError::invalid("wave multipliers must be non-negative"));
        }
        if !waves.unlocks.iter().all(|rule| non_negative(rule.count_factor)) {
            return Err(ConfigError::invalid("unlock count factors must be non-negative"));
        }
        if !(self.max_speed_multiplier.is_finite() && self.max_speed_multiplier >= 1.0) {
            return Err(ConfigError::invalid("max_speed_multiplier must be at least 1"));
        }
        Ok(())
    }

    /// Pixels per simulated second for a per-frame speed.
    pub fn per_second(&self, per_frame: f64) -> f64 {
        per_frame * self.combat.reference_frame_rate
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
