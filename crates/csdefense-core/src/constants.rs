//! Simulation constants and default tuning parameters.
//!
//! These seed [`crate::config::GameConfig::default`]; the running simulation
//! reads the config, never these constants directly.

/// Nominal frame rate of the game loop (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per frame at 1x speed.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Enemy and projectile speeds are tuned in pixels per frame at this rate.
pub const REFERENCE_FRAME_RATE: f64 = 60.0;

// --- Board ---

/// Side length of one grid cell in pixels.
pub const TILE_SIZE: f64 = 32.0;

/// Build grid width in cells. The original window left 250 px for a side panel.
pub const GRID_COLUMNS: u32 = (1280 - 250) / 32;

/// Build grid height in cells.
pub const GRID_ROWS: u32 = 800 / 32;

/// Path waypoints in grid coordinates (column, row).
pub const PATH_WAYPOINTS: [(i32, i32); 10] = [
    (0, 12),
    (6, 12),
    (6, 4),
    (12, 4),
    (12, 20),
    (18, 20),
    (18, 8),
    (24, 8),
    (24, 16),
    (30, 16),
];

// --- Economy ---

pub const STARTING_MONEY: i64 = 650;
pub const STARTING_LIVES: i64 = 100;

/// Percentage of a tower's cost returned on sale.
pub const SELL_REFUND_PERCENT: u32 = 70;

/// Flat part of the wave-completion bonus.
pub const WAVE_BONUS_BASE: i64 = 100;

/// Per-wave part of the wave-completion bonus.
pub const WAVE_BONUS_PER_WAVE: i64 = 50;

// --- Combat ---

/// Projectile speed in pixels per reference frame.
pub const PROJECTILE_SPEED: f64 = 8.0;

/// Projectile collision radius (pixels), matching its 16 px glow sprite.
pub const PROJECTILE_RADIUS: f64 = 8.0;

/// Enemy hit radius (pixels). Enemy sprites are a tile minus a 4 px margin.
pub const ENEMY_HIT_RADIUS: f64 = (TILE_SIZE - 4.0) / 2.0;

// --- Waves ---

/// Number of generated waves in a session.
pub const WAVE_COUNT: u32 = 100;

pub const HEALTH_MULTIPLIER: f64 = 1.2;
pub const HEALTH_STEP: u32 = 5;
pub const COUNT_MULTIPLIER: f64 = 1.15;
pub const COUNT_STEP: u32 = 3;
pub const SPEED_MULTIPLIER: f64 = 1.05;
pub const SPEED_STEP: u32 = 8;

/// Every Nth wave index (excluding 0) uses the boss composition.
pub const BOSS_WAVE_INTERVAL: u32 = 10;

/// Spawn interval at wave index 0 (seconds).
pub const SPAWN_INTERVAL_BASE: f64 = 1.0;

/// Spawn interval reduction per wave index (seconds).
pub const SPAWN_INTERVAL_DECAY: f64 = 0.01;

/// Shortest spawn interval (seconds).
pub const SPAWN_INTERVAL_FLOOR: f64 = 0.2;

// --- Simulation control ---

/// Upper bound for the speed multiplier.
pub const MAX_SPEED_MULTIPLIER: f64 = 4.0;
