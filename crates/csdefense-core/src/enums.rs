//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy kind. Base stats live in the enemy table of [`crate::config::GameConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Fast, fragile, present in every wave.
    SyntaxError,
    /// Sturdier, unlocked from wave index 5.
    LogicError,
    /// Quick and mid-health, unlocked from wave index 10.
    Trojan,
    /// Slow tank, unlocked from wave index 15.
    MemoryLeak,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::SyntaxError,
        EnemyKind::LogicError,
        EnemyKind::Trojan,
        EnemyKind::MemoryLeak,
    ];
}

/// Tower kind. Cost, damage, range and cooldown live in the tower table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    Firewall,
    Debugger,
    Antivirus,
    Encryption,
    Sandbox,
    Honeypot,
    Proxy,
    Compiler,
    Linter,
    Profiler,
    LoadBalancer,
    GarbageCollector,
}

impl TowerKind {
    pub const ALL: [TowerKind; 12] = [
        TowerKind::Firewall,
        TowerKind::Debugger,
        TowerKind::Antivirus,
        TowerKind::Encryption,
        TowerKind::Sandbox,
        TowerKind::Honeypot,
        TowerKind::Proxy,
        TowerKind::Compiler,
        TowerKind::Linter,
        TowerKind::Profiler,
        TowerKind::LoadBalancer,
        TowerKind::GarbageCollector,
    ];
}

/// Occupancy state of a single grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    /// A tower stands here.
    Occupied,
    /// Part of the enemy path. Never buildable.
    Path,
}

/// Wave director phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// No wave running; waiting for a start command.
    #[default]
    Idle,
    /// Spawn queue non-empty, enemies drip-fed on a timer.
    Spawning,
    /// Queue empty, enemies still alive.
    Draining,
}
