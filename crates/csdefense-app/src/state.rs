//! State shared between the main thread and the game loop thread.

use serde::Serialize;

use csdefense_core::commands::PlayerCommand;
use csdefense_core::events::GameEvent;
use csdefense_core::state::GameStateSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// How the loop runs and when it stops on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopSettings {
    /// Sleep between ticks to hold the nominal tick rate. Headless runs
    /// go as fast as possible.
    pub paced: bool,
    pub max_ticks: Option<u64>,
    /// Stop once this wave (1-based) has completed.
    pub stop_after_wave: Option<u32>,
}

/// Why the loop exited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum StopReason {
    #[default]
    Shutdown,
    Disconnected,
    GameOver,
    AllWavesComplete,
    WaveTarget,
    TickLimit,
}

/// Totals accumulated from each tick's events.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub sim_secs: f64,
    pub waves_completed: u32,
    pub enemies_spawned: u32,
    pub enemies_killed: u32,
    pub enemies_leaked: u32,
    pub towers_placed: u32,
    pub towers_sold: u32,
    pub commands_rejected: u32,
    pub money: i64,
    pub lives: i64,
    pub game_over: bool,
    pub stop_reason: StopReason,
}

impl RunSummary {
    /// Fold one snapshot into the totals.
    pub fn record(&mut self, snapshot: &GameStateSnapshot) {
        for event in &snapshot.events {
            match event {
                GameEvent::WaveCompleted { .. } => self.waves_completed += 1,
                GameEvent::EnemySpawned { .. } => self.enemies_spawned += 1,
                GameEvent::EnemyKilled { .. } => self.enemies_killed += 1,
                GameEvent::EnemyLeaked { .. } => self.enemies_leaked += 1,
                GameEvent::TowerPlaced { .. } => self.towers_placed += 1,
                GameEvent::TowerSold { .. } => self.towers_sold += 1,
                GameEvent::CommandRejected { .. } => self.commands_rejected += 1,
                _ => {}
            }
        }
        self.ticks = snapshot.time.tick;
        self.sim_secs = snapshot.time.elapsed_secs;
        self.money = snapshot.money;
        self.lives = snapshot.lives;
        self.game_over = snapshot.game_over;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csdefense_core::enums::EnemyKind;
    use csdefense_core::types::{EnemyId, TowerId};

    #[test]
    fn test_summary_counts_events() {
        let mut summary = RunSummary::default();
        let snapshot = GameStateSnapshot {
            money: 700,
            lives: 99,
            events: vec![
                GameEvent::EnemySpawned {
                    enemy: EnemyId(0),
                    kind: EnemyKind::SyntaxError,
                },
                GameEvent::EnemyKilled {
                    enemy: EnemyId(0),
                    kind: EnemyKind::SyntaxError,
                    tower: TowerId(0),
                    reward: 10,
                },
                GameEvent::TowerSold {
                    tower: TowerId(0),
                    refund: 70,
                },
            ],
            ..Default::default()
        };
        summary.record(&snapshot);
        summary.record(&snapshot);
        assert_eq!(summary.enemies_spawned, 2);
        assert_eq!(summary.enemies_killed, 2);
        assert_eq!(summary.towers_sold, 2);
        assert_eq!(summary.enemies_leaked, 0);
        assert_eq!(summary.money, 700);
        assert_eq!(summary.lives, 99);
        assert_eq!(summary.stop_reason, StopReason::Shutdown);
    }
}
