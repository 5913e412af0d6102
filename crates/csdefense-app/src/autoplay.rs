//! Seeded autoplayer.
//!
//! Buys towers on free cells next to the path whenever it can afford one and
//! starts the next wave after a short pause between waves. All choices come
//! from a ChaCha8 stream, so a seed replays the same session.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use csdefense_core::commands::PlayerCommand;
use csdefense_core::config::TowerTable;
use csdefense_core::enums::{CellState, TowerKind};
use csdefense_core::events::GameEvent;
use csdefense_core::state::GameStateSnapshot;
use csdefense_core::types::GridCell;
use csdefense_map::{Grid, Path};
use csdefense_sim::SimulationEngine;

use crate::game_loop::Controller;

/// Ticks to wait between one wave ending and starting the next.
const WAVE_PAUSE_TICKS: u32 = 90;

/// Cells this many steps (Chebyshev) from the path count as build sites.
const BUILD_REACH: i32 = 2;

pub struct AutoPlayer {
    rng: ChaCha8Rng,
    towers: TowerTable,
    sites: Vec<GridCell>,
    idle_ticks: u32,
}

impl AutoPlayer {
    pub fn new(seed: u64, engine: &SimulationEngine) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            towers: engine.config().towers.clone(),
            sites: build_sites(engine.grid(), engine.path()),
            idle_ticks: 0,
        }
    }

    /// Build sites not yet used.
    pub fn remaining_sites(&self) -> usize {
        self.sites.len()
    }

    fn pick_tower(&mut self, money: i64) -> Option<TowerKind> {
        let affordable: Vec<TowerKind> = TowerKind::ALL
            .into_iter()
            .filter(|&kind| i64::from(self.towers.get(kind).cost) <= money)
            .collect();
        if affordable.is_empty() {
            return None;
        }
        Some(affordable[self.rng.gen_range(0..affordable.len())])
    }
}

impl Controller for AutoPlayer {
    fn on_snapshot(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        if snapshot.game_over {
            return commands;
        }

        // Keep the newest tower selected.
        for event in &snapshot.events {
            if let GameEvent::TowerPlaced { tower, .. } = event {
                commands.push(PlayerCommand::SelectTower { tower: Some(*tower) });
            }
        }

        if !self.sites.is_empty() {
            if let Some(kind) = self.pick_tower(snapshot.money) {
                let index = self.rng.gen_range(0..self.sites.len());
                let cell = self.sites.swap_remove(index);
                tracing::debug!(?kind, %cell, money = snapshot.money, "autoplayer building");
                commands.push(PlayerCommand::PlaceTower { kind, cell });
            }
        }

        if snapshot.wave.in_progress || snapshot.wave.number >= snapshot.wave.total {
            self.idle_ticks = 0;
        } else {
            self.idle_ticks += 1;
            if self.idle_ticks >= WAVE_PAUSE_TICKS {
                self.idle_ticks = 0;
                commands.push(PlayerCommand::StartWave);
            }
        }

        commands
    }
}

/// Empty cells within reach of the path, in row-major order.
fn build_sites(grid: &Grid, path: &Path) -> Vec<GridCell> {
    let mut sites = Vec::new();
    for row in 0..grid.rows() as i32 {
        for column in 0..grid.columns() as i32 {
            let cell = GridCell { column, row };
            if grid.state(&cell) != Some(CellState::Empty) {
                continue;
            }
            let near_path = path.cells().iter().any(|p| {
                (p.column - column).abs() <= BUILD_REACH && (p.row - row).abs() <= BUILD_REACH
            });
            if near_path {
                sites.push(cell);
            }
        }
    }
    sites
}

#[cfg(test)]
mod tests {
    use super::*;
    use csdefense_core::config::GameConfig;

    fn engine() -> SimulationEngine {
        SimulationEngine::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_build_sites_are_buildable() {
        let engine = engine();
        let player = AutoPlayer::new(1, &engine);
        assert!(player.remaining_sites() > 0);
        for cell in &player.sites {
            assert_eq!(engine.grid().state(cell), Some(CellState::Empty));
            assert!(engine.can_place(TowerKind::Firewall, *cell).is_ok());
        }
    }

    #[test]
    fn test_same_seed_same_commands() {
        let engine = engine();
        let snapshot = engine.snapshot();
        let mut a = AutoPlayer::new(42, &engine);
        let mut b = AutoPlayer::new(42, &engine);
        let ca = serde_json::to_string(&a.on_snapshot(&snapshot)).unwrap();
        let cb = serde_json::to_string(&b.on_snapshot(&snapshot)).unwrap();
        assert_eq!(ca, cb);
    }

    #[test]
    fn test_never_builds_beyond_budget() {
        let engine = engine();
        let mut player = AutoPlayer::new(3, &engine);
        let mut snapshot = engine.snapshot();
        snapshot.money = 99;
        let commands = player.on_snapshot(&snapshot);
        assert!(!commands
            .iter()
            .any(|c| matches!(c, PlayerCommand::PlaceTower { .. })));
    }

    #[test]
    fn test_starts_wave_after_pause() {
        let engine = engine();
        let mut player = AutoPlayer::new(3, &engine);
        let mut snapshot = engine.snapshot();
        snapshot.money = 0;

        for _ in 1..WAVE_PAUSE_TICKS {
            assert!(player.on_snapshot(&snapshot).is_empty());
        }
        let commands = player.on_snapshot(&snapshot);
        assert!(matches!(commands.as_slice(), [PlayerCommand::StartWave]));
    }

    #[test]
    fn test_idle_once_game_over() {
        let engine = engine();
        let mut player = AutoPlayer::new(3, &engine);
        let mut snapshot = engine.snapshot();
        snapshot.game_over = true;
        for _ in 0..=WAVE_PAUSE_TICKS {
            assert!(player.on_snapshot(&snapshot).is_empty());
        }
    }
}
