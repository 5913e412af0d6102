//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the entity pool, board, wave director and economy,
//! processes player commands, runs all systems in a fixed order, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::Entity;

use csdefense_core::commands::PlayerCommand;
use csdefense_core::components::Tower;
use csdefense_core::config::GameConfig;
use csdefense_core::enums::{TowerKind, WavePhase};
use csdefense_core::error::CommandError;
use csdefense_core::events::GameEvent;
use csdefense_core::state::GameStateSnapshot;
use csdefense_core::types::{GridCell, SimTime, TowerId};
use csdefense_map::{Grid, Path};
use csdefense_waves::{WaveDirector, WaveStart};

use crate::economy::{self, Economy, LedgerEntry};
use crate::error::SetupError;
use crate::pool::EntityPool;
use crate::systems;
use crate::systems::snapshot::SnapshotContext;

/// The simulation engine. Owns the entity pool and all sim state.
pub struct SimulationEngine {
    config: GameConfig,
    path: Path,
    grid: Grid,
    pool: EntityPool,
    director: WaveDirector,
    economy: Economy,
    time: SimTime,
    speed_multiplier: f64,
    selected_tower: Option<TowerId>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    ledger: Vec<LedgerEntry>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Build a session from a config. Fails if the config or the board
    /// geometry is invalid; there is no partially built engine.
    pub fn new(config: GameConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let path = Path::new(&config.path, config.grid.tile_size)?;
        let grid = Grid::new(config.grid.columns, config.grid.rows, &path)?;
        let director = WaveDirector::from_params(&config.waves);
        let economy = Economy::new(&config);

        tracing::info!(
            columns = grid.columns(),
            rows = grid.rows(),
            path_cells = path.total_waypoints(),
            waves = director.total_waves(),
            money = economy.money,
            lives = economy.lives,
            "simulation initialized"
        );

        Ok(Self {
            config,
            path,
            grid,
            pool: EntityPool::new(),
            director,
            economy,
            time: SimTime::default(),
            speed_multiplier: 1.0,
            selected_tower: None,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            ledger: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `real_dt` seconds of wall time, scaled by the
    /// speed multiplier, and return the resulting snapshot.
    ///
    /// Queued commands are applied first. A zero scaled delta applies commands
    /// but leaves the clock and every entity untouched.
    pub fn tick(&mut self, real_dt: f64) -> GameStateSnapshot {
        self.process_commands();

        let real_dt = if real_dt.is_finite() && real_dt >= 0.0 {
            real_dt
        } else {
            tracing::warn!(real_dt, "ignoring invalid tick delta");
            0.0
        };
        let dt = real_dt * self.speed_multiplier;
        if dt > 0.0 {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Current state without advancing. Pending events stay queued.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(Vec::new())
    }

    // --- Inbound commands ---

    /// Start the next wave.
    pub fn start_wave(&mut self) -> Result<WaveStart, CommandError> {
        let start = self.director.start_wave()?;
        tracing::info!(
            wave = start.wave_number,
            total = self.director.total_waves(),
            enemies = start.enemy_count,
            "wave started"
        );
        self.events.push(GameEvent::WaveStarted {
            wave_number: start.wave_number,
            enemy_count: start.enemy_count,
        });
        Ok(start)
    }

    /// Buy and place a tower.
    pub fn place_tower(&mut self, kind: TowerKind, cell: GridCell) -> Result<TowerId, CommandError> {
        let tower = economy::place_tower(
            &mut self.pool,
            &mut self.grid,
            &mut self.economy,
            &self.config,
            kind,
            cell,
        )?;
        tracing::info!(%tower, ?kind, %cell, money = self.economy.money, "tower placed");
        self.events.push(GameEvent::TowerPlaced { tower, kind, cell });
        Ok(tower)
    }

    /// Sell a tower. Returns the refund.
    pub fn sell_tower(&mut self, tower: TowerId) -> Result<u32, CommandError> {
        let refund = economy::sell_tower(
            &mut self.pool,
            &mut self.grid,
            &mut self.economy,
            &self.config,
            tower,
        )?;
        if self.selected_tower == Some(tower) {
            self.selected_tower = None;
        }
        tracing::info!(%tower, refund, money = self.economy.money, "tower sold");
        self.events.push(GameEvent::TowerSold { tower, refund });
        Ok(refund)
    }

    /// Placement preview. Never mutates.
    pub fn can_place(&self, kind: TowerKind, cell: GridCell) -> Result<(), CommandError> {
        economy::can_place(&self.grid, &self.economy, &self.config, kind, cell)
    }

    /// Select one tower, or clear the selection with `None`.
    pub fn select_tower(&mut self, tower: Option<TowerId>) -> Result<(), CommandError> {
        if let Some(id) = tower {
            if self.pool.tower(id).is_none() {
                return Err(CommandError::NotFound { tower: id });
            }
        }
        for (_entity, t) in self.pool.world_mut().query_mut::<&mut Tower>() {
            t.selected = Some(t.id) == tower;
        }
        self.selected_tower = tower;
        Ok(())
    }

    /// Set the time scale, clamped to `[0, max_speed_multiplier]`.
    /// Non-finite values are ignored. Returns the multiplier in effect.
    pub fn set_speed_multiplier(&mut self, value: f64) -> f64 {
        if value.is_finite() {
            self.speed_multiplier = value.clamp(0.0, self.config.max_speed_multiplier);
        } else {
            tracing::warn!(value, "ignoring non-finite speed multiplier");
        }
        self.speed_multiplier
    }

    // --- Read-only state ---

    pub fn money(&self) -> i64 {
        self.economy.money
    }

    pub fn lives(&self) -> i64 {
        self.economy.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.economy.is_depleted()
    }

    pub fn wave_number(&self) -> u32 {
        self.director.wave_number()
    }

    pub fn total_waves(&self) -> u32 {
        self.director.total_waves()
    }

    pub fn wave_phase(&self) -> WavePhase {
        self.director.phase()
    }

    pub fn wave_in_progress(&self) -> bool {
        self.director.in_progress()
    }

    /// Every wave started and the last one completed.
    pub fn all_waves_complete(&self) -> bool {
        self.director.is_finished()
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    #[cfg(test)]
    pub(crate) fn pool_mut(&mut self) -> &mut EntityPool {
        &mut self.pool
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(error) = self.handle_command(command) {
                tracing::warn!(%error, "command rejected");
                self.events.push(GameEvent::CommandRejected { error });
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), CommandError> {
        match command {
            PlayerCommand::StartWave => self.start_wave().map(|_| ()),
            PlayerCommand::PlaceTower { kind, cell } => self.place_tower(kind, cell).map(|_| ()),
            PlayerCommand::SellTower { tower } => self.sell_tower(tower).map(|_| ()),
            PlayerCommand::SelectTower { tower } => self.select_tower(tower),
            PlayerCommand::SetSpeedMultiplier { value } => {
                self.set_speed_multiplier(value);
                Ok(())
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Wave spawning
        systems::wave_spawner::run(
            &mut self.director,
            &mut self.pool,
            &self.config,
            &self.path,
            dt,
            &mut self.events,
        );
        // 2. Enemy movement
        systems::movement::run(&mut self.pool, &self.path, &self.config, dt, &mut self.ledger);
        // 3. Tower targeting and firing
        systems::targeting::run(&mut self.pool, &self.path, &self.config, dt, &mut self.events);
        // 4. Projectile movement and collision
        systems::projectile::run(&mut self.pool, &self.config, dt, &mut self.ledger);
        // 5. Economy application
        systems::ledger::run(&mut self.economy, &mut self.ledger, &mut self.events);
        // 6. Compact the dead
        systems::cleanup::run(&mut self.pool, &mut self.despawn_buffer);
        // 7. Wave completion
        if let Some(done) = self.director.check_completion(self.pool.live_enemy_count()) {
            let bonus = self.config.economy.wave_bonus(done.wave_number);
            self.economy.money += bonus;
            tracing::info!(
                wave = done.wave_number,
                bonus,
                money = self.economy.money,
                "wave complete"
            );
            self.events.push(GameEvent::WaveCompleted {
                wave_number: done.wave_number,
                bonus,
            });
        }

        tracing::trace!(
            tick = self.time.tick,
            enemies = self.pool.enemy_count(),
            projectiles = self.pool.projectile_count(),
            money = self.economy.money,
            lives = self.economy.lives,
            "tick"
        );
    }

    fn build_snapshot(&self, events: Vec<GameEvent>) -> GameStateSnapshot {
        let ctx = SnapshotContext {
            time: self.time,
            economy: &self.economy,
            director: &self.director,
            path: &self.path,
            speed_multiplier: self.speed_multiplier,
            selected_tower: self.selected_tower,
        };
        systems::snapshot::build_snapshot(&self.pool, &ctx, events)
    }
}
