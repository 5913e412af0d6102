//! Game loop thread. Runs the simulation engine at the nominal tick rate.
//!
//! The engine moves into the loop thread. Commands arrive via an `mpsc`
//! channel, a `Controller` gets to react to every snapshot, and the latest
//! snapshot is stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use csdefense_core::commands::PlayerCommand;
use csdefense_core::constants::{DT, TICK_RATE};
use csdefense_core::state::GameStateSnapshot;
use csdefense_sim::SimulationEngine;

use crate::state::{GameLoopCommand, LoopSettings, RunSummary, StopReason};

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Reacts to each snapshot with commands for the next tick.
pub trait Controller: Send {
    fn on_snapshot(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand>;
}

/// A controller that never issues commands.
pub struct Passive;

impl Controller for Passive {
    fn on_snapshot(&mut self, _snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        Vec::new()
    }
}

pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Handle to a running game loop thread.
pub struct GameLoopHandle {
    commands: mpsc::Sender<GameLoopCommand>,
    latest_snapshot: SharedSnapshot,
    thread: JoinHandle<RunSummary>,
}

impl GameLoopHandle {
    /// Send a command. Returns false if the loop has already exited.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn latest_snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the loop to exit. `None` if the loop thread panicked.
    pub fn join(self) -> Option<RunSummary> {
        self.thread.join().ok()
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    controller: impl Controller + 'static,
    settings: LoopSettings,
) -> std::io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("csdefense-game-loop".into())
        .spawn(move || run_game_loop(engine, controller, settings, cmd_rx, &shared))?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        latest_snapshot,
        thread,
    })
}

/// The game loop. Runs until a stop condition, a Shutdown command or
/// channel disconnect.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    mut controller: impl Controller,
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut next_tick_time = Instant::now();

    let reason = loop {
        // 1. Drain all pending commands
        let mut closed = None;
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    closed = Some(StopReason::Shutdown);
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    closed = Some(StopReason::Disconnected);
                    break;
                }
            }
        }
        if let Some(reason) = closed {
            break reason;
        }

        // 2. Advance one tick; the engine applies the speed multiplier
        let snapshot = engine.tick(DT);
        summary.record(&snapshot);

        // 3. Let the controller queue its reaction
        engine.queue_commands(controller.on_snapshot(&snapshot));

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if let Some(reason) = stop_condition(&engine, &settings) {
            break reason;
        }

        // 5. Sleep until next tick
        if settings.paced {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    };

    summary.stop_reason = reason;
    tracing::info!(
        ?reason,
        ticks = summary.ticks,
        waves = summary.waves_completed,
        money = summary.money,
        lives = summary.lives,
        "game loop stopped"
    );
    summary
}

fn stop_condition(engine: &SimulationEngine, settings: &LoopSettings) -> Option<StopReason> {
    if engine.is_game_over() {
        return Some(StopReason::GameOver);
    }
    if engine.all_waves_complete() {
        return Some(StopReason::AllWavesComplete);
    }
    if let Some(target) = settings.stop_after_wave {
        if engine.wave_number() >= target && !engine.wave_in_progress() {
            return Some(StopReason::WaveTarget);
        }
    }
    match settings.max_ticks {
        Some(limit) if engine.time().tick >= limit => Some(StopReason::TickLimit),
        _ => None,
    }
}
