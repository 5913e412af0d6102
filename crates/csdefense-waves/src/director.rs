//! Wave director state machine.
//!
//! `Idle` → `Spawning` → `Draining` → `Idle`. The director owns the spawn
//! queue and timer; it never touches entities and learns the live enemy count
//! from its caller.

use std::collections::VecDeque;

use csdefense_core::config::WaveParams;
use csdefense_core::enums::{EnemyKind, WavePhase};
use csdefense_core::error::WaveRejection;

use crate::composer::{generate_schedule, WaveDefinition};

/// Timer slack so an interval that is a whole number of ticks is not
/// stretched by one tick through float accumulation.
const TIMER_EPSILON: f64 = 1e-9;

/// Request to create one enemy with the active wave's scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOrder {
    pub kind: EnemyKind,
    pub health_scale: f64,
    pub speed_scale: f64,
}

/// Returned by a successful [`WaveDirector::start_wave`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveStart {
    /// 1-based.
    pub wave_number: u32,
    pub enemy_count: usize,
}

/// Signalled exactly once per wave when its last enemy is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveCompletion {
    /// 1-based.
    pub wave_number: u32,
}

#[derive(Debug, Clone)]
pub struct WaveDirector {
    schedule: Vec<WaveDefinition>,
    phase: WavePhase,
    /// Last started wave, 1-based. 0 before the first start.
    wave_number: u32,
    queue: VecDeque<EnemyKind>,
    spawn_timer: f64,
    spawn_interval: f64,
    health_scale: f64,
    speed_scale: f64,
}

impl WaveDirector {
    pub fn new(schedule: Vec<WaveDefinition>) -> Self {
        Self {
            schedule,
            phase: WavePhase::Idle,
            wave_number: 0,
            queue: VecDeque::new(),
            spawn_timer: 0.0,
            spawn_interval: 0.0,
            health_scale: 1.0,
            speed_scale: 1.0,
        }
    }

    pub fn from_params(params: &WaveParams) -> Self {
        Self::new(generate_schedule(params))
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    pub fn total_waves(&self) -> u32 {
        self.schedule.len() as u32
    }

    pub fn in_progress(&self) -> bool {
        self.phase != WavePhase::Idle
    }

    pub fn pending_spawns(&self) -> usize {
        self.queue.len()
    }

    /// True once every wave has been started and the last one completed.
    pub fn is_finished(&self) -> bool {
        !self.in_progress() && self.wave_number >= self.total_waves()
    }

    /// Begin the next wave.
    ///
    /// Only allowed from `Idle` with waves remaining. Expands the wave's groups
    /// into one queue entry per enemy, group by group.
    pub fn start_wave(&mut self) -> Result<WaveStart, WaveRejection> {
        if self.in_progress() {
            return Err(WaveRejection::InProgress);
        }
        let def = self
            .schedule
            .get(self.wave_number as usize)
            .ok_or(WaveRejection::NoWavesRemaining {
                total: self.total_waves(),
            })?;

        self.queue.clear();
        for group in &def.groups {
            self.queue
                .extend(std::iter::repeat(group.kind).take(group.count as usize));
        }
        self.spawn_interval = def.spawn_interval_secs;
        self.health_scale = def.health_scale;
        self.speed_scale = def.speed_scale;
        self.spawn_timer = 0.0;
        self.wave_number += 1;
        self.phase = if self.queue.is_empty() {
            WavePhase::Draining
        } else {
            WavePhase::Spawning
        };

        tracing::debug!(
            wave = self.wave_number,
            enemies = self.queue.len(),
            interval = self.spawn_interval,
            boss = def.boss,
            "wave queued"
        );

        Ok(WaveStart {
            wave_number: self.wave_number,
            enemy_count: self.queue.len(),
        })
    }

    /// Advance the spawn timer. Yields at most one spawn per call.
    pub fn tick(&mut self, dt: f64) -> Option<SpawnOrder> {
        if self.phase != WavePhase::Spawning {
            return None;
        }
        self.spawn_timer -= dt;
        if self.spawn_timer > TIMER_EPSILON {
            return None;
        }
        let kind = self.queue.pop_front()?;
        self.spawn_timer = self.spawn_interval;
        if self.queue.is_empty() {
            self.phase = WavePhase::Draining;
        }
        Some(SpawnOrder {
            kind,
            health_scale: self.health_scale,
            speed_scale: self.speed_scale,
        })
    }

    /// Close the wave once the queue is empty and nothing is left alive.
    pub fn check_completion(&mut self, live_enemies: usize) -> Option<WaveCompletion> {
        if self.phase != WavePhase::Draining || live_enemies > 0 {
            return None;
        }
        self.phase = WavePhase::Idle;
        Some(WaveCompletion {
            wave_number: self.wave_number,
        })
    }
}
