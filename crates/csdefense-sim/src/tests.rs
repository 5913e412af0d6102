//! Tests for the simulation engine, combat systems, waves and the economy.

use csdefense_core::commands::PlayerCommand;
use csdefense_core::components::{Enemy, Projectile, Tower, TowerStats};
use csdefense_core::config::{GameConfig, GridConfig, UnlockRule, WaveParams};
use csdefense_core::constants::DT;
use csdefense_core::enums::*;
use csdefense_core::error::{CommandError, ConfigError, WaveRejection};
use csdefense_core::events::GameEvent;
use csdefense_core::state::GameStateSnapshot;
use csdefense_core::types::{EnemyId, GridCell, Position, TowerId};
use csdefense_map::{MapError, Path};
use csdefense_waves::SpawnOrder;

use crate::economy::LedgerEntry;
use crate::engine::SimulationEngine;
use crate::error::SetupError;
use crate::pool::EntityPool;
use crate::systems::{projectile, targeting};
use crate::world_setup;

/// 12×5 board with a straight lane along row 2 and a single-kind wave of
/// `count` SyntaxErrors, one per second, no scaling.
fn lane_config(count: u32) -> GameConfig {
    GameConfig {
        grid: GridConfig {
            columns: 12,
            rows: 5,
            tile_size: 32.0,
        },
        path: vec![GridCell::new(0, 2), GridCell::new(11, 2)],
        waves: WaveParams {
            total_waves: 2,
            health_step: 0,
            count_step: 0,
            speed_step: 0,
            unlocks: vec![UnlockRule {
                kind: EnemyKind::SyntaxError,
                from_wave: 0,
                base_count: count,
                count_factor: 1.0,
            }],
            boss_interval: 0,
            boss_groups: Vec::new(),
            spawn_interval_base: 1.0,
            spawn_interval_decay: 0.0,
            spawn_interval_floor: 0.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn lane_engine(count: u32) -> SimulationEngine {
    SimulationEngine::new(lane_config(count)).unwrap()
}

fn run_ticks(engine: &mut SimulationEngine, ticks: usize) -> Vec<GameStateSnapshot> {
    (0..ticks).map(|_| engine.tick(DT)).collect()
}

fn count_events(snapshots: &[GameStateSnapshot], pred: impl Fn(&GameEvent) -> bool) -> usize {
    snapshots
        .iter()
        .flat_map(|s| s.events.iter())
        .filter(|e| pred(e))
        .count()
}

fn enemy_health(pool: &EntityPool, id: EnemyId) -> u32 {
    let entity = pool.enemy(id).unwrap();
    pool.world().get::<&Enemy>(entity).unwrap().health
}

// ---- Setup ----

#[test]
fn test_default_engine_initial_state() {
    let engine = SimulationEngine::new(GameConfig::default()).unwrap();
    assert_eq!(engine.money(), 650);
    assert_eq!(engine.lives(), 100);
    assert_eq!(engine.wave_number(), 0);
    assert_eq!(engine.total_waves(), 100);
    assert_eq!(engine.wave_phase(), WavePhase::Idle);
    assert!(!engine.wave_in_progress());
    assert_eq!(engine.path().total_waypoints(), 75);
    assert_eq!(engine.grid().count(CellState::Path), 75);
}

#[test]
fn test_malformed_path_fails_setup() {
    let config = GameConfig {
        path: vec![GridCell::new(0, 0), GridCell::new(3, 3)],
        ..Default::default()
    };
    let err = SimulationEngine::new(config).err().unwrap();
    assert!(matches!(
        err,
        SetupError::Map(MapError::MalformedPath { index: 1, .. })
    ));
}

#[test]
fn test_invalid_config_fails_setup() {
    let config = GameConfig {
        max_speed_multiplier: 0.5,
        ..Default::default()
    };
    let err = SimulationEngine::new(config).err().unwrap();
    assert!(matches!(err, SetupError::Config(ConfigError::Invalid { .. })));
}

// ---- Determinism ----

#[test]
fn test_determinism_same_commands() {
    let make = || {
        let mut engine = SimulationEngine::new(GameConfig::default()).unwrap();
        engine.queue_commands([
            PlayerCommand::PlaceTower {
                kind: TowerKind::Firewall,
                cell: GridCell::new(5, 11),
            },
            PlayerCommand::PlaceTower {
                kind: TowerKind::Firewall,
                cell: GridCell::new(7, 5),
            },
            PlayerCommand::PlaceTower {
                kind: TowerKind::Debugger,
                cell: GridCell::new(13, 10),
            },
            PlayerCommand::StartWave,
        ]);
        engine
    };
    let mut engine_a = make();
    let mut engine_b = make();

    for _ in 0..1200 {
        let json_a = serde_json::to_string(&engine_a.tick(DT)).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(DT)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with identical inputs");
    }
}

// ---- Wave lifecycle ----

#[test]
fn test_start_wave_rejected_while_in_progress() {
    let mut engine = lane_engine(3);
    assert!(engine.start_wave().is_ok());
    assert_eq!(engine.wave_phase(), WavePhase::Spawning);
    assert_eq!(
        engine.start_wave(),
        Err(CommandError::WaveRejected {
            reason: WaveRejection::InProgress
        })
    );

    // Let every enemy spawn; some are still walking.
    run_ticks(&mut engine, 125);
    assert_eq!(engine.wave_phase(), WavePhase::Draining);
    assert!(matches!(
        engine.start_wave(),
        Err(CommandError::WaveRejected {
            reason: WaveRejection::InProgress
        })
    ));
}

#[test]
fn test_ten_spawns_then_single_completion() {
    let mut engine = lane_engine(10);
    engine.start_wave().unwrap();

    let snapshots = run_ticks(&mut engine, 2000);
    let mut spawn_ticks = Vec::new();
    let mut completion_tick = None;
    for (tick, snap) in snapshots.iter().enumerate() {
        for event in &snap.events {
            match event {
                GameEvent::EnemySpawned { .. } => spawn_ticks.push(tick),
                GameEvent::WaveCompleted { wave_number, bonus } => {
                    assert!(completion_tick.is_none(), "wave completed twice");
                    assert_eq!(*wave_number, 1);
                    assert_eq!(*bonus, 150);
                    completion_tick = Some(tick);
                }
                _ => {}
            }
        }
    }

    assert_eq!(spawn_ticks.len(), 10);
    for pair in spawn_ticks.windows(2) {
        assert_eq!(pair[1] - pair[0], 60, "spawns spaced by the interval");
    }
    let completed = completion_tick.expect("wave never completed");
    assert!(completed > *spawn_ticks.last().unwrap());
    assert!(!engine.wave_in_progress());
    // Every enemy leaked: no towers on the board.
    assert_eq!(engine.lives(), 90);
    assert_eq!(engine.money(), 650 + 150);
}

#[test]
fn test_completion_not_before_last_enemy_gone() {
    let mut engine = lane_engine(2);
    engine.start_wave().unwrap();
    for _ in 0..1000 {
        let snap = engine.tick(DT);
        let completed = snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::WaveCompleted { .. }));
        if completed {
            assert!(snap.enemies.is_empty());
            assert_eq!(snap.wave.pending_spawns, 0);
            assert_eq!(engine.lives(), 98, "both enemies leaked first");
            return;
        }
        assert!(snap.wave.in_progress);
    }
    panic!("wave never completed");
}

#[test]
fn test_final_wave_then_rejected() {
    let mut engine = lane_engine(1);
    for wave in 1..=2 {
        let start = engine.start_wave().unwrap();
        assert_eq!(start.wave_number, wave);
        run_ticks(&mut engine, 400);
        assert!(!engine.wave_in_progress());
    }
    assert!(engine.all_waves_complete());
    assert_eq!(
        engine.start_wave(),
        Err(CommandError::WaveRejected {
            reason: WaveRejection::NoWavesRemaining { total: 2 }
        })
    );
}

// ---- Movement ----

#[test]
fn test_enemy_moves_at_scaled_speed() {
    let mut engine = lane_engine(1);
    engine.start_wave().unwrap();
    let snaps = run_ticks(&mut engine, 10);
    // SyntaxError speed is 2 px per frame; it spawns and moves on tick 1.
    let enemy = &snaps[9].enemies[0];
    assert!((enemy.distance_traveled - 20.0).abs() < 1e-9);
    assert!((enemy.position.x - 36.0).abs() < 1e-9);
    assert_eq!(enemy.position.y, 80.0);
}

#[test]
fn test_leak_deducts_lives_without_clamping() {
    let mut config = lane_config(5);
    config.economy.starting_lives = 2;
    let mut engine = SimulationEngine::new(config).unwrap();
    engine.start_wave().unwrap();

    let snaps = run_ticks(&mut engine, 1000);
    assert_eq!(engine.lives(), -3);
    assert!(engine.is_game_over());
    assert!(snaps.last().unwrap().game_over);
    assert_eq!(
        count_events(&snaps, |e| matches!(e, GameEvent::LivesDepleted { .. })),
        1
    );
    assert_eq!(
        count_events(&snaps, |e| matches!(e, GameEvent::EnemyLeaked { .. })),
        5
    );
}

// ---- Economy & grid ----

#[test]
fn test_insufficient_funds_leaves_state_unchanged() {
    let mut engine = SimulationEngine::new(GameConfig::default()).unwrap();
    let cell = GridCell::new(2, 2);
    let result = engine.place_tower(TowerKind::GarbageCollector, cell);
    assert_eq!(
        result,
        Err(CommandError::InsufficientFunds {
            cost: 700,
            available: 650
        })
    );
    assert_eq!(engine.money(), 650);
    assert_eq!(engine.grid().state(&cell), Some(CellState::Empty));
    assert_eq!(engine.grid().count(CellState::Occupied), 0);
    assert_eq!(engine.pool().tower_count(), 0);
}

#[test]
fn test_placement_rejections() {
    let mut engine = SimulationEngine::new(GameConfig::default()).unwrap();
    let on_path = GridCell::new(3, 12);
    let outside = GridCell::new(40, 3);
    assert_eq!(
        engine.place_tower(TowerKind::Firewall, on_path),
        Err(CommandError::InvalidCell { cell: on_path })
    );
    assert_eq!(
        engine.place_tower(TowerKind::Firewall, outside),
        Err(CommandError::InvalidCell { cell: outside })
    );
    // Funds are checked before the cell.
    assert!(matches!(
        engine.place_tower(TowerKind::GarbageCollector, on_path),
        Err(CommandError::InsufficientFunds { .. })
    ));

    let cell = GridCell::new(2, 2);
    engine.place_tower(TowerKind::Firewall, cell).unwrap();
    assert_eq!(
        engine.place_tower(TowerKind::Firewall, cell),
        Err(CommandError::CellOccupied { cell })
    );
    assert_eq!(engine.money(), 550);
}

#[test]
fn test_place_and_sell_round_trip() {
    let mut engine = SimulationEngine::new(GameConfig::default()).unwrap();
    let cell = GridCell::new(8, 8);
    let empty_before = engine.grid().count(CellState::Empty);

    let tower = engine.place_tower(TowerKind::Debugger, cell).unwrap();
    assert_eq!(engine.money(), 450);
    assert_eq!(engine.grid().state(&cell), Some(CellState::Occupied));
    assert_eq!(engine.grid().count(CellState::Empty), empty_before - 1);

    let refund = engine.sell_tower(tower).unwrap();
    assert_eq!(refund, 140);
    assert_eq!(engine.money(), 590);
    assert_eq!(engine.grid().state(&cell), Some(CellState::Empty));
    assert_eq!(engine.grid().count(CellState::Empty), empty_before);
    assert_eq!(engine.grid().count(CellState::Path), 75);

    assert_eq!(
        engine.sell_tower(tower),
        Err(CommandError::NotFound { tower })
    );
}

#[test]
fn test_money_never_negative_from_placement() {
    let mut engine = SimulationEngine::new(GameConfig::default()).unwrap();
    let mut placed = 0;
    for column in 0..5 {
        let cell = GridCell::new(column, 0);
        match engine.place_tower(TowerKind::Antivirus, cell) {
            Ok(_) => placed += 1,
            Err(CommandError::InsufficientFunds { cost, available }) => {
                assert_eq!(cost, 350);
                assert_eq!(available, engine.money());
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
        assert!(engine.money() >= 0);
    }
    assert_eq!(placed, 1);
    assert_eq!(engine.money(), 300);
}

#[test]
fn test_can_place_does_not_mutate() {
    let engine = SimulationEngine::new(GameConfig::default()).unwrap();
    let cell = GridCell::new(2, 2);
    assert!(engine.can_place(TowerKind::Firewall, cell).is_ok());
    assert!(matches!(
        engine.can_place(TowerKind::GarbageCollector, cell),
        Err(CommandError::InsufficientFunds { .. })
    ));
    assert_eq!(engine.money(), 650);
    assert_eq!(engine.grid().state(&cell), Some(CellState::Empty));
}

// ---- Targeting ----

#[test]
fn test_select_target_out_of_range() {
    let origin = Position::new(0.0, 0.0);
    let candidates = [targeting::TargetCandidate {
        id: EnemyId(0),
        position: Position::new(200.0, 0.0),
        distance_traveled: 50.0,
    }];
    assert!(targeting::select_target(&origin, 150.0, &candidates).is_none());
}

#[test]
fn test_select_target_prefers_furthest_along() {
    let origin = Position::new(0.0, 0.0);
    let candidates = [
        targeting::TargetCandidate {
            id: EnemyId(0),
            position: Position::new(10.0, 0.0),
            distance_traveled: 30.0,
        },
        targeting::TargetCandidate {
            id: EnemyId(1),
            position: Position::new(140.0, 0.0),
            distance_traveled: 90.0,
        },
        targeting::TargetCandidate {
            id: EnemyId(2),
            position: Position::new(0.0, 100.0),
            distance_traveled: 90.0,
        },
        // Furthest along but exactly at the range limit.
        targeting::TargetCandidate {
            id: EnemyId(3),
            position: Position::new(150.0, 0.0),
            distance_traveled: 500.0,
        },
    ];
    let picked = targeting::select_target(&origin, 150.0, &candidates).unwrap();
    assert_eq!(picked.id, EnemyId(1), "ties go to pool order");
}

#[test]
fn test_tower_out_of_range_never_fires() {
    let mut engine = SimulationEngine::new(GameConfig::default()).unwrap();
    let tower = engine
        .place_tower(TowerKind::Firewall, GridCell::new(31, 0))
        .unwrap();
    engine.start_wave().unwrap();
    let snaps = run_ticks(&mut engine, 900);
    assert!(snaps.iter().any(|s| !s.enemies.is_empty()));

    let view = snaps.last().unwrap().towers.iter().find(|t| t.id == tower).unwrap();
    assert_eq!(view.stats.shots_fired, 0);
    assert_eq!(view.cooldown_remaining, 0.0);
    assert!(view.target.is_none());
    assert_eq!(
        count_events(&snaps, |e| matches!(e, GameEvent::TowerFired { .. })),
        0
    );
}

#[test]
fn test_cooldown_resets_and_counts_down() {
    let mut engine = lane_engine(1);
    let tower = engine
        .place_tower(TowerKind::Firewall, GridCell::new(10, 1))
        .unwrap();
    engine.start_wave().unwrap();

    let mut fired_at = None;
    for tick in 0..300 {
        let snap = engine.tick(DT);
        if snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::TowerFired { tower: t, .. } if *t == tower))
        {
            let view = &snap.towers[0];
            assert!((view.cooldown_remaining - 0.3).abs() < 1e-12);
            assert_eq!(view.stats.shots_fired, 1);
            fired_at = Some(tick);
            break;
        }
    }
    assert!(fired_at.is_some(), "tower never fired");

    let snap = engine.tick(DT);
    assert!((snap.towers[0].cooldown_remaining - (0.3 - DT)).abs() < 1e-12);
}

// ---- Combat ----

fn combat_fixture() -> (EntityPool, GameConfig, Path) {
    let config = lane_config(1);
    let path = Path::new(&config.path, config.grid.tile_size).unwrap();
    (EntityPool::new(), config, path)
}

fn order(kind: EnemyKind) -> SpawnOrder {
    SpawnOrder {
        kind,
        health_scale: 1.0,
        speed_scale: 1.0,
    }
}

#[test]
fn test_health_after_repeated_hits() {
    let (mut pool, config, path) = combat_fixture();
    let id = world_setup::spawn_enemy(&mut pool, &config, &path, &order(EnemyKind::SyntaxError));
    let at = path.start();
    let mut ledger = Vec::new();

    for hit in 1..=3u32 {
        world_setup::spawn_projectile(&mut pool, &config, TowerId(0), at, at, 30);
        projectile::run(&mut pool, &config, DT, &mut ledger);
        assert_eq!(enemy_health(&pool, id), 100 - 30 * hit);
        assert!(ledger.is_empty());
    }

    world_setup::spawn_projectile(&mut pool, &config, TowerId(0), at, at, 30);
    projectile::run(&mut pool, &config, DT, &mut ledger);
    assert_eq!(enemy_health(&pool, id), 0);
    assert!(!pool.is_enemy_alive(id));
    assert_eq!(
        ledger,
        vec![LedgerEntry::Bounty {
            enemy: id,
            kind: EnemyKind::SyntaxError,
            tower: TowerId(0),
            reward: 10,
        }]
    );

    let mut buffer = Vec::new();
    assert_eq!(pool.compact(&mut buffer), 5);
    assert!(pool.enemy(id).is_none());
    assert_eq!(pool.projectile_count(), 0);
}

#[test]
fn test_projectile_hits_first_enemy_in_pool_order() {
    let (mut pool, config, path) = combat_fixture();
    let first = world_setup::spawn_enemy(&mut pool, &config, &path, &order(EnemyKind::LogicError));
    let second = world_setup::spawn_enemy(&mut pool, &config, &path, &order(EnemyKind::SyntaxError));
    let at = path.start();

    world_setup::spawn_projectile(&mut pool, &config, TowerId(0), at, at, 25);
    projectile::run(&mut pool, &config, DT, &mut Vec::new());

    assert_eq!(enemy_health(&pool, first), 175);
    assert_eq!(enemy_health(&pool, second), 100);
}

#[test]
fn test_projectile_fizzles_at_aim_point() {
    let (mut pool, config, _path) = combat_fixture();
    let origin = Position::new(16.0, 16.0);
    let aim = Position::new(36.0, 16.0);
    world_setup::spawn_projectile(&mut pool, &config, TowerId(0), origin, aim, 10);

    let mut ledger = Vec::new();
    // 8 px per frame: 20 px takes three ticks.
    for _ in 0..2 {
        projectile::run(&mut pool, &config, DT, &mut ledger);
    }
    let (_, entity) = pool.projectile_entities().next().unwrap();
    assert!(pool.world().get::<&Projectile>(entity).unwrap().live);

    projectile::run(&mut pool, &config, DT, &mut ledger);
    assert!(!pool.world().get::<&Projectile>(entity).unwrap().live);
    assert_eq!(pool.compact(&mut Vec::new()), 1);
    assert!(ledger.is_empty());
}

#[test]
fn test_fast_projectile_hits_enemy_it_crosses() {
    let (mut pool, config, path) = combat_fixture();
    let id = world_setup::spawn_enemy(&mut pool, &config, &path, &order(EnemyKind::SyntaxError));
    let at = path.start();
    let behind = Position::new(at.x - 100.0, at.y);
    let past = Position::new(at.x + 100.0, at.y);
    world_setup::spawn_projectile(&mut pool, &config, TowerId(0), behind, past, 30);

    // 480 px/s over 0.3 s is 144 px per step, far more than the hit distance.
    let mut ledger = Vec::new();
    for _ in 0..3 {
        projectile::run(&mut pool, &config, 0.3, &mut ledger);
    }
    assert_eq!(enemy_health(&pool, id), 70);
    assert!(ledger.is_empty());
}

#[test]
fn test_distance_to_segment_clamps_to_ends() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(10.0, 0.0);
    assert!((projectile::distance_to_segment(&Position::new(5.0, 3.0), &a, &b) - 3.0).abs() < 1e-12);
    assert!((projectile::distance_to_segment(&Position::new(13.0, 4.0), &a, &b) - 5.0).abs() < 1e-12);
    assert!((projectile::distance_to_segment(&Position::new(-3.0, 4.0), &a, &b) - 5.0).abs() < 1e-12);
    assert!((projectile::distance_to_segment(&Position::new(0.0, 2.0), &a, &a) - 2.0).abs() < 1e-12);
}

#[test]
fn test_step_toward_clamps_to_target() {
    let from = Position::new(0.0, 0.0);
    let to = Position::new(3.0, 4.0);
    let (p, arrived) = projectile::step_toward(&from, &to, 2.5);
    assert!(!arrived);
    assert!((p.x - 1.5).abs() < 1e-12 && (p.y - 2.0).abs() < 1e-12);
    let (p, arrived) = projectile::step_toward(&from, &to, 5.0);
    assert!(arrived);
    assert_eq!(p, to);
}

#[test]
fn test_kill_credits_tower_and_rewards_money() {
    let mut config = lane_config(1);
    config.economy.starting_money = 5000;
    let mut engine = SimulationEngine::new(config).unwrap();
    let tower = engine
        .place_tower(TowerKind::GarbageCollector, GridCell::new(10, 1))
        .unwrap();
    engine.start_wave().unwrap();

    let mut killed = None;
    for _ in 0..400 {
        let snap = engine.tick(DT);
        if let Some(GameEvent::EnemyKilled {
            enemy,
            tower: by,
            reward,
            ..
        }) = snap
            .events
            .iter()
            .find(|e| matches!(e, GameEvent::EnemyKilled { .. }))
        {
            assert_eq!(*by, tower);
            assert_eq!(*reward, 10);
            // Compacted before the snapshot.
            assert!(snap.enemies.iter().all(|e| e.id != *enemy));
            assert!(engine.pool().enemy(*enemy).is_none());
            let view = &snap.towers[0];
            assert_eq!(view.stats.enemies_defeated, 1);
            assert_eq!(view.stats.damage_dealt, 100);
            assert!(view.target.is_none(), "target cleared once the enemy is gone");
            killed = Some(*enemy);
            break;
        }
    }
    assert!(killed.is_some(), "enemy was never killed");
    assert_eq!(engine.lives(), 100);
    // 5000 - 700 cost + 10 reward + 150 wave bonus.
    assert_eq!(engine.money(), 4460);
    assert!(!engine.wave_in_progress());
}

#[test]
fn test_damage_dealt_credits_full_max_health() {
    let (mut pool, config, path) = combat_fixture();
    let tower = world_setup::spawn_tower(&mut pool, &config, TowerKind::Firewall, GridCell::new(0, 1));
    let id = world_setup::spawn_enemy(&mut pool, &config, &path, &order(EnemyKind::SyntaxError));
    let at = path.start();

    // Overkill: 150 damage into 100 health still credits 100.
    world_setup::spawn_projectile(&mut pool, &config, tower, at, at, 150);
    projectile::run(&mut pool, &config, DT, &mut Vec::new());
    assert!(!pool.is_enemy_alive(id));

    let entity = pool.tower(tower).unwrap();
    let stats = *pool.world().get::<&TowerStats>(entity).unwrap();
    assert_eq!(stats.enemies_defeated, 1);
    assert_eq!(stats.damage_dealt, 100);
}

#[test]
fn test_dead_enemies_never_survive_a_tick() {
    let mut config = lane_config(6);
    config.economy.starting_money = 2000;
    let mut engine = SimulationEngine::new(config).unwrap();
    engine.place_tower(TowerKind::Antivirus, GridCell::new(9, 1)).unwrap();
    engine.place_tower(TowerKind::Debugger, GridCell::new(9, 3)).unwrap();
    engine.start_wave().unwrap();

    for _ in 0..1000 {
        let snap = engine.tick(DT);
        for view in &snap.enemies {
            assert!(view.health > 0);
            assert!(view.health <= view.max_health);
        }
        for (_, entity) in engine.pool().enemy_entities() {
            assert!(engine.pool().world().get::<&Enemy>(entity).unwrap().alive);
        }
    }
}

// ---- Clock ----

#[test]
fn test_speed_multiplier_clamped() {
    let mut engine = lane_engine(1);
    assert_eq!(engine.set_speed_multiplier(2.0), 2.0);
    assert_eq!(engine.set_speed_multiplier(10.0), 4.0);
    assert_eq!(engine.set_speed_multiplier(-1.0), 0.0);
    assert_eq!(engine.set_speed_multiplier(f64::NAN), 0.0);
    assert_eq!(engine.speed_multiplier(), 0.0);
}

#[test]
fn test_double_speed_moves_twice_as_far() {
    let mut normal = lane_engine(1);
    let mut fast = lane_engine(1);
    fast.set_speed_multiplier(2.0);
    normal.start_wave().unwrap();
    fast.start_wave().unwrap();

    let a = run_ticks(&mut normal, 10).pop().unwrap();
    let b = run_ticks(&mut fast, 10).pop().unwrap();
    let da = a.enemies[0].distance_traveled;
    let db = b.enemies[0].distance_traveled;
    assert!((db - 2.0 * da).abs() < 1e-9, "{db} vs {da}");
    assert!((b.time.elapsed_secs - 2.0 * a.time.elapsed_secs).abs() < 1e-12);
}

#[test]
fn test_zero_speed_freezes_but_applies_commands() {
    let mut engine = lane_engine(1);
    engine.queue_commands([
        PlayerCommand::SetSpeedMultiplier { value: 0.0 },
        PlayerCommand::StartWave,
    ]);
    let snaps = run_ticks(&mut engine, 30);
    let last = snaps.last().unwrap();
    assert_eq!(last.time.tick, 0);
    assert!(last.wave.in_progress);
    assert!(last.enemies.is_empty());
    assert_eq!(last.wave.pending_spawns, 1);
}

#[test]
fn test_invalid_delta_ignored() {
    let mut engine = lane_engine(1);
    engine.start_wave().unwrap();
    engine.tick(f64::INFINITY);
    engine.tick(-1.0);
    assert_eq!(engine.time().tick, 0);
    assert_eq!(engine.pool().enemy_count(), 0);
}

// ---- Commands & selection ----

#[test]
fn test_queued_rejection_becomes_event() {
    let mut engine = lane_engine(1);
    engine.queue_commands([PlayerCommand::StartWave, PlayerCommand::StartWave]);
    let snap = engine.tick(DT);
    assert_eq!(
        count_events(std::slice::from_ref(&snap), |e| matches!(
            e,
            GameEvent::WaveStarted { wave_number: 1, .. }
        )),
        1
    );
    assert!(snap.events.contains(&GameEvent::CommandRejected {
        error: CommandError::WaveRejected {
            reason: WaveRejection::InProgress
        }
    }));
    // Drained after one snapshot.
    let next = engine.tick(DT);
    assert!(!next
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::CommandRejected { .. })));
}

#[test]
fn test_select_tower_single_selection() {
    let mut engine = SimulationEngine::new(GameConfig::default()).unwrap();
    let a = engine.place_tower(TowerKind::Firewall, GridCell::new(1, 1)).unwrap();
    let b = engine.place_tower(TowerKind::Firewall, GridCell::new(2, 1)).unwrap();

    engine.select_tower(Some(a)).unwrap();
    engine.select_tower(Some(b)).unwrap();
    let snap = engine.snapshot();
    assert_eq!(snap.selected_tower, Some(b));
    let selected: Vec<TowerId> = snap.towers.iter().filter(|t| t.selected).map(|t| t.id).collect();
    assert_eq!(selected, vec![b]);

    assert_eq!(
        engine.select_tower(Some(TowerId(99))),
        Err(CommandError::NotFound { tower: TowerId(99) })
    );
    assert_eq!(engine.snapshot().selected_tower, Some(b));

    engine.sell_tower(b).unwrap();
    assert_eq!(engine.snapshot().selected_tower, None);

    engine.select_tower(Some(a)).unwrap();
    engine.select_tower(None).unwrap();
    assert!(engine.snapshot().towers.iter().all(|t| !t.selected));
}

#[test]
fn test_stale_target_cleared_by_cleanup() {
    let mut engine = lane_engine(1);
    engine.place_tower(TowerKind::Firewall, GridCell::new(1, 1)).unwrap();
    let tower_entity = engine.pool().tower(TowerId(0)).unwrap();
    let ghost = EnemyId(42);
    engine
        .pool_mut()
        .world()
        .get::<&mut Tower>(tower_entity)
        .unwrap()
        .target = Some(ghost);

    // Nothing compacts without a death, so force one.
    let path = engine.path().clone();
    let config = engine.config().clone();
    let id = world_setup::spawn_enemy(engine.pool_mut(), &config, &path, &order(EnemyKind::SyntaxError));
    let entity = engine.pool().enemy(id).unwrap();
    engine.pool().world().get::<&mut Enemy>(entity).unwrap().alive = false;

    crate::systems::cleanup::run(engine.pool_mut(), &mut Vec::new());
    let target = engine.pool().world().get::<&Tower>(tower_entity).unwrap().target;
    assert_eq!(target, None);
}
