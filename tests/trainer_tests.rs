#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use climber::simulation::board::{Board, LineSegment};
use climber::simulation::clock::FixedTimestep;
use climber::simulation::entity::{Obstacle, Player};
use climber::simulation::error::SimError;
use climber::simulation::obstacles::ObstacleBuffer;
use climber::simulation::params::Params;
use climber::simulation::stats::TrainingStats;
use climber::simulation::trainer::{ControlMode, KeyState, Trainer};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;

fn create_test_params() -> Params {
    Params {
        num_agents: 20,
        num_hidden: 6,
        seed: 1234,
        ..Params::default()
    }
}

#[test]
fn test_new_trainer_state() {
    let params = create_test_params();
    let trainer = Trainer::new(params.clone(), ControlMode::Machine).expect("valid params");

    assert_eq!(trainer.generation(), 1);
    assert_eq!(trainer.world().tick, 0);
    assert_eq!(trainer.world().players.len(), params.num_agents);
    assert_eq!(trainer.population().len(), params.num_agents);
    assert!(trainer.world().players.iter().all(|p| p.alive));
    assert!(trainer.world().obstacles.is_empty());
    assert_eq!(
        trainer.population()[0].weights.len(),
        trainer.brain().topology().num_expected_weights()
    );
}

#[test]
fn test_invalid_params_are_rejected() {
    let params = Params {
        elite_rate: 0.0,
        ..create_test_params()
    };

    let result = Trainer::new(params, ControlMode::Machine);

    assert!(matches!(result, Err(SimError::InvalidParams(_))));
}

#[test]
fn test_first_tick_spawns_an_obstacle() {
    let mut trainer = Trainer::new(create_test_params(), ControlMode::Machine).expect("params");

    trainer.step(KeyState::default()).expect("step");

    assert_eq!(trainer.world().obstacles.len(), 1);
    assert_eq!(trainer.world().tick, 1);
}

#[test]
fn test_stalled_agents_die_at_stall_check() {
    let params = Params {
        stall_distance: 10_000.0,
        ..create_test_params()
    };
    let mut trainer = Trainer::new(params.clone(), ControlMode::Machine).expect("params");

    for _ in 0..params.stall_check_interval - 1 {
        assert!(trainer.step(KeyState::default()).expect("step").is_none());
    }
    let summary = trainer
        .step(KeyState::default())
        .expect("step")
        .expect("everyone stalls");

    assert_eq!(summary.generation, 1);
    assert_eq!(summary.ticks, params.stall_check_interval);
}

#[test]
fn test_agents_below_level_schedule_die() {
    let params = Params {
        level_check_interval: 50,
        stall_check_interval: 100_000,
        ..create_test_params()
    };
    let mut trainer = Trainer::new(params, ControlMode::Machine).expect("params");

    let summary = trainer.run_generation().expect("generation");

    // Nobody can climb a level in 50 ticks from the floor.
    assert_eq!(summary.ticks, 50);
    assert_eq!(summary.best_level, 0);
}

#[test]
fn test_generation_turnover() {
    let params = create_test_params();
    let mut trainer = Trainer::new(params.clone(), ControlMode::Machine).expect("params");

    let summary = trainer.run_generation().expect("generation");

    assert_eq!(summary.generation, 1);
    assert!(summary.ticks > 0);
    assert!(summary.best_score >= 0);
    assert_eq!(trainer.generation(), 2);
    assert_eq!(trainer.world().tick, 0);
    assert_eq!(trainer.world().players.len(), params.num_agents);
    assert!(trainer.world().players.iter().all(|p| p.alive));
    assert!(trainer.world().obstacles.is_empty());
    assert_eq!(trainer.population().len(), params.num_agents);
    assert_eq!(trainer.stats().latest(), Some(&summary));
}

#[test]
fn test_overall_bests_never_decrease() {
    let mut trainer = Trainer::new(create_test_params(), ControlMode::Machine).expect("params");

    let mut previous = trainer.run_generation().expect("generation");
    for _ in 0..3 {
        let summary = trainer.run_generation().expect("generation");
        assert!(summary.best_score_overall >= previous.best_score_overall);
        assert!(summary.best_level_overall >= previous.best_level_overall);
        assert!(summary.best_score_overall >= summary.best_score);
        previous = summary;
    }
    assert_eq!(trainer.generation(), 5);
}

#[test]
fn test_same_seed_same_training() {
    let run = || {
        let mut trainer = Trainer::new(create_test_params(), ControlMode::Machine).expect("params");
        let summaries: Vec<_> = (0..2)
            .map(|_| trainer.run_generation().expect("generation"))
            .collect();
        (summaries, trainer.population().to_vec())
    };

    assert_eq!(run(), run());
}

#[test]
fn test_human_mode_drives_single_player() {
    let params = create_test_params();
    let mut trainer = Trainer::new(params.clone(), ControlMode::Human).expect("params");
    assert_eq!(trainer.world().players.len(), 1);

    let start_x = trainer.world().players[0].body.offset_x;
    let right = KeyState {
        right: true,
        ..KeyState::default()
    };
    for _ in 0..10 {
        trainer.step(right).expect("step");
    }
    assert_eq!(trainer.world().players[0].body.offset_x, start_x + 10);

    // Releasing the keys stops the player on the next tick.
    trainer.step(KeyState::default()).expect("step");
    assert_eq!(trainer.world().players[0].body.offset_x, start_x + 10);
}

#[test]
fn test_human_mode_skips_progress_rules() {
    let params = create_test_params();
    let mut trainer = Trainer::new(params.clone(), ControlMode::Human).expect("params");

    for _ in 0..(params.stall_check_interval + 50) {
        assert!(trainer.step(KeyState::default()).expect("step").is_none());
    }

    assert!(trainer.world().players[0].alive);
    assert_eq!(trainer.generation(), 1);
}

#[test]
fn test_advance_runs_due_ticks() {
    let params = create_test_params();
    let mut trainer = Trainer::new(params.clone(), ControlMode::Machine).expect("params");
    let mut clock = FixedTimestep::from_rate(100.0);

    let summaries = trainer
        .advance(&mut clock, 0.055, KeyState::default())
        .expect("advance");

    assert!(summaries.is_empty());
    assert_eq!(trainer.world().tick, 5);
}

#[test]
fn test_fixed_timestep_accumulates() {
    let mut clock = FixedTimestep::new(0.25);

    assert_eq!(clock.advance(0.125), 0);
    assert_eq!(clock.advance(0.25), 1);
    assert_eq!(clock.pending(), 0.125);
    assert_eq!(clock.advance(0.5), 2);
    assert_eq!(clock.pending(), 0.125);

    // Exactly one period carried is not yet a tick.
    let mut exact = FixedTimestep::new(0.5);
    assert_eq!(exact.advance(0.5), 0);
    assert_eq!(exact.advance(0.25), 1);
}

#[test]
fn test_fixed_timestep_ignores_bad_input() {
    let mut clock = FixedTimestep::new(0.1);

    assert_eq!(clock.advance(-1.0), 0);
    assert_eq!(clock.advance(f64::NAN), 0);
    assert_eq!(clock.advance(f64::INFINITY), 0);
    assert_eq!(clock.pending(), 0.0);

    clock.advance(0.05);
    clock.reset();
    assert_eq!(clock.pending(), 0.0);
}

#[test]
fn test_obstacle_buffer_recycles_oldest_slot() {
    let mut buffer = ObstacleBuffer::new(3);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let params = Params::default();

    for i in 0..5 {
        let mut obstacle = Obstacle::spawn(&params, &mut rng);
        obstacle.body.offset_x = i;
        buffer.push(obstacle);
    }

    assert_eq!(buffer.len(), 3);
    let xs: Vec<i32> = buffer.as_slice().iter().map(|o| o.body.offset_x).collect();
    assert_eq!(xs, vec![3, 4, 2]);

    buffer.clear();
    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), 3);
}

#[test]
fn test_obstacle_spawn_direction() {
    let params = Params::default();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..20 {
        let obstacle = Obstacle::spawn(&params, &mut rng);
        assert_eq!(obstacle.body.v_x.abs(), params.obstacle_speed);
        assert_eq!(obstacle.body.offset_x, params.obstacle_spawn_x);
        assert_eq!(obstacle.body.offset_y, params.obstacle_spawn_y);
    }
}

#[test]
fn test_custom_board() {
    let board = Board::new(
        vec![
            LineSegment::horizontal(-112, 112, 0),
            LineSegment::horizontal(-112, 112, -120),
        ],
        112,
    )
    .expect("board");
    let trainer =
        Trainer::with_board(create_test_params(), ControlMode::Machine, board.clone())
            .expect("params");

    assert_eq!(trainer.world().board, board);
}

#[test]
fn test_params_save_and_load() {
    let params = create_test_params();
    let save_path = "test_params_roundtrip.json";

    params.save_to_file(save_path).expect("Failed to save params");
    let loaded = Params::load_from_file(save_path).expect("Failed to load params");

    assert_eq!(loaded, params);

    fs::remove_file(save_path).ok();
}

#[test]
fn test_params_missing_fields_take_defaults() {
    let save_path = "test_params_partial.json";
    fs::write(save_path, r#"{ "num_agents": 7, "seed": 3 }"#).expect("Failed to write test file");

    let loaded = Params::load_from_file(save_path).expect("Failed to load params");

    assert_eq!(loaded.num_agents, 7);
    assert_eq!(loaded.seed, 3);
    assert_eq!(loaded.num_hidden, Params::default().num_hidden);

    fs::remove_file(save_path).ok();
}

#[test]
fn test_params_load_errors() {
    assert!(Params::load_from_file("nonexistent_params.json").is_err());

    let invalid_path = "test_params_invalid.json";
    fs::write(invalid_path, "{ this is not valid json }").expect("Failed to write test file");
    assert!(Params::load_from_file(invalid_path).is_err());
    fs::remove_file(invalid_path).ok();
}

#[test]
fn test_params_validation() {
    assert!(Params::default().validate().is_ok());

    let broken = [
        Params {
            num_hidden: 0,
            ..Params::default()
        },
        Params {
            elite_rate: 1.5,
            ..Params::default()
        },
        Params {
            mutation_rate: -0.1,
            ..Params::default()
        },
        Params {
            mutation_stddev: f32::NAN,
            ..Params::default()
        },
        Params {
            stall_check_interval: 0,
            ..Params::default()
        },
        Params {
            obstacle_capacity: 0,
            ..Params::default()
        },
        Params {
            player_width: 0,
            ..Params::default()
        },
        Params {
            tick_rate_hz: 0.0,
            ..Params::default()
        },
    ];

    for params in broken {
        assert!(
            matches!(params.validate(), Err(SimError::InvalidParams(_))),
            "accepted {params:?}"
        );
    }
}

#[test]
fn test_stats_clamp_negative_scores_and_cap_history() {
    let params = Params::default();
    let mut stats = TrainingStats {
        max_history: 2,
        ..TrainingStats::default()
    };

    let mut fallen = Player::spawn(&params);
    fallen.score = -8;
    let summary = stats.record(1, 10, &[fallen]);
    assert_eq!(summary.best_score, 0);

    let mut climber = Player::spawn(&params);
    climber.score = 90;
    climber.body.level = 3;
    stats.record(2, 20, &[fallen, climber]);
    let summary = stats.record(3, 30, &[fallen]);

    assert_eq!(summary.best_score, 0);
    assert_eq!(summary.best_score_overall, 90);
    assert_eq!(summary.best_level_overall, 3);
    assert_eq!(stats.history.len(), 2);
    assert_eq!(stats.history.front().map(|s| s.generation), Some(2));
}

#[test]
fn test_summary_report_format() {
    let mut stats = TrainingStats::default();
    let mut player = Player::spawn(&Params::default());
    player.score = 12;
    player.body.level = 1;

    let summary = stats.record(4, 321, &[player]);

    assert_eq!(
        summary.to_string(),
        "Done with generation 4 after 321 ticks\n\
         Best score in generation (best total): 12 (12)\n\
         Best level in generation (best total): 1 (1)"
    );
}
