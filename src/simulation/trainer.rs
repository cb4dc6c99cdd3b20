//! Generation orchestrator.
//!
//! Each tick: spawn obstacles on cadence, let every living agent's genome pick
//! an action, run physics, then apply the progress rules. When nobody is left
//! alive the generation ends: scores become fitness, the genetic algorithm
//! breeds the next population and the board is reset.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info};

use super::board::Board;
use super::brain::{Action, Brain, Topology};
use super::clock::FixedTimestep;
use super::error::SimError;
use super::evolution::{EvolutionParams, GeneticAlgorithm, Genome};
use super::params::Params;
use super::perception::{self, NUM_FEATURES};
use super::stats::{GenerationSummary, TrainingStats};
use super::world::World;

/// Who drives the players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Every agent is driven by its genome.
    #[default]
    Machine,
    /// A single player is driven by keyboard state. No evolution happens.
    Human,
}

impl ControlMode {
    fn num_players(self, num_agents: usize) -> usize {
        match self {
            ControlMode::Machine => num_agents,
            ControlMode::Human => 1,
        }
    }
}

/// Directional and jump key state for human play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    /// Left key held.
    pub left: bool,
    /// Right key held.
    pub right: bool,
    /// Jump key held.
    pub jump: bool,
}

/// Owns the world, the controller and the population, and drives training.
#[derive(Debug, Clone)]
pub struct Trainer {
    params: Params,
    mode: ControlMode,
    world: World,
    brain: Brain,
    evolution: GeneticAlgorithm,
    rng: ChaCha8Rng,
    generation: u32,
    previous_positions: Vec<(i32, i32)>,
    stats: TrainingStats,
}

impl Trainer {
    /// Creates a trainer on the classic board.
    pub fn new(params: Params, mode: ControlMode) -> Result<Self, SimError> {
        Self::with_board(params, mode, Board::classic())
    }

    /// Creates a trainer on a custom board.
    pub fn with_board(params: Params, mode: ControlMode, board: Board) -> Result<Self, SimError> {
        params.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let topology = Topology::new(NUM_FEATURES, params.num_hidden, Action::COUNT);
        let evolution = GeneticAlgorithm::new(
            params.num_agents,
            topology.num_expected_weights(),
            EvolutionParams::from(&params),
            &mut rng,
        );
        let world = World::new(board, mode.num_players(params.num_agents), &params);

        let mut trainer = Self {
            params,
            mode,
            world,
            brain: Brain::new(topology),
            evolution,
            rng,
            generation: 1,
            previous_positions: Vec::new(),
            stats: TrainingStats::default(),
        };
        trainer.remember_positions();

        info!(
            agents = trainer.params.num_agents,
            weights = topology.num_expected_weights(),
            mode = ?mode,
            "trainer ready"
        );

        Ok(trainer)
    }

    /// Runs one physics tick.
    ///
    /// Returns the summary of the generation that ended on this tick, if any.
    pub fn step(&mut self, keys: KeyState) -> Result<Option<GenerationSummary>, SimError> {
        if self.world.spawn_obstacles(&self.params, &mut self.rng) {
            debug!(
                tick = self.world.tick,
                obstacles = self.world.obstacles.len(),
                "spawned obstacle"
            );
        }

        self.control(keys);
        self.world.step_physics();

        if self.mode == ControlMode::Machine {
            self.enforce_progress();
        }

        if self.world.num_alive() > 0 {
            return Ok(None);
        }

        self.end_generation().map(Some)
    }

    /// Runs however many ticks `clock` says are due after `elapsed` seconds.
    pub fn advance(
        &mut self,
        clock: &mut FixedTimestep,
        elapsed: f64,
        keys: KeyState,
    ) -> Result<Vec<GenerationSummary>, SimError> {
        let mut finished = Vec::new();

        for _ in 0..clock.advance(elapsed) {
            if let Some(summary) = self.step(keys)? {
                finished.push(summary);
            }
        }

        Ok(finished)
    }

    /// Runs machine-controlled ticks until the current generation ends.
    pub fn run_generation(&mut self) -> Result<GenerationSummary, SimError> {
        loop {
            if let Some(summary) = self.step(KeyState::default())? {
                return Ok(summary);
            }
        }
    }

    /// Board state for rendering.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Parameters in use.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Control mode chosen at construction.
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// The shared controller network.
    pub fn brain(&self) -> &Brain {
        &self.brain
    }

    /// Current population, index-aligned with the players.
    pub fn population(&self) -> &[Genome] {
        &self.evolution.population
    }

    /// Number of the generation in progress, starting at 1.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Accumulated statistics.
    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    fn control(&mut self, keys: KeyState) {
        if self.world.players.is_empty() {
            return;
        }

        for player in &mut self.world.players {
            player.body.v_x = 0;
        }

        match self.mode {
            ControlMode::Human => self.apply_keys(keys),
            ControlMode::Machine => self.run_brains(),
        }
    }

    fn apply_keys(&mut self, keys: KeyState) {
        let Some(player) = self.world.players.first_mut() else {
            return;
        };

        if keys.left {
            player.move_left();
        }
        if keys.right {
            player.move_right();
        }
        if keys.jump {
            player.jump(self.params.jump_velocity);
        }
    }

    fn run_brains(&mut self) {
        let World {
            board,
            players,
            obstacles,
            ..
        } = &mut self.world;

        for (idx, (player, genome)) in players
            .iter_mut()
            .zip(&self.evolution.population)
            .enumerate()
        {
            if !player.alive {
                continue;
            }

            let inputs = perception::sense(player, board, obstacles.as_slice());

            match self.brain.forward(&inputs, &genome.weights) {
                Ok(output) => {
                    if let Some(action) = Action::from_index(output) {
                        action.apply(player, self.params.jump_velocity);
                    }
                }
                Err(err) => error!(agent = idx, %err, "could not feed forward"),
            }
        }
    }

    /// Kills agents that fall behind the level schedule or stop moving.
    fn enforce_progress(&mut self) {
        let elapsed = self.world.tick;
        let last_tick = elapsed.saturating_sub(1);
        let floor_y = self.world.board.floor_y();

        if elapsed % self.params.level_check_interval == 0 {
            let min_level = (elapsed / self.params.level_check_interval) as u32;
            let mut killed = 0;

            for player in self
                .world
                .players
                .iter_mut()
                .filter(|p| p.alive && p.body.level < min_level)
            {
                player.kill(last_tick, floor_y);
                killed += 1;
            }

            debug!(tick = elapsed, min_level, killed, "level sweep");
        }

        if elapsed % self.params.stall_check_interval == 0 {
            let mut killed = 0;

            for (player, previous) in self
                .world
                .players
                .iter_mut()
                .zip(self.previous_positions.iter_mut())
            {
                let (prev_x, prev_y) = *previous;
                let dx = (player.body.offset_x - prev_x) as f32;
                let dy = (player.body.offset_y - prev_y) as f32;

                if player.alive && dx.hypot(dy) < self.params.stall_distance {
                    player.kill(last_tick, floor_y);
                    killed += 1;
                }

                *previous = (player.body.offset_x, player.body.offset_y);
            }

            debug!(tick = elapsed, killed, "stall sweep");
        }
    }

    fn end_generation(&mut self) -> Result<GenerationSummary, SimError> {
        let summary = self
            .stats
            .record(self.generation, self.world.tick, &self.world.players);

        info!(
            generation = summary.generation,
            ticks = summary.ticks,
            best_score = summary.best_score,
            best_score_overall = summary.best_score_overall,
            best_level = summary.best_level,
            best_level_overall = summary.best_level_overall,
            "generation finished"
        );

        if self.mode == ControlMode::Machine {
            for (genome, player) in self
                .evolution
                .population
                .iter_mut()
                .zip(&self.world.players)
            {
                genome.fitness = player.score as f32;
            }

            self.evolution.evolve(&mut self.rng)?;
        }

        self.generation += 1;
        self.world
            .reset(self.mode.num_players(self.params.num_agents), &self.params);
        self.remember_positions();

        Ok(summary)
    }

    fn remember_positions(&mut self) {
        self.previous_positions.clear();
        self.previous_positions.extend(
            self.world
                .players
                .iter()
                .map(|p| (p.body.offset_x, p.body.offset_y)),
        );
    }
}
