//! Mutable board state for one episode.

use rand::Rng;

use super::board::Board;
use super::entity::{Obstacle, Player};
use super::obstacles::ObstacleBuffer;
use super::params::Params;
use super::physics;

/// Platforms, players, obstacles and the episode's tick counter.
///
/// The renderer only ever reads this; all mutation goes through the trainer.
#[derive(Debug, Clone)]
pub struct World {
    /// Static geometry.
    pub board: Board,
    /// Players, index-aligned with the population.
    pub players: Vec<Player>,
    /// Obstacles in play.
    pub obstacles: ObstacleBuffer,
    /// Ticks elapsed in the current episode.
    pub tick: u64,
}

impl World {
    /// Creates a world with `num_players` players at the spawn pose.
    pub fn new(board: Board, num_players: usize, params: &Params) -> Self {
        let mut world = Self {
            board,
            players: Vec::with_capacity(num_players),
            obstacles: ObstacleBuffer::new(params.obstacle_capacity),
            tick: 0,
        };
        world.reset(num_players, params);
        world
    }

    /// Respawns every player, clears obstacles and rewinds the tick counter.
    pub fn reset(&mut self, num_players: usize, params: &Params) {
        self.players.clear();
        self.players
            .extend((0..num_players).map(|_| Player::spawn(params)));
        self.obstacles.clear();
        self.tick = 0;
    }

    /// Spawns an obstacle when the tick counter hits the spawn cadence.
    pub fn spawn_obstacles(&mut self, params: &Params, rng: &mut impl Rng) -> bool {
        if self.tick % params.obstacle_spawn_interval != 0 {
            return false;
        }

        self.obstacles.spawn(params, rng);
        true
    }

    /// Runs the physics step for the current tick and advances the counter.
    pub fn step_physics(&mut self) {
        physics::step(
            self.tick,
            &self.board,
            &mut self.players,
            self.obstacles.as_mut_slice(),
        );
        self.tick += 1;
    }

    /// Obstacles in play.
    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.as_slice()
    }

    /// Number of players still in play.
    pub fn num_alive(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }
}
