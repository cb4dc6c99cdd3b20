use serde::{Deserialize, Serialize};

use super::error::SimError;

/// Training parameters: population, body sizes, hazards, evolution and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Number of agents (and genomes) per generation.
    pub num_agents: usize,
    /// Player bounding box width.
    pub player_width: i32,
    /// Player bounding box height.
    pub player_height: i32,
    /// Spawn x for every player.
    pub spawn_x: i32,
    /// Spawn y for every player.
    pub spawn_y: i32,
    /// Initial upward velocity of a jump.
    pub jump_velocity: i32,
    /// Neurons in the hidden layer.
    pub num_hidden: usize,
    /// Fraction of the population copied unchanged into the next generation.
    pub elite_rate: f32,
    /// Per-weight probability of mutating a bred child.
    pub mutation_rate: f32,
    /// Scale of the uniform perturbation applied by a mutation.
    pub mutation_stddev: f32,
    /// Obstacle width and height.
    pub obstacle_size: i32,
    /// Horizontal obstacle speed.
    pub obstacle_speed: i32,
    /// Spawn x for obstacles.
    pub obstacle_spawn_x: i32,
    /// Spawn y for obstacles.
    pub obstacle_spawn_y: i32,
    /// Ticks between obstacle spawns.
    pub obstacle_spawn_interval: u64,
    /// Maximum number of simultaneous obstacles.
    pub obstacle_capacity: usize,
    /// Ticks between minimum-level sweeps.
    pub level_check_interval: u64,
    /// Ticks between movement checks.
    pub stall_check_interval: u64,
    /// Minimum distance a player must cover between movement checks.
    pub stall_distance: f32,
    /// Physics ticks per second of wall-clock time.
    pub tick_rate_hz: f64,
    /// Seed for every random draw in a run.
    pub seed: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            num_agents: 500,
            player_width: 8,
            player_height: 8,
            spawn_x: -50,
            spawn_y: -100,
            jump_velocity: 6,
            num_hidden: 18,
            elite_rate: 0.05,
            mutation_rate: 0.1,
            mutation_stddev: 0.2,
            obstacle_size: 8,
            obstacle_speed: 2,
            obstacle_spawn_x: 0,
            obstacle_spawn_y: 100,
            obstacle_spawn_interval: 100,
            obstacle_capacity: 50,
            level_check_interval: 2000,
            stall_check_interval: 200,
            stall_distance: 20.0,
            tick_rate_hz: 240.0,
            seed: 42,
        }
    }
}

impl Params {
    /// Checks that the parameters describe a runnable training session.
    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |msg: &str| Err(SimError::InvalidParams(msg.to_owned()));

        if self.player_width <= 0 || self.player_height <= 0 || self.obstacle_size <= 0 {
            return invalid("entity sizes must be positive");
        }
        if self.num_hidden == 0 {
            return invalid("num_hidden must be at least 1");
        }
        if !(self.elite_rate > 0.0 && self.elite_rate <= 1.0) {
            return invalid("elite_rate must be in (0, 1]");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid("mutation_rate must be in [0, 1]");
        }
        if !self.mutation_stddev.is_finite() || self.mutation_stddev < 0.0 {
            return invalid("mutation_stddev must be a non-negative number");
        }
        if self.obstacle_spawn_interval == 0
            || self.level_check_interval == 0
            || self.stall_check_interval == 0
        {
            return invalid("tick intervals must be positive");
        }
        if self.obstacle_capacity == 0 {
            return invalid("obstacle_capacity must be at least 1");
        }
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return invalid("tick_rate_hz must be positive");
        }

        Ok(())
    }

    /// Wall-clock duration of one tick in seconds.
    pub fn tick_period(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads parameters from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let params = serde_json::from_str(&json)?;
        Ok(params)
    }
}
