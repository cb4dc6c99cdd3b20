//! # Climber - Neuroevolution for a Platformer
//!
//! Trains a population of small neural-network agents to climb a fixed
//! platform level while dodging rolling obstacles.
//!
//! ## Features
//!
//! - Deterministic fixed-tick physics with landing on horizontal platforms
//! - One hidden layer feedforward controller (tanh, no biases)
//! - Genetic algorithm with elitism, uniform crossover and sparse mutation
//! - Progress rules that cull agents falling behind or standing still
//! - Interactive viewer and a headless trainer
//!
//! ## Core Modules
//!
//! - [`simulation::physics`] - Gravity, landing, walls and obstacle hits
//! - [`simulation::brain`] - Controller network and actions
//! - [`simulation::evolution`] - Genomes and the genetic algorithm
//! - [`simulation::trainer`] - Per-tick orchestration and generation turnover

/// Core simulation logic and data structures.
pub mod simulation {
    /// Static platform geometry.
    pub mod board;
    /// Feedforward controller network.
    pub mod brain;
    /// Fixed-timestep accumulator for frame loops.
    pub mod clock;
    /// Players, obstacles and their shared kinematic body.
    pub mod entity;
    /// Errors raised by the simulation core.
    pub mod error;
    /// Genetic algorithm over controller weights.
    pub mod evolution;
    /// Geometric utility functions for distance calculations.
    pub mod geometric_utils;
    /// Fixed-capacity obstacle storage.
    pub mod obstacles;
    /// Training parameters.
    pub mod params;
    /// Feature extraction for the controller.
    pub mod perception;
    /// Per-tick kinematics and collision.
    pub mod physics;
    /// Generation statistics.
    pub mod stats;
    /// Generation orchestrator.
    pub mod trainer;
    /// Mutable board state for one episode.
    pub mod world;
}
