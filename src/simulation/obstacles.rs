//! Fixed-capacity obstacle storage.
//!
//! Obstacles are appended until the buffer is full, after which each spawn
//! overwrites the oldest slot.

use rand::Rng;

use super::entity::Obstacle;
use super::params::Params;

/// Ring buffer of live obstacles.
#[derive(Debug, Clone)]
pub struct ObstacleBuffer {
    obstacles: Vec<Obstacle>,
    capacity: usize,
    cursor: usize,
}

impl ObstacleBuffer {
    /// Creates an empty buffer holding at most `capacity` obstacles.
    pub fn new(capacity: usize) -> Self {
        Self {
            obstacles: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    /// Inserts `obstacle`, recycling the oldest slot once full.
    pub fn push(&mut self, obstacle: Obstacle) {
        if self.capacity == 0 {
            return;
        }

        if self.obstacles.len() == self.capacity {
            self.obstacles[self.cursor] = obstacle;
        } else {
            self.obstacles.push(obstacle);
        }

        self.cursor = (self.cursor + 1) % self.capacity;
    }

    /// Spawns a fresh obstacle at the configured spawn point.
    pub fn spawn(&mut self, params: &Params, rng: &mut impl Rng) {
        self.push(Obstacle::spawn(params, rng));
    }

    /// Removes every obstacle.
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.cursor = 0;
    }

    /// Maximum number of simultaneous obstacles.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of obstacles currently in play.
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether no obstacle is in play.
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Read-only view of the obstacles in slot order.
    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Mutable view for the physics step.
    pub fn as_mut_slice(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }
}
