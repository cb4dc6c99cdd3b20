//! Bodies that move across the board: players and obstacles.
//!
//! Both embed a [`Body`] that physics mutates. Players add score and
//! liveness on top; obstacles carry nothing else.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::params::Params;

/// Kinematic state shared by every moving entity.
///
/// `offset_x`/`offset_y` is the centre of the bounding box in board pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    /// Horizontal centre position.
    pub offset_x: i32,
    /// Vertical centre position (y up).
    pub offset_y: i32,
    /// Bounding box width.
    pub width: i32,
    /// Bounding box height.
    pub height: i32,
    /// Horizontal velocity in pixels per tick.
    pub v_x: i32,
    /// Vertical velocity in pixels per tick.
    pub v_y: i32,
    /// Whether the body rests on a platform.
    pub is_on_ground: bool,
    /// Vertical progress zone (0-5), updated on landing.
    pub level: u32,
}

impl Body {
    /// Creates a resting body of the given size at `(offset_x, offset_y)`.
    pub fn new(offset_x: i32, offset_y: i32, width: i32, height: i32) -> Self {
        Self {
            offset_x,
            offset_y,
            width,
            height,
            ..Self::default()
        }
    }

    /// Y of the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.offset_y - self.height / 2
    }

    /// Horizontal extent as `(left, right)`.
    pub fn x_extent(&self) -> (i32, i32) {
        (
            self.offset_x - self.width / 2,
            self.offset_x + self.width / 2,
        )
    }
}

/// Entities whose motion is resolved by the physics step.
pub trait Kinematic {
    /// Returns the embedded body.
    fn body(&self) -> &Body;

    /// Returns the embedded body mutably.
    fn body_mut(&mut self) -> &mut Body;
}

/// An agent climbing the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Kinematic state.
    pub body: Body,
    /// Height climbed above the floor, fixed at death.
    pub score: i32,
    /// Whether the player is still in play.
    pub alive: bool,
    /// Tick at which the player died.
    pub dead_at_step: u64,
}

impl Player {
    /// Creates a living player at the spawn pose from `params`.
    pub fn spawn(params: &Params) -> Self {
        Self {
            body: Body::new(
                params.spawn_x,
                params.spawn_y,
                params.player_width,
                params.player_height,
            ),
            score: 0,
            alive: true,
            dead_at_step: 0,
        }
    }

    /// Sets leftward velocity.
    pub fn move_left(&mut self) {
        self.body.v_x = -1;
    }

    /// Sets rightward velocity.
    pub fn move_right(&mut self) {
        self.body.v_x = 1;
    }

    /// Leaves the ground with `velocity`. No-op while airborne.
    pub fn jump(&mut self, velocity: i32) {
        if !self.body.is_on_ground {
            return;
        }

        self.body.v_y = velocity;
        self.body.is_on_ground = false;
    }

    /// Takes the player out of play and fixes its score.
    ///
    /// Only the first call has an effect.
    pub fn kill(&mut self, tick: u64, floor_y: i32) {
        if !self.alive {
            return;
        }

        self.alive = false;
        self.dead_at_step = tick;
        self.score = self.body.offset_y - floor_y;
    }
}

impl Kinematic for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// A falling hazard that rolls along platforms and bounces off walls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Kinematic state.
    pub body: Body,
}

impl Obstacle {
    /// Creates an obstacle at the spawn point rolling in a random direction.
    pub fn spawn(params: &Params, rng: &mut impl Rng) -> Self {
        let direction = if rng.random_bool(0.5) { 1 } else { -1 };
        let mut body = Body::new(
            params.obstacle_spawn_x,
            params.obstacle_spawn_y,
            params.obstacle_size,
            params.obstacle_size,
        );
        body.v_x = direction * params.obstacle_speed;

        Self { body }
    }
}

impl Kinematic for Obstacle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}
