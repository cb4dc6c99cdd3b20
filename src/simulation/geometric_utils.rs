//! Geometric utility functions for distance calculations between entities.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};

use super::entity::Body;

/// Centre of a body as a floating point position.
pub fn center(body: &Body) -> Point<f32> {
    Point::new(body.offset_x as f32, body.offset_y as f32)
}

/// Euclidean distance between the centres of two bodies.
pub fn center_distance(from: &Body, to: &Body) -> f32 {
    Euclidean.distance(center(from), center(to))
}

/// Direction from `from` to `to` in radians, in `[-π, π]`.
pub fn bearing(from: &Body, to: &Body) -> f32 {
    let dx = (to.offset_x - from.offset_x) as f32;
    let dy = (to.offset_y - from.offset_y) as f32;
    dy.atan2(dx)
}
