//! Feature extraction: what a player knows about the board each tick.
//!
//! Feature layout (all roughly in `[-1, 1]`):
//!
//! | idx | feature                                 |
//! |-----|-----------------------------------------|
//! | 0   | on ground (0 or 1)                      |
//! | 1   | `offset_x / 100`                        |
//! | 2   | `offset_y / 100`                        |
//! | 3   | `level / 5`                             |
//! | 4-5 | first obstacle slot: distance/100, angle/π  |
//! | 6-7 | second obstacle slot: distance/100, angle/π |
//! | 8   | ceiling clearance / 100                 |

use std::f32::consts::PI;

use ndarray::Array1;

use super::board::Board;
use super::entity::{Body, Obstacle, Player};
use super::geometric_utils::{bearing, center_distance};

/// Length of the feature vector.
pub const NUM_FEATURES: usize = 9;

/// Range beyond which obstacles and ceilings are not reported.
pub const SENSE_RANGE: f32 = 100.0;

/// Highest level, used to normalise the level feature.
const MAX_LEVEL: f32 = 5.0;

/// An obstacle slot in the feature vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSighting {
    /// Index into the obstacle slice, `None` while the slot is empty.
    pub obstacle: Option<usize>,
    /// Centre-to-centre distance.
    pub distance: f32,
    /// Bearing in radians.
    pub angle: f32,
}

impl Default for ObstacleSighting {
    fn default() -> Self {
        Self {
            obstacle: None,
            distance: SENSE_RANGE,
            angle: 0.0,
        }
    }
}

/// Fills two obstacle slots for `body`.
///
/// The slot to replace is picked once, as the farther of the two, before
/// scanning. It is not re-picked while scanning, so only that slot is ever
/// overwritten: it ends up holding the nearest obstacle in range (first found
/// on ties) and the other slot keeps its empty reading. Trained genomes depend
/// on this exact input, so it must not be turned into a true top-two search.
pub fn nearest_obstacles(body: &Body, obstacles: &[Obstacle]) -> [ObstacleSighting; 2] {
    let mut slots = [ObstacleSighting::default(); 2];
    // both slots start empty, so the first one is the farther
    let idx_worst = 0;

    for (idx, obstacle) in obstacles.iter().enumerate() {
        let distance = center_distance(body, &obstacle.body);

        if distance < slots[idx_worst].distance {
            slots[idx_worst] = ObstacleSighting {
                obstacle: Some(idx),
                distance,
                angle: bearing(body, &obstacle.body),
            };
        }
    }

    slots
}

/// Vertical gap to the lowest platform at or above `body` that shares its
/// horizontal extent, capped at [`SENSE_RANGE`].
pub fn ceiling_clearance(body: &Body, board: &Board) -> f32 {
    let (left, right) = body.x_extent();

    board
        .segments
        .iter()
        .filter(|segment| segment.y() >= body.offset_y && segment.overlaps_x(left, right))
        .map(|segment| (segment.y() - body.offset_y) as f32)
        .fold(SENSE_RANGE, f32::min)
}

/// Builds the normalised feature vector for `player`.
pub fn sense(player: &Player, board: &Board, obstacles: &[Obstacle]) -> Array1<f32> {
    let body = &player.body;
    let [first, second] = nearest_obstacles(body, obstacles);

    Array1::from_vec(vec![
        if body.is_on_ground { 1.0 } else { 0.0 },
        body.offset_x as f32 / 100.0,
        body.offset_y as f32 / 100.0,
        body.level as f32 / MAX_LEVEL,
        first.distance / SENSE_RANGE,
        first.angle / PI,
        second.distance / SENSE_RANGE,
        second.angle / PI,
        ceiling_clearance(body, board) / SENSE_RANGE,
    ])
}
