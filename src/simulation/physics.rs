//! Fixed-tick kinematics and collision resolution.
//!
//! One call to [`step`] advances every living player, then every obstacle,
//! then tests players against obstacles using the post-movement positions.
//! Nothing here draws random numbers, so a step is a pure function of the
//! state it is given.

use super::board::Board;
use super::entity::{Body, Kinematic, Obstacle, Player};

/// Downward acceleration in pixels per tick squared.
pub const GRAVITY: i32 = 1;

/// Landing heights at which each level starts (levels 1 to 5).
pub const LEVEL_THRESHOLDS: [i32; 5] = [-92, -57, -26, 6, 39];

/// Tolerance above the bottom edge used when probing for platforms.
const PROBE_ABOVE: i32 = 2;

/// Maps a resting height to its level.
pub fn level_for(offset_y: i32) -> u32 {
    LEVEL_THRESHOLDS
        .iter()
        .filter(|&&threshold| offset_y >= threshold)
        .count() as u32
}

/// Finds the platform a body lands on while its bottom edge moves from
/// `y_before` to `y_after`.
///
/// A segment qualifies when its span overlaps the body's horizontal extent and
/// the bottom edge crosses its height downward. The highest qualifying segment
/// wins; on equal height the first one scanned is kept.
pub fn landing_segment(board: &Board, body: &Body, y_before: i32, y_after: i32) -> Option<usize> {
    let (x_left, x_right) = body.x_extent();
    let mut landing: Option<usize> = None;

    for (idx, segment) in board.segments.iter().enumerate() {
        if !segment.overlaps_x(x_left, x_right) {
            continue;
        }

        let line_y = segment.y();

        if y_before > line_y && y_after <= line_y {
            landing = match landing {
                Some(current) if board.segments[current].y() >= line_y => Some(current),
                _ => Some(idx),
            };
        }
    }

    landing
}

/// Resolves landing and vertical motion for one tick.
pub fn apply_gravity(board: &Board, body: &mut Body) {
    let bottom = body.bottom();

    let landing = if body.is_on_ground {
        landing_segment(board, body, bottom + PROBE_ABOVE, bottom - 1)
    } else if body.v_y < 0 {
        landing_segment(board, body, bottom + PROBE_ABOVE, bottom + body.v_y)
    } else {
        None
    };

    if let Some(idx) = landing {
        body.offset_y = board.segments[idx].y() + body.height / 2;
        body.is_on_ground = true;
        body.v_y = 0;
        body.level = level_for(body.offset_y);
    } else if body.is_on_ground {
        // walked off an edge
        body.v_y = -GRAVITY;
        body.is_on_ground = false;
    }

    if !body.is_on_ground {
        body.offset_y += body.v_y;
        body.v_y -= GRAVITY;
    }
}

/// Moves a body horizontally, clamped to the side walls.
///
/// Returns `true` when the wall stopped a body that was trying to move.
pub fn apply_movement(body: &mut Body, max_x: i32) -> bool {
    let offset_x_before = body.offset_x;
    body.offset_x = (body.offset_x + body.v_x).clamp(-max_x, max_x);

    body.offset_x == offset_x_before && body.v_x != 0
}

/// Axis-aligned bounding box overlap, inclusive on the edges.
pub fn overlaps(a: &Body, b: &Body) -> bool {
    let reach_x = a.width / 2 + b.width / 2;
    let reach_y = a.height / 2 + b.height / 2;

    (a.offset_x - b.offset_x).abs() <= reach_x && (a.offset_y - b.offset_y).abs() <= reach_y
}

/// Advances players and obstacles by one tick.
///
/// `tick` is recorded as `dead_at_step` for players hit this tick.
pub fn step(tick: u64, board: &Board, players: &mut [Player], obstacles: &mut [Obstacle]) {
    for player in players.iter_mut().filter(|p| p.alive) {
        let body = player.body_mut();
        apply_gravity(board, body);
        apply_movement(body, board.max_x);
    }

    for obstacle in obstacles.iter_mut() {
        let body = obstacle.body_mut();
        apply_gravity(board, body);
        if apply_movement(body, board.max_x) {
            body.v_x = -body.v_x;
        }
    }

    let floor_y = board.floor_y();

    // Airborne players cannot be hit.
    for player in players
        .iter_mut()
        .filter(|p| p.alive && p.body.is_on_ground)
    {
        if obstacles
            .iter()
            .any(|obstacle| overlaps(player.body(), obstacle.body()))
        {
            player.kill(tick, floor_y);
        }
    }
}
