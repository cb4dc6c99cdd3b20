//! Static platform geometry.
//!
//! The board uses pixel coordinates with the origin at the board centre and
//! y pointing up. Platforms are line segments; collision code assumes they are
//! horizontal (`y_start == y_end`).

use serde::{Deserialize, Serialize};

/// Size of one board tile in pixels.
pub const TILE_SIZE: i32 = 8;
/// Board width in tiles.
pub const TILES_X: i32 = 28;
/// Board height in tiles.
pub const TILES_Y: i32 = 32;

/// A walkable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSegment {
    /// X coordinate of the first end point.
    pub x_start: i32,
    /// Y coordinate of the first end point.
    pub y_start: i32,
    /// X coordinate of the second end point.
    pub x_end: i32,
    /// Y coordinate of the second end point.
    pub y_end: i32,
}

impl LineSegment {
    /// Creates a horizontal segment at height `y`.
    pub fn horizontal(x_start: i32, x_end: i32, y: i32) -> Self {
        Self {
            x_start,
            y_start: y,
            x_end,
            y_end: y,
        }
    }

    /// Returns the horizontal span as `(min, max)` regardless of orientation.
    pub fn x_span(&self) -> (i32, i32) {
        (
            self.x_start.min(self.x_end),
            self.x_start.max(self.x_end),
        )
    }

    /// Height of the segment. Only meaningful for horizontal segments.
    pub fn y(&self) -> i32 {
        self.y_start
    }

    /// Whether the closed interval `[left, right]` shares any x with this segment.
    pub fn overlaps_x(&self, left: i32, right: i32) -> bool {
        let (min, max) = self.x_span();
        left <= max && right >= min
    }
}

/// The level layout: platforms plus the side walls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// All platforms. The last one is the floor.
    pub segments: Vec<LineSegment>,
    /// Absolute x limit for entity centres.
    pub max_x: i32,
}

impl Board {
    /// Creates a board from a list of segments whose last entry is the floor.
    ///
    /// Returns `None` for an empty segment list, since score is measured
    /// against the floor.
    pub fn new(segments: Vec<LineSegment>, max_x: i32) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Self { segments, max_x })
    }

    /// The platform layout used for training.
    ///
    /// A short goal ledge at the top, five sloped girders built from one pixel
    /// steps that alternate direction, and the floor on the bottom left.
    pub fn classic() -> Self {
        let half_tiles = TILES_X / 2;
        let mut segments = vec![
            LineSegment::horizontal(-3 * TILE_SIZE, 3 * TILE_SIZE, 9 * TILE_SIZE),
            LineSegment::horizontal(-half_tiles * TILE_SIZE, 4 * TILE_SIZE, 5 * TILE_SIZE + 4),
        ];

        push_girder(&mut segments, 4, 4 * TILE_SIZE, 5 * TILE_SIZE + 3, 1);
        push_girder(&mut segments, 13, TILE_SIZE * half_tiles, 2 * TILE_SIZE + 3, -1);
        push_girder(&mut segments, 13, -TILE_SIZE * half_tiles, -TILE_SIZE - 6, 1);
        push_girder(&mut segments, 13, TILE_SIZE * half_tiles, -5 * TILE_SIZE - 6, -1);
        push_girder(&mut segments, 13, -TILE_SIZE * half_tiles, -10 * TILE_SIZE, 1);
        push_girder(&mut segments, 7, TILE_SIZE * half_tiles, -14 * TILE_SIZE - 2, -1);

        segments.push(LineSegment::horizontal(
            -half_tiles * TILE_SIZE,
            0,
            -15 * TILE_SIZE,
        ));

        Self {
            segments,
            max_x: half_tiles * TILE_SIZE,
        }
    }

    /// The bottom platform.
    pub fn floor(&self) -> &LineSegment {
        // `Board::new` and `Board::classic` never build an empty board
        &self.segments[self.segments.len() - 1]
    }

    /// Height of the floor, the zero point for scores.
    pub fn floor_y(&self) -> i32 {
        self.floor().y_end
    }

    /// Pixel width of the full board.
    pub fn width(&self) -> i32 {
        TILES_X * TILE_SIZE
    }

    /// Pixel height of the full board.
    pub fn height(&self) -> i32 {
        TILES_Y * TILE_SIZE
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::classic()
    }
}

/// Appends a girder of `num_blocks` two-tile steps, each one pixel lower than
/// the last. `direction` is `1` for a girder running right, `-1` for left.
fn push_girder(
    segments: &mut Vec<LineSegment>,
    num_blocks: i32,
    x_offset: i32,
    y_offset: i32,
    direction: i32,
) {
    for block in 0..num_blocks {
        let x_start = x_offset + TILE_SIZE * (direction * 2 * block);
        let x_end = x_offset + TILE_SIZE * (direction * 2 * (block + 1));
        segments.push(LineSegment::horizontal(x_start, x_end, y_offset - block));
    }
}
