use climber::simulation;
use climber::simulation::entity::Body;
use macroquad::prelude::*;

/// Ticks a dead player stays visible.
const DEAD_VISIBLE_TICKS: u64 = 500;

const LEVEL_COLORS: [Color; 6] = [
    Color::new(0.2, 0.4, 1.0, 1.0),
    Color::new(0.3, 0.5, 0.8, 1.0),
    Color::new(0.5, 0.2, 0.7, 1.0),
    Color::new(0.7, 0.8, 0.7, 1.0),
    Color::new(0.9, 0.2, 0.5, 1.0),
    Color::new(0.5, 0.7, 0.2, 1.0),
];

/// Board-to-screen transform: board origin at the window centre, y up.
struct Viewport {
    scale: f32,
    center_x: f32,
    center_y: f32,
}

impl Viewport {
    fn fit(board: &simulation::board::Board) -> Self {
        let scale_x = screen_width() / board.width() as f32;
        let scale_y = screen_height() / board.height() as f32;
        Self {
            scale: scale_x.min(scale_y) * 0.95,
            center_x: screen_width() / 2.0,
            center_y: screen_height() / 2.0,
        }
    }

    fn to_screen(&self, x: i32, y: i32) -> (f32, f32) {
        (
            self.center_x + x as f32 * self.scale,
            self.center_y - y as f32 * self.scale,
        )
    }

    fn draw_body(&self, body: &Body, color: Color) {
        let (left, top) = self.to_screen(
            body.offset_x - body.width / 2,
            body.offset_y + body.height / 2,
        );
        draw_rectangle(
            left,
            top,
            body.width as f32 * self.scale,
            body.height as f32 * self.scale,
            color,
        );
    }
}

pub fn draw_world(world: &simulation::world::World) {
    let viewport = Viewport::fit(&world.board);
    let board = &world.board;

    // background
    let (left, top) = viewport.to_screen(-board.width() / 2, board.height() / 2);
    draw_rectangle(
        left,
        top,
        board.width() as f32 * viewport.scale,
        board.height() as f32 * viewport.scale,
        BLACK,
    );

    for segment in &board.segments {
        let (x1, y1) = viewport.to_screen(segment.x_start, segment.y_start);
        let (x2, y2) = viewport.to_screen(segment.x_end, segment.y_end);
        draw_line(x1, y1, x2, y2, 2.0, Color::from_rgba(240, 82, 156, 255));
    }

    for obstacle in world.obstacles() {
        viewport.draw_body(&obstacle.body, Color::new(0.7, 0.4, 0.4, 1.0));
    }

    for player in &world.players {
        if !player.alive && world.tick.saturating_sub(player.dead_at_step) > DEAD_VISIBLE_TICKS {
            continue;
        }

        let mut color = LEVEL_COLORS[(player.body.level as usize).min(LEVEL_COLORS.len() - 1)];
        if !player.alive {
            color = Color::new(color.r * 0.5, color.g * 0.5, color.b * 0.5, 1.0);
        }

        viewport.draw_body(&player.body, color);
    }
}
