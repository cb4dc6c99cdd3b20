use climber::simulation::clock::FixedTimestep;
use climber::simulation::params::Params;
use climber::simulation::trainer::{ControlMode, KeyState, Trainer};
use macroquad::prelude::*;
use tracing::{error, info};

mod graphics;
mod ui;

fn read_keys() -> KeyState {
    KeyState {
        left: is_key_down(KeyCode::Left),
        right: is_key_down(KeyCode::Right),
        jump: is_key_down(KeyCode::Space),
    }
}

fn start_trainer(params: &Params, mode: ControlMode, ui_state: &mut ui::UIState) -> Option<Trainer> {
    match Trainer::new(params.clone(), mode) {
        Ok(trainer) => {
            info!(?mode, agents = trainer.world().players.len(), "starting run");
            ui_state.clear_history();
            ui_state.status_message = None;
            Some(trainer)
        }
        Err(err) => {
            error!(%err, "rejected parameters");
            ui_state.status_message = Some(format!("Invalid parameters: {}", err));
            None
        }
    }
}

#[macroquad::main("Climber")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "climber=info".to_owned()))
        .init();

    let mut params = Params::default();
    let mut ui_state = ui::UIState::new();
    let mut trainer: Option<Trainer> = None;
    let mut clock = FixedTimestep::from_rate(params.tick_rate_hz);

    info!("Starting climber");

    loop {
        if is_key_pressed(KeyCode::Escape) {
            info!("shutdown requested");
            break;
        }

        let Some(active) = trainer.as_mut() else {
            let mut chosen = ui::draw_genesis_screen(&mut params, &ui_state);
            if is_key_pressed(KeyCode::Enter) {
                chosen = Some(ControlMode::Machine);
            } else if is_key_pressed(KeyCode::H) {
                chosen = Some(ControlMode::Human);
            }

            if let Some(mode) = chosen {
                trainer = start_trainer(&params, mode, &mut ui_state);
                clock = FixedTimestep::from_rate(params.tick_rate_hz);
            }

            next_frame().await;
            continue;
        };

        let elapsed = f64::from(get_frame_time() * ui_state.simulation_speed);
        match active.advance(&mut clock, elapsed, read_keys()) {
            Ok(summaries) => {
                for summary in &summaries {
                    ui_state.record(summary);
                }
            }
            Err(err) => {
                error!(%err, "training stopped");
                ui_state.status_message = Some(format!("Training stopped: {}", err));
                trainer = None;
                next_frame().await;
                continue;
            }
        }

        clear_background(DARKGRAY);

        if ui_state.rendering_enabled {
            graphics::draw_world(active.world());
        }

        ui::draw_ui(&mut ui_state, active);
        ui::process_egui();

        next_frame().await;
    }
}
