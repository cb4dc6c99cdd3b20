use climber::simulation::params::Params;
use climber::simulation::trainer::ControlMode;
use egui_macroquad::egui;
use macroquad::prelude::*;

use super::ui::UIState;

/// Draws the configuration screen. Returns the chosen mode once the user starts.
pub fn draw_genesis_screen(params: &mut Params, state: &UIState) -> Option<ControlMode> {
    clear_background(LIGHTGRAY);

    let mut start = None;

    egui_macroquad::ui(|egui_ctx| {
        egui::CentralPanel::default().show(egui_ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Climber - Configuration");
                ui.add_space(10.0);

                ui.collapsing("Population", |ui| {
                    ui.add(egui::Slider::new(&mut params.num_agents, 1..=2000).text("Agents"));
                    ui.add(egui::Slider::new(&mut params.num_hidden, 1..=64).text("Hidden Neurons"));
                    ui.horizontal(|ui| {
                        ui.label("Seed");
                        ui.add(egui::DragValue::new(&mut params.seed));
                    });
                });

                ui.collapsing("Evolution", |ui| {
                    ui.add(egui::Slider::new(&mut params.elite_rate, 0.01..=0.5).text("Elite Rate"));
                    ui.add(
                        egui::Slider::new(&mut params.mutation_rate, 0.0..=1.0)
                            .text("Mutation Rate"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.mutation_stddev, 0.0..=1.0)
                            .text("Mutation Step"),
                    );
                });

                ui.collapsing("Obstacles", |ui| {
                    ui.add(
                        egui::Slider::new(&mut params.obstacle_spawn_interval, 10..=1000)
                            .text("Spawn Interval (ticks)"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.obstacle_capacity, 1..=200)
                            .text("Max Obstacles"),
                    );
                    ui.add(egui::Slider::new(&mut params.obstacle_speed, 1..=6).text("Speed"));
                });

                ui.collapsing("Progress Rules", |ui| {
                    ui.add(
                        egui::Slider::new(&mut params.level_check_interval, 200..=10000)
                            .text("Level Check (ticks)"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.stall_check_interval, 20..=2000)
                            .text("Stall Check (ticks)"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.stall_distance, 0.0..=100.0)
                            .text("Stall Distance"),
                    );
                });

                ui.collapsing("Timing", |ui| {
                    ui.add(
                        egui::Slider::new(&mut params.tick_rate_hz, 30.0..=960.0)
                            .text("Physics Rate (Hz)"),
                    );
                });

                if let Some(ref msg) = state.status_message {
                    ui.colored_label(egui::Color32::from_rgb(200, 40, 40), msg);
                }

                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Train Agents").clicked() {
                        start = Some(ControlMode::Machine);
                    }
                    if ui.button("Play Yourself").clicked() {
                        start = Some(ControlMode::Human);
                    }
                    ui.label("Arrows move, Space jumps, Escape quits");
                });
            });
        });
    });

    egui_macroquad::draw();

    start
}
