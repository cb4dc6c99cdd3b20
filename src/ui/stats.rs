use climber::simulation::trainer::{ControlMode, Trainer};
use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};
use std::collections::VecDeque;

use super::ui::UIState;

pub(super) fn draw_stats_panel(egui_ctx: &egui::Context, state: &mut UIState, trainer: &Trainer) {
    egui::SidePanel::right("stats_panel")
        .default_width(state.stats_panel_width)
        .resizable(true)
        .show(egui_ctx, |ui| {
            ui.heading("Training Stats");
            ui.separator();

            ui.horizontal(|ui| {
                let button_text = if state.rendering_enabled {
                    "🎨 Rendering: ON"
                } else {
                    "🎨 Rendering: OFF"
                };
                if ui.button(button_text).clicked() {
                    state.rendering_enabled = !state.rendering_enabled;
                }
            });

            ui.label("Simulation Speed");
            ui.add(egui::Slider::new(&mut state.simulation_speed, 0.1..=20.0).text("x"));

            if let Some(ref msg) = state.status_message {
                ui.label(msg);
            }

            ui.separator();

            let world = trainer.world();
            let mode = match trainer.mode() {
                ControlMode::Machine => "Machine",
                ControlMode::Human => "Human",
            };
            ui.label(format!("Mode: {}", mode));
            ui.label(format!("Generation: {}", trainer.generation()));
            ui.label(format!("Tick: {}", world.tick));
            ui.label(format!(
                "Alive: {}/{}",
                world.num_alive(),
                world.players.len()
            ));
            ui.label(format!(
                "Obstacles: {}/{}",
                world.obstacles.len(),
                world.obstacles.capacity()
            ));

            ui.separator();

            let stats = trainer.stats();
            if let Some(latest) = stats.latest() {
                ui.label(format!(
                    "Last generation: score {} / level {}",
                    latest.best_score, latest.best_level
                ));
            }
            ui.label(format!(
                "All-time best: score {} / level {}",
                stats.best_score_overall, stats.best_level_overall
            ));

            ui.separator();
            ui.label("Best score per generation");
            draw_score_plot(ui, &state.best_score_history, &state.best_overall_history);

            ui.label("Best level per generation");
            draw_level_plot(ui, &state.best_level_history);
        });
}

fn draw_score_plot(
    ui: &mut egui::Ui,
    score_data: &VecDeque<(f64, f64)>,
    overall_data: &VecDeque<(f64, f64)>,
) {
    if score_data.is_empty() {
        ui.label("Waiting for the first generation...");
        return;
    }

    Plot::new("score_plot")
        .height(150.0)
        .show_axes([true, true])
        .legend(egui_plot::Legend::default())
        .label_formatter(|name, value| {
            format!("{}\nGeneration: {:.0}\nScore: {:.0}", name, value.x, value.y)
        })
        .show(ui, |plot_ui| {
            let score_points: PlotPoints = score_data.iter().map(|&(x, y)| [x, y]).collect();
            let score_line = Line::new(score_points)
                .color(egui::Color32::from_rgb(100, 150, 255))
                .name("Generation best");
            plot_ui.line(score_line);

            let overall_points: PlotPoints = overall_data.iter().map(|&(x, y)| [x, y]).collect();
            let overall_line = Line::new(overall_points)
                .color(egui::Color32::from_rgb(100, 200, 100))
                .name("All-time best");
            plot_ui.line(overall_line);
        });
}

fn draw_level_plot(ui: &mut egui::Ui, level_data: &VecDeque<(f64, f64)>) {
    if level_data.is_empty() {
        return;
    }

    Plot::new("level_plot")
        .height(100.0)
        .show_axes([true, true])
        .include_y(0.0)
        .include_y(5.0)
        .show(ui, |plot_ui| {
            let points: PlotPoints = level_data.iter().map(|&(x, y)| [x, y]).collect();
            plot_ui.line(
                Line::new(points)
                    .color(egui::Color32::from_rgb(240, 82, 156))
                    .name("Best level"),
            );
        });
}
