use climber::simulation::stats::GenerationSummary;
use climber::simulation::trainer::Trainer;
use egui_macroquad::egui;
use std::collections::VecDeque;

const MAX_HISTORY_POINTS: usize = 500;

pub struct UIState {
    pub stats_panel_width: f32,
    pub best_score_history: VecDeque<(f64, f64)>,
    pub best_overall_history: VecDeque<(f64, f64)>,
    pub best_level_history: VecDeque<(f64, f64)>,
    pub status_message: Option<String>,
    pub simulation_speed: f32,
    pub rendering_enabled: bool,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            stats_panel_width: 280.0,
            best_score_history: VecDeque::new(),
            best_overall_history: VecDeque::new(),
            best_level_history: VecDeque::new(),
            status_message: None,
            simulation_speed: 1.0, // Default 1x speed
            rendering_enabled: true,
        }
    }

    pub fn record(&mut self, summary: &GenerationSummary) {
        let generation = summary.generation as f64;

        self.best_score_history
            .push_back((generation, summary.best_score as f64));
        self.best_overall_history
            .push_back((generation, summary.best_score_overall as f64));
        self.best_level_history
            .push_back((generation, summary.best_level as f64));

        for history in [
            &mut self.best_score_history,
            &mut self.best_overall_history,
            &mut self.best_level_history,
        ] {
            if history.len() > MAX_HISTORY_POINTS {
                history.pop_front();
            }
        }
    }

    pub fn clear_history(&mut self) {
        self.best_score_history.clear();
        self.best_overall_history.clear();
        self.best_level_history.clear();
    }
}

pub fn draw_ui(state: &mut UIState, trainer: &Trainer) {
    egui_macroquad::ui(|egui_ctx| {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        egui_ctx.set_visuals(visuals);

        super::stats::draw_stats_panel(egui_ctx, state, trainer);
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}
