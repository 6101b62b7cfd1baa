use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use crate::model::FlightPhase;
use crate::state::AppRuntime;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) launch: bool,
    pub(crate) clear_vector: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            launch: self.launch || other.launch,
            clear_vector: self.clear_vector || other.clear_vector,
        }
    }
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        launch: is_key_pressed(KeyCode::Space),
        clear_vector: is_key_pressed(KeyCode::C),
    }
}

pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> FrameActions {
    let mut actions = FrameActions::default();
    let labels: Vec<&str> = state.records.iter().map(|r| r.id.as_str()).collect();
    let phase = phase_text(state.phase());

    widgets::Window::new(hash!(), vec2(12.0, 12.0), vec2(320.0, 210.0))
        .label("Launch Controls")
        .ui(&mut *root_ui(), |ui| {
            if labels.is_empty() {
                ui.label(None, "No launch records loaded");
            } else {
                ui.combo_box(hash!(), "Projectile", &labels, &mut state.selected_record);
            }
            ui.label(
                None,
                &format!("g = {:.2} m/s^2", state.config.gravity_mps2),
            );
            ui.separator();
            ui.slider(
                hash!(),
                "V (m/s)",
                0.0..state.slider_max_speed_mps,
                &mut state.settings.speed_mps,
            );
            ui.slider(hash!(), "Angle (deg)", 0.0..90.0, &mut state.settings.angle_deg);
            ui.separator();
            if ui.button(None, "LAUNCH (Space)") {
                actions.launch = true;
            }
            if ui.button(None, "Clear Vector (C)") {
                actions.clear_vector = true;
            }
            ui.label(None, &format!("Flight state: {phase}"));
        });

    actions
}

pub(crate) fn phase_text(phase: FlightPhase) -> &'static str {
    match phase {
        FlightPhase::Idle => "Idle",
        FlightPhase::Flying => "Flying",
        FlightPhase::Complete => "Complete",
    }
}
