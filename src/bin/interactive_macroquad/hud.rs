use macroquad::prelude::*;

use crate::constants::{COMPLETE_COLOR, TELEMETRY_BG, TELEMETRY_COLOR, TELEMETRY_HEIGHT, VECTOR_COLOR};
use crate::model::FlightPhase;
use crate::render::draw_ui_text;
use crate::state::AppRuntime;

pub(crate) fn draw_hud(state: &AppRuntime, screen_w: f32, screen_h: f32, font: Option<&Font>) {
    draw_vector_title(state, screen_w, font);
    draw_telemetry(state, screen_w, screen_h, font);
}

fn draw_vector_title(state: &AppRuntime, screen_w: f32, font: Option<&Font>) {
    let (Some(hit), Some(flight)) = (state.inspection, state.flight.as_ref()) else {
        return;
    };
    let title = format!(
        "Velocity vector: {} | t = {:.2} s | v_total: {:.2} m/s",
        flight.profile.id, hit.point.t, hit.vector.magnitude
    );
    let size = measure_text(&title, font, 22, 1.0);
    draw_ui_text(&title, screen_w - size.width - 16.0, 32.0, 22, VECTOR_COLOR, font);
}

fn draw_telemetry(state: &AppRuntime, screen_w: f32, screen_h: f32, font: Option<&Font>) {
    let top = screen_h - TELEMETRY_HEIGHT;
    draw_rectangle(0.0, top, screen_w, TELEMETRY_HEIGHT, TELEMETRY_BG);

    let (text, color) = match (&state.flight, state.phase()) {
        (Some(flight), FlightPhase::Flying) => {
            let f = flight.frame;
            (
                format!(
                    "Distance: {:.2}m | Height: {:.2}m | V_total: {:.2}m/s | Time: {:.2}s",
                    f.x, f.y, f.velocity.magnitude, f.t
                ),
                TELEMETRY_COLOR,
            )
        }
        (Some(_), FlightPhase::Complete) => (state.status_line.clone(), COMPLETE_COLOR),
        _ => (state.status_line.clone(), TELEMETRY_COLOR),
    };

    let size = measure_text(&text, font, 20, 1.0);
    draw_ui_text(
        &text,
        (screen_w - size.width) * 0.5,
        top + (TELEMETRY_HEIGHT + size.height) * 0.5,
        20,
        color,
        font,
    );
}
