use std::env;
use std::path::PathBuf;

use macroquad::prelude::*;
use macroquad::ui::root_ui;
use parabolic_batch::core::config::SimulationConfig;
use parabolic_batch::core::window::Viewport;
use parabolic_batch::report::load_records;
use tracing::warn;

use crate::constants::{
    CANVAS_BG, DEFAULT_RECORDS_PATH, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, MSAA_SAMPLES,
    TELEMETRY_HEIGHT, UI_FONT_PATH,
};
use crate::controls::{draw_control_panel, hotkey_actions};
use crate::gameplay::{apply_actions, inspect_at, step_active_flight, sync_selection};
use crate::hud::draw_hud;
use crate::model::FlightPhase;
use crate::render::{draw_ball, draw_ground, draw_trace, draw_ui_text, draw_vector_arrow};
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Projectile Simulator - Auto Scaling".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

fn records_path() -> PathBuf {
    env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_RECORDS_PATH), PathBuf::from)
}

pub(crate) async fn run() {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("Could not load '{UI_FONT_PATH}': {err}. Falling back to default font.");
            None
        }
    };

    // A missing or broken data file still opens the simulator for manual launches.
    let records = load_records(&records_path()).unwrap_or_else(|err| {
        warn!(%err, "starting without launch records");
        Vec::new()
    });
    let mut state = AppRuntime::new(records, SimulationConfig::default());

    loop {
        let frame_dt = get_frame_time();
        let screen_w = screen_width();
        let screen_h = screen_height();
        let canvas = Viewport {
            width: f64::from(screen_w),
            height: f64::from(screen_h - TELEMETRY_HEIGHT),
        };

        let actions = hotkey_actions().merge(draw_control_panel(&mut state));
        sync_selection(&mut state);
        apply_actions(&mut state, actions);
        step_active_flight(&mut state, frame_dt);

        let scale = state.refresh_scale(canvas);

        let mouse = Vec2::from(mouse_position());
        let on_canvas = f64::from(mouse.y) < canvas.height && !root_ui().is_mouse_over(mouse);
        if let Some(scale) = scale {
            if on_canvas && is_mouse_button_pressed(MouseButton::Left) {
                inspect_at(&mut state, mouse, &scale);
            }
        }

        clear_background(CANVAS_BG);
        match (scale, state.flight.as_ref()) {
            (Some(scale), Some(flight)) => {
                draw_ground(&scale, screen_w);
                draw_trace(&flight.trace, &scale);
                draw_ball(&flight.frame, &scale);
                if let Some(hit) = state.inspection.as_ref() {
                    draw_vector_arrow(hit, &scale);
                }
                if state.phase() == FlightPhase::Complete && state.inspection.is_none() {
                    draw_ui_text(
                        "Click the trajectory to inspect its velocity vector",
                        360.0,
                        32.0,
                        20,
                        GRAY,
                        ui_font.as_ref(),
                    );
                }
            }
            _ => {
                draw_ui_text(
                    "Pick a projectile or set V / angle, then press LAUNCH",
                    360.0,
                    32.0,
                    20,
                    GRAY,
                    ui_font.as_ref(),
                );
            }
        }

        draw_hud(&state, screen_w, screen_h, ui_font.as_ref());

        next_frame().await;
    }
}
