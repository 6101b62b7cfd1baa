use macroquad::prelude::Vec2;
use parabolic_batch::core::animation::{next_tick_time, step_profile};
use parabolic_batch::core::ballistics::{LaunchRecord, TrajectoryProfile, validate_record};
use parabolic_batch::core::query::query_velocity;
use parabolic_batch::core::sampling::{check_sample_budget, discrete_samples};
use parabolic_batch::core::window::ViewportScale;
use tracing::{info, warn};

use crate::constants::{MAX_FRAME_CATCHUP_S, TICK_INTERVAL_S};
use crate::controls::FrameActions;
use crate::model::{ActiveFlight, LaunchSettings};
use crate::state::AppRuntime;

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    if actions.launch {
        launch(state);
    }
    if actions.clear_vector {
        state.inspection = None;
    }
}

/// Copies speed and angle from the picked record into the sliders once per
/// selection change.
pub(crate) fn sync_selection(state: &mut AppRuntime) {
    if state
        .filled_from_record
        .is_some_and(|(index, _)| index == state.selected_record)
    {
        return;
    }
    if let Some(record) = state.records.get(state.selected_record) {
        state.settings = LaunchSettings {
            speed_mps: record.speed_mps as f32,
            angle_deg: (record.angle_deg as f32).clamp(0.0, 90.0),
        };
        state.filled_from_record = Some((state.selected_record, state.settings));
    }
}

/// The selected record itself while its sliders are untouched, otherwise a
/// manual shot built from the slider values.
fn launch_record(state: &AppRuntime) -> LaunchRecord {
    let untouched = state
        .filled_from_record
        .filter(|(_, filled)| filled.matches(&state.settings))
        .and_then(|(index, _)| state.records.get(index));
    match untouched {
        Some(record) => record.clone(),
        None => LaunchRecord::new(
            "manual",
            f64::from(state.settings.speed_mps),
            f64::from(state.settings.angle_deg),
        ),
    }
}

pub(crate) fn launch(state: &mut AppRuntime) {
    let record = launch_record(state);
    if let Err(err) = validate_record(&record) {
        state.status_line = format!("Launch rejected: {err}");
        return;
    }

    let gravity = state.config.gravity_mps2;
    let profile = TrajectoryProfile::from_record(&record, gravity);
    if let Err(err) = check_sample_budget(&profile, state.config.sample_interval_s) {
        state.status_line = format!("Launch rejected: {err}");
        return;
    }
    let samples = discrete_samples(&profile, gravity, state.config.sample_interval_s);
    let frame = step_profile(&profile, gravity, 0.0);
    info!(
        id = %profile.id,
        range_m = profile.range_m,
        time_of_flight_s = profile.time_of_flight_s,
        "launch"
    );

    state.flight = Some(ActiveFlight {
        profile,
        samples,
        frame,
        trace: vec![(frame.x, frame.y)],
        tick_accumulator_s: 0.0,
    });
    state.inspection = None;
    state.scale = None;
    state.status_line = format!("Launched {}", record.id);
}

/// Replays the ticks due since the last frame. Each tick advances simulated
/// time by the configured animation step; the last one lands on the time of
/// flight exactly.
pub(crate) fn step_active_flight(state: &mut AppRuntime, frame_dt: f32) {
    let gravity = state.config.gravity_mps2;
    let step_s = state.config.animation_step_s;
    let Some(flight) = state.flight.as_mut() else {
        return;
    };
    if flight.is_complete() {
        return;
    }

    flight.tick_accumulator_s += frame_dt.min(MAX_FRAME_CATCHUP_S);
    while flight.tick_accumulator_s >= TICK_INTERVAL_S {
        flight.tick_accumulator_s -= TICK_INTERVAL_S;
        let Some(t) = next_tick_time(flight.frame.t, step_s, flight.profile.time_of_flight_s)
        else {
            break;
        };
        flight.frame = step_profile(&flight.profile, gravity, t);
        flight.trace.push((flight.frame.x, flight.frame.y));

        if flight.frame.landed {
            state.status_line = format!(
                "FLIGHT COMPLETE: final range {:.2} m",
                flight.frame.x.max(0.0)
            );
            break;
        }
    }
}

/// Vector query at the clicked canvas column. A failed query keeps whatever
/// vector was shown before.
pub(crate) fn inspect_at(state: &mut AppRuntime, mouse_screen: Vec2, scale: &ViewportScale) {
    let Some(flight) = state.flight.as_ref() else {
        return;
    };
    let (query_x_m, _) = scale.to_physical(f64::from(mouse_screen.x), f64::from(mouse_screen.y));

    match query_velocity(
        &flight.profile,
        &flight.samples,
        state.config.gravity_mps2,
        query_x_m,
    ) {
        Ok(hit) => state.inspection = Some(hit),
        Err(err) => warn!(%err, query_x_m, "ignoring vector query"),
    }
}
