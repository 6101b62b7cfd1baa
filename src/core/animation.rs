use crate::core::ballistics::{TrajectoryProfile, position_at, velocity_at};
use crate::core::query::VelocityVector;

/// Everything a renderer needs for one animation frame. Trace segments and
/// previously drawn arrows belong to the renderer, not to this value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub velocity: VelocityVector,
    pub landed: bool,
}

pub fn step(speed_mps: f64, angle_rad: f64, gravity_mps2: f64, elapsed_s: f64) -> FrameState {
    let (x, y) = position_at(speed_mps, angle_rad, gravity_mps2, elapsed_s);
    let (vx, vy) = velocity_at(speed_mps, angle_rad, gravity_mps2, elapsed_s);
    FrameState {
        t: elapsed_s,
        x,
        y,
        velocity: VelocityVector::from_components(vx, vy),
        landed: false,
    }
}

pub fn step_profile(profile: &TrajectoryProfile, gravity_mps2: f64, elapsed_s: f64) -> FrameState {
    FrameState {
        landed: elapsed_s >= profile.time_of_flight_s,
        ..step(profile.speed_mps, profile.angle_rad, gravity_mps2, elapsed_s)
    }
}

/// Next tick time for a driver advancing by `step_s`, clamped so the last
/// tick lands on `flight_s` exactly. `None` once the flight is over.
pub fn next_tick_time(elapsed_s: f64, step_s: f64, flight_s: f64) -> Option<f64> {
    if elapsed_s >= flight_s || !(step_s > 0.0) {
        return None;
    }
    Some((elapsed_s + step_s).min(flight_s))
}

/// Frames from launch to landing at a fixed step. Lets a caller without its
/// own clock (tables, tests) walk the same timeline a live driver would.
#[derive(Clone, Debug)]
pub struct FrameTimeline<'a> {
    profile: &'a TrajectoryProfile,
    gravity_mps2: f64,
    step_s: f64,
    next_t: Option<f64>,
}

impl<'a> FrameTimeline<'a> {
    pub fn new(profile: &'a TrajectoryProfile, gravity_mps2: f64, step_s: f64) -> Self {
        Self {
            profile,
            gravity_mps2,
            step_s,
            next_t: Some(0.0),
        }
    }
}

impl Iterator for FrameTimeline<'_> {
    type Item = FrameState;

    fn next(&mut self) -> Option<Self::Item> {
        let t = self.next_t?;
        self.next_t = next_tick_time(t, self.step_s, self.profile.time_of_flight_s);
        Some(step_profile(self.profile, self.gravity_mps2, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ballistics::LaunchRecord;
    use crate::core::config::{ANIMATION_STEP_S, EARTH_GRAVITY_MPS2};

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn profile(speed_mps: f64, angle_deg: f64) -> TrajectoryProfile {
        TrajectoryProfile::from_record(&LaunchRecord::new("a", speed_mps, angle_deg), EARTH_GRAVITY_MPS2)
    }

    #[test]
    fn launch_frame_sits_at_origin_with_full_speed() {
        let frame = step(20.0, 45f64.to_radians(), EARTH_GRAVITY_MPS2, 0.0);
        assert_eq!((frame.x, frame.y), (0.0, 0.0));
        assert_close(frame.velocity.magnitude, 20.0, 1e-12);
    }

    #[test]
    fn apex_frame_has_no_vertical_velocity() {
        let p = profile(20.0, 45.0);
        let frame = step_profile(&p, EARTH_GRAVITY_MPS2, p.time_of_flight_s / 2.0);

        assert_close(frame.velocity.vy, 0.0, 1e-12);
        assert_close(frame.y, p.apex_height_m, 1e-9);
        assert!(!frame.landed);
    }

    #[test]
    fn final_tick_is_clamped_to_flight_time() {
        assert_eq!(next_tick_time(0.0, 0.05, 1.0), Some(0.05));
        assert_eq!(next_tick_time(0.98, 0.05, 1.0), Some(1.0));
        assert_eq!(next_tick_time(1.0, 0.05, 1.0), None);
        assert_eq!(next_tick_time(0.0, 0.0, 1.0), None);
    }

    #[test]
    fn timeline_ends_on_reported_landing_point() {
        let p = profile(20.0, 45.0);
        let frames: Vec<FrameState> =
            FrameTimeline::new(&p, EARTH_GRAVITY_MPS2, ANIMATION_STEP_S).collect();

        // 2.8814 s at 0.05 s per tick: 58 full ticks plus the clamped landing.
        assert_eq!(frames.len(), 59);
        let last = frames.last().expect("frames");
        assert_eq!(last.t, p.time_of_flight_s);
        assert!(last.landed);
        assert_close(last.x, p.range_m, 1e-9);
        assert_close(last.y, 0.0, 1e-9);
        assert_eq!(frames.iter().filter(|f| f.landed).count(), 1);
    }

    #[test]
    fn grounded_launch_has_a_single_frame() {
        let p = profile(12.0, 0.0);
        let frames: Vec<FrameState> = FrameTimeline::new(&p, EARTH_GRAVITY_MPS2, 0.05).collect();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].landed);
    }
}
