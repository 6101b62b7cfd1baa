use crate::core::ballistics::TrajectoryProfile;
use crate::core::config::MAX_SAMPLES_PER_TRAJECTORY;
use crate::core::error::ProjectileError;

/// Grid times closer than this to the landing time are folded into the
/// landing sample instead of being emitted twice.
pub const LANDING_TOLERANCE_S: f64 = 1e-9;

/// Physical position (meters) at elapsed time `t` (seconds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

impl SamplePoint {
    pub fn at(profile: &TrajectoryProfile, gravity_mps2: f64, time_s: f64) -> Self {
        let (x, y) = profile.position_at(gravity_mps2, time_s);
        Self { t: time_s, x, y }
    }
}

fn grid_steps(flight_s: f64, interval_s: f64) -> f64 {
    if interval_s > 0.0 && flight_s.is_finite() {
        (flight_s / interval_s).ceil()
    } else {
        0.0
    }
}

/// Rejects a trajectory whose report would need more than
/// `MAX_SAMPLES_PER_TRAJECTORY` samples at this interval.
pub fn check_sample_budget(
    profile: &TrajectoryProfile,
    interval_s: f64,
) -> Result<(), ProjectileError> {
    let requested = grid_steps(profile.time_of_flight_s, interval_s) + 1.0;
    if requested > MAX_SAMPLES_PER_TRAJECTORY as f64 {
        return Err(ProjectileError::TooManySamples {
            id: profile.id.clone(),
            requested,
            limit: MAX_SAMPLES_PER_TRAJECTORY,
        });
    }
    Ok(())
}

/// Report samples at `0, interval, 2*interval, ...` strictly before landing,
/// followed by one sample at exactly the time of flight. The grid is cut off
/// at `MAX_SAMPLES_PER_TRAJECTORY`; run `check_sample_budget` first to
/// refuse such flights instead.
pub fn discrete_samples(
    profile: &TrajectoryProfile,
    gravity_mps2: f64,
    interval_s: f64,
) -> Vec<SamplePoint> {
    let flight_s = profile.time_of_flight_s;
    let steps = (grid_steps(flight_s, interval_s) as usize).min(MAX_SAMPLES_PER_TRAJECTORY);

    let mut samples: Vec<SamplePoint> = (0..steps)
        .map(|k| k as f64 * interval_s)
        .filter(|&t| t < flight_s - LANDING_TOLERANCE_S)
        .map(|t| SamplePoint::at(profile, gravity_mps2, t))
        .collect();
    samples.push(SamplePoint::at(profile, gravity_mps2, flight_s));
    samples
}

/// `point_count` evenly spaced samples over the closed interval `[0, T]`,
/// for drawing smooth curves.
pub fn dense_samples(
    profile: &TrajectoryProfile,
    gravity_mps2: f64,
    point_count: usize,
) -> Vec<SamplePoint> {
    let flight_s = profile.time_of_flight_s;
    match point_count {
        0 => Vec::new(),
        1 => vec![SamplePoint::at(profile, gravity_mps2, 0.0)],
        count => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| SamplePoint::at(profile, gravity_mps2, flight_s * (i as f64 / last)))
                .collect()
        }
    }
}
