use crate::core::ballistics::TrajectoryProfile;
use crate::core::error::ProjectileError;
use crate::core::sampling::SamplePoint;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityVector {
    pub vx: f64,
    pub vy: f64,
    pub magnitude: f64,
}

impl VelocityVector {
    pub fn from_components(vx: f64, vy: f64) -> Self {
        Self {
            vx,
            vy,
            magnitude: (vx * vx + vy * vy).sqrt(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VectorQueryResult {
    pub point: SamplePoint,
    pub vector: VelocityVector,
}

/// Index of the sample whose `x` is closest to `query_x_m`. Equal distances
/// keep the earlier sample, so on a symmetric arc the ascending leg wins.
pub fn nearest_sample_index(samples: &[SamplePoint], query_x_m: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, sample) in samples.iter().enumerate() {
        let distance = (sample.x - query_x_m).abs();
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((idx, distance));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Instantaneous velocity at the sample nearest `query_x_m`, recomputed from
/// the launch parameters at that sample's time.
pub fn query_velocity(
    profile: &TrajectoryProfile,
    samples: &[SamplePoint],
    gravity_mps2: f64,
    query_x_m: f64,
) -> Result<VectorQueryResult, ProjectileError> {
    let idx = nearest_sample_index(samples, query_x_m).ok_or(ProjectileError::NoSamples)?;
    let point = samples[idx];
    let (vx, vy) = profile.velocity_at(gravity_mps2, point.t);

    Ok(VectorQueryResult {
        point,
        vector: VelocityVector::from_components(vx, vy),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ballistics::LaunchRecord;
    use crate::core::config::EARTH_GRAVITY_MPS2;
    use crate::core::sampling::discrete_samples;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn point(t: f64, x: f64, y: f64) -> SamplePoint {
        SamplePoint { t, x, y }
    }

    fn profile() -> TrajectoryProfile {
        TrajectoryProfile::from_record(&LaunchRecord::new("q", 20.0, 45.0), EARTH_GRAVITY_MPS2)
    }

    #[test]
    fn launch_point_speed_matches_launch_speed() {
        let p = profile();
        let samples = discrete_samples(&p, EARTH_GRAVITY_MPS2, 0.5);
        let hit = query_velocity(&p, &samples, EARTH_GRAVITY_MPS2, -3.0).expect("query");

        assert_eq!(hit.point.t, 0.0);
        assert_close(hit.vector.magnitude, 20.0, 1e-12);
        assert_close(hit.vector.vx, hit.vector.vy, 1e-12);
    }

    #[test]
    fn vertical_component_follows_gravity() {
        let p = profile();
        let samples = discrete_samples(&p, EARTH_GRAVITY_MPS2, 0.5);
        let hit = query_velocity(&p, &samples, EARTH_GRAVITY_MPS2, samples[2].x + 0.1)
            .expect("query");

        assert_eq!(hit.point, samples[2]);
        let (vx0, vy0) = p.velocity_at(EARTH_GRAVITY_MPS2, 0.0);
        assert_eq!(hit.vector.vx, vx0);
        assert_close(hit.vector.vy, vy0 - EARTH_GRAVITY_MPS2 * 1.0, 1e-12);
    }

    #[test]
    fn equidistant_samples_resolve_to_the_first() {
        let samples = [
            point(0.0, 0.0, 0.0),
            point(0.5, 4.0, 3.0),
            point(1.0, 8.0, 3.0),
        ];
        assert_eq!(nearest_sample_index(&samples, 6.0), Some(1));
        assert_eq!(nearest_sample_index(&samples, 6.5), Some(2));
    }

    #[test]
    fn repeated_x_prefers_scan_order_over_time() {
        // Straight-up shot: every sample shares x = 0.
        let samples = [
            point(0.0, 0.0, 0.0),
            point(0.5, 0.0, 8.0),
            point(1.0, 0.0, 11.0),
        ];
        assert_eq!(nearest_sample_index(&samples, 0.0), Some(0));
    }

    #[test]
    fn empty_sample_set_is_an_error() {
        let p = profile();
        assert_eq!(
            query_velocity(&p, &[], EARTH_GRAVITY_MPS2, 1.0),
            Err(ProjectileError::NoSamples)
        );
    }
}
