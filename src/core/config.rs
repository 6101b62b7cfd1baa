use crate::core::error::ProjectileError;

pub const EARTH_GRAVITY_MPS2: f64 = 9.81;
pub const REPORT_INTERVAL_S: f64 = 0.5;
pub const LONG_FLIGHT_THRESHOLD_S: f64 = 5.0;
pub const DENSE_POINT_COUNT: usize = 200;
pub const ANIMATION_STEP_S: f64 = 0.05;
/// Upper bound on report or dense samples for a single trajectory.
pub const MAX_SAMPLES_PER_TRAJECTORY: usize = 100_000;

/// Tunables shared by the batch report and the interactive viewer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub gravity_mps2: f64,
    pub sample_interval_s: f64,
    pub long_flight_threshold_s: f64,
    pub dense_point_count: usize,
    pub animation_step_s: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity_mps2: EARTH_GRAVITY_MPS2,
            sample_interval_s: REPORT_INTERVAL_S,
            long_flight_threshold_s: LONG_FLIGHT_THRESHOLD_S,
            dense_point_count: DENSE_POINT_COUNT,
            animation_step_s: ANIMATION_STEP_S,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ProjectileError> {
        require_positive("gravity_mps2", self.gravity_mps2)?;
        require_positive("sample_interval_s", self.sample_interval_s)?;
        require_positive("animation_step_s", self.animation_step_s)?;

        if !self.long_flight_threshold_s.is_finite() || self.long_flight_threshold_s < 0.0 {
            return Err(ProjectileError::InvalidConfig {
                field: "long_flight_threshold_s",
                value: self.long_flight_threshold_s,
            });
        }
        if !(2..=MAX_SAMPLES_PER_TRAJECTORY).contains(&self.dense_point_count) {
            return Err(ProjectileError::InvalidConfig {
                field: "dense_point_count",
                value: self.dense_point_count as f64,
            });
        }

        Ok(())
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ProjectileError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ProjectileError::InvalidConfig { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.gravity_mps2, 9.81);
        assert_eq!(config.dense_point_count, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_gravity() {
        let config = SimulationConfig {
            gravity_mps2: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ProjectileError::InvalidConfig {
                field: "gravity_mps2",
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_non_finite_interval_and_tiny_dense_count() {
        let nan_interval = SimulationConfig {
            sample_interval_s: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan_interval.validate(),
            Err(ProjectileError::InvalidConfig {
                field: "sample_interval_s",
                ..
            })
        ));

        let single_point = SimulationConfig {
            dense_point_count: 1,
            ..Default::default()
        };
        assert!(matches!(
            single_point.validate(),
            Err(ProjectileError::InvalidConfig {
                field: "dense_point_count",
                ..
            })
        ));

        let oversized = SimulationConfig {
            dense_point_count: MAX_SAMPLES_PER_TRAJECTORY + 1,
            ..Default::default()
        };
        assert!(oversized.validate().is_err());
    }
}
