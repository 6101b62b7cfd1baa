use tracing::{debug, info};

use crate::core::animation::{FrameState, step_profile};
use crate::core::ballistics::{LaunchRecord, TrajectoryProfile, validate_batch};
use crate::core::config::SimulationConfig;
use crate::core::error::ProjectileError;
use crate::core::query::{VectorQueryResult, query_velocity};
use crate::core::sampling::{SamplePoint, check_sample_budget, dense_samples, discrete_samples};
use crate::core::window::{Margins, Viewport, ViewportScale};

#[derive(Clone, Debug, PartialEq)]
pub struct AnalyzedTrajectory {
    pub profile: TrajectoryProfile,
    pub samples: Vec<SamplePoint>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BatchResult {
    pub config: SimulationConfig,
    pub trajectories: Vec<AnalyzedTrajectory>,
    pub winner_index: Option<usize>,
    /// `"<id> (<T>s)"` for every flight longer than the configured threshold.
    pub long_flight_ids: Vec<String>,
}

/// Tracks the longest range seen so far. Only a strictly greater range takes
/// over, so ties keep the earliest record. A batch where nothing leaves the
/// ground has no winner.
#[derive(Clone, Copy, Debug, Default)]
pub struct WinnerTracker {
    best: Option<(usize, f64)>,
}

impl WinnerTracker {
    pub fn observe(&mut self, index: usize, range_m: f64) {
        let best_range = self.best.map_or(0.0, |(_, range)| range);
        if range_m > best_range {
            self.best = Some((index, range_m));
        }
    }

    pub fn winner(&self) -> Option<usize> {
        self.best.map(|(index, _)| index)
    }
}

pub fn select_winner(ranges: impl IntoIterator<Item = f64>) -> Option<usize> {
    let mut tracker = WinnerTracker::default();
    for (index, range_m) in ranges.into_iter().enumerate() {
        tracker.observe(index, range_m);
    }
    tracker.winner()
}

pub fn format_long_flight(id: &str, time_of_flight_s: f64) -> String {
    format!("{id} ({time_of_flight_s:.2}s)")
}

/// Validates the whole batch up front, then computes every profile and its
/// report samples in input order. Nothing is returned for a batch containing
/// an invalid record or a flight too long to sample.
pub fn analyze_batch(
    records: &[LaunchRecord],
    config: &SimulationConfig,
) -> Result<BatchResult, ProjectileError> {
    config.validate()?;
    validate_batch(records)?;

    let profiles: Vec<TrajectoryProfile> = records
        .iter()
        .map(|record| TrajectoryProfile::from_record(record, config.gravity_mps2))
        .collect();
    profiles
        .iter()
        .try_for_each(|profile| check_sample_budget(profile, config.sample_interval_s))?;

    let mut tracker = WinnerTracker::default();
    let mut trajectories = Vec::with_capacity(records.len());
    let mut long_flight_ids = Vec::new();

    for (index, profile) in profiles.into_iter().enumerate() {
        let samples = discrete_samples(&profile, config.gravity_mps2, config.sample_interval_s);
        debug!(
            id = %profile.id,
            range_m = profile.range_m,
            apex_height_m = profile.apex_height_m,
            time_of_flight_s = profile.time_of_flight_s,
            samples = samples.len(),
            "analyzed launch"
        );

        tracker.observe(index, profile.range_m);
        if profile.time_of_flight_s > config.long_flight_threshold_s {
            long_flight_ids.push(format_long_flight(&profile.id, profile.time_of_flight_s));
        }
        trajectories.push(AnalyzedTrajectory { profile, samples });
    }

    let result = BatchResult {
        config: *config,
        trajectories,
        winner_index: tracker.winner(),
        long_flight_ids,
    };
    info!(
        records = result.trajectories.len(),
        winner = result.winner().map(|t| t.profile.id.as_str()).unwrap_or("none"),
        long_flights = result.long_flight_ids.len(),
        "batch analysis complete"
    );
    Ok(result)
}

impl AnalyzedTrajectory {
    pub fn dense_samples(&self, config: &SimulationConfig) -> Vec<SamplePoint> {
        dense_samples(&self.profile, config.gravity_mps2, config.dense_point_count)
    }
}

impl BatchResult {
    pub fn winner(&self) -> Option<&AnalyzedTrajectory> {
        self.winner_index.and_then(|idx| self.trajectories.get(idx))
    }

    pub fn is_winner(&self, index: usize) -> bool {
        self.winner_index == Some(index)
    }

    pub fn trajectory(&self, selection: usize) -> Result<&AnalyzedTrajectory, ProjectileError> {
        self.trajectories
            .get(selection)
            .ok_or(ProjectileError::UnknownTrajectory(selection))
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.trajectories.iter().position(|t| t.profile.id == id)
    }

    /// Largest range and apex height across the batch.
    pub fn max_extents(&self) -> (f64, f64) {
        self.trajectories.iter().fold((0.0f64, 0.0f64), |(x, y), t| {
            (x.max(t.profile.range_m), y.max(t.profile.apex_height_m))
        })
    }

    pub fn viewport_scale(
        &self,
        viewport: Viewport,
        margins: Margins,
    ) -> Result<ViewportScale, ProjectileError> {
        let (max_range_m, max_height_m) = self.max_extents();
        ViewportScale::fit(max_range_m, max_height_m, viewport, margins)
    }

    pub fn query(
        &self,
        selection: usize,
        query_x_m: f64,
    ) -> Result<VectorQueryResult, ProjectileError> {
        let trajectory = self.trajectory(selection)?;
        query_velocity(
            &trajectory.profile,
            &trajectory.samples,
            self.config.gravity_mps2,
            query_x_m,
        )
    }

    pub fn step(&self, selection: usize, elapsed_s: f64) -> Result<FrameState, ProjectileError> {
        let trajectory = self.trajectory(selection)?;
        Ok(step_profile(&trajectory.profile, self.config.gravity_mps2, elapsed_s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn batch() -> Vec<LaunchRecord> {
        vec![
            LaunchRecord::new("short-lob", 12.0, 70.0),
            LaunchRecord::new("flat-drive", 30.0, 20.0),
            LaunchRecord::new("mirror-drive", 30.0, 70.0),
            LaunchRecord::new("high-arc", 40.0, 60.0),
        ]
    }

    #[test]
    fn first_strict_maximum_wins() {
        assert_eq!(select_winner([5.0, 8.0, 8.0, 3.0]), Some(1));
        assert_eq!(select_winner([2.0, 1.0]), Some(0));
        assert_eq!(select_winner([0.0, 0.0]), None);
        assert_eq!(select_winner(std::iter::empty()), None);
    }

    #[test]
    fn analyzes_records_in_input_order() {
        let result = analyze_batch(&batch(), &SimulationConfig::default())
            .expect("analysis should succeed");

        let ids: Vec<&str> = result
            .trajectories
            .iter()
            .map(|t| t.profile.id.as_str())
            .collect();
        assert_eq!(ids, ["short-lob", "flat-drive", "mirror-drive", "high-arc"]);
        assert_eq!(result.winner_index, Some(3));
        assert_eq!(result.winner().map(|t| t.profile.id.as_str()), Some("high-arc"));

        for trajectory in &result.trajectories {
            let last = trajectory.samples.last().expect("samples");
            assert_close(last.t, trajectory.profile.time_of_flight_s, 1e-9);
        }
    }

    #[test]
    fn equal_ranges_keep_the_earlier_record() {
        let records = vec![
            LaunchRecord::new("short-lob", 12.0, 70.0),
            LaunchRecord::new("first-drive", 30.0, 20.0),
            LaunchRecord::new("second-drive", 30.0, 20.0),
        ];
        let result = analyze_batch(&records, &SimulationConfig::default())
            .expect("analysis should succeed");
        assert_eq!(result.winner_index, Some(1));
    }

    #[test]
    fn all_vertical_batch_has_no_winner() {
        let records = vec![
            LaunchRecord::new("a", 10.0, 90.0),
            LaunchRecord::new("b", 30.0, 90.0),
        ];
        let result = analyze_batch(&records, &SimulationConfig::default())
            .expect("analysis should succeed");

        assert_eq!(result.winner_index, None);
        assert!(result.trajectories.iter().all(|t| t.profile.range_m == 0.0));
    }

    #[test]
    fn collects_long_flights_above_threshold() {
        // T = 2 v sin(theta) / g: 31.0 m/s straight up -> 6.32 s, 24.0 m/s -> 4.89 s
        let records = vec![
            LaunchRecord::new("long", 31.0, 90.0),
            LaunchRecord::new("short", 24.0, 90.0),
        ];
        let result = analyze_batch(&records, &SimulationConfig::default())
            .expect("analysis should succeed");

        assert_eq!(result.long_flight_ids, vec!["long (6.32s)".to_string()]);
    }

    #[test]
    fn threshold_is_configurable() {
        let config = SimulationConfig {
            long_flight_threshold_s: 1.0,
            ..Default::default()
        };
        let result = analyze_batch(&batch(), &config).expect("analysis should succeed");
        assert_eq!(result.long_flight_ids.len(), 4);
    }

    #[test]
    fn one_bad_record_rejects_the_batch() {
        let mut records = batch();
        records.insert(2, LaunchRecord::new("broken", -5.0, 45.0));

        let err = analyze_batch(&records, &SimulationConfig::default())
            .expect_err("analysis should fail");
        assert!(matches!(err, ProjectileError::InvalidSpeed { id, .. } if id == "broken"));
    }

    #[test]
    fn oversampled_flight_rejects_the_batch() {
        let mut records = batch();
        records.push(LaunchRecord::new("orbital", 1.0e12, 45.0));

        let err = analyze_batch(&records, &SimulationConfig::default())
            .expect_err("analysis should fail");
        assert!(matches!(err, ProjectileError::TooManySamples { id, .. } if id == "orbital"));
    }

    #[test]
    fn empty_batch_and_bad_config_are_rejected() {
        assert_eq!(
            analyze_batch(&[], &SimulationConfig::default()),
            Err(ProjectileError::EmptyBatch)
        );

        let config = SimulationConfig {
            sample_interval_s: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            analyze_batch(&batch(), &config),
            Err(ProjectileError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn extents_cover_the_widest_and_tallest_flights() {
        let result = analyze_batch(&batch(), &SimulationConfig::default())
            .expect("analysis should succeed");
        let (max_range, max_height) = result.max_extents();

        let high_arc = &result.trajectories[3].profile;
        assert_eq!(max_range, high_arc.range_m);
        assert_eq!(max_height, high_arc.apex_height_m);
    }

    #[test]
    fn selection_outside_the_batch_is_reported() {
        let result = analyze_batch(&batch(), &SimulationConfig::default())
            .expect("analysis should succeed");

        assert_eq!(result.query(9, 1.0), Err(ProjectileError::UnknownTrajectory(9)));
        assert_eq!(result.position_of("high-arc"), Some(3));
        assert!(result.step(0, 0.0).is_ok());
    }
}
