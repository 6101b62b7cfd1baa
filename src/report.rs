//! JSON loader for launch batches and the serialized trajectory report.
//!
//! Field names (`velocidad`, `angulo`, `metricas`, `puntos_trayectoria`, ...)
//! are the on-disk contract shared with existing data files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::ballistics::LaunchRecord;
use crate::core::batch::{AnalyzedTrajectory, BatchResult};
use crate::core::sampling::SamplePoint;

pub const WINNER_MARKER: &str = "🏆";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed launch data in '{}': {source}", .path.display())]
    MalformedInput {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RawLaunchRecord {
    id: String,
    velocidad: f64,
    angulo: f64,
}

impl From<RawLaunchRecord> for LaunchRecord {
    fn from(raw: RawLaunchRecord) -> Self {
        LaunchRecord::new(raw.id, raw.velocidad, raw.angulo)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub alcance: f64,
    pub altura: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportPoint {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub id: String,
    pub metricas: Metrics,
    pub puntos_trayectoria: Vec<ReportPoint>,
}

pub fn parse_records(json: &str) -> Result<Vec<LaunchRecord>, serde_json::Error> {
    let raw: Vec<RawLaunchRecord> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(LaunchRecord::from).collect())
}

pub fn load_records(path: &Path) -> Result<Vec<LaunchRecord>, ReportError> {
    let json = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&json).map_err(|source| ReportError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), records = records.len(), "loaded launch records");
    Ok(records)
}

/// Two decimal places, with negative zero folded into zero.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

pub fn display_id(trajectory: &AnalyzedTrajectory, is_winner: bool) -> String {
    let id = &trajectory.profile.id;
    if is_winner {
        format!("{WINNER_MARKER} {id}")
    } else {
        id.clone()
    }
}

fn report_point(sample: &SamplePoint) -> ReportPoint {
    ReportPoint {
        t: round2(sample.t),
        x: round2(sample.x),
        y: round2(sample.y),
    }
}

pub fn build_report(result: &BatchResult) -> Vec<ReportEntry> {
    result
        .trajectories
        .iter()
        .enumerate()
        .map(|(idx, trajectory)| ReportEntry {
            id: display_id(trajectory, result.is_winner(idx)),
            metricas: Metrics {
                alcance: round2(trajectory.profile.range_m),
                altura: round2(trajectory.profile.apex_height_m),
            },
            puntos_trayectoria: trajectory.samples.iter().map(report_point).collect(),
        })
        .collect()
}

pub fn report_to_json(entries: &[ReportEntry]) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries.serialize(&mut serializer)?;
    // serde_json only emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn write_report(path: &Path, entries: &[ReportEntry]) -> Result<(), ReportError> {
    let json = report_to_json(entries)?;
    fs::write(path, json).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), entries = entries.len(), "wrote trajectory report");
    Ok(())
}

pub fn format_summary_table(result: &BatchResult) -> String {
    let mut lines = vec![
        format!("{:<30} | {:<12} | HEIGHT", "PROJECTILE ID", "RANGE"),
        "-".repeat(65),
    ];
    lines.extend(result.trajectories.iter().enumerate().map(|(idx, trajectory)| {
        format!(
            "{:<30} | {:>10.2}m | {:>8.2}m",
            display_id(trajectory, result.is_winner(idx)),
            trajectory.profile.range_m,
            trajectory.profile.apex_height_m
        )
    }));
    lines.push(String::new());
    lines.push(format!(
        "Flights longer than {:.2}s: [{}]",
        result.config.long_flight_threshold_s,
        result.long_flight_ids.join(", ")
    ));

    let mut table = lines.join("\n");
    table.push('\n');
    table
}
