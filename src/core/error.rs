use thiserror::Error;

/// Failures raised by the trajectory core. Validation variants abort a whole
/// batch; `NoSamples` is recoverable and callers are expected to ignore the query.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ProjectileError {
    #[error("record '{id}': velocity cannot be negative or non-finite (got {value})")]
    InvalidSpeed { id: String, value: f64 },

    #[error("record '{id}': angle must be between 0 and 90 degrees (got {value})")]
    InvalidAngle { id: String, value: f64 },

    #[error("batch contains no launch records")]
    EmptyBatch,

    #[error("record '{id}': {requested:.0} report samples exceed the per-trajectory limit of {limit}")]
    TooManySamples {
        id: String,
        requested: f64,
        limit: usize,
    },

    #[error("trajectory has no samples to query")]
    NoSamples,

    #[error("invalid configuration: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("viewport {width}x{height} leaves no drawable area inside its margins")]
    ViewportTooSmall { width: f64, height: f64 },

    #[error("no trajectory at selection index {0}")]
    UnknownTrajectory(usize),
}
