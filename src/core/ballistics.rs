use crate::core::error::ProjectileError;

/// `sin(2θ)` below this is rounding residue of a vertical launch, not range.
const SIN_2THETA_NOISE_FLOOR: f64 = 1e-12;

/// One launch as handed over by the loader: an id, a muzzle speed and an
/// elevation angle above flat ground.
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchRecord {
    pub id: String,
    pub speed_mps: f64,
    pub angle_deg: f64,
}

impl LaunchRecord {
    pub fn new(id: impl Into<String>, speed_mps: f64, angle_deg: f64) -> Self {
        Self {
            id: id.into(),
            speed_mps,
            angle_deg,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    pub range_m: f64,
    pub apex_height_m: f64,
    pub time_of_flight_s: f64,
}

/// Summary metrics of one flat-ground flight.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryProfile {
    pub id: String,
    pub speed_mps: f64,
    pub angle_rad: f64,
    pub range_m: f64,
    pub apex_height_m: f64,
    pub time_of_flight_s: f64,
}

impl TrajectoryProfile {
    pub fn from_record(record: &LaunchRecord, gravity_mps2: f64) -> Self {
        let metrics = kinematics(record.speed_mps, record.angle_deg, gravity_mps2);
        Self {
            id: record.id.clone(),
            speed_mps: record.speed_mps,
            angle_rad: record.angle_deg.to_radians(),
            range_m: metrics.range_m,
            apex_height_m: metrics.apex_height_m,
            time_of_flight_s: metrics.time_of_flight_s,
        }
    }

    pub fn position_at(&self, gravity_mps2: f64, time_s: f64) -> (f64, f64) {
        position_at(self.speed_mps, self.angle_rad, gravity_mps2, time_s)
    }

    pub fn velocity_at(&self, gravity_mps2: f64, time_s: f64) -> (f64, f64) {
        velocity_at(self.speed_mps, self.angle_rad, gravity_mps2, time_s)
    }
}

pub fn validate_record(record: &LaunchRecord) -> Result<(), ProjectileError> {
    if !record.speed_mps.is_finite() || record.speed_mps < 0.0 {
        return Err(ProjectileError::InvalidSpeed {
            id: record.id.clone(),
            value: record.speed_mps,
        });
    }
    // Range check also rejects NaN.
    if !(0.0..=90.0).contains(&record.angle_deg) {
        return Err(ProjectileError::InvalidAngle {
            id: record.id.clone(),
            value: record.angle_deg,
        });
    }
    Ok(())
}

/// Fail-fast: the first bad record rejects the whole batch.
pub fn validate_batch(records: &[LaunchRecord]) -> Result<(), ProjectileError> {
    if records.is_empty() {
        return Err(ProjectileError::EmptyBatch);
    }
    records.iter().try_for_each(validate_record)
}

pub fn kinematics(speed_mps: f64, angle_deg: f64, gravity_mps2: f64) -> Kinematics {
    let theta = angle_deg.to_radians();
    let sin_theta = theta.sin();
    let speed_sq = speed_mps * speed_mps;
    let sin_2theta = (2.0 * theta).sin();
    let sin_2theta = if sin_2theta.abs() < SIN_2THETA_NOISE_FLOOR {
        0.0
    } else {
        sin_2theta
    };

    Kinematics {
        range_m: (speed_sq * sin_2theta / gravity_mps2).max(0.0),
        apex_height_m: speed_sq * sin_theta * sin_theta / (2.0 * gravity_mps2),
        time_of_flight_s: 2.0 * speed_mps * sin_theta / gravity_mps2,
    }
}

pub fn velocity_components(speed_mps: f64, angle_rad: f64) -> (f64, f64) {
    (speed_mps * angle_rad.cos(), speed_mps * angle_rad.sin())
}

pub fn position_at(speed_mps: f64, angle_rad: f64, gravity_mps2: f64, time_s: f64) -> (f64, f64) {
    let (vx, vy) = velocity_components(speed_mps, angle_rad);
    let x = vx * time_s;
    let y = (vy * time_s) - (0.5 * gravity_mps2 * time_s * time_s);
    (x, y)
}

pub fn velocity_at(speed_mps: f64, angle_rad: f64, gravity_mps2: f64, time_s: f64) -> (f64, f64) {
    let (vx, vy) = velocity_components(speed_mps, angle_rad);
    (vx, vy - gravity_mps2 * time_s)
}
