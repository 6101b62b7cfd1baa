use parabolic_batch::core::animation::FrameState;
use parabolic_batch::core::ballistics::TrajectoryProfile;
use parabolic_batch::core::sampling::SamplePoint;
use parabolic_batch::core::window::{Viewport, ViewportScale};

use crate::constants::SLIDER_RESOLUTION;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LaunchSettings {
    pub(crate) speed_mps: f32,
    pub(crate) angle_deg: f32,
}

impl LaunchSettings {
    /// Equal up to the two decimals the slider text box shows.
    pub(crate) fn matches(&self, other: &Self) -> bool {
        (self.speed_mps - other.speed_mps).abs() <= SLIDER_RESOLUTION
            && (self.angle_deg - other.angle_deg).abs() <= SLIDER_RESOLUTION
    }
}

/// The launch currently on screen. Replacing it drops its pending ticks, so a
/// relaunch never renders frames from the previous shot.
pub(crate) struct ActiveFlight {
    pub(crate) profile: TrajectoryProfile,
    pub(crate) samples: Vec<SamplePoint>,
    pub(crate) frame: FrameState,
    /// Physical positions of every rendered tick, oldest first.
    pub(crate) trace: Vec<(f64, f64)>,
    pub(crate) tick_accumulator_s: f32,
}

impl ActiveFlight {
    pub(crate) fn is_complete(&self) -> bool {
        self.frame.landed
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlightPhase {
    Idle,
    Flying,
    Complete,
}

#[derive(Clone, Copy)]
pub(crate) struct ScaleCache {
    pub(crate) canvas: Viewport,
    pub(crate) scale: ViewportScale,
}
