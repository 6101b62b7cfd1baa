use parabolic_batch::core::ballistics::LaunchRecord;
use parabolic_batch::core::config::SimulationConfig;
use parabolic_batch::core::query::VectorQueryResult;
use parabolic_batch::core::window::{Margins, Viewport, ViewportScale};
use tracing::debug;

use crate::constants::{
    CANVAS_MARGIN_X, CANVAS_MARGIN_Y, DEFAULT_ANGLE_DEG, DEFAULT_SPEED_MPS, MAX_SLIDER_SPEED_MPS,
};
use crate::model::{ActiveFlight, FlightPhase, LaunchSettings, ScaleCache};

pub(crate) struct AppRuntime {
    pub(crate) records: Vec<LaunchRecord>,
    pub(crate) selected_record: usize,
    /// Record last copied into the sliders, with the values it was copied as.
    pub(crate) filled_from_record: Option<(usize, LaunchSettings)>,
    pub(crate) settings: LaunchSettings,
    /// Wide enough for the fastest loaded record.
    pub(crate) slider_max_speed_mps: f32,
    pub(crate) config: SimulationConfig,
    pub(crate) flight: Option<ActiveFlight>,
    pub(crate) inspection: Option<VectorQueryResult>,
    pub(crate) scale: Option<ScaleCache>,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new(records: Vec<LaunchRecord>, config: SimulationConfig) -> Self {
        let slider_max_speed_mps = records
            .iter()
            .map(|record| record.speed_mps.ceil() as f32)
            .fold(MAX_SLIDER_SPEED_MPS, f32::max);
        Self {
            records,
            selected_record: 0,
            filled_from_record: None,
            settings: LaunchSettings {
                speed_mps: DEFAULT_SPEED_MPS,
                angle_deg: DEFAULT_ANGLE_DEG,
            },
            slider_max_speed_mps,
            config,
            flight: None,
            inspection: None,
            scale: None,
            status_line: "Ready for launch".to_string(),
        }
    }

    pub(crate) fn phase(&self) -> FlightPhase {
        match &self.flight {
            None => FlightPhase::Idle,
            Some(flight) if flight.is_complete() => FlightPhase::Complete,
            Some(_) => FlightPhase::Flying,
        }
    }

    pub(crate) fn margins(&self) -> Margins {
        Margins {
            x: CANVAS_MARGIN_X,
            y: CANVAS_MARGIN_Y,
        }
    }

    /// Scale for the active flight, refitted when the canvas size changed or
    /// a new flight was launched (which clears the cache).
    pub(crate) fn refresh_scale(&mut self, canvas: Viewport) -> Option<ViewportScale> {
        let flight = self.flight.as_ref()?;
        if let Some(cache) = self.scale {
            if cache.canvas == canvas {
                return Some(cache.scale);
            }
        }

        match ViewportScale::fit(
            flight.profile.range_m,
            flight.profile.apex_height_m,
            canvas,
            self.margins(),
        ) {
            Ok(scale) => {
                debug!(
                    width = canvas.width,
                    height = canvas.height,
                    pixels_per_meter = scale.pixels_per_meter,
                    "refitted viewport scale"
                );
                self.scale = Some(ScaleCache { canvas, scale });
                Some(scale)
            }
            Err(err) => {
                debug!(%err, "canvas too small to draw");
                self.scale = None;
                None
            }
        }
    }
}
