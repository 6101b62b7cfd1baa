use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1000;
pub const INITIAL_WINDOW_HEIGHT: i32 = 600;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";
pub const DEFAULT_RECORDS_PATH: &str = "datos.json";

pub const CANVAS_MARGIN_X: f64 = 60.0;
pub const CANVAS_MARGIN_Y: f64 = 60.0;
pub const TELEMETRY_HEIGHT: f32 = 40.0;

/// Wall-clock time between animation ticks.
pub const TICK_INTERVAL_S: f32 = 0.020;
/// Frames longer than this are treated as a stall and do not replay ticks.
pub const MAX_FRAME_CATCHUP_S: f32 = 0.25;

pub const DEFAULT_SPEED_MPS: f32 = 25.0;
pub const DEFAULT_ANGLE_DEG: f32 = 45.0;
pub const MAX_SLIDER_SPEED_MPS: f32 = 150.0;
pub const SLIDER_RESOLUTION: f32 = 0.01;

pub const BALL_RADIUS_PX: f32 = 4.0;
pub const ARROW_PX_PER_MPS: f32 = 3.0;

pub const CANVAS_BG: Color = Color::new(0.07, 0.07, 0.07, 1.0);
pub const TELEMETRY_BG: Color = Color::new(0.145, 0.145, 0.149, 1.0);
pub const GROUND_COLOR: Color = Color::new(0.27, 0.27, 0.27, 1.0);
pub const TRACE_COLOR: Color = Color::new(0.0, 0.478, 0.8, 1.0);
pub const TELEMETRY_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const COMPLETE_COLOR: Color = Color::new(1.0, 1.0, 0.0, 1.0);
pub const VECTOR_COLOR: Color = Color::new(1.0, 0.2, 0.2, 1.0);
