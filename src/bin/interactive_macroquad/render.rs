use macroquad::prelude::*;
use parabolic_batch::chart::arrow_segments;
use parabolic_batch::core::animation::FrameState;
use parabolic_batch::core::query::VectorQueryResult;
use parabolic_batch::core::window::ViewportScale;

use crate::constants::{
    ARROW_PX_PER_MPS, BALL_RADIUS_PX, GROUND_COLOR, TRACE_COLOR, VECTOR_COLOR,
};

fn to_screen(scale: &ViewportScale, x_m: f64, y_m: f64) -> Vec2 {
    let (px, py) = scale.to_pixel(x_m, y_m);
    vec2(px as f32, py as f32)
}

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn draw_ground(scale: &ViewportScale, canvas_w: f32) {
    let y = scale.ground_y() as f32;
    draw_line(0.0, y, canvas_w, y, 1.0, GROUND_COLOR);
}

/// Trace segments between consecutive rendered ticks.
pub(crate) fn draw_trace(trace: &[(f64, f64)], scale: &ViewportScale) {
    for pair in trace.windows(2) {
        let a = to_screen(scale, pair[0].0, pair[0].1);
        let b = to_screen(scale, pair[1].0, pair[1].1);
        draw_line(a.x, a.y, b.x, b.y, 2.0, TRACE_COLOR);
    }
}

pub(crate) fn draw_ball(frame: &FrameState, scale: &ViewportScale) {
    let p = to_screen(scale, frame.x, frame.y);
    draw_circle(p.x, p.y, BALL_RADIUS_PX, WHITE);
}

pub(crate) fn draw_vector_arrow(hit: &VectorQueryResult, scale: &ViewportScale) {
    let tail = to_screen(scale, hit.point.x, hit.point.y);
    // Screen y grows downward.
    let tip = vec2(
        tail.x + hit.vector.vx as f32 * ARROW_PX_PER_MPS,
        tail.y - hit.vector.vy as f32 * ARROW_PX_PER_MPS,
    );

    for segment in arrow_segments(
        (f64::from(tail.x), f64::from(tail.y)),
        (f64::from(tip.x), f64::from(tip.y)),
    ) {
        for pair in segment.windows(2) {
            draw_line(
                pair[0].0 as f32,
                pair[0].1 as f32,
                pair[1].0 as f32,
                pair[1].1 as f32,
                2.5,
                VECTOR_COLOR,
            );
        }
    }
    draw_circle(tail.x, tail.y, 3.0, VECTOR_COLOR);
}
