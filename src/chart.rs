//! Static chart of a whole batch: one smooth curve per launch, the winner
//! flagged in the legend, and optionally an inspected velocity vector.

use std::error::Error;
use std::path::Path;

use chrono::Local;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::core::batch::BatchResult;
use crate::core::query::VectorQueryResult;
use crate::core::window::proportional_axis_window;
use crate::report::display_id;

pub const CHART_SIZE: (u32, u32) = (1200, 700);

/// Meters of arrow per m/s of velocity.
pub const VECTOR_ARROW_SCALE: f64 = 1.0 / 15.0;
const ARROW_HEAD_RATIO: f64 = 0.2;
const ARROW_HEAD_ANGLE_RAD: f64 = 0.45;

/// Shaft and both head strokes of an arrow from `tail` to `tip`.
pub fn arrow_segments(tail: (f64, f64), tip: (f64, f64)) -> Vec<Vec<(f64, f64)>> {
    let dx = tip.0 - tail.0;
    let dy = tip.1 - tail.1;
    let length = (dx * dx + dy * dy).sqrt();
    let mut segments = vec![vec![tail, tip]];
    if length <= f64::EPSILON {
        return segments;
    }

    let heading = dy.atan2(dx);
    let head_len = length * ARROW_HEAD_RATIO;
    for side in [-1.0, 1.0] {
        let angle = heading + std::f64::consts::PI + side * ARROW_HEAD_ANGLE_RAD;
        segments.push(vec![
            tip,
            (tip.0 + head_len * angle.cos(), tip.1 + head_len * angle.sin()),
        ]);
    }
    segments
}

pub fn render_batch_chart(
    result: &BatchResult,
    path: &Path,
    vector: Option<&VectorQueryResult>,
) -> Result<(), Box<dyn Error>> {
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
        draw_batch(&root, result, vector)?;
        root.present()?;
    } else {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        draw_batch(&root, result, vector)?;
        root.present()?;
    }

    info!(path = %path.display(), "rendered trajectory chart");
    Ok(())
}

fn draw_batch<DB>(
    root: &DrawingArea<DB, Shift>,
    result: &BatchResult,
    vector: Option<&VectorQueryResult>,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (max_range_m, max_height_m) = result.max_extents();
    let (width, height) = CHART_SIZE;
    let (x_span, y_span) =
        proportional_axis_window(max_range_m, max_height_m, f64::from(width) / f64::from(height));
    let caption = format!(
        "Projectile trajectories ({})",
        Local::now().format("%Y-%m-%d %H:%M")
    );

    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 26))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..x_span, 0.0..y_span)?;

    chart
        .configure_mesh()
        .x_desc("Horizontal distance (m)")
        .y_desc("Height (m)")
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(LineSeries::new(
        vec![(0.0, 0.0), (x_span, 0.0)],
        BLACK.stroke_width(2),
    ))?;

    for (idx, trajectory) in result.trajectories.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let points = trajectory
            .dense_samples(&result.config)
            .into_iter()
            .map(|s| (s.x, s.y.max(0.0)));
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(display_id(trajectory, result.is_winner(idx)))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if let Some(hit) = vector {
        let tail = (hit.point.x, hit.point.y);
        let tip = (
            tail.0 + hit.vector.vx * VECTOR_ARROW_SCALE,
            tail.1 + hit.vector.vy * VECTOR_ARROW_SCALE,
        );
        chart
            .draw_series(
                arrow_segments(tail, tip)
                    .into_iter()
                    .map(|segment| PathElement::new(segment, RED.stroke_width(2))),
            )?
            .label(format!("v = {:.2} m/s", hit.vector.magnitude))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_head_strokes_start_at_the_tip() {
        let segments = arrow_segments((0.0, 0.0), (10.0, 0.0));

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], vec![(0.0, 0.0), (10.0, 0.0)]);
        for head in &segments[1..] {
            assert_eq!(head[0], (10.0, 0.0));
            assert!(head[1].0 < 10.0);
        }
        assert!(segments[1][1].1 * segments[2][1].1 < 0.0);
    }

    #[test]
    fn zero_length_arrow_is_a_single_stroke() {
        assert_eq!(arrow_segments((3.0, 4.0), (3.0, 4.0)).len(), 1);
    }
}
