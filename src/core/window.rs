use crate::core::error::ProjectileError;

/// Extents below one meter are treated as one meter so a flat or
/// stationary launch does not blow the scale up.
pub const MIN_EXTENT_M: f64 = 1.0;
pub const DEFAULT_MARGIN_PX: f64 = 60.0;

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub x: f64,
    pub y: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            x: DEFAULT_MARGIN_PX,
            y: DEFAULT_MARGIN_PX,
        }
    }
}

/// Uniform pixels-per-meter mapping into a viewport whose origin is the
/// top-left corner. Ground level sits `margin_y` pixels above the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportScale {
    pub pixels_per_meter: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub viewport_height: f64,
}

impl ViewportScale {
    pub fn fit(
        max_range_m: f64,
        max_height_m: f64,
        viewport: Viewport,
        margins: Margins,
    ) -> Result<Self, ProjectileError> {
        let scale_x = (viewport.width - 2.0 * margins.x) / max_range_m.max(MIN_EXTENT_M);
        let scale_y = (viewport.height - 2.0 * margins.y) / max_height_m.max(MIN_EXTENT_M);
        let scale = scale_x.min(scale_y);

        if !scale.is_finite() || scale <= 0.0 {
            return Err(ProjectileError::ViewportTooSmall {
                width: viewport.width,
                height: viewport.height,
            });
        }

        Ok(Self {
            pixels_per_meter: scale,
            margin_x: margins.x,
            margin_y: margins.y,
            viewport_height: viewport.height,
        })
    }

    pub fn ground_y(&self) -> f64 {
        self.viewport_height - self.margin_y
    }

    pub fn to_pixel(&self, x_m: f64, y_m: f64) -> (f64, f64) {
        (
            self.margin_x + x_m * self.pixels_per_meter,
            self.ground_y() - y_m * self.pixels_per_meter,
        )
    }

    pub fn to_physical(&self, px: f64, py: f64) -> (f64, f64) {
        (
            (px - self.margin_x) / self.pixels_per_meter,
            (self.ground_y() - py) / self.pixels_per_meter,
        )
    }
}

/// Padded `(x_span, y_span)` data window for a chart whose plotting area has
/// the given width/height ratio, widened on one axis so meters keep the
/// same length on both.
pub fn proportional_axis_window(raw_max_x: f64, raw_max_y: f64, width_to_height: f64) -> (f64, f64) {
    let raw_x_span = raw_max_x.max(MIN_EXTENT_M);
    let raw_y_span = raw_max_y.max(MIN_EXTENT_M);
    let x_pad = raw_x_span * X_PADDING_RATIO;
    let y_pad = raw_y_span * Y_PADDING_RATIO;

    let mut x_span = (raw_max_x + x_pad).max(MIN_EXTENT_M);
    let mut y_span = (raw_max_y + y_pad).max(MIN_EXTENT_M);
    let ratio = if width_to_height.is_finite() && width_to_height > 0.0 {
        width_to_height
    } else {
        1.0
    };

    if x_span / y_span < ratio {
        x_span = y_span * ratio;
    } else {
        y_span = x_span / ratio;
    }

    (x_span, y_span)
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

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn picks_the_tighter_axis() {
        let scale = ViewportScale::fit(100.0, 50.0, VIEWPORT, Margins::default())
            .expect("viewport should fit");
        // x: 680 / 100 = 6.8, y: 480 / 50 = 9.6
        assert_close(scale.pixels_per_meter, 6.8, 1e-12);
    }

    #[test]
    fn floors_tiny_extents_at_one_meter() {
        let scale = ViewportScale::fit(0.0, 0.0, VIEWPORT, Margins::default())
            .expect("viewport should fit");
        assert_close(scale.pixels_per_meter, 480.0, 1e-12);
    }

    #[test]
    fn maps_ground_origin_to_bottom_left_margin() {
        let scale = ViewportScale::fit(100.0, 50.0, VIEWPORT, Margins::default())
            .expect("viewport should fit");

        assert_eq!(scale.to_pixel(0.0, 0.0), (60.0, 540.0));
        let (px, py) = scale.to_pixel(100.0, 10.0);
        assert_close(px, 740.0, 1e-9);
        assert_close(py, 472.0, 1e-9);
    }

    #[test]
    fn pixel_mapping_inverts() {
        let scale = ViewportScale::fit(73.0, 21.0, VIEWPORT, Margins { x: 40.0, y: 25.0 })
            .expect("viewport should fit");
        let (px, py) = scale.to_pixel(12.5, 4.0);
        let (x, y) = scale.to_physical(px, py);

        assert_close(x, 12.5, 1e-9);
        assert_close(y, 4.0, 1e-9);
    }

    #[test]
    fn rejects_viewport_smaller_than_its_margins() {
        let err = ViewportScale::fit(
            10.0,
            10.0,
            Viewport {
                width: 100.0,
                height: 600.0,
            },
            Margins::default(),
        )
        .expect_err("viewport should not fit");
        assert!(matches!(err, ProjectileError::ViewportTooSmall { .. }));
    }

    #[test]
    fn axis_window_keeps_requested_ratio() {
        let (x_span, y_span) = proportional_axis_window(100.0, 50.0, 2.0);
        assert_close(x_span / y_span, 2.0, 1e-12);
        assert!(x_span >= 106.0);
        assert!(y_span >= 55.0);

        let (flat_x, flat_y) = proportional_axis_window(0.0, 0.0, 1.5);
        assert_close(flat_x, 1.5, 1e-12);
        assert_close(flat_y, 1.0, 1e-12);
    }
}
