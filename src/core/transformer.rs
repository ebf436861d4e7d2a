use glam::{DAffine2, DVec2};

use crate::core::{Point, Rect, ViewportHandler};
use crate::error::{ChartError, ChartResult};

/// Affine mapping from data-value space to pixel space for one axis dependency.
///
/// The full matrix is `offset * touch * value`, where `value` scales the axis
/// ranges onto the content size (flipping Y), `touch` is the viewport pan/zoom
/// and `offset` moves the origin to the content rect's bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformer {
    matrix_value_to_px: DAffine2,
    matrix_offset: DAffine2,
    value_to_pixel: DAffine2,
    pixel_to_value: DAffine2,
}

impl Default for Transformer {
    fn default() -> Self {
        Self {
            matrix_value_to_px: DAffine2::IDENTITY,
            matrix_offset: DAffine2::IDENTITY,
            value_to_pixel: DAffine2::IDENTITY,
            pixel_to_value: DAffine2::IDENTITY,
        }
    }
}

impl Transformer {
    /// Builds a transformer for the given axis window and refreshes it against
    /// the viewport's current touch matrix.
    pub fn new(
        x_min: f64,
        x_range: f64,
        y_min: f64,
        y_range: f64,
        inverted: bool,
        viewport: &ViewportHandler,
    ) -> ChartResult<Self> {
        let mut transformer = Self::default();
        transformer.prepare_matrix_value_px(x_min, x_range, y_min, y_range, viewport)?;
        transformer.prepare_matrix_offset(inverted, viewport);
        transformer.refresh(viewport);
        Ok(transformer)
    }

    pub fn prepare_matrix_value_px(
        &mut self,
        x_min: f64,
        x_range: f64,
        y_min: f64,
        y_range: f64,
        viewport: &ViewportHandler,
    ) -> ChartResult<()> {
        for (name, value) in [
            ("x_min", x_min),
            ("x_range", x_range),
            ("y_min", y_min),
            ("y_range", y_range),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!("{name} must be finite")));
            }
        }
        if x_range <= 0.0 || y_range <= 0.0 {
            return Err(ChartError::InvalidData(
                "axis ranges must be > 0".to_owned(),
            ));
        }

        let content = viewport.content_rect();
        let scale_x = content.width / x_range;
        let scale_y = content.height / y_range;
        self.matrix_value_to_px = DAffine2::from_scale(DVec2::new(scale_x, -scale_y))
            * DAffine2::from_translation(DVec2::new(-x_min, -y_min));
        Ok(())
    }

    pub fn prepare_matrix_offset(&mut self, inverted: bool, viewport: &ViewportHandler) {
        self.matrix_offset = if inverted {
            DAffine2::from_translation(DVec2::new(viewport.offset_left(), viewport.offset_top()))
                * DAffine2::from_scale(DVec2::new(1.0, -1.0))
        } else {
            DAffine2::from_translation(DVec2::new(
                viewport.offset_left(),
                viewport.chart_height() - viewport.offset_bottom(),
            ))
        };
    }

    /// Recomposes the cached matrices after a pan/zoom or resize.
    pub fn refresh(&mut self, viewport: &ViewportHandler) {
        self.value_to_pixel =
            self.matrix_offset * viewport.touch_matrix() * self.matrix_value_to_px;
        self.pixel_to_value = self.value_to_pixel.inverse();
    }

    #[must_use]
    pub fn value_to_pixel_matrix(&self) -> DAffine2 {
        self.value_to_pixel
    }

    #[must_use]
    pub fn pixel_for_values(&self, x: f64, y: f64) -> Point {
        self.value_to_pixel.transform_point2(DVec2::new(x, y)).into()
    }

    pub fn point_values_to_pixel(&self, points: &mut [Point]) {
        for point in points {
            *point = self.pixel_for_values(point.x, point.y);
        }
    }

    /// Maps a value-space rect and returns its standardized pixel bounding box.
    #[must_use]
    pub fn rect_value_to_pixel(&self, rect: Rect) -> Rect {
        let a = self.pixel_for_values(rect.x, rect.y);
        let b = self.pixel_for_values(rect.x + rect.width, rect.y + rect.height);
        Rect::from_corners(a, b)
    }

    #[must_use]
    pub fn value_for_touch_point(&self, pixel: Point) -> Point {
        self.pixel_to_value.transform_point2(pixel.into()).into()
    }
}
