use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

use crate::core::{Point, Rect, Viewport};
use crate::error::{ChartError, ChartResult};

/// Space reserved around the plotting area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentOffsets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for ContentOffsets {
    fn default() -> Self {
        Self {
            left: 10.0,
            top: 10.0,
            right: 10.0,
            bottom: 10.0,
        }
    }
}

/// Zoom bounds for the touch matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min_scale_x: f64,
    pub max_scale_x: f64,
    pub min_scale_y: f64,
    pub max_scale_y: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_scale_x: 1.0,
            max_scale_x: f64::MAX,
            min_scale_y: 1.0,
            max_scale_y: f64::MAX,
        }
    }
}

/// Chart surface geometry plus the pan/zoom state applied on top of it.
///
/// The touch matrix only ever holds a scale and a translation; translation is
/// clamped so the zoomed content never detaches from the content rect edges.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportHandler {
    chart_width: f64,
    chart_height: f64,
    content_rect: Rect,
    scale_x: f64,
    scale_y: f64,
    trans_x: f64,
    trans_y: f64,
    limits: ZoomLimits,
}

impl ViewportHandler {
    pub fn new(viewport: Viewport, offsets: ContentOffsets) -> ChartResult<Self> {
        let mut handler = Self {
            chart_width: 0.0,
            chart_height: 0.0,
            content_rect: Rect::default(),
            scale_x: 1.0,
            scale_y: 1.0,
            trans_x: 0.0,
            trans_y: 0.0,
            limits: ZoomLimits::default(),
        };
        handler.set_chart_dimens(viewport, offsets)?;
        Ok(handler)
    }

    /// Resizes the chart and recomputes the content rect.
    pub fn set_chart_dimens(&mut self, viewport: Viewport, offsets: ContentOffsets) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let content_width = width - offsets.left - offsets.right;
        let content_height = height - offsets.top - offsets.bottom;
        if !(content_width > 0.0 && content_height > 0.0) {
            return Err(ChartError::InvalidData(format!(
                "content offsets leave no drawing area ({content_width}x{content_height})"
            )));
        }

        self.chart_width = width;
        self.chart_height = height;
        self.content_rect = Rect::new(offsets.left, offsets.top, content_width, content_height);
        self.limit_transform();
        Ok(())
    }

    pub fn set_zoom_limits(&mut self, limits: ZoomLimits) -> ChartResult<()> {
        if !(limits.min_scale_x > 0.0
            && limits.min_scale_y > 0.0
            && limits.min_scale_x <= limits.max_scale_x
            && limits.min_scale_y <= limits.max_scale_y)
        {
            return Err(ChartError::InvalidData(
                "zoom limits must be > 0 with min <= max".to_owned(),
            ));
        }
        self.limits = limits;
        self.limit_transform();
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        // Dimensions come from a validated `Viewport`, so the casts are exact.
        Viewport::new(self.chart_width as u32, self.chart_height as u32)
    }

    /// Offsets recovered from the content rect.
    #[must_use]
    pub fn offsets(&self) -> ContentOffsets {
        ContentOffsets {
            left: self.content_rect.x,
            top: self.content_rect.y,
            right: self.chart_width - self.content_rect.max_x(),
            bottom: self.chart_height - self.content_rect.max_y(),
        }
    }

    #[must_use]
    pub fn chart_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.chart_width, self.chart_height)
    }

    #[must_use]
    pub fn content_rect(&self) -> Rect {
        self.content_rect
    }

    #[must_use]
    pub fn content_left(&self) -> f64 {
        self.content_rect.x
    }

    #[must_use]
    pub fn content_right(&self) -> f64 {
        self.content_rect.max_x()
    }

    #[must_use]
    pub fn content_top(&self) -> f64 {
        self.content_rect.y
    }

    #[must_use]
    pub fn content_bottom(&self) -> f64 {
        self.content_rect.max_y()
    }

    #[must_use]
    pub fn offset_left(&self) -> f64 {
        self.content_rect.x
    }

    #[must_use]
    pub fn offset_top(&self) -> f64 {
        self.content_rect.y
    }

    #[must_use]
    pub fn offset_bottom(&self) -> f64 {
        self.chart_height - self.content_rect.max_y()
    }

    #[must_use]
    pub fn chart_height(&self) -> f64 {
        self.chart_height
    }

    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    #[must_use]
    pub fn trans_x(&self) -> f64 {
        self.trans_x
    }

    #[must_use]
    pub fn trans_y(&self) -> f64 {
        self.trans_y
    }

    /// Pan/zoom matrix applied between the value matrix and the offset matrix.
    #[must_use]
    pub fn touch_matrix(&self) -> DAffine2 {
        DAffine2::from_translation(DVec2::new(self.trans_x, self.trans_y))
            * DAffine2::from_scale(DVec2::new(self.scale_x, self.scale_y))
    }

    /// Multiplies the current zoom by `(factor_x, factor_y)` keeping the
    /// content-relative `center` fixed.
    pub fn zoom(&mut self, factor_x: f64, factor_y: f64, center: Point) {
        if !(factor_x.is_finite() && factor_y.is_finite() && factor_x > 0.0 && factor_y > 0.0) {
            tracing::warn!(factor_x, factor_y, "ignoring non-positive zoom factor");
            return;
        }
        let local_x = center.x - self.content_left();
        let local_y = center.y - self.content_bottom();
        let new_scale_x = (self.scale_x * factor_x).clamp(self.limits.min_scale_x, self.limits.max_scale_x);
        let new_scale_y = (self.scale_y * factor_y).clamp(self.limits.min_scale_y, self.limits.max_scale_y);
        let applied_x = new_scale_x / self.scale_x;
        let applied_y = new_scale_y / self.scale_y;

        self.trans_x = local_x - (local_x - self.trans_x) * applied_x;
        self.trans_y = local_y - (local_y - self.trans_y) * applied_y;
        self.scale_x = new_scale_x;
        self.scale_y = new_scale_y;
        self.limit_transform();
    }

    /// Pans the content by a pixel delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            tracing::warn!(dx, dy, "ignoring non-finite pan delta");
            return;
        }
        self.trans_x += dx;
        self.trans_y += dy;
        self.limit_transform();
    }

    pub fn reset_zoom(&mut self) {
        self.scale_x = 1.0;
        self.scale_y = 1.0;
        self.trans_x = 0.0;
        self.trans_y = 0.0;
        self.limit_transform();
    }

    fn limit_transform(&mut self) {
        self.scale_x = self.scale_x.clamp(self.limits.min_scale_x, self.limits.max_scale_x);
        self.scale_y = self.scale_y.clamp(self.limits.min_scale_y, self.limits.max_scale_y);

        let width = self.content_rect.width;
        let height = self.content_rect.height;
        let max_trans_x = 0.0;
        let min_trans_x = -width * (self.scale_x - 1.0);
        self.trans_x = self.trans_x.clamp(min_trans_x.min(max_trans_x), max_trans_x);
        let min_trans_y = 0.0;
        let max_trans_y = height * (self.scale_y - 1.0);
        self.trans_y = self.trans_y.clamp(min_trans_y, max_trans_y.max(min_trans_y));
    }

    #[must_use]
    pub fn is_in_bounds_left(&self, x: f64) -> bool {
        self.content_rect.x <= x + 1.0
    }

    #[must_use]
    pub fn is_in_bounds_right(&self, x: f64) -> bool {
        let x = (x * 100.0).floor() / 100.0;
        self.content_rect.max_x() >= x - 1.0
    }

    #[must_use]
    pub fn is_in_bounds_top(&self, y: f64) -> bool {
        self.content_rect.y <= y
    }

    #[must_use]
    pub fn is_in_bounds_bottom(&self, y: f64) -> bool {
        let y = (y * 100.0).floor() / 100.0;
        self.content_rect.max_y() >= y
    }

    #[must_use]
    pub fn is_in_bounds_x(&self, x: f64) -> bool {
        self.is_in_bounds_left(x) && self.is_in_bounds_right(x)
    }

    #[must_use]
    pub fn is_in_bounds_y(&self, y: f64) -> bool {
        self.is_in_bounds_top(y) && self.is_in_bounds_bottom(y)
    }

    #[must_use]
    pub fn is_in_bounds(&self, point: Point) -> bool {
        self.is_in_bounds_x(point.x) && self.is_in_bounds_y(point.y)
    }
}
