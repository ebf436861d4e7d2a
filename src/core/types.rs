use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Chart surface size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A 2D point, used for both value space and pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        DVec2::from(self).distance(DVec2::from(other))
    }

    #[must_use]
    pub fn offset_by(self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }
}

impl From<DVec2> for Point {
    fn from(value: DVec2) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for DVec2 {
    fn from(value: Point) -> Self {
        DVec2::new(value.x, value.y)
    }
}

/// Axis-aligned rectangle. `width`/`height` may be negative until
/// [`Rect::standardized`] is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the bounding rectangle of two opposite corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self::new(left, top, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    #[must_use]
    pub fn standardized(self) -> Self {
        Self::from_corners(
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y + self.height),
        )
    }

    #[must_use]
    pub fn min_x(self) -> f64 {
        self.x.min(self.x + self.width)
    }

    #[must_use]
    pub fn max_x(self) -> f64 {
        self.x.max(self.x + self.width)
    }

    #[must_use]
    pub fn min_y(self) -> f64 {
        self.y.min(self.y + self.height)
    }

    #[must_use]
    pub fn max_y(self) -> f64 {
        self.y.max(self.y + self.height)
    }

    #[must_use]
    pub fn mid_x(self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn mid_y(self) -> f64 {
        self.y + self.height / 2.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    /// Square of side `size` centered on `center`.
    #[must_use]
    pub fn centered_square(center: Point, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn standardized_flips_negative_extents() {
        let rect = Rect::new(10.0, 20.0, -4.0, -6.0).standardized();
        assert_eq!(rect, Rect::new(6.0, 14.0, 4.0, 6.0));
    }

    #[test]
    fn centered_square_is_symmetric_around_center() {
        let rect = Rect::centered_square(Point::new(5.0, 5.0), 4.0);
        assert_eq!(rect.mid_x(), 5.0);
        assert_eq!(rect.mid_y(), 5.0);
        assert_eq!(rect.width, 4.0);
    }
}
