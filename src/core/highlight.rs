use serde::{Deserialize, Serialize};

use crate::core::{AxisDependency, Point};

/// A selected data point marked for a cross-hair overlay.
///
/// `draw_point` is filled in by the highlight pass with the pixel position the
/// cross-hair was drawn at, so hosts can anchor tooltips to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub x: f64,
    pub y: f64,
    pub data_set_index: usize,
    pub axis: AxisDependency,
    #[serde(default)]
    draw_point: Option<Point>,
}

impl Highlight {
    #[must_use]
    pub fn new(x: f64, y: f64, data_set_index: usize, axis: AxisDependency) -> Self {
        Self {
            x,
            y,
            data_set_index,
            axis,
            draw_point: None,
        }
    }

    #[must_use]
    pub fn draw_point(&self) -> Option<Point> {
        self.draw_point
    }

    pub fn set_draw_point(&mut self, point: Point) {
        self.draw_point = Some(point);
    }

    /// Same selection, ignoring the cached pixel point.
    #[must_use]
    pub fn is_same_selection(&self, other: &Highlight) -> bool {
        self.data_set_index == other.data_set_index && self.x == other.x && self.y == other.y
    }
}
