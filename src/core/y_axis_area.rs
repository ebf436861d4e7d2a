use serde::{Deserialize, Serialize};

use crate::core::AxisDependency;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Horizontal band spanning the content width between two Y values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YAxisArea {
    pub start_y: f64,
    pub end_y: f64,
    #[serde(default)]
    pub axis: AxisDependency,
    #[serde(default = "default_area_color")]
    pub color: Color,
}

impl YAxisArea {
    pub fn new(start_y: f64, end_y: f64, axis: AxisDependency) -> ChartResult<Self> {
        let area = Self {
            start_y,
            end_y,
            axis,
            color: default_area_color(),
        };
        area.validate()?;
        Ok(area)
    }

    pub fn with_color(mut self, color: Color) -> ChartResult<Self> {
        color.validate()?;
        self.color = color;
        Ok(self)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.start_y.is_finite() || !self.end_y.is_finite() {
            return Err(ChartError::InvalidData(
                "y axis area bounds must be finite".to_owned(),
            ));
        }
        self.color.validate()
    }
}

fn default_area_color() -> Color {
    Color::from_rgb8(215, 231, 241, 0.5)
}
