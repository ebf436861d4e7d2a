use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Icon, Point, Rect};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 0..=255 channels and a normalized alpha.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Dash pattern for stroked lines. Empty `lengths` strokes a solid line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashPattern {
    pub phase: f64,
    pub lengths: SmallVec<[f64; 4]>,
}

impl DashPattern {
    #[must_use]
    pub fn new(phase: f64, lengths: &[f64]) -> Self {
        Self {
            phase,
            lengths: SmallVec::from_slice(lengths),
        }
    }

    #[must_use]
    pub fn is_solid(&self) -> bool {
        self.lengths.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.phase.is_finite() {
            return Err(ChartError::InvalidData(
                "dash phase must be finite".to_owned(),
            ));
        }
        if self
            .lengths
            .iter()
            .any(|length| !length.is_finite() || *length < 0.0)
        {
            return Err(ChartError::InvalidData(
                "dash lengths must be finite and >= 0".to_owned(),
            ));
        }
        if !self.lengths.is_empty() && self.lengths.iter().sum::<f64>() <= 0.0 {
            return Err(ChartError::InvalidData(
                "dash lengths must not all be zero".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub dash: DashPattern,
}

impl LinePrimitive {
    #[must_use]
    pub fn new(from: Point, to: Point, stroke_width: f64, color: Color) -> Self {
        Self {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            stroke_width,
            color,
            dash: DashPattern::default(),
        }
    }

    #[must_use]
    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.dash.validate()?;
        self.color.validate()
    }
}

/// Filled rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub fill_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(rect: Rect, fill_color: Color) -> Self {
        Self {
            rect: rect.standardized(),
            fill_color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.rect.is_finite() || self.rect.width < 0.0 || self.rect.height < 0.0 {
            return Err(ChartError::InvalidData(
                "rect geometry must be finite with non-negative extents".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Ellipse inscribed in `bounds`, filled and/or stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsePrimitive {
    pub bounds: Rect,
    pub fill_color: Option<Color>,
    pub stroke_color: Option<Color>,
    pub stroke_width: f64,
}

impl EllipsePrimitive {
    #[must_use]
    pub fn fill_stroke(bounds: Rect, color: Color, stroke_width: f64) -> Self {
        Self {
            bounds: bounds.standardized(),
            fill_color: Some(color),
            stroke_color: Some(color),
            stroke_width,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.bounds.is_finite() {
            return Err(ChartError::InvalidData(
                "ellipse bounds must be finite".to_owned(),
            ));
        }
        if self.fill_color.is_none() && self.stroke_color.is_none() {
            return Err(ChartError::InvalidData(
                "ellipse needs a fill or a stroke color".to_owned(),
            ));
        }
        if self.stroke_color.is_some()
            && (!self.stroke_width.is_finite() || self.stroke_width <= 0.0)
        {
            return Err(ChartError::InvalidData(
                "ellipse stroke width must be finite and > 0".to_owned(),
            ));
        }
        for color in self.fill_color.into_iter().chain(self.stroke_color) {
            color.validate()?;
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space. `y` is the top of the text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Icon drawn centered on `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePrimitive {
    pub icon: Icon,
    pub center: Point,
}

impl ImagePrimitive {
    #[must_use]
    pub fn new(icon: Icon, center: Point) -> Self {
        Self { icon, center }
    }

    /// Destination rectangle of the image in pixel space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.icon.width / 2.0,
            self.center.y - self.icon.height / 2.0,
            self.icon.width,
            self.icon.height,
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        let bounds = self.bounds();
        if !bounds.is_finite() || bounds.width <= 0.0 || bounds.height <= 0.0 {
            return Err(ChartError::InvalidData(
                "image must have finite, positive size".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DashPattern;

    #[test]
    fn dash_pattern_needs_a_visible_segment() {
        assert!(DashPattern::default().validate().is_ok());
        assert!(DashPattern::new(0.0, &[4.0, 0.0]).validate().is_ok());
        assert!(DashPattern::new(0.0, &[0.0, 0.0]).validate().is_err());
        assert!(DashPattern::new(0.0, &[-1.0, 2.0]).validate().is_err());
    }
}
