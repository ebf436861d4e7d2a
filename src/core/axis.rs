use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Horizontal axis window derived from the data's x extent.
///
/// Candles occupy one x unit centered on their x, so the window is widened by
/// half a unit on both sides before `space_min`/`space_max` are added.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XAxis {
    pub space_min: f64,
    pub space_max: f64,
    pub custom_min: Option<f64>,
    pub custom_max: Option<f64>,
    #[serde(skip)]
    axis_minimum: f64,
    #[serde(skip)]
    axis_maximum: f64,
}

impl Default for XAxis {
    fn default() -> Self {
        Self {
            space_min: 0.0,
            space_max: 0.0,
            custom_min: None,
            custom_max: None,
            axis_minimum: 0.0,
            axis_maximum: 1.0,
        }
    }
}

impl XAxis {
    #[must_use]
    pub fn with_space(mut self, space_min: f64, space_max: f64) -> Self {
        self.space_min = space_min;
        self.space_max = space_max;
        self
    }

    /// Fixes either end of the window instead of deriving it from the data.
    #[must_use]
    pub fn with_custom_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.custom_min = min;
        self.custom_max = max;
        self
    }

    pub fn calculate(&mut self, data_min: f64, data_max: f64) -> ChartResult<()> {
        let mut min = self.custom_min.unwrap_or(data_min - 0.5 - self.space_min);
        let mut max = self.custom_max.unwrap_or(data_max + 0.5 + self.space_max);
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "x axis bounds must be finite".to_owned(),
            ));
        }
        if max - min <= 0.0 {
            min -= 1.0;
            max += 1.0;
        }
        self.axis_minimum = min;
        self.axis_maximum = max;
        Ok(())
    }

    #[must_use]
    pub fn axis_minimum(&self) -> f64 {
        self.axis_minimum
    }

    #[must_use]
    pub fn axis_maximum(&self) -> f64 {
        self.axis_maximum
    }

    #[must_use]
    pub fn axis_range(&self) -> f64 {
        self.axis_maximum - self.axis_minimum
    }
}

/// Vertical axis window with percentage headroom and optional inversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YAxis {
    pub enabled: bool,
    pub inverted: bool,
    /// Headroom above the data, as a percentage of the data range.
    pub space_top_percent: f64,
    /// Headroom below the data, as a percentage of the data range.
    pub space_bottom_percent: f64,
    pub custom_min: Option<f64>,
    pub custom_max: Option<f64>,
    #[serde(skip)]
    axis_minimum: f64,
    #[serde(skip)]
    axis_maximum: f64,
}

impl Default for YAxis {
    fn default() -> Self {
        Self {
            enabled: true,
            inverted: false,
            space_top_percent: 10.0,
            space_bottom_percent: 10.0,
            custom_min: None,
            custom_max: None,
            axis_minimum: 0.0,
            axis_maximum: 1.0,
        }
    }
}

impl YAxis {
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    #[must_use]
    pub fn with_space_percent(mut self, top: f64, bottom: f64) -> Self {
        self.space_top_percent = top;
        self.space_bottom_percent = bottom;
        self
    }

    #[must_use]
    pub fn with_custom_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.custom_min = min;
        self.custom_max = max;
        self
    }

    pub fn calculate(&mut self, data_min: f64, data_max: f64) -> ChartResult<()> {
        let mut min = self.custom_min.unwrap_or(data_min);
        let mut max = self.custom_max.unwrap_or(data_max);
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "y axis bounds must be finite".to_owned(),
            ));
        }

        if (max - min).abs() == 0.0 {
            max += 1.0;
            min -= 1.0;
        }

        let range = (max - min).abs();
        if self.custom_min.is_none() {
            min -= range / 100.0 * self.space_bottom_percent;
        }
        if self.custom_max.is_none() {
            max += range / 100.0 * self.space_top_percent;
        }
        if max <= min {
            return Err(ChartError::InvalidData(format!(
                "y axis maximum ({max}) must exceed minimum ({min})"
            )));
        }

        self.axis_minimum = min;
        self.axis_maximum = max;
        Ok(())
    }

    #[must_use]
    pub fn axis_minimum(&self) -> f64 {
        self.axis_minimum
    }

    #[must_use]
    pub fn axis_maximum(&self) -> f64 {
        self.axis_maximum
    }

    #[must_use]
    pub fn axis_range(&self) -> f64 {
        self.axis_maximum - self.axis_minimum
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{XAxis, YAxis};

    #[test]
    fn x_axis_pads_half_a_candle() {
        let mut axis = XAxis::default();
        axis.calculate(0.0, 2.0).expect("x axis");
        assert_relative_eq!(axis.axis_minimum(), -0.5);
        assert_relative_eq!(axis.axis_maximum(), 2.5);
        assert_relative_eq!(axis.axis_range(), 3.0);
    }

    #[test]
    fn y_axis_adds_percentage_headroom() {
        let mut axis = YAxis::default();
        axis.calculate(8.0, 12.0).expect("y axis");
        assert_relative_eq!(axis.axis_minimum(), 7.6);
        assert_relative_eq!(axis.axis_maximum(), 12.4);
    }

    #[test]
    fn y_axis_custom_bounds_skip_headroom() {
        let mut axis = YAxis {
            custom_min: Some(0.0),
            custom_max: Some(20.0),
            ..YAxis::default()
        };
        axis.calculate(8.0, 12.0).expect("y axis");
        assert_eq!(axis.axis_minimum(), 0.0);
        assert_eq!(axis.axis_maximum(), 20.0);
    }

    #[test]
    fn flat_data_gets_unit_span() {
        let mut axis = YAxis {
            space_top_percent: 0.0,
            space_bottom_percent: 0.0,
            ..YAxis::default()
        };
        axis.calculate(5.0, 5.0).expect("y axis");
        assert_eq!(axis.axis_minimum(), 4.0);
        assert_eq!(axis.axis_maximum(), 6.0);
    }

    #[test]
    fn builders_set_config_fields() {
        let axis = YAxis::default()
            .with_inverted(true)
            .with_space_percent(0.0, 5.0)
            .with_custom_bounds(Some(1.0), None);
        assert!(axis.inverted);
        assert_eq!(axis.space_top_percent, 0.0);
        assert_eq!(axis.space_bottom_percent, 5.0);
        assert_eq!(axis.custom_min, Some(1.0));

        let mut x_axis = XAxis::default()
            .with_space(1.0, 2.0)
            .with_custom_bounds(None, Some(10.0));
        x_axis.calculate(0.0, 4.0).expect("x axis");
        assert_relative_eq!(x_axis.axis_minimum(), -1.5);
        assert_eq!(x_axis.axis_maximum(), 10.0);
    }

    #[test]
    fn inconsistent_custom_bounds_are_rejected() {
        let mut axis = YAxis {
            custom_min: Some(10.0),
            custom_max: Some(2.0),
            ..YAxis::default()
        };
        assert!(axis.calculate(0.0, 1.0).is_err());
    }
}
