use serde::{Deserialize, Serialize};

use crate::core::{ContentOffsets, Viewport, XAxis, YAxis, ZoomLimits};
use crate::error::{ChartError, ChartResult};

/// Public chart bootstrap configuration.
///
/// Serializable so host applications can persist and load chart setup as JSON
/// without inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub offsets: ContentOffsets,
    #[serde(default = "default_max_visible_count")]
    pub max_visible_count: usize,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_accessibility_header")]
    pub accessibility_header: bool,
    #[serde(default)]
    pub x_axis: XAxis,
    #[serde(default)]
    pub left_axis: YAxis,
    #[serde(default)]
    pub right_axis: YAxis,
    #[serde(default)]
    pub zoom_limits: ZoomLimits,
    #[serde(default = "default_max_highlight_distance_px")]
    pub max_highlight_distance_px: f64,
}

impl ChartConfig {
    /// Creates a config with default axes and offsets.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            offsets: ContentOffsets::default(),
            max_visible_count: default_max_visible_count(),
            description: None,
            accessibility_header: default_accessibility_header(),
            x_axis: XAxis::default(),
            left_axis: YAxis::default(),
            right_axis: YAxis::default(),
            zoom_limits: ZoomLimits::default(),
            max_highlight_distance_px: default_max_highlight_distance_px(),
        }
    }

    #[must_use]
    pub fn with_offsets(mut self, offsets: ContentOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_max_visible_count(mut self, count: usize) -> Self {
        self.max_visible_count = count;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: XAxis) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_left_axis(mut self, axis: YAxis) -> Self {
        self.left_axis = axis;
        self
    }

    #[must_use]
    pub fn with_right_axis(mut self, axis: YAxis) -> Self {
        self.right_axis = axis;
        self
    }

    #[must_use]
    pub fn with_accessibility_header(mut self, enabled: bool) -> Self {
        self.accessibility_header = enabled;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for (name, value) in [
            ("left", self.offsets.left),
            ("top", self.offsets.top),
            ("right", self.offsets.right),
            ("bottom", self.offsets.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} offset must be finite and >= 0"
                )));
            }
        }
        for (name, axis) in [("left", &self.left_axis), ("right", &self.right_axis)] {
            if !axis.space_top_percent.is_finite()
                || !axis.space_bottom_percent.is_finite()
                || axis.space_top_percent < 0.0
                || axis.space_bottom_percent < 0.0
            {
                return Err(ChartError::InvalidData(format!(
                    "{name} axis space percentages must be finite and >= 0"
                )));
            }
        }
        if !self.max_highlight_distance_px.is_finite() || self.max_highlight_distance_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "max highlight distance must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn default_max_visible_count() -> usize {
    100
}

fn default_accessibility_header() -> bool {
    true
}

fn default_max_highlight_distance_px() -> f64 {
    500.0
}

#[cfg(test)]
mod tests {
    use super::ChartConfig;
    use crate::core::Viewport;

    #[test]
    fn minimal_json_fills_defaults() {
        let config =
            ChartConfig::from_json_str(r#"{"viewport":{"width":320,"height":240}}"#).expect("config");
        assert_eq!(config, ChartConfig::new(Viewport::new(320, 240)));
    }

    #[test]
    fn json_round_trip_keeps_overrides() {
        let config = ChartConfig::new(Viewport::new(640, 480))
            .with_description("BTC/USD")
            .with_max_visible_count(40);
        let json = config.to_json_string().expect("serialize");
        let parsed = ChartConfig::from_json_str(&json).expect("parse");
        assert_eq!(parsed.description.as_deref(), Some("BTC/USD"));
        assert_eq!(parsed.max_visible_count, 40);
    }

    #[test]
    fn invalid_json_and_viewport_are_rejected() {
        assert!(ChartConfig::from_json_str("{").is_err());
        assert!(ChartConfig::from_json_str(r#"{"viewport":{"width":0,"height":240}}"#).is_err());
    }
}
