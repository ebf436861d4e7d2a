use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{CandleDirection, CandleEntry, DefaultValueFormatter, Point, ValueFormatter};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DashPattern};

const DEFAULT_SERIES_COLOR: Color = Color::rgb(140.0 / 255.0, 234.0 / 255.0, 1.0);
const DEFAULT_HIGHLIGHT_COLOR: Color = Color::rgb(1.0, 187.0 / 255.0, 115.0 / 255.0);
const MAX_BAR_SPACE: f64 = 0.45;

/// Which Y axis (and therefore which transformer) a data set is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisDependency {
    #[default]
    Left,
    Right,
}

/// How an x lookup resolves when no entry sits exactly on the requested x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Up,
    Down,
    Closest,
}

/// Candle geometry and colors of one data set.
///
/// Every per-direction and marker color is optional; `None` falls back to the
/// palette color of the entry index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandleStyle {
    /// Gap on each side of a candle, as a fraction of one x unit.
    pub bar_space: f64,
    /// Body-and-marker style when `true`, open/close tick style otherwise.
    pub show_candle_bar: bool,
    /// Stroke width of tick-style lines.
    pub shadow_width: f64,
    /// Fixed body width in pixels; `None` derives it from `bar_space`.
    pub body_width_px: Option<f64>,
    pub marker_size_px: f64,
    pub marker_center_size_px: f64,
    pub marker_line_width: f64,
    pub increasing_color: Option<Color>,
    pub decreasing_color: Option<Color>,
    pub neutral_color: Option<Color>,
    pub point_color: Option<Color>,
    pub point_center_color: Option<Color>,
    pub palette: Vec<Color>,
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self {
            bar_space: 0.1,
            show_candle_bar: true,
            shadow_width: 1.5,
            body_width_px: None,
            marker_size_px: 4.0,
            marker_center_size_px: 2.0,
            marker_line_width: 2.0,
            increasing_color: None,
            decreasing_color: None,
            neutral_color: None,
            point_color: None,
            point_center_color: None,
            palette: vec![DEFAULT_SERIES_COLOR],
        }
    }
}

impl CandleStyle {
    /// Palette color for `index`, cycling through the palette.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return DEFAULT_SERIES_COLOR;
        }
        self.palette[index % self.palette.len()]
    }

    /// Explicit direction color if set, else the palette color.
    #[must_use]
    pub fn direction_color(&self, direction: CandleDirection, index: usize) -> Color {
        let explicit = match direction {
            CandleDirection::Increasing => self.increasing_color,
            CandleDirection::Decreasing => self.decreasing_color,
            CandleDirection::Neutral => self.neutral_color,
        };
        explicit.unwrap_or_else(|| self.color_at(index))
    }

    #[must_use]
    pub fn point_color_at(&self, index: usize) -> Color {
        self.point_color.unwrap_or_else(|| self.color_at(index))
    }

    #[must_use]
    pub fn point_center_color_at(&self, index: usize) -> Color {
        self.point_center_color
            .unwrap_or_else(|| self.color_at(index))
    }

    /// Copy of the style with `bar_space` clamped to `[0, 0.45]`.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        if self.bar_space.is_finite() {
            self.bar_space = self.bar_space.clamp(0.0, MAX_BAR_SPACE);
        }
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.bar_space.is_finite() {
            return Err(ChartError::InvalidData(
                "bar space must be finite".to_owned(),
            ));
        }
        for (name, value) in [
            ("shadow width", self.shadow_width),
            ("marker size", self.marker_size_px),
            ("marker center size", self.marker_center_size_px),
            ("marker line width", self.marker_line_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self
            .body_width_px
            .is_some_and(|width| !width.is_finite() || width <= 0.0)
        {
            return Err(ChartError::InvalidData(
                "body width must be finite and > 0".to_owned(),
            ));
        }
        for color in [
            self.increasing_color,
            self.decreasing_color,
            self.neutral_color,
            self.point_color,
            self.point_center_color,
        ]
        .into_iter()
        .flatten()
        .chain(self.palette.iter().copied())
        {
            color.validate()?;
        }
        Ok(())
    }
}

/// Cross-hair appearance for highlighted entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    pub enabled: bool,
    pub color: Color,
    pub line_width: f64,
    pub dash: Option<DashPattern>,
    pub draw_vertical: bool,
    pub draw_horizontal: bool,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            color: DEFAULT_HIGHLIGHT_COLOR,
            line_width: 0.5,
            dash: None,
            draw_vertical: true,
            draw_horizontal: true,
        }
    }
}

/// Font metrics used to place value labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueFont {
    pub size_px: f64,
    pub line_height_px: f64,
}

impl ValueFont {
    #[must_use]
    pub fn new(size_px: f64) -> Self {
        Self {
            size_px,
            line_height_px: (size_px * 1.2).ceil(),
        }
    }
}

impl Default for ValueFont {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// Ordered candle entries plus everything needed to draw them.
///
/// Entries are expected in ascending x order; lookups binary-search on x and
/// value culling stops at the first entry right of the viewport.
#[derive(Debug, Clone)]
pub struct CandleDataSet {
    entries: Vec<CandleEntry>,
    label: Option<String>,
    axis_dependency: AxisDependency,
    style: CandleStyle,
    highlight: HighlightStyle,
    value_formatter: Option<Arc<dyn ValueFormatter>>,
    value_font: ValueFont,
    value_colors: Vec<Color>,
    icons_offset: Point,
    visible: bool,
    draw_values_enabled: bool,
    draw_icons_enabled: bool,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl CandleDataSet {
    #[must_use]
    pub fn new(entries: Vec<CandleEntry>, label: Option<&str>) -> Self {
        let mut data_set = Self {
            entries,
            label: label.map(str::to_owned),
            axis_dependency: AxisDependency::Left,
            style: CandleStyle::default(),
            highlight: HighlightStyle::default(),
            value_formatter: Some(Arc::new(DefaultValueFormatter::default())),
            value_font: ValueFont::default(),
            value_colors: vec![Color::BLACK],
            icons_offset: Point::default(),
            visible: true,
            draw_values_enabled: true,
            draw_icons_enabled: true,
            x_min: f64::MAX,
            x_max: -f64::MAX,
            y_min: f64::MAX,
            y_max: -f64::MAX,
        };
        data_set.calc_min_max();
        data_set
    }

    #[must_use]
    pub fn with_axis_dependency(mut self, axis: AxisDependency) -> Self {
        self.axis_dependency = axis;
        self
    }

    pub fn with_style(mut self, style: CandleStyle) -> ChartResult<Self> {
        self.set_style(style)?;
        Ok(self)
    }

    pub fn with_highlight_style(mut self, highlight: HighlightStyle) -> ChartResult<Self> {
        self.set_highlight_style(highlight)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_value_formatter(mut self, formatter: Option<Arc<dyn ValueFormatter>>) -> Self {
        self.value_formatter = formatter;
        self
    }

    /// Replaces the candle style. `bar_space` is clamped to `[0, 0.45]`.
    pub fn set_style(&mut self, style: CandleStyle) -> ChartResult<()> {
        let style = style.clamped();
        style.validate()?;
        self.style = style;
        Ok(())
    }

    pub fn set_highlight_style(&mut self, highlight: HighlightStyle) -> ChartResult<()> {
        highlight.color.validate()?;
        if !highlight.line_width.is_finite() || highlight.line_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "highlight line width must be finite and > 0".to_owned(),
            ));
        }
        if let Some(dash) = &highlight.dash {
            dash.validate()?;
        }
        self.highlight = highlight;
        Ok(())
    }

    pub fn set_value_formatter(&mut self, formatter: Option<Arc<dyn ValueFormatter>>) {
        self.value_formatter = formatter;
    }

    pub fn set_value_font(&mut self, font: ValueFont) -> ChartResult<()> {
        if !(font.size_px.is_finite()
            && font.size_px > 0.0
            && font.line_height_px.is_finite()
            && font.line_height_px >= 0.0)
        {
            return Err(ChartError::InvalidData(
                "value font metrics must be finite and positive".to_owned(),
            ));
        }
        self.value_font = font;
        Ok(())
    }

    pub fn set_value_colors(&mut self, colors: Vec<Color>) -> ChartResult<()> {
        if colors.is_empty() {
            return Err(ChartError::InvalidData(
                "value colors must not be empty".to_owned(),
            ));
        }
        for color in &colors {
            color.validate()?;
        }
        self.value_colors = colors;
        Ok(())
    }

    pub fn set_icons_offset(&mut self, offset: Point) {
        self.icons_offset = offset;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_draw_values_enabled(&mut self, enabled: bool) {
        self.draw_values_enabled = enabled;
    }

    pub fn set_draw_icons_enabled(&mut self, enabled: bool) {
        self.draw_icons_enabled = enabled;
    }

    pub fn set_highlight_enabled(&mut self, enabled: bool) {
        self.highlight.enabled = enabled;
    }

    pub fn set_axis_dependency(&mut self, axis: AxisDependency) {
        self.axis_dependency = axis;
    }

    pub fn set_label(&mut self, label: Option<&str>) {
        self.label = label.map(str::to_owned);
    }

    pub fn add_entry(&mut self, entry: CandleEntry) {
        self.extend_min_max(&entry);
        self.entries.push(entry);
    }

    pub fn set_entries(&mut self, entries: Vec<CandleEntry>) {
        self.entries = entries;
        self.calc_min_max();
    }

    pub fn clear(&mut self) {
        self.set_entries(Vec::new());
    }

    fn calc_min_max(&mut self) {
        self.x_min = f64::MAX;
        self.x_max = -f64::MAX;
        self.y_min = f64::MAX;
        self.y_max = -f64::MAX;
        for entry in &self.entries {
            self.x_min = self.x_min.min(entry.x());
            self.x_max = self.x_max.max(entry.x());
            self.y_min = self.y_min.min(entry.low());
            self.y_max = self.y_max.max(entry.high());
        }
    }

    fn extend_min_max(&mut self, entry: &CandleEntry) {
        self.x_min = self.x_min.min(entry.x());
        self.x_max = self.x_max.max(entry.x());
        self.y_min = self.y_min.min(entry.low());
        self.y_max = self.y_max.max(entry.high());
    }

    #[must_use]
    pub fn entries(&self) -> &[CandleEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entry_for_index(&self, index: usize) -> Option<&CandleEntry> {
        self.entries.get(index)
    }

    /// Binary-searches the index of the entry nearest to `x`.
    ///
    /// `rounding` nudges an inexact hit to the neighbor above or below `x`.
    /// When `closest_to_y` is given and several entries share the resolved x,
    /// the one whose `y()` is nearest wins.
    #[must_use]
    pub fn entry_index_for_x(
        &self,
        x: f64,
        closest_to_y: Option<f64>,
        rounding: Rounding,
    ) -> Option<usize> {
        if self.entries.is_empty() || x.is_nan() {
            return None;
        }

        let entries = &self.entries;
        let mut low = 0;
        let mut high = entries.len() - 1;
        let mut closest = high;

        while low < high {
            let mid = (low + high) / 2;
            let d1 = entries[mid].x() - x;
            let d2 = entries[mid + 1].x() - x;
            let (ad1, ad2) = (d1.abs(), d2.abs());

            if ad2 < ad1 {
                low = mid + 1;
            } else if ad1 < ad2 {
                high = mid;
            } else if d1 >= 0.0 {
                high = mid;
            } else {
                low = mid + 1;
            }
            closest = high;
        }

        let closest_x = entries[closest].x();
        match rounding {
            Rounding::Up if closest_x < x && closest + 1 < entries.len() => closest += 1,
            Rounding::Down if closest_x > x && closest > 0 => closest -= 1,
            _ => {}
        }

        if let Some(target_y) = closest_to_y.filter(|y| !y.is_nan()) {
            let resolved_x = entries[closest].x();
            while closest > 0 && entries[closest - 1].x() == resolved_x {
                closest -= 1;
            }

            let mut best_index = closest;
            let mut best_distance = (entries[closest].y() - target_y).abs();
            for (index, entry) in entries.iter().enumerate().skip(closest + 1) {
                if entry.x() != resolved_x {
                    break;
                }
                let distance = (entry.y() - target_y).abs();
                if distance <= best_distance {
                    best_distance = distance;
                    best_index = index;
                }
            }
            closest = best_index;
        }

        Some(closest)
    }

    #[must_use]
    pub fn entry_for_x_value(
        &self,
        x: f64,
        closest_to_y: Option<f64>,
        rounding: Rounding,
    ) -> Option<&CandleEntry> {
        self.entry_index_for_x(x, closest_to_y, rounding)
            .and_then(|index| self.entries.get(index))
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn axis_dependency(&self) -> AxisDependency {
        self.axis_dependency
    }

    #[must_use]
    pub fn style(&self) -> &CandleStyle {
        &self.style
    }

    #[must_use]
    pub fn highlight_style(&self) -> &HighlightStyle {
        &self.highlight
    }

    #[must_use]
    pub fn value_formatter(&self) -> Option<&Arc<dyn ValueFormatter>> {
        self.value_formatter.as_ref()
    }

    #[must_use]
    pub fn value_font(&self) -> ValueFont {
        self.value_font
    }

    #[must_use]
    pub fn value_text_color_at(&self, index: usize) -> Color {
        self.value_colors[index % self.value_colors.len()]
    }

    #[must_use]
    pub fn icons_offset(&self) -> Point {
        self.icons_offset
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_draw_values_enabled(&self) -> bool {
        self.draw_values_enabled
    }

    #[must_use]
    pub fn is_draw_icons_enabled(&self) -> bool {
        self.draw_icons_enabled
    }

    #[must_use]
    pub fn is_highlight_enabled(&self) -> bool {
        self.highlight.enabled
    }

    /// Extents are `None` for an empty set.
    #[must_use]
    pub fn x_range(&self) -> Option<(f64, f64)> {
        (!self.entries.is_empty()).then_some((self.x_min, self.x_max))
    }

    #[must_use]
    pub fn y_range(&self) -> Option<(f64, f64)> {
        (!self.entries.is_empty()).then_some((self.y_min, self.y_max))
    }
}
