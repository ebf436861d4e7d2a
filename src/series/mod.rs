//! Series renderers: turn data sets into drawing calls.

mod candlestick;
mod highlight_lines;

pub use candlestick::CandleStickRenderer;
pub use highlight_lines::draw_highlight_lines;

use crate::core::{Animator, AxisDependency, CandleData, Transformer, ViewportHandler, YAxisArea};

/// Read access a series renderer needs from the chart it draws.
pub trait CandleChartDataProvider {
    fn candle_data(&self) -> Option<&CandleData>;
    fn transformer(&self, axis: AxisDependency) -> &Transformer;
    fn viewport_handler(&self) -> &ViewportHandler;
    fn animator(&self) -> &Animator;
    fn lowest_visible_x(&self) -> f64;
    fn highest_visible_x(&self) -> f64;
    /// Value labels are suppressed once the entry count reaches this times the
    /// horizontal zoom.
    fn max_visible_count(&self) -> usize;

    fn y_axis_areas(&self) -> &[YAxisArea] {
        &[]
    }

    /// Whether `draw_data` should prepend a chart header accessibility element.
    fn wants_accessibility_header(&self) -> bool {
        false
    }

    fn chart_description(&self) -> Option<&str> {
        None
    }
}

/// Result of one draw pass.
///
/// `Rendered { items: 0 }` means the pass ran and had nothing visible to draw;
/// `NotRendered` means a precondition failed and nothing was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Rendered { items: usize },
    NotRendered(NotRenderedReason),
}

impl DrawOutcome {
    #[must_use]
    pub fn is_rendered(self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    #[must_use]
    pub fn items(self) -> usize {
        match self {
            Self::Rendered { items } => items,
            Self::NotRendered(_) => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotRenderedReason {
    NoData,
    ValuesNotAllowed,
    NoEligibleDataSets,
    NoHighlights,
}
