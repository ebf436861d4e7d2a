use std::ops::RangeInclusive;

use crate::core::{CandleDataSet, Rounding};

/// Inclusive index window `[min, min + range]` of entries worth visiting for
/// the visible x span. Recomputed for every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XBounds {
    pub min: usize,
    pub max: usize,
    pub range: usize,
}

impl XBounds {
    /// Resolves the window for `data_set` between `lowest_visible_x` and
    /// `highest_visible_x`, shortened by the animation `phase_x`.
    ///
    /// The low end rounds down and the high end rounds up so that candles
    /// straddling the viewport edges are still drawn. Returns `None` for an
    /// empty set.
    #[must_use]
    pub fn compute(
        data_set: &CandleDataSet,
        lowest_visible_x: f64,
        highest_visible_x: f64,
        phase_x: f64,
    ) -> Option<Self> {
        let phase_x = if phase_x.is_finite() {
            phase_x.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let min = data_set.entry_index_for_x(lowest_visible_x, None, Rounding::Down)?;
        let max = data_set.entry_index_for_x(highest_visible_x, None, Rounding::Up)?;
        let span = max.saturating_sub(min);
        let range = (span as f64 * phase_x) as usize;
        Some(Self { min, max, range })
    }

    #[must_use]
    pub fn indices(&self) -> RangeInclusive<usize> {
        self.min..=self.min + self.range
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices().contains(&index)
    }
}
