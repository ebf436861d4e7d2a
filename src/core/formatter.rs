use std::fmt::Debug;

use crate::core::{CandleEntry, ViewportHandler};

/// Turns an entry's value into label text.
pub trait ValueFormatter: Debug + Send + Sync {
    fn string_for_value(
        &self,
        value: f64,
        entry: &CandleEntry,
        data_set_index: usize,
        viewport: &ViewportHandler,
    ) -> String;
}

/// Fixed-precision decimal formatter with optional affixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValueFormatter {
    decimals: usize,
    prefix: String,
    suffix: String,
}

impl DefaultValueFormatter {
    #[must_use]
    pub fn new(decimals: usize) -> Self {
        Self {
            decimals,
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    /// Picks enough decimals to tell apart values across a `range`-wide axis.
    #[must_use]
    pub fn for_range(range: f64) -> Self {
        let decimals = if range.is_finite() && range > 0.0 {
            let magnitude = range.abs().log10().floor();
            (2.0 - magnitude).clamp(0.0, 8.0) as usize
        } else {
            1
        };
        Self::new(decimals)
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl Default for DefaultValueFormatter {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ValueFormatter for DefaultValueFormatter {
    fn string_for_value(
        &self,
        value: f64,
        _entry: &CandleEntry,
        _data_set_index: usize,
        _viewport: &ViewportHandler,
    ) -> String {
        format!(
            "{}{:.*}{}",
            self.prefix, self.decimals, value, self.suffix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultValueFormatter, ValueFormatter};
    use crate::core::{CandleEntry, ContentOffsets, Viewport, ViewportHandler};

    #[test]
    fn formats_with_affixes_and_precision() {
        let vp = ViewportHandler::new(Viewport::new(100, 100), ContentOffsets::default())
            .expect("viewport");
        let entry = CandleEntry::new(0.0, 1.0, 2.0, 0.5, 1.5).expect("entry");
        let formatter = DefaultValueFormatter::new(2).with_prefix("$").with_suffix(" USD");
        assert_eq!(formatter.string_for_value(12.346, &entry, 0, &vp), "$12.35 USD");
    }

    #[test]
    fn range_based_precision() {
        assert_eq!(DefaultValueFormatter::for_range(1_000.0), DefaultValueFormatter::new(0));
        assert_eq!(DefaultValueFormatter::for_range(5.0), DefaultValueFormatter::new(2));
        assert_eq!(DefaultValueFormatter::for_range(0.05), DefaultValueFormatter::new(4));
    }
}
