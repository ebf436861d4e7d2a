//! Accessibility metadata produced alongside each draw pass.
//!
//! Renderers rebuild a flat list of [`AccessibilityElement`]s every time data
//! is drawn and tell the host through [`AccessibilityHost::layout_changed`]
//! so screen readers can pick up the new frames.

use serde::{Deserialize, Serialize};

use crate::core::{CandleData, CandleDirection, CandleEntry, Rect};

/// One screen-reader node: a pixel frame and its spoken label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityElement {
    pub frame: Rect,
    pub label: String,
    pub is_header: bool,
}

/// Host side of the accessibility tree.
pub trait AccessibilityHost {
    /// Called once per data-set pass with the elements built so far.
    fn layout_changed(&mut self, elements: &[AccessibilityElement]);
}

/// Host that ignores notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAccessibilityHost;

impl AccessibilityHost for NullAccessibilityHost {
    fn layout_changed(&mut self, _elements: &[AccessibilityElement]) {}
}

/// Host that keeps the latest element snapshot and counts notifications.
#[derive(Debug, Default, Clone)]
pub struct RecordingAccessibilityHost {
    pub notifications: usize,
    pub last_elements: Vec<AccessibilityElement>,
}

impl AccessibilityHost for RecordingAccessibilityHost {
    fn layout_changed(&mut self, elements: &[AccessibilityElement]) {
        self.notifications += 1;
        self.last_elements = elements.to_vec();
    }
}

/// Builds the chart header: description, data set count and labels.
#[must_use]
pub fn header_element(description: Option<&str>, data: &CandleData, bounds: Rect) -> AccessibilityElement {
    let description = description.unwrap_or("CandleStick Chart");
    let count = data.data_set_count();
    let labels = data
        .data_sets()
        .iter()
        .map(|data_set| data_set.label().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(", ");
    let plural = if count == 1 { "" } else { "s" };

    AccessibilityElement {
        frame: bounds,
        label: format!("{description}. {count} dataset{plural}. {labels}"),
        is_header: true,
    }
}

/// Builds the label of one candle, e.g.
/// `"BTC 3 - increasing. low: 9, high: 12, opening: 10, closing: 11"`.
///
/// `data_set_prefix` is only passed when the chart holds several data sets.
/// Without a prefix the label starts directly with the x value; there is no
/// leading space where the prefix would go.
#[must_use]
pub fn candle_label(data_set_prefix: Option<&str>, entry: &CandleEntry, direction: CandleDirection) -> String {
    let body = format!(
        "{} - {}. low: {}, high: {}, opening: {}, closing: {}",
        entry.x(),
        direction.as_str(),
        entry.low(),
        entry.high(),
        entry.open(),
        entry.close()
    );
    match data_set_prefix {
        Some(prefix) => format!("{prefix} {body}"),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::{candle_label, header_element};
    use crate::core::{CandleData, CandleDataSet, CandleEntry, Rect};

    #[test]
    fn candle_label_lists_ohlc() {
        let entry = CandleEntry::new(0.0, 10.0, 12.0, 9.0, 11.0).expect("entry");
        assert_eq!(
            candle_label(None, &entry, entry.direction()),
            "0 - increasing. low: 9, high: 12, opening: 10, closing: 11"
        );
        assert_eq!(
            candle_label(Some("ETH"), &entry, entry.direction()),
            "ETH 0 - increasing. low: 9, high: 12, opening: 10, closing: 11"
        );
    }

    #[test]
    fn header_pluralizes_data_sets() {
        let data = CandleData::new(vec![
            CandleDataSet::new(Vec::new(), Some("a")),
            CandleDataSet::new(Vec::new(), Some("b")),
        ]);
        let header = header_element(None, &data, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(header.is_header);
        assert_eq!(header.label, "CandleStick Chart. 2 datasets. a, b");

        let single = CandleData::new(vec![CandleDataSet::new(Vec::new(), Some("a"))]);
        let header = header_element(Some("Prices"), &single, Rect::default());
        assert_eq!(header.label, "Prices. 1 dataset. a");
    }
}
