use tracing::trace;

use crate::core::{Highlight, Point, Rounding};
use crate::series::CandleChartDataProvider;

/// Finds the candle nearest to a touch point.
///
/// Each visible, highlight-enabled data set contributes the entry closest to
/// the touched x value; the winner is the one whose midpoint lies nearest to
/// `pixel`, provided it is within `max_distance_px`.
#[must_use]
pub fn highlight_at_pixel(
    provider: &dyn CandleChartDataProvider,
    pixel: Point,
    max_distance_px: f64,
) -> Option<Highlight> {
    let data = provider.candle_data()?;
    let phase_y = provider.animator().phase_y();

    let mut best: Option<(f64, Highlight)> = None;
    for (set_index, data_set) in data.data_sets().iter().enumerate() {
        if !data_set.is_visible() || !data_set.is_highlight_enabled() {
            continue;
        }
        let axis = data_set.axis_dependency();
        let transformer = provider.transformer(axis);
        let value = transformer.value_for_touch_point(pixel);
        let Some(entry) = data_set.entry_for_x_value(value.x, Some(value.y), Rounding::Closest)
        else {
            continue;
        };

        let candle_px = transformer.pixel_for_values(entry.x(), entry.y() * phase_y);
        let distance = candle_px.distance_to(pixel);
        trace!(set_index, x = entry.x(), distance, "highlight candidate");
        if distance > max_distance_px {
            continue;
        }
        if best.as_ref().is_none_or(|(best_distance, _)| distance < *best_distance) {
            best = Some((distance, Highlight::new(entry.x(), entry.y(), set_index, axis)));
        }
    }

    best.map(|(_, highlight)| highlight)
}
