use tracing::{debug, trace};

use crate::accessibility::{
    AccessibilityElement, AccessibilityHost, candle_label, header_element,
};
use crate::core::{
    CandleDataSet, CandleDirection, CandleStyle, Highlight, Point, Rect, Rounding, Transformer,
    XBounds,
};
use crate::render::{
    DrawContext, EllipsePrimitive, ImagePrimitive, LinePrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};
use crate::series::{CandleChartDataProvider, DrawOutcome, NotRenderedReason, draw_highlight_lines};

/// Gap between a value label's baseline box and the candle's high.
const VALUE_LABEL_GAP_PX: f64 = 5.0;

/// Draws candle data sets, their value labels, highlights and Y-axis bands.
///
/// The only state kept between frames is the accessibility element list,
/// which `draw_data` rebuilds wholesale.
#[derive(Debug, Default)]
pub struct CandleStickRenderer {
    accessible_elements: Vec<AccessibilityElement>,
}

impl CandleStickRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements built by the most recent `draw_data` pass.
    #[must_use]
    pub fn accessibility_elements(&self) -> &[AccessibilityElement] {
        &self.accessible_elements
    }

    pub fn draw_data(
        &mut self,
        provider: &dyn CandleChartDataProvider,
        ctx: &mut dyn DrawContext,
        a11y: &mut dyn AccessibilityHost,
    ) -> DrawOutcome {
        let Some(data) = provider.candle_data() else {
            debug!("draw_data skipped: no chart data");
            return DrawOutcome::NotRendered(NotRenderedReason::NoData);
        };

        self.accessible_elements.clear();
        if provider.wants_accessibility_header() {
            self.accessible_elements.push(header_element(
                provider.chart_description(),
                data,
                provider.viewport_handler().chart_bounds(),
            ));
        }

        let mut items = 0;
        for (set_index, data_set) in data.data_sets().iter().enumerate() {
            if !data_set.is_visible() {
                trace!(set_index, "data set hidden");
                continue;
            }
            items += self.draw_data_set(provider, ctx, a11y, data_set);
        }

        debug!(
            data_sets = data.data_set_count(),
            candles = items,
            a11y_elements = self.accessible_elements.len(),
            "candle data drawn"
        );
        DrawOutcome::Rendered { items }
    }

    /// Draws one data set and returns how many candles it visited.
    ///
    /// The accessibility host is notified once per call, even when the set
    /// has no entries.
    pub fn draw_data_set(
        &mut self,
        provider: &dyn CandleChartDataProvider,
        ctx: &mut dyn DrawContext,
        a11y: &mut dyn AccessibilityHost,
        data_set: &CandleDataSet,
    ) -> usize {
        let transformer = provider.transformer(data_set.axis_dependency());
        let animator = provider.animator();
        let phase_y = animator.phase_y();
        let bounds = XBounds::compute(
            data_set,
            provider.lowest_visible_x(),
            provider.highest_visible_x(),
            animator.phase_x(),
        );
        if bounds.is_none() {
            trace!(label = ?data_set.label(), "empty data set");
        }

        let style = data_set.style();
        let has_many_sets = provider
            .candle_data()
            .is_some_and(|data| data.data_set_count() > 1);
        let prefix = has_many_sets.then(|| data_set.label().unwrap_or("Dataset"));

        ctx.save_state();
        let mut drawn = 0;
        for index in bounds.iter().flat_map(XBounds::indices) {
            let Some(entry) = data_set.entry_for_index(index) else {
                continue;
            };
            let direction = entry.direction();
            let x = entry.x();
            let candle = ScaledCandle {
                index,
                x,
                open: entry.open() * phase_y,
                high: entry.high() * phase_y,
                low: entry.low() * phase_y,
                close: entry.close() * phase_y,
                direction,
            };

            let frame = transformer.rect_value_to_pixel(Rect::from_corners(
                Point::new(x - 0.5 + style.bar_space, candle.low),
                Point::new(x + 0.5 - style.bar_space, candle.high),
            ));

            if style.show_candle_bar {
                draw_candle_bar(ctx, transformer, style, &candle);
            } else {
                draw_candle_ticks(ctx, transformer, style, &candle);
            }

            self.accessible_elements.push(AccessibilityElement {
                frame,
                label: candle_label(prefix, entry, direction),
                is_header: false,
            });
            drawn += 1;
        }

        a11y.layout_changed(&self.accessible_elements);
        ctx.restore_state();
        drawn
    }

    /// Draws the formatted high value above each visible candle, plus icons.
    ///
    /// Entries must be in ascending x order: the pass for a data set stops at
    /// the first entry projected right of the viewport, so entries after it
    /// are dropped even if they would be visible.
    pub fn draw_values(
        &self,
        provider: &dyn CandleChartDataProvider,
        ctx: &mut dyn DrawContext,
    ) -> DrawOutcome {
        let Some(data) = provider.candle_data() else {
            return DrawOutcome::NotRendered(NotRenderedReason::NoData);
        };
        let viewport = provider.viewport_handler();
        let value_budget = provider.max_visible_count() as f64 * viewport.scale_x();
        if data.entry_count() as f64 >= value_budget {
            debug!(
                entries = data.entry_count(),
                value_budget, "too many entries for value labels"
            );
            return DrawOutcome::NotRendered(NotRenderedReason::ValuesNotAllowed);
        }

        let animator = provider.animator();
        let phase_y = animator.phase_y();
        let mut eligible = 0;
        let mut items = 0;

        for (set_index, data_set) in data.data_sets().iter().enumerate() {
            if !should_draw_values(data_set) {
                continue;
            }
            let Some(formatter) = data_set.value_formatter() else {
                trace!(set_index, "no value formatter");
                continue;
            };
            eligible += 1;

            let transformer = provider.transformer(data_set.axis_dependency());
            let Some(bounds) = XBounds::compute(
                data_set,
                provider.lowest_visible_x(),
                provider.highest_visible_x(),
                animator.phase_x(),
            ) else {
                continue;
            };
            let font = data_set.value_font();
            let y_offset = font.line_height_px + VALUE_LABEL_GAP_PX;
            let icons_offset = data_set.icons_offset();

            for index in bounds.indices() {
                let Some(entry) = data_set.entry_for_index(index) else {
                    break;
                };
                let point = transformer.pixel_for_values(entry.x(), entry.high() * phase_y);

                if !viewport.is_in_bounds_right(point.x) {
                    trace!(set_index, index, "value pass reached right edge");
                    break;
                }
                if !viewport.is_in_bounds_left(point.x) || !viewport.is_in_bounds_y(point.y) {
                    continue;
                }

                if data_set.is_draw_values_enabled() {
                    let text = formatter.string_for_value(entry.high(), entry, set_index, viewport);
                    if !text.is_empty() {
                        ctx.draw_text(TextPrimitive::new(
                            text,
                            point.x,
                            point.y - y_offset,
                            font.size_px,
                            data_set.value_text_color_at(index),
                            TextHAlign::Center,
                        ));
                        items += 1;
                    }
                }

                if let Some(icon) = entry.icon().filter(|_| data_set.is_draw_icons_enabled()) {
                    ctx.draw_image(ImagePrimitive::new(
                        icon.clone(),
                        point.offset_by(icons_offset),
                    ));
                    items += 1;
                }
            }
        }

        if eligible == 0 {
            return DrawOutcome::NotRendered(NotRenderedReason::NoEligibleDataSets);
        }
        DrawOutcome::Rendered { items }
    }

    /// Fills the provider's Y-axis bands across the content width.
    pub fn draw_extras(
        &self,
        provider: &dyn CandleChartDataProvider,
        ctx: &mut dyn DrawContext,
    ) -> DrawOutcome {
        let areas = provider.y_axis_areas();
        if areas.is_empty() {
            return DrawOutcome::Rendered { items: 0 };
        }

        let viewport = provider.viewport_handler();
        ctx.save_state();
        for area in areas {
            let transformer = provider.transformer(area.axis);
            let start = transformer.pixel_for_values(0.0, area.start_y).y;
            let end = transformer.pixel_for_values(0.0, area.end_y).y;
            let top = start.min(end).max(viewport.content_top());
            let bottom = start.max(end).min(viewport.content_bottom());
            if bottom <= top {
                continue;
            }
            ctx.fill_rect(RectPrimitive::new(
                Rect::new(
                    viewport.content_left(),
                    top,
                    viewport.content_rect().width,
                    bottom - top,
                ),
                area.color,
            ));
        }
        ctx.restore_state();
        DrawOutcome::Rendered { items: areas.len() }
    }

    /// Draws a cross-hair for every highlight and caches its pixel point on it.
    pub fn draw_highlighted(
        &self,
        provider: &dyn CandleChartDataProvider,
        ctx: &mut dyn DrawContext,
        highlights: &mut [Highlight],
    ) -> DrawOutcome {
        let Some(data) = provider.candle_data() else {
            return DrawOutcome::NotRendered(NotRenderedReason::NoData);
        };
        if highlights.is_empty() {
            return DrawOutcome::NotRendered(NotRenderedReason::NoHighlights);
        }

        let animator = provider.animator();
        let phase_y = animator.phase_y();
        let mut items = 0;

        ctx.save_state();
        for highlight in highlights.iter_mut() {
            let Some(data_set) = data.data_set_by_index(highlight.data_set_index) else {
                trace!(index = highlight.data_set_index, "highlight data set missing");
                continue;
            };
            if !data_set.is_highlight_enabled() {
                continue;
            }
            let Some(index) =
                data_set.entry_index_for_x(highlight.x, Some(highlight.y), Rounding::Closest)
            else {
                continue;
            };
            if index as f64 >= data_set.entry_count() as f64 * animator.phase_x() {
                continue;
            }
            let Some(entry) = data_set.entry_for_index(index) else {
                continue;
            };

            let transformer = provider.transformer(data_set.axis_dependency());
            let mid_y = (entry.low() * phase_y + entry.high() * phase_y) / 2.0;
            let point = transformer.pixel_for_values(entry.x(), mid_y);
            highlight.set_draw_point(point);

            draw_highlight_lines(
                ctx,
                provider.viewport_handler(),
                point,
                data_set.highlight_style(),
            );
            items += 1;
        }
        ctx.restore_state();

        DrawOutcome::Rendered { items }
    }
}

/// Entry values after the Y animation phase was applied.
struct ScaledCandle {
    index: usize,
    x: f64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    direction: CandleDirection,
}

fn should_draw_values(data_set: &CandleDataSet) -> bool {
    data_set.is_visible() && (data_set.is_draw_values_enabled() || data_set.is_draw_icons_enabled())
}

fn draw_candle_bar(
    ctx: &mut dyn DrawContext,
    transformer: &Transformer,
    style: &CandleStyle,
    candle: &ScaledCandle,
) {
    let mut body = transformer.rect_value_to_pixel(Rect::from_corners(
        Point::new(candle.x - 0.5 + style.bar_space, candle.close),
        Point::new(candle.x + 0.5 - style.bar_space, candle.open),
    ));
    if let Some(width) = style.body_width_px {
        body = Rect::new(body.mid_x() - width / 2.0, body.y, width, body.height);
    }

    let has_body = candle.direction != CandleDirection::Neutral;
    if has_body {
        ctx.fill_rect(RectPrimitive::new(
            body,
            style.direction_color(candle.direction, candle.index),
        ));
    }

    draw_tip_marker(ctx, style, candle.index, Point::new(body.mid_x(), body.min_y()));
    if has_body {
        draw_tip_marker(ctx, style, candle.index, Point::new(body.mid_x(), body.max_y()));
    }
}

/// Outer cap plus the smaller center dot at one end of a candle body.
fn draw_tip_marker(ctx: &mut dyn DrawContext, style: &CandleStyle, index: usize, tip: Point) {
    ctx.draw_ellipse(EllipsePrimitive::fill_stroke(
        Rect::centered_square(tip, style.marker_size_px),
        style.point_color_at(index),
        style.marker_line_width,
    ));
    ctx.draw_ellipse(EllipsePrimitive::fill_stroke(
        Rect::centered_square(tip, style.marker_center_size_px),
        style.point_center_color_at(index),
        style.marker_line_width,
    ));
}

fn draw_candle_ticks(
    ctx: &mut dyn DrawContext,
    transformer: &Transformer,
    style: &CandleStyle,
    candle: &ScaledCandle,
) {
    let x = candle.x;
    let mut range = [Point::new(x, candle.high), Point::new(x, candle.low)];
    let mut open = [
        Point::new(x - 0.5 + style.bar_space, candle.open),
        Point::new(x, candle.open),
    ];
    let mut close = [
        Point::new(x + 0.5 - style.bar_space, candle.close),
        Point::new(x, candle.close),
    ];
    transformer.point_values_to_pixel(&mut range);
    transformer.point_values_to_pixel(&mut open);
    transformer.point_values_to_pixel(&mut close);

    let color = style.direction_color(candle.direction, candle.index);
    for [from, to] in [range, open, close] {
        ctx.stroke_line(LinePrimitive::new(from, to, style.shadow_width, color));
    }
}
