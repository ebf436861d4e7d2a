use tracing::{debug, info, trace};

use crate::accessibility::{AccessibilityElement, AccessibilityHost};
use crate::api::config::ChartConfig;
use crate::api::highlighter;
use crate::core::{
    Animator, AxisDependency, CandleData, Highlight, Point, Transformer, Viewport,
    ViewportHandler, XAxis, YAxis, YAxisArea,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{DrawContext, RecordingContext, RenderFrame, Renderer};
use crate::series::{CandleChartDataProvider, CandleStickRenderer, DrawOutcome};

/// Outcome of every pass of one [`CandleChart::draw`] call, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub extras: DrawOutcome,
    pub data: DrawOutcome,
    pub highlights: DrawOutcome,
    pub values: DrawOutcome,
}

/// Everything the candle renderer reads while drawing.
#[derive(Debug)]
struct ChartState {
    data: Option<CandleData>,
    viewport: ViewportHandler,
    x_axis: XAxis,
    left_axis: YAxis,
    right_axis: YAxis,
    left_transformer: Transformer,
    right_transformer: Transformer,
    animator: Animator,
    y_axis_areas: Vec<YAxisArea>,
    max_visible_count: usize,
    description: Option<String>,
    accessibility_header: bool,
}

impl ChartState {
    fn calc_min_max(&mut self) -> ChartResult<()> {
        let Some(data) = self.data.as_ref() else {
            return Ok(());
        };

        if let Some((min, max)) = data.x_range() {
            self.x_axis.calculate(min, max)?;
        }

        let left = data.y_range(AxisDependency::Left);
        let right = data.y_range(AxisDependency::Right);
        // An axis without data of its own mirrors the other one.
        if let Some((min, max)) = left.or(right) {
            self.left_axis.calculate(min, max)?;
        }
        if let Some((min, max)) = right.or(left) {
            self.right_axis.calculate(min, max)?;
        }
        Ok(())
    }

    fn prepare_value_px_matrices(&mut self) -> ChartResult<()> {
        self.left_transformer = build_transformer(&self.x_axis, &self.left_axis, &self.viewport)?;
        self.right_transformer = build_transformer(&self.x_axis, &self.right_axis, &self.viewport)?;
        Ok(())
    }

    fn refresh_transformers(&mut self) {
        self.left_transformer.refresh(&self.viewport);
        self.right_transformer.refresh(&self.viewport);
    }

    fn bottom_value_at(&self, pixel_x: f64) -> f64 {
        self.left_transformer
            .value_for_touch_point(Point::new(pixel_x, self.viewport.content_bottom()))
            .x
    }
}

fn build_transformer(
    x_axis: &XAxis,
    y_axis: &YAxis,
    viewport: &ViewportHandler,
) -> ChartResult<Transformer> {
    Transformer::new(
        x_axis.axis_minimum(),
        x_axis.axis_range(),
        y_axis.axis_minimum(),
        y_axis.axis_range(),
        y_axis.inverted,
        viewport,
    )
}

impl CandleChartDataProvider for ChartState {
    fn candle_data(&self) -> Option<&CandleData> {
        self.data.as_ref()
    }

    fn transformer(&self, axis: AxisDependency) -> &Transformer {
        match axis {
            AxisDependency::Left => &self.left_transformer,
            AxisDependency::Right => &self.right_transformer,
        }
    }

    fn viewport_handler(&self) -> &ViewportHandler {
        &self.viewport
    }

    fn animator(&self) -> &Animator {
        &self.animator
    }

    fn lowest_visible_x(&self) -> f64 {
        self.bottom_value_at(self.viewport.content_left())
            .max(self.x_axis.axis_minimum())
    }

    fn highest_visible_x(&self) -> f64 {
        self.bottom_value_at(self.viewport.content_right())
            .min(self.x_axis.axis_maximum())
    }

    fn max_visible_count(&self) -> usize {
        self.max_visible_count
    }

    fn y_axis_areas(&self) -> &[YAxisArea] {
        &self.y_axis_areas
    }

    fn wants_accessibility_header(&self) -> bool {
        self.accessibility_header
    }

    fn chart_description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A candlestick chart: data, axes, viewport and the renderer drawing them.
///
/// The chart owns its data. Mutate it through [`CandleChart::data_mut`] and
/// call [`CandleChart::notify_data_changed`] so axes and transformers follow.
#[derive(Debug)]
pub struct CandleChart {
    state: ChartState,
    renderer: CandleStickRenderer,
    highlights: Vec<Highlight>,
    max_highlight_distance_px: f64,
}

impl CandleChart {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;

        let mut viewport = ViewportHandler::new(config.viewport, config.offsets)?;
        viewport.set_zoom_limits(config.zoom_limits)?;

        let left_transformer = build_transformer(&config.x_axis, &config.left_axis, &viewport)?;
        let right_transformer = build_transformer(&config.x_axis, &config.right_axis, &viewport)?;

        info!(
            width = config.viewport.width,
            height = config.viewport.height,
            max_visible_count = config.max_visible_count,
            "candle chart created"
        );

        Ok(Self {
            state: ChartState {
                data: None,
                viewport,
                x_axis: config.x_axis,
                left_axis: config.left_axis,
                right_axis: config.right_axis,
                left_transformer,
                right_transformer,
                animator: Animator::default(),
                y_axis_areas: Vec::new(),
                max_visible_count: config.max_visible_count,
                description: config.description,
                accessibility_header: config.accessibility_header,
            },
            renderer: CandleStickRenderer::new(),
            highlights: Vec::new(),
            max_highlight_distance_px: config.max_highlight_distance_px,
        })
    }

    pub fn set_data(&mut self, data: CandleData) -> ChartResult<()> {
        self.state.data = Some(data);
        self.notify_data_changed()
    }

    /// Drops all data and highlights. Later draws report `NoData`.
    pub fn clear_data(&mut self) {
        self.state.data = None;
        self.highlights.clear();
    }

    #[must_use]
    pub fn data(&self) -> Option<&CandleData> {
        self.state.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut CandleData> {
        self.state.data.as_mut()
    }

    /// Recomputes axis windows and value-to-pixel matrices from the data.
    pub fn notify_data_changed(&mut self) -> ChartResult<()> {
        self.state.calc_min_max()?;
        self.state.prepare_value_px_matrices()?;
        let data_sets = self.state.data.as_ref().map_or(0, CandleData::data_set_count);
        debug!(
            data_sets,
            x_min = self.state.x_axis.axis_minimum(),
            x_max = self.state.x_axis.axis_maximum(),
            "chart data changed"
        );
        Ok(())
    }

    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        let offsets = self.state.viewport.offsets();
        self.state.viewport.set_chart_dimens(viewport, offsets)?;
        self.state.prepare_value_px_matrices()
    }

    #[must_use]
    pub fn viewport_handler(&self) -> &ViewportHandler {
        &self.state.viewport
    }

    #[must_use]
    pub fn transformer(&self, axis: AxisDependency) -> &Transformer {
        self.state.transformer(axis)
    }

    #[must_use]
    pub fn x_axis(&self) -> &XAxis {
        &self.state.x_axis
    }

    #[must_use]
    pub fn y_axis(&self, axis: AxisDependency) -> &YAxis {
        match axis {
            AxisDependency::Left => &self.state.left_axis,
            AxisDependency::Right => &self.state.right_axis,
        }
    }

    #[must_use]
    pub fn animator(&self) -> &Animator {
        &self.state.animator
    }

    pub fn animator_mut(&mut self) -> &mut Animator {
        &mut self.state.animator
    }

    pub fn add_y_axis_area(&mut self, area: YAxisArea) -> ChartResult<()> {
        area.validate()?;
        self.state.y_axis_areas.push(area);
        Ok(())
    }

    pub fn clear_y_axis_areas(&mut self) {
        self.state.y_axis_areas.clear();
    }

    #[must_use]
    pub fn y_axis_areas(&self) -> &[YAxisArea] {
        &self.state.y_axis_areas
    }

    /// Zooms by the given factors around `center`, in chart pixels.
    pub fn zoom(&mut self, scale_x: f64, scale_y: f64, center: Point) {
        self.state.viewport.zoom(scale_x, scale_y, center);
        self.state.refresh_transformers();
        trace!(
            scale_x = self.state.viewport.scale_x(),
            scale_y = self.state.viewport.scale_y(),
            "chart zoomed"
        );
    }

    /// Pans the content by a pixel delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.state.viewport.translate(dx, dy);
        self.state.refresh_transformers();
    }

    pub fn reset_zoom(&mut self) {
        self.state.viewport.reset_zoom();
        self.state.refresh_transformers();
    }

    #[must_use]
    pub fn lowest_visible_x(&self) -> f64 {
        self.state.lowest_visible_x()
    }

    #[must_use]
    pub fn highest_visible_x(&self) -> f64 {
        self.state.highest_visible_x()
    }

    /// Replaces the active highlights. Data set indexes are checked here so
    /// stale selections surface as errors instead of silently vanishing.
    pub fn set_highlights(&mut self, highlights: Vec<Highlight>) -> ChartResult<()> {
        let count = self.state.data.as_ref().map_or(0, CandleData::data_set_count);
        if let Some(bad) = highlights.iter().find(|h| h.data_set_index >= count) {
            return Err(ChartError::DataSetIndexOutOfRange {
                index: bad.data_set_index,
                count,
            });
        }
        self.highlights = highlights;
        Ok(())
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    /// Active highlights. Their draw points are set by the latest `draw`.
    #[must_use]
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Selects the candle nearest to a touch point, replacing any previous
    /// selection. Touching the already selected candle clears it.
    pub fn highlight_at_pixel(&mut self, pixel: Point) -> Option<Highlight> {
        let found =
            highlighter::highlight_at_pixel(&self.state, pixel, self.max_highlight_distance_px);
        match found {
            Some(highlight)
                if self
                    .highlights
                    .first()
                    .is_some_and(|current| current.is_same_selection(&highlight)) =>
            {
                self.highlights.clear();
                None
            }
            Some(highlight) => {
                self.highlights = vec![highlight];
                Some(highlight)
            }
            None => {
                self.highlights.clear();
                None
            }
        }
    }

    /// Elements built by the latest data pass, header first when enabled.
    #[must_use]
    pub fn accessibility_elements(&self) -> &[AccessibilityElement] {
        self.renderer.accessibility_elements()
    }

    /// Runs every pass against `ctx`: y-axis bands, candles, highlight
    /// cross-hairs, then value labels on top.
    pub fn draw(
        &mut self,
        ctx: &mut dyn DrawContext,
        a11y: &mut dyn AccessibilityHost,
    ) -> FrameReport {
        let extras = self.renderer.draw_extras(&self.state, ctx);
        let data = self.renderer.draw_data(&self.state, ctx, a11y);
        let highlights = self
            .renderer
            .draw_highlighted(&self.state, ctx, &mut self.highlights);
        let values = self.renderer.draw_values(&self.state, ctx);

        let report = FrameReport {
            extras,
            data,
            highlights,
            values,
        };
        trace!(?report, "chart frame drawn");
        report
    }

    /// Records one frame and hands it to `renderer`.
    pub fn render<R: Renderer>(
        &mut self,
        renderer: &mut R,
        a11y: &mut dyn AccessibilityHost,
    ) -> ChartResult<(RenderFrame, FrameReport)> {
        let mut ctx = RecordingContext::new(self.state.viewport.viewport());
        let report = self.draw(&mut ctx, a11y);
        let frame = ctx.into_frame();
        renderer.render(&frame)?;
        Ok((frame, report))
    }
}
