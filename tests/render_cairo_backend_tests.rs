#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use candle_chart::ChartError;
use candle_chart::accessibility::NullAccessibilityHost;
use candle_chart::api::{CandleChart, ChartConfig};
use candle_chart::core::{CandleData, CandleDataSet, CandleEntry, Icon, Viewport};
use candle_chart::render::{CairoContextRenderer, CairoRenderer, RecordingContext};

fn chart(width: u32, height: u32) -> CandleChart {
    let mut chart = CandleChart::new(ChartConfig::new(Viewport::new(width, height)))
        .expect("chart init");
    chart
        .set_data(CandleData::new(vec![CandleDataSet::new(
            vec![
                CandleEntry::new(0.0, 10.0, 12.0, 9.0, 11.0)
                    .expect("entry")
                    .with_icon(Icon::new("flag", 6.0, 6.0)),
                CandleEntry::new(1.0, 11.0, 11.0, 8.0, 8.0).expect("entry"),
                CandleEntry::new(2.0, 8.0, 9.0, 8.0, 8.0)
                    .expect("entry")
                    .with_icon(Icon::new("unknown", 6.0, 6.0)),
            ],
            Some("prices"),
        )]))
        .expect("data");
    chart
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_replays_candles_values_and_icons() {
    let mut renderer = CairoRenderer::new(600, 320).expect("renderer");
    let icon = ImageSurface::create(Format::ARgb32, 12, 12).expect("icon surface");
    renderer.register_icon("flag", icon);

    let mut chart = chart(600, 320);
    chart
        .render(&mut renderer, &mut NullAccessibilityHost)
        .expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.rects_drawn, 2);
    assert_eq!(stats.ellipses_drawn, 10);
    assert_eq!(stats.texts_drawn, 3);
    assert_eq!(stats.images_drawn, 1);
    assert_eq!(stats.images_missing, 1);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let mut renderer = CairoRenderer::new(600, 320).expect("renderer");
    let mut chart = chart(600, 320);
    let mut ctx = RecordingContext::new(Viewport::new(600, 320));
    chart.draw(&mut ctx, &mut NullAccessibilityHost);

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_cairo_context(&context, ctx.frame())
        .expect("render on context");
    assert_eq!(renderer.last_stats().rects_drawn, 2);
}
