use candle_chart::accessibility::NullAccessibilityHost;
use candle_chart::api::{CandleChart, ChartConfig};
use candle_chart::core::{
    AxisDependency, CandleData, CandleDataSet, CandleEntry, ContentOffsets, Highlight,
    HighlightStyle, Point, Viewport,
};
use candle_chart::render::{Color, DashPattern, RecordingContext, RenderFrame};
use candle_chart::series::{DrawOutcome, NotRenderedReason};

fn chart_with(data_sets: Vec<CandleDataSet>) -> CandleChart {
    let config = ChartConfig::new(Viewport::new(400, 300)).with_offsets(ContentOffsets {
        left: 20.0,
        top: 10.0,
        right: 20.0,
        bottom: 10.0,
    });
    let mut chart = CandleChart::new(config).expect("chart init");
    chart.set_data(CandleData::new(data_sets)).expect("data");
    chart
}

fn prices() -> CandleDataSet {
    CandleDataSet::new(
        vec![
            CandleEntry::new(0.0, 10.0, 12.0, 9.0, 11.0).expect("entry"),
            CandleEntry::new(1.0, 11.0, 11.0, 8.0, 8.0).expect("entry"),
            CandleEntry::new(2.0, 8.0, 10.0, 7.0, 9.0).expect("entry"),
            CandleEntry::new(3.0, 9.0, 13.0, 9.0, 12.0).expect("entry"),
        ],
        Some("prices"),
    )
}

fn draw(chart: &mut CandleChart) -> (RenderFrame, DrawOutcome) {
    let mut ctx = RecordingContext::new(Viewport::new(400, 300));
    let report = chart.draw(&mut ctx, &mut NullAccessibilityHost);
    (ctx.into_frame(), report.highlights)
}

#[test]
fn highlight_caches_the_candle_midpoint() {
    let mut chart = chart_with(vec![prices()]);
    chart
        .set_highlights(vec![Highlight::new(1.0, 9.5, 0, AxisDependency::Left)])
        .expect("highlights");

    let (frame, outcome) = draw(&mut chart);
    assert_eq!(outcome, DrawOutcome::Rendered { items: 1 });

    let expected = chart
        .transformer(AxisDependency::Left)
        .pixel_for_values(1.0, (8.0 + 11.0) / 2.0);
    let cached = chart.highlights()[0].draw_point().expect("draw point");
    assert!(cached.distance_to(expected) <= 1e-9);

    // Cross-hair spans the content rect, not the whole chart.
    let viewport = chart.viewport_handler();
    let lines: Vec<_> = frame.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].y1, viewport.content_top());
    assert_eq!(lines[0].y2, viewport.content_bottom());
    assert_eq!(lines[1].x1, viewport.content_left());
    assert_eq!(lines[1].x2, viewport.content_right());
}

#[test]
fn highlight_uses_the_data_set_style() {
    let data_set = prices()
        .with_highlight_style(HighlightStyle {
            color: Color::rgb(0.2, 0.4, 0.6),
            line_width: 1.5,
            dash: Some(DashPattern::new(1.0, &[6.0, 3.0])),
            ..HighlightStyle::default()
        })
        .expect("highlight style");
    let mut chart = chart_with(vec![data_set]);
    chart
        .set_highlights(vec![Highlight::new(2.0, 8.5, 0, AxisDependency::Left)])
        .expect("highlights");

    let (frame, _) = draw(&mut chart);
    for line in frame.lines() {
        assert_eq!(line.color, Color::rgb(0.2, 0.4, 0.6));
        assert_eq!(line.stroke_width, 1.5);
        assert_eq!(line.dash.phase, 1.0);
        assert_eq!(line.dash.lengths.as_slice(), &[6.0, 3.0]);
    }
}

#[test]
fn disabled_data_set_draws_no_cross_hair() {
    let mut data_set = prices();
    data_set.set_highlight_enabled(false);
    let mut chart = chart_with(vec![data_set]);
    chart
        .set_highlights(vec![Highlight::new(1.0, 9.5, 0, AxisDependency::Left)])
        .expect("highlights");

    let (frame, outcome) = draw(&mut chart);
    assert_eq!(outcome, DrawOutcome::Rendered { items: 0 });
    assert_eq!(frame.lines().count(), 0);
    assert!(chart.highlights()[0].draw_point().is_none());
}

#[test]
fn highlights_past_the_animated_x_phase_are_skipped() {
    let mut chart = chart_with(vec![prices()]);
    chart.animator_mut().set_phase_x(0.5);
    chart
        .set_highlights(vec![
            Highlight::new(1.0, 9.5, 0, AxisDependency::Left),
            Highlight::new(3.0, 11.0, 0, AxisDependency::Left),
        ])
        .expect("highlights");

    let (_, outcome) = draw(&mut chart);
    assert_eq!(outcome, DrawOutcome::Rendered { items: 1 });
}

#[test]
fn highlight_for_each_data_set_resolves_its_own_entries() {
    let mut other = CandleDataSet::new(
        vec![CandleEntry::new(1.0, 20.0, 22.0, 18.0, 21.0).expect("entry")],
        Some("other"),
    );
    other.set_axis_dependency(AxisDependency::Right);
    let mut chart = chart_with(vec![prices(), other]);
    chart
        .set_highlights(vec![
            Highlight::new(1.0, 9.5, 0, AxisDependency::Left),
            Highlight::new(1.0, 20.0, 1, AxisDependency::Right),
        ])
        .expect("highlights");

    let (_, outcome) = draw(&mut chart);
    assert_eq!(outcome, DrawOutcome::Rendered { items: 2 });
    let second = chart.highlights()[1].draw_point().expect("draw point");
    let expected = chart
        .transformer(AxisDependency::Right)
        .pixel_for_values(1.0, 20.0);
    assert!(second.distance_to(expected) <= 1e-9);
}

#[test]
fn no_highlights_reports_nothing_to_draw() {
    let mut chart = chart_with(vec![prices()]);
    let (_, outcome) = draw(&mut chart);
    assert_eq!(
        outcome,
        DrawOutcome::NotRendered(NotRenderedReason::NoHighlights)
    );
}

#[test]
fn touch_far_from_every_candle_selects_nothing() {
    let mut config = ChartConfig::new(Viewport::new(400, 300));
    config.max_highlight_distance_px = 5.0;
    let mut chart = CandleChart::new(config).expect("chart init");
    chart
        .set_data(CandleData::new(vec![prices()]))
        .expect("data");

    let candle = chart
        .transformer(AxisDependency::Left)
        .pixel_for_values(2.0, 8.5);
    assert!(
        chart
            .highlight_at_pixel(Point::new(candle.x, candle.y - 50.0))
            .is_none()
    );
    let hit = chart
        .highlight_at_pixel(Point::new(candle.x + 1.0, candle.y))
        .expect("nearby touch");
    assert_eq!(hit.x, 2.0);
}

#[test]
fn all_zero_dash_is_rejected_for_the_cross_hair() {
    let style = HighlightStyle {
        dash: Some(DashPattern::new(0.0, &[0.0, 0.0])),
        ..HighlightStyle::default()
    };
    assert!(prices().with_highlight_style(style).is_err());
}
