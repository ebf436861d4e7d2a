use candle_chart::accessibility::NullAccessibilityHost;
use candle_chart::api::{CandleChart, ChartConfig};
use candle_chart::core::{CandleData, CandleDataSet, CandleEntry, Point, Rounding, Viewport};
use candle_chart::render::RecordingContext;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_entries(count: usize) -> Vec<CandleEntry> {
    (0..count)
        .map(|i| {
            let x = i as f64;
            let base = 100.0 + x * 0.05;
            let open = base;
            let close = if i % 2 == 0 { base + 1.0 } else { base - 1.0 };
            let low = open.min(close) - 0.75;
            let high = open.max(close) + 0.75;
            CandleEntry::new(x, open, high, low, close).expect("valid generated entry")
        })
        .collect()
}

fn chart_with(count: usize) -> CandleChart {
    let config = ChartConfig::new(Viewport::new(1920, 1080));
    let mut chart = CandleChart::new(config).expect("chart init");
    chart
        .set_data(CandleData::new(vec![CandleDataSet::new(
            generated_entries(count),
            Some("bench"),
        )]))
        .expect("data");
    chart
}

fn bench_draw_10k(c: &mut Criterion) {
    let mut chart = chart_with(10_000);
    let mut ctx = RecordingContext::new(Viewport::new(1920, 1080));

    c.bench_function("candle_draw_10k", |b| {
        b.iter(|| {
            ctx.clear();
            let report = chart.draw(&mut ctx, &mut NullAccessibilityHost);
            black_box(report);
        })
    });
}

fn bench_draw_zoomed_window(c: &mut Criterion) {
    let mut chart = chart_with(10_000);
    chart.zoom(100.0, 1.0, Point::new(960.0, 540.0));
    let mut ctx = RecordingContext::new(Viewport::new(1920, 1080));

    c.bench_function("candle_draw_zoomed_100_of_10k", |b| {
        b.iter(|| {
            ctx.clear();
            let report = chart.draw(&mut ctx, &mut NullAccessibilityHost);
            black_box(report);
        })
    });
}

fn bench_entry_lookup(c: &mut Criterion) {
    let data_set = CandleDataSet::new(generated_entries(100_000), None);

    c.bench_function("entry_index_for_x_100k", |b| {
        b.iter(|| {
            let _ = data_set.entry_index_for_x(
                black_box(54_321.4),
                black_box(Some(100.0)),
                Rounding::Closest,
            );
        })
    });
}

criterion_group!(
    benches,
    bench_draw_10k,
    bench_draw_zoomed_window,
    bench_entry_lookup
);
criterion_main!(benches);
