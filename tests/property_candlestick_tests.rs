use candle_chart::accessibility::NullAccessibilityHost;
use candle_chart::api::{CandleChart, ChartConfig};
use candle_chart::core::{
    CandleData, CandleDataSet, CandleDirection, CandleEntry, CandleStyle, Point, Rounding,
    Viewport,
};
use candle_chart::render::{Color, RecordingContext};
use proptest::prelude::*;

fn generated_entries(count: usize, seed: f64) -> Vec<CandleEntry> {
    (0..count)
        .map(|i| {
            let x = i as f64;
            let open = 50.0 + (x * 0.7 + seed).sin() * 10.0;
            let close = 50.0 + (x * 1.3 + seed).cos() * 10.0;
            let low = open.min(close) - 1.0;
            let high = open.max(close) + 1.0;
            CandleEntry::new(x, open, high, low, close).expect("valid generated candle")
        })
        .collect()
}

proptest! {
    #[test]
    fn direction_is_a_strict_three_way_comparison(
        open in -1_000.0f64..1_000.0,
        close in -1_000.0f64..1_000.0,
    ) {
        let low = open.min(close) - 1.0;
        let high = open.max(close) + 1.0;
        let entry = CandleEntry::new(0.0, open, high, low, close).expect("entry");
        let expected = if close > open {
            CandleDirection::Increasing
        } else if close < open {
            CandleDirection::Decreasing
        } else {
            CandleDirection::Neutral
        };
        prop_assert_eq!(entry.direction(), expected);
    }

    #[test]
    fn explicit_direction_color_wins_over_palette(
        index in 0usize..64,
        palette_len in 1usize..6,
        use_override in any::<bool>(),
    ) {
        let palette: Vec<Color> = (0..palette_len)
            .map(|i| Color::rgb(i as f64 / 10.0, 0.5, 0.5))
            .collect();
        let override_color = Color::rgb(0.9, 0.1, 0.1);
        let style = CandleStyle {
            decreasing_color: use_override.then_some(override_color),
            palette: palette.clone(),
            ..CandleStyle::default()
        };

        let color = style.direction_color(CandleDirection::Decreasing, index);
        if use_override {
            prop_assert_eq!(color, override_color);
        } else {
            prop_assert_eq!(color, palette[index % palette_len]);
        }
        prop_assert_eq!(
            style.direction_color(CandleDirection::Increasing, index),
            palette[index % palette_len]
        );
    }

    #[test]
    fn drawn_candles_stay_within_the_visible_window(
        count in 2usize..80,
        seed in 0.0f64..10.0,
        zoom in 1.0f64..8.0,
        pan in 0.0f64..1.0,
    ) {
        let mut chart = CandleChart::new(ChartConfig::new(Viewport::new(640, 360)))
            .expect("chart init");
        chart
            .set_data(CandleData::new(vec![CandleDataSet::new(
                generated_entries(count, seed),
                None,
            )]))
            .expect("data");
        let content = chart.viewport_handler().content_rect();
        chart.zoom(zoom, 1.0, Point::new(content.x, content.max_y()));
        chart.translate(-pan * content.width * (zoom - 1.0), 0.0);

        let mut ctx = RecordingContext::new(Viewport::new(640, 360));
        let report = chart.draw(&mut ctx, &mut NullAccessibilityHost);
        let drawn = report.data.items();
        prop_assert!(drawn >= 1);
        prop_assert!(drawn <= count);

        // Every visited candle lies within one candle width of the window.
        let low = chart.lowest_visible_x();
        let high = chart.highest_visible_x();
        let elements = chart.accessibility_elements();
        for element in elements.iter().filter(|e| !e.is_header) {
            let x: f64 = element
                .label
                .split(' ')
                .next()
                .and_then(|token| token.parse().ok())
                .expect("label starts with x");
            prop_assert!(x >= low - 1.0 && x <= high + 1.0, "x {} outside {}..{}", x, low, high);
        }
        prop_assert!(ctx.frame().validate().is_ok());
    }

    #[test]
    fn rounded_lookups_bracket_the_query(
        count in 1usize..50,
        query in -5.0f64..60.0,
    ) {
        let data_set = CandleDataSet::new(generated_entries(count, 1.0), None);
        let down = data_set
            .entry_for_x_value(query, None, Rounding::Down)
            .expect("down")
            .x();
        let up = data_set
            .entry_for_x_value(query, None, Rounding::Up)
            .expect("up")
            .x();

        prop_assert!(down <= up);
        prop_assert!(down <= query.max(0.0));
        if query <= (count - 1) as f64 {
            prop_assert!(up >= query);
        }
    }
}
