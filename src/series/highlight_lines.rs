use crate::core::{HighlightStyle, Point, ViewportHandler};
use crate::render::{DrawContext, LinePrimitive};

/// Draws the cross-hair through `point`: a vertical line across the content
/// height and a horizontal line across the content width, each optional.
pub fn draw_highlight_lines(
    ctx: &mut dyn DrawContext,
    viewport: &ViewportHandler,
    point: Point,
    style: &HighlightStyle,
) {
    let dash = style.dash.clone().unwrap_or_default();

    if style.draw_vertical {
        ctx.stroke_line(
            LinePrimitive::new(
                Point::new(point.x, viewport.content_top()),
                Point::new(point.x, viewport.content_bottom()),
                style.line_width,
                style.color,
            )
            .with_dash(dash.clone()),
        );
    }

    if style.draw_horizontal {
        ctx.stroke_line(
            LinePrimitive::new(
                Point::new(viewport.content_left(), point.y),
                Point::new(viewport.content_right(), point.y),
                style.line_width,
                style.color,
            )
            .with_dash(dash),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::draw_highlight_lines;
    use crate::core::{ContentOffsets, HighlightStyle, Point, Viewport, ViewportHandler};
    use crate::render::{DashPattern, RecordingContext};

    #[test]
    fn draws_both_guides_with_dash() {
        let vp = ViewportHandler::new(Viewport::new(100, 80), ContentOffsets::default())
            .expect("viewport");
        let style = HighlightStyle {
            dash: Some(DashPattern::new(0.0, &[4.0, 2.0])),
            ..HighlightStyle::default()
        };
        let mut ctx = RecordingContext::new(Viewport::new(100, 80));
        draw_highlight_lines(&mut ctx, &vp, Point::new(40.0, 30.0), &style);

        let lines: Vec<_> = ctx.frame().lines().cloned().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].x1, lines[0].y1, lines[0].y2), (40.0, 10.0, 70.0));
        assert_eq!((lines[1].x1, lines[1].x2, lines[1].y1), (10.0, 90.0, 30.0));
        assert!(lines.iter().all(|line| line.dash.lengths.as_slice() == [4.0, 2.0]));
    }

    #[test]
    fn missing_dash_strokes_solid_and_respects_toggles() {
        let vp = ViewportHandler::new(Viewport::new(100, 80), ContentOffsets::default())
            .expect("viewport");
        let style = HighlightStyle {
            draw_horizontal: false,
            ..HighlightStyle::default()
        };
        let mut ctx = RecordingContext::new(Viewport::new(100, 80));
        draw_highlight_lines(&mut ctx, &vp, Point::new(40.0, 30.0), &style);

        let lines: Vec<_> = ctx.frame().lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].dash.is_solid());
    }
}
