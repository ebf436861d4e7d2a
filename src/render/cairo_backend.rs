use std::collections::HashMap;
use std::f64::consts::PI;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawCommand, EllipsePrimitive, ImagePrimitive, LinePrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub ellipses_drawn: usize,
    pub texts_drawn: usize,
    pub images_drawn: usize,
    pub images_missing: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Replays a recorded [`RenderFrame`] either onto an offscreen image surface
/// through `Renderer::render` or onto an external Cairo context through
/// `CairoContextRenderer`. Icons are resolved by name from surfaces registered
/// with [`CairoRenderer::register_icon`].
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    icons: HashMap<String, ImageSurface>,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            icons: HashMap::new(),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    pub fn register_icon(&mut self, name: impl Into<String>, surface: ImageSurface) {
        self.icons.insert(name.into(), surface);
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for command in &frame.commands {
            match command {
                DrawCommand::SaveState => context
                    .save()
                    .map_err(|err| map_backend_error("failed to save state", err))?,
                DrawCommand::RestoreState => context
                    .restore()
                    .map_err(|err| map_backend_error("failed to restore state", err))?,
                DrawCommand::FillRect(rect) => {
                    let r = rect.rect;
                    apply_color(context, rect.fill_color);
                    context.rectangle(r.x, r.y, r.width, r.height);
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                    stats.rects_drawn += 1;
                }
                DrawCommand::StrokeLine(line) => {
                    stroke_line(context, line)?;
                    stats.lines_drawn += 1;
                }
                DrawCommand::Ellipse(ellipse) => {
                    if draw_ellipse(context, *ellipse)? {
                        stats.ellipses_drawn += 1;
                    }
                }
                DrawCommand::Text(text) => {
                    draw_text(context, text);
                    stats.texts_drawn += 1;
                }
                DrawCommand::Image(image) => {
                    if self.draw_image(context, image)? {
                        stats.images_drawn += 1;
                    } else {
                        stats.images_missing += 1;
                    }
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }

    fn draw_image(&self, context: &Context, image: &ImagePrimitive) -> ChartResult<bool> {
        let Some(surface) = self.icons.get(&image.icon.name) else {
            tracing::debug!(icon = %image.icon.name, "icon not registered; skipped");
            return Ok(false);
        };
        let bounds = image.bounds();
        let (src_w, src_h) = (f64::from(surface.width()), f64::from(surface.height()));
        if src_w <= 0.0 || src_h <= 0.0 {
            return Ok(false);
        }

        context
            .save()
            .map_err(|err| map_backend_error("failed to save state", err))?;
        context.translate(bounds.x, bounds.y);
        context.scale(bounds.width / src_w, bounds.height / src_h);
        context
            .set_source_surface(surface, 0.0, 0.0)
            .map_err(|err| map_backend_error("failed to set icon source", err))?;
        context
            .paint()
            .map_err(|err| map_backend_error("failed to paint icon", err))?;
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore state", err))?;
        Ok(true)
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn stroke_line(context: &Context, line: &LinePrimitive) -> ChartResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.set_dash(&line.dash.lengths, line.dash.phase);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    let result = context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err));
    context.set_dash(&[], 0.0);
    result
}

/// Returns `false` for degenerate bounds, which Cairo cannot scale into.
fn draw_ellipse(context: &Context, ellipse: EllipsePrimitive) -> ChartResult<bool> {
    let b = ellipse.bounds;
    if b.width <= 0.0 || b.height <= 0.0 {
        return Ok(false);
    }

    context
        .save()
        .map_err(|err| map_backend_error("failed to save state", err))?;
    context.translate(b.mid_x(), b.mid_y());
    context.scale(b.width / 2.0, b.height / 2.0);
    context.new_path();
    context.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore state", err))?;

    if let Some(fill) = ellipse.fill_color {
        apply_color(context, fill);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill ellipse", err))?;
    }
    if let Some(stroke) = ellipse.stroke_color {
        apply_color(context, stroke);
        context.set_line_width(ellipse.stroke_width);
        context
            .stroke_preserve()
            .map_err(|err| map_backend_error("failed to stroke ellipse", err))?;
    }
    context.new_path();
    Ok(true)
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };

    apply_color(context, text.color);
    context.move_to(x, text.y);
    pangocairo::functions::show_layout(context, &layout);
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
