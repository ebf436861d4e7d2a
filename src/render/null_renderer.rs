use crate::error::ChartResult;
use crate::render::{DrawCommand, RenderFrame, Renderer};

/// No-op renderer used by tests and headless chart usage.
///
/// It still validates frame content so tests catch invalid geometry before a
/// real backend sees it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_rect_count: usize,
    pub last_line_count: usize,
    pub last_ellipse_count: usize,
    pub last_text_count: usize,
    pub last_image_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        *self = Self::default();
        for command in &frame.commands {
            match command {
                DrawCommand::FillRect(_) => self.last_rect_count += 1,
                DrawCommand::StrokeLine(_) => self.last_line_count += 1,
                DrawCommand::Ellipse(_) => self.last_ellipse_count += 1,
                DrawCommand::Text(_) => self.last_text_count += 1,
                DrawCommand::Image(_) => self.last_image_count += 1,
                DrawCommand::SaveState | DrawCommand::RestoreState => {}
            }
        }
        Ok(())
    }
}
