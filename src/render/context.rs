use crate::core::Viewport;
use crate::render::{
    DrawCommand, EllipsePrimitive, ImagePrimitive, LinePrimitive, RectPrimitive, RenderFrame,
    TextPrimitive,
};

/// Immediate-mode drawing surface the series renderers issue calls into.
///
/// Each primitive carries its own color and stroke state, so implementations
/// only need `save_state`/`restore_state` for clipping and transforms of their
/// own.
pub trait DrawContext {
    fn save_state(&mut self);
    fn restore_state(&mut self);
    fn fill_rect(&mut self, rect: RectPrimitive);
    fn stroke_line(&mut self, line: LinePrimitive);
    fn draw_ellipse(&mut self, ellipse: EllipsePrimitive);
    fn draw_text(&mut self, text: TextPrimitive);
    fn draw_image(&mut self, image: ImagePrimitive);
}

/// Context that records every call into a [`RenderFrame`].
///
/// Used for headless rendering and tests; the recorded frame can be replayed
/// on any [`crate::render::Renderer`].
#[derive(Debug, Clone)]
pub struct RecordingContext {
    frame: RenderFrame,
}

impl RecordingContext {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            frame: RenderFrame::new(viewport),
        }
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    #[must_use]
    pub fn into_frame(self) -> RenderFrame {
        self.frame
    }

    pub fn clear(&mut self) {
        self.frame.commands.clear();
    }
}

impl DrawContext for RecordingContext {
    fn save_state(&mut self) {
        self.frame.commands.push(DrawCommand::SaveState);
    }

    fn restore_state(&mut self) {
        self.frame.commands.push(DrawCommand::RestoreState);
    }

    fn fill_rect(&mut self, rect: RectPrimitive) {
        self.frame.commands.push(DrawCommand::FillRect(rect));
    }

    fn stroke_line(&mut self, line: LinePrimitive) {
        self.frame.commands.push(DrawCommand::StrokeLine(line));
    }

    fn draw_ellipse(&mut self, ellipse: EllipsePrimitive) {
        self.frame.commands.push(DrawCommand::Ellipse(ellipse));
    }

    fn draw_text(&mut self, text: TextPrimitive) {
        self.frame.commands.push(DrawCommand::Text(text));
    }

    fn draw_image(&mut self, image: ImagePrimitive) {
        self.frame.commands.push(DrawCommand::Image(image));
    }
}
