mod context;
mod frame;
mod null_renderer;
mod primitives;

pub use context::{DrawContext, RecordingContext};
pub use frame::{DrawCommand, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, DashPattern, EllipsePrimitive, ImagePrimitive, LinePrimitive, RectPrimitive,
    TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any backend that replays a recorded frame.
///
/// Series renderers draw into a [`DrawContext`]; a [`RecordingContext`] turns
/// that into a deterministic `RenderFrame` so backends stay isolated from
/// chart domain logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
