use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    EllipsePrimitive, ImagePrimitive, LinePrimitive, RectPrimitive, TextPrimitive,
};

/// One recorded drawing call, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SaveState,
    RestoreState,
    FillRect(RectPrimitive),
    StrokeLine(LinePrimitive),
    Ellipse(EllipsePrimitive),
    Text(TextPrimitive),
    Image(ImagePrimitive),
}

/// Backend-agnostic recording of one chart draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_command(mut self, command: DrawCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let mut depth = 0_usize;
        for command in &self.commands {
            match command {
                DrawCommand::SaveState => depth += 1,
                DrawCommand::RestoreState => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        ChartError::InvalidData("restore without matching save".to_owned())
                    })?;
                }
                DrawCommand::FillRect(rect) => rect.validate()?,
                DrawCommand::StrokeLine(line) => line.validate()?,
                DrawCommand::Ellipse(ellipse) => ellipse.validate()?,
                DrawCommand::Text(text) => text.validate()?,
                DrawCommand::Image(image) => image.validate()?,
            }
        }
        if depth != 0 {
            return Err(ChartError::InvalidData(format!(
                "{depth} saved state(s) never restored"
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillRect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::StrokeLine(line) => Some(line),
            _ => None,
        })
    }

    pub fn ellipses(&self) -> impl Iterator<Item = &EllipsePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Ellipse(ellipse) => Some(ellipse),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImagePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Image(image) => Some(image),
            _ => None,
        })
    }
}
