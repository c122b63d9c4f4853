//! Drawing surface abstraction.
//!
//! The preview computes geometry and hands it to a [`DrawingSurface`]; the
//! host decides how pixels get drawn. [`RecordingSurface`] keeps the calls as
//! a display list, which is what tests and headless hosts use.

use eframe::egui::{Align2, Color32, Pos2, Rect};

use crate::image::SampleImage;

/// How new drawing combines with what is already on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompositeMode {
    /// Draw on top, replacing what is underneath
    #[default]
    SourceOver,
    /// Multiply with what is underneath; white leaves it unchanged
    Multiply,
}

/// Canvas-style drawing operations the preview relies on.
///
/// State set through `set_*` and `clip_rect` persists until the matching
/// [`restore`](DrawingSurface::restore).
pub trait DrawingSurface {
    /// Pushes the current fill, stroke, composite and clip state.
    fn save(&mut self);

    /// Pops the state pushed by the last [`save`](DrawingSurface::save).
    fn restore(&mut self);

    /// Sets the color used by `fill_rect` and `fill_text`.
    fn set_fill_color(&mut self, color: Color32);

    /// Sets the color and width used by `stroke_rect`.
    fn set_stroke(&mut self, color: Color32, width: f32);

    /// Sets the composite mode for subsequent drawing.
    fn set_composite(&mut self, mode: CompositeMode);

    /// Fills `rect` with the fill color.
    fn fill_rect(&mut self, rect: Rect);

    /// Outlines `rect` with the stroke.
    fn stroke_rect(&mut self, rect: Rect);

    /// Intersects the clip region with `rect`.
    fn clip_rect(&mut self, rect: Rect);

    /// Draws `image` stretched into `dest`.
    fn draw_image(&mut self, image: &SampleImage, dest: Rect);

    /// Draws `text` anchored at `pos` with the given alignment.
    fn fill_text(&mut self, text: &str, pos: Pos2, align: Align2, font_size: f32);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DrawCommand {
    Save,
    Restore,
    FillColor(Color32),
    Stroke { color: Color32, width: f32 },
    Composite(CompositeMode),
    FillRect(Rect),
    StrokeRect(Rect),
    Clip(Rect),
    Image { source: String, dest: Rect },
    Text { text: String, pos: Pos2, align: Align2, font_size: f32 },
}

/// A surface that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Calls in the order they were made
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Creates an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangles passed to `fill_rect`, in order.
    pub fn filled_rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Texts passed to `fill_text`, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether anything was recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl DrawingSurface for RecordingSurface {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn set_fill_color(&mut self, color: Color32) {
        self.commands.push(DrawCommand::FillColor(color));
    }

    fn set_stroke(&mut self, color: Color32, width: f32) {
        self.commands.push(DrawCommand::Stroke { color, width });
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.commands.push(DrawCommand::Composite(mode));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::FillRect(rect));
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::StrokeRect(rect));
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clip(rect));
    }

    fn draw_image(&mut self, image: &SampleImage, dest: Rect) {
        self.commands.push(DrawCommand::Image {
            source: image.source().to_string(),
            dest,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Pos2, align: Align2, font_size: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            align,
            font_size,
        });
    }
}
