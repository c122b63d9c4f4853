//! Canvas rendering for the demo host.
//!
//! [`EguiSurface`] maps the preview's node-relative drawing calls onto an
//! egui painter. The node body, title bar and grid are drawn directly.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Stroke, TextureId};
use eframe::epaint::StrokeKind;

use super::state::PreviewApp;
use crate::constants::*;
use crate::image::SampleImage;
use crate::node::HostNode;
use crate::surface::{CompositeMode, DrawingSurface};

#[derive(Debug, Clone, Copy)]
struct SurfaceState {
    fill: Color32,
    stroke: Stroke,
    composite: CompositeMode,
    clip: Rect,
}

/// A [`DrawingSurface`] that paints through an egui painter.
///
/// Node-relative coordinates are scaled by the canvas zoom and offset by the
/// node's screen origin.
pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
    zoom: f32,
    texture: Option<TextureId>,
    state: SurfaceState,
    stack: Vec<SurfaceState>,
}

impl<'a> EguiSurface<'a> {
    /// Creates a surface drawing at `origin` with the given zoom.
    ///
    /// # Arguments
    ///
    /// * `painter` - Painter for the canvas
    /// * `origin` - Screen position of the node's (0, 0)
    /// * `zoom` - Canvas zoom factor
    /// * `texture` - Texture backing the sample image, if uploaded
    pub fn new(
        painter: &'a egui::Painter,
        origin: Pos2,
        zoom: f32,
        texture: Option<TextureId>,
    ) -> Self {
        Self {
            painter,
            origin,
            zoom,
            texture,
            state: SurfaceState {
                fill: Color32::BLACK,
                stroke: Stroke::new(1.0, Color32::BLACK),
                composite: CompositeMode::SourceOver,
                clip: painter.clip_rect(),
            },
            stack: Vec::new(),
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.origin + pos.to_vec2() * self.zoom
    }

    fn to_screen_rect(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(rect.min), self.to_screen(rect.max))
    }

    fn clipped(&self) -> egui::Painter {
        self.painter.with_clip_rect(self.state.clip)
    }
}

/// Color that darkens the way `color` would under multiply blending.
///
/// egui has no multiply blend, so a neutral color is replaced by black at
/// the coverage multiply would darken by. White becomes fully transparent.
pub fn multiply_overlay(color: Color32) -> Color32 {
    let darkest = color.r().min(color.g()).min(color.b());
    Color32::from_black_alpha(255 - darkest)
}

impl DrawingSurface for EguiSurface<'_> {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_fill_color(&mut self, color: Color32) {
        self.state.fill = color;
    }

    fn set_stroke(&mut self, color: Color32, width: f32) {
        self.state.stroke = Stroke::new(width * self.zoom, color);
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.state.composite = mode;
    }

    fn fill_rect(&mut self, rect: Rect) {
        let color = match self.state.composite {
            CompositeMode::SourceOver => self.state.fill,
            CompositeMode::Multiply => multiply_overlay(self.state.fill),
        };
        self.clipped()
            .rect_filled(self.to_screen_rect(rect), 0.0, color);
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.clipped().rect_stroke(
            self.to_screen_rect(rect),
            0.0,
            self.state.stroke,
            StrokeKind::Inside,
        );
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clip = self.state.clip.intersect(self.to_screen_rect(rect));
    }

    fn draw_image(&mut self, _image: &SampleImage, dest: Rect) {
        let Some(texture) = self.texture else {
            return;
        };
        let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        self.clipped()
            .image(texture, self.to_screen_rect(dest), uv, Color32::WHITE);
    }

    fn fill_text(&mut self, text: &str, pos: Pos2, align: Align2, font_size: f32) {
        self.clipped().text(
            self.to_screen(pos),
            align,
            text,
            FontId::proportional(font_size * self.zoom),
            self.state.fill,
        );
    }
}

/// Builds the sample image shown inside the resolution box: a color ramp
/// with a centered disc, so scaling and cropping are easy to see.
pub fn sample_color_image() -> egui::ColorImage {
    let size = SAMPLE_IMAGE_SIZE;
    let center = size as f32 / 2.0;
    let radius = size as f32 / 3.0;
    let mut pixels = Vec::with_capacity(size * size * 4);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            if dx * dx + dy * dy < radius * radius {
                pixels.extend_from_slice(&[250, 200, 60, 255]);
            } else {
                let r = (x * 255 / size) as u8;
                let g = (y * 255 / size) as u8;
                pixels.extend_from_slice(&[r, g, 180, 255]);
            }
        }
    }
    egui::ColorImage::from_rgba_unmultiplied([size, size], &pixels)
}

impl PreviewApp {
    /// Screen rectangle of the node body, below the title bar.
    pub fn node_screen_rect(&self) -> Rect {
        let min = self.world_to_screen(egui::pos2(NODE_ORIGIN.0, NODE_ORIGIN.1));
        let (width, height) = self.node.size();
        Rect::from_min_size(min, egui::vec2(width, height) * self.canvas.zoom_factor)
    }

    /// Screen rectangle of the node title bar.
    pub fn title_bar_rect(&self) -> Rect {
        let body = self.node_screen_rect();
        let height = TITLE_BAR_HEIGHT * self.canvas.zoom_factor;
        Rect::from_min_max(
            egui::pos2(body.min.x, body.min.y - height),
            egui::pos2(body.max.x, body.min.y),
        )
    }

    /// Draws the node's title bar and, unless collapsed, its body with one
    /// labelled row per visible widget.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    pub fn draw_node_body(&self, painter: &egui::Painter) {
        let zoom = self.canvas.zoom_factor;
        let title = self.title_bar_rect();
        let (title_fill, body_fill, text_color) = if self.dark_mode {
            (
                Color32::from_gray(60),
                Color32::from_gray(40),
                Color32::from_gray(220),
            )
        } else {
            (
                Color32::from_gray(200),
                Color32::from_gray(235),
                Color32::from_gray(30),
            )
        };
        let font = FontId::proportional(12.0 * zoom);

        painter.rect_filled(title, NODE_CORNER_RADIUS, title_fill);
        painter.text(
            egui::pos2(title.min.x + 8.0 * zoom, title.center().y),
            Align2::LEFT_CENTER,
            &self.node.node_type,
            font.clone(),
            text_color,
        );
        if self.node.is_collapsed() {
            return;
        }

        let body = self.node_screen_rect();
        painter.rect_filled(body, NODE_CORNER_RADIUS, body_fill);
        painter.rect_stroke(
            body.union(title),
            NODE_CORNER_RADIUS,
            Stroke::new(1.0, Color32::from_gray(90)),
            StrokeKind::Inside,
        );

        let mut y = body.min.y;
        for widget in &self.node.widgets {
            let height = widget.layout_height(WIDGET_ROW_HEIGHT) * zoom;
            if height <= 0.0 {
                continue;
            }
            let center_y = y + height / 2.0;
            painter.text(
                egui::pos2(body.min.x + 10.0 * zoom, center_y),
                Align2::LEFT_CENTER,
                &widget.name,
                font.clone(),
                text_color,
            );
            painter.text(
                egui::pos2(body.max.x - 10.0 * zoom, center_y),
                Align2::RIGHT_CENTER,
                widget.value.as_text(),
                font.clone(),
                text_color,
            );
            y += height;
        }
    }

    /// Draws a zoom-aware grid behind the node.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    pub fn draw_grid(&self, painter: &egui::Painter, canvas_rect: Rect) {
        let spacing = GRID_SIZE * self.canvas.zoom_factor;
        if spacing < 4.0 {
            return;
        }
        let color = if self.dark_mode {
            Color32::from_gray(45)
        } else {
            Color32::from_gray(220)
        };
        let stroke = Stroke::new(1.0, color);

        let start_x = canvas_rect.min.x + self.canvas.offset.x.rem_euclid(spacing);
        let mut x = start_x;
        while x < canvas_rect.max.x {
            painter.line_segment(
                [
                    egui::pos2(x, canvas_rect.min.y),
                    egui::pos2(x, canvas_rect.max.y),
                ],
                stroke,
            );
            x += spacing;
        }

        let start_y = canvas_rect.min.y + self.canvas.offset.y.rem_euclid(spacing);
        let mut y = start_y;
        while y < canvas_rect.max.y {
            painter.line_segment(
                [
                    egui::pos2(canvas_rect.min.x, y),
                    egui::pos2(canvas_rect.max.x, y),
                ],
                stroke,
            );
            y += spacing;
        }
    }
}
