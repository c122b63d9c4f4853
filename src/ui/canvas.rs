//! Canvas interaction and navigation.
//!
//! Handles panning, zooming, collapsing the node by double-clicking its title
//! bar, and running the draw hooks against an [`EguiSurface`].

use super::rendering::EguiSurface;
use super::state::PreviewApp;
use crate::constants::*;
use crate::hooks::NodeHook;
use eframe::egui;

impl PreviewApp {
    /// Converts world coordinates to screen coordinates accounting for zoom and pan.
    ///
    /// # Arguments
    ///
    /// * `world_pos` - Position in world space
    ///
    /// # Returns
    ///
    /// The corresponding position in screen space (pixels)
    pub fn world_to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        world_pos * self.canvas.zoom_factor + self.canvas.offset
    }

    /// Converts screen coordinates to world coordinates accounting for zoom and pan.
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        (screen_pos - self.canvas.offset) / self.canvas.zoom_factor
    }

    /// Pans the canvas while the primary or middle button drags empty space.
    ///
    /// # Arguments
    ///
    /// * `response` - The response from the canvas widget
    pub fn handle_canvas_panning(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.canvas.offset += response.drag_delta();
        }
    }

    /// Zooms with the scroll wheel, keeping the point under the cursor fixed.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_canvas_zoom(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta == 0.0 {
            return;
        }
        let Some(mouse_pos) = ui.input(|i| i.pointer.hover_pos()) else {
            return;
        };
        if !response.rect.contains(mouse_pos) {
            return;
        }

        let world_before = self.screen_to_world(mouse_pos);
        let zoom_delta = if scroll_delta > 0.0 { 0.05 } else { -0.05 };
        let old_zoom = self.canvas.zoom_factor;
        self.canvas.zoom_factor = (old_zoom + zoom_delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if (self.canvas.zoom_factor - old_zoom).abs() > f32::EPSILON {
            let world_after = self.world_to_screen(world_before);
            self.canvas.offset += mouse_pos - world_after;
        }
    }

    /// Flips the node between collapsed and expanded.
    pub fn toggle_collapsed(&mut self) {
        self.node.collapsed = !self.node.collapsed;
        self.node.dirty = true;
        log::debug!("node collapsed: {}", self.node.collapsed);
    }

    /// Draws the canvas: grid, node body, then the node's foreground hooks.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

        self.handle_canvas_zoom(ui, &response);
        self.handle_canvas_panning(&response);

        if response.double_clicked() {
            let on_title = response
                .interact_pointer_pos()
                .is_some_and(|pos| self.title_bar_rect().contains(pos));
            if on_title {
                self.toggle_collapsed();
            }
        }

        if self.canvas.show_grid {
            self.draw_grid(&painter, response.rect);
        }
        self.draw_node_body(&painter);

        let size_before = self.node.size;
        let origin = self.node_screen_rect().min;
        let texture = self.sample_texture.as_ref().map(|t| t.id());
        if let Some(hooks) = self.hooks.as_mut() {
            let mut surface = EguiSurface::new(&painter, origin, self.canvas.zoom_factor, texture);
            hooks.on_draw_foreground(&mut self.node, &mut surface);
        }

        // A resize inside the draw hooks is only visible on the next frame.
        if self.node.take_dirty() || self.node.size != size_before {
            ui.ctx().request_repaint();
        }
    }
}
