//! Demo host for the resolution preview.
//!
//! Shows a single resolution picker node on a pannable canvas, with egui
//! controls for each visible widget in a side panel.
//!
//! # Module Organization
//!
//! - `state` - Application state and persistence
//! - `file_ops` - Preset file loading
//! - `canvas` - Canvas navigation and the draw pass
//! - `rendering` - The egui drawing surface and node body drawing

mod canvas;
mod file_ops;
mod rendering;
mod state;

use rendering::sample_color_image;
pub use state::{PersistedState, PreviewApp};

use crate::constants::*;
use crate::hooks::NodeHook;
use crate::image::ImageState;
use crate::presets::is_header;
use crate::renderer::PreviewState;
use crate::types::{Widget, WidgetValue};
use eframe::egui;

impl eframe::App for PreviewApp {
    /// Persist the node and extension settings between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.persisted_state().to_json() {
            Ok(json) => storage.set_string(STORAGE_KEY, json),
            Err(err) => log::error!("failed to serialize app state: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.draw_ui(ctx);
    }
}

impl PreviewApp {
    /// Runs one frame of the UI.
    ///
    /// Split out of `update` so headless tests can drive frames without an
    /// `eframe::Frame`.
    pub fn draw_ui(&mut self, ctx: &egui::Context) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.handle_pending_operations(ctx);
        self.load_sample_image(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::SidePanel::right("properties_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                self.draw_properties_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }

    /// Uploads the sample image once the preview has asked for it and tells
    /// the hooks it finished loading.
    fn load_sample_image(&mut self, ctx: &egui::Context) {
        if self.sample_texture.is_some() {
            return;
        }
        let pending = self
            .preview()
            .is_some_and(|preview| preview.image().state() == ImageState::Pending);
        if !pending {
            return;
        }

        let image = sample_color_image();
        let [width, height] = image.size;
        self.sample_texture =
            Some(ctx.load_texture("sample_image", image, egui::TextureOptions::LINEAR));
        if let Some(hooks) = self.hooks.as_mut() {
            hooks.on_image_loaded(&mut self.node, width as u32, height as u32);
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open presets…").clicked() {
                self.file.pending_open = true;
            }
            if ui.button("Built-in presets").clicked() {
                self.config.presets_path = None;
                self.apply_presets(crate::presets::builtin_presets(), None);
            }
            ui.separator();
            ui.checkbox(&mut self.canvas.show_grid, "Grid");
            ui.checkbox(&mut self.dark_mode, "Dark mode");
            if ui.button("Reset view").clicked() {
                self.canvas = state::CanvasState::default();
            }
            if let Some(error) = &self.file.last_error {
                ui.separator();
                ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error.as_str());
            }
        });
    }

    fn draw_properties_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Resolution picker");
        ui.add_space(4.0);

        let widgets: Vec<Widget> = self
            .node
            .widgets
            .iter()
            .filter(|w| !w.hidden)
            .cloned()
            .collect();
        let mut changes = Vec::new();
        egui::Grid::new("widget_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for widget in &widgets {
                    ui.label(widget.name.as_str());
                    if let Some(value) = self.widget_control(ui, widget) {
                        changes.push((widget.name.clone(), value));
                    }
                    ui.end_row();
                }
            });
        for (name, value) in changes {
            self.set_widget_value(&name, value);
        }

        ui.separator();
        self.draw_resolution_summary(ui);
    }

    /// Draws the control for one widget.
    ///
    /// # Returns
    ///
    /// The new value when the user changed it this frame.
    fn widget_control(&self, ui: &mut egui::Ui, widget: &Widget) -> Option<WidgetValue> {
        match widget.name.as_str() {
            RESOLUTION_WIDGET => {
                let current = widget.value.as_text();
                let mut selected = current.clone();
                egui::ComboBox::from_id_salt(RESOLUTION_WIDGET)
                    .selected_text(selected.as_str())
                    .width(180.0)
                    .show_ui(ui, |ui| {
                        for entry in &self.presets {
                            if is_header(entry) {
                                ui.label(egui::RichText::new(entry.as_str()).weak());
                            } else {
                                ui.selectable_value(&mut selected, entry.clone(), entry.as_str());
                            }
                        }
                    });
                (selected != current).then(|| WidgetValue::Text(selected))
            }
            SNAP_WIDGET => {
                let current = widget.value.as_text();
                let mut selected = current.clone();
                egui::ComboBox::from_id_salt(SNAP_WIDGET)
                    .selected_text(selected.as_str())
                    .show_ui(ui, |ui| {
                        for choice in SNAP_CHOICES {
                            ui.selectable_value(&mut selected, choice.to_string(), choice);
                        }
                    });
                (selected != current).then(|| WidgetValue::Text(selected))
            }
            CUSTOM_WIDTH_WIDGET | CUSTOM_HEIGHT_WIDGET => {
                let mut value = match &widget.value {
                    WidgetValue::Number(number) => *number,
                    other => other
                        .as_text()
                        .trim()
                        .parse()
                        .unwrap_or(f64::from(FALLBACK_RESOLUTION)),
                };
                let range = f64::from(MIN_RESOLUTION)..=f64::from(MAX_RESOLUTION);
                ui.add(egui::DragValue::new(&mut value).range(range).speed(8.0))
                    .changed()
                    .then_some(WidgetValue::Number(value))
            }
            _ => {
                let mut flag = widget.value.as_bool();
                ui.checkbox(&mut flag, "")
                    .changed()
                    .then_some(WidgetValue::Bool(flag))
            }
        }
    }

    fn draw_resolution_summary(&self, ui: &mut egui::Ui) {
        let Some(preview) = self.preview() else {
            ui.label("Preview not attached to this node type.");
            return;
        };
        let Some(state) = PreviewState::read(&self.node, preview.widgets()) else {
            ui.label("No resolution selector.");
            return;
        };

        egui::Grid::new("resolution_summary")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("Preview");
                ui.label(state.source.resolve().to_string());
                ui.end_row();
                ui.label("Output");
                ui.label(state.source.output().to_string());
                ui.end_row();
                ui.label("Node size");
                let (width, height) = self.node.size;
                ui.label(format!("{width:.0}×{height:.0}"));
                ui.end_row();
            });
    }
}

#[cfg(test)]
mod tests;
