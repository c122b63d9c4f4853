//! Preset file loading for the demo host.
//!
//! Opening a preset file runs the native dialog and the read on a background
//! task; the result comes back over the file operation channel and is
//! applied on the next frame.

use std::path::PathBuf;

use super::state::{FileOperationResult, PreviewApp};
use crate::constants::*;
use crate::node::cached_widget;
use crate::presets::is_header;
use crate::types::WidgetValue;
use eframe::egui;

impl PreviewApp {
    /// Applies finished file operations and starts requested ones.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for requesting repaints
    pub fn handle_pending_operations(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.file.file_operation_receiver.try_recv() {
            match result {
                FileOperationResult::PresetsLoaded(path, presets) => {
                    log::info!("loaded {} presets from {}", presets.len(), path.display());
                    self.apply_presets(presets, Some(path));
                    self.file.last_error = None;
                }
                FileOperationResult::OperationFailed(error) => {
                    log::warn!("file operation failed: {error}");
                    self.file.last_error = Some(error);
                }
            }
        }

        if std::mem::take(&mut self.file.pending_open) {
            self.spawn_open_presets(ctx);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn_open_presets(&self, ctx: &egui::Context) {
        let ctx = ctx.clone();
        let sender = self.file.file_operation_sender.clone();
        tokio::spawn(async move {
            if let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter("Preset list", &["txt"])
                .pick_file()
                .await
            {
                let path = handle.path().to_path_buf();
                let result = match crate::presets::load_preset_list(&path) {
                    Ok(presets) => FileOperationResult::PresetsLoaded(path, presets),
                    Err(err) => FileOperationResult::OperationFailed(format!("{err:#}")),
                };
                let _ = sender.send(result);
            }
            ctx.request_repaint();
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn_open_presets(&self, _ctx: &egui::Context) {
        let _ = self.file.file_operation_sender.send(FileOperationResult::OperationFailed(
            "opening preset files is not supported in the browser".to_string(),
        ));
    }

    /// Replaces the preset selector entries.
    ///
    /// If the current selection is no longer offered, the first entry that is
    /// not a group header is selected instead and the hooks are notified.
    ///
    /// # Arguments
    ///
    /// * `presets` - New selector entries
    /// * `path` - File the entries came from, remembered for the next start
    pub fn apply_presets(&mut self, presets: Vec<String>, path: Option<PathBuf>) {
        self.presets = presets;
        if path.is_some() {
            self.config.presets_path = path;
        }

        let current = self
            .preview()
            .and_then(|preview| {
                cached_widget(&self.node, preview.widgets().resolution, RESOLUTION_WIDGET)
            })
            .or_else(|| self.node.widget(RESOLUTION_WIDGET))
            .map(|w| w.value.as_text());
        let Some(current) = current else {
            return;
        };
        if self.presets.contains(&current) {
            return;
        }
        if let Some(first) = self.presets.iter().find(|p| !is_header(p)).cloned() {
            log::debug!("{current:?} not in the new list, selecting {first:?}");
            self.set_widget_value(RESOLUTION_WIDGET, WidgetValue::Text(first));
        }
    }
}
