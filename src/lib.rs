//! # Resolution Preview
//!
//! A live preview for resolution picker nodes in a node-graph editor. The
//! node offers a preset selector plus custom width/height fields; the
//! preview draws, under the node's widgets, a frame showing the selected
//! aspect ratio with an optional sample image and checkerboard overlay.
//!
//! ## Features
//! - Preset parsing, custom dimensions snapped to a multiple, dimension swap
//! - Preview frame placement scaled to the node size
//! - Custom fields shown only in custom mode, with a deferred node resize
//! - Chained lifecycle hooks so other handlers can share the node type
//! - A demo host built on eframe

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod extension;
pub mod hooks;
pub mod image;
pub mod layout;
pub mod node;
pub mod numeric;
pub mod presets;
pub mod renderer;
pub mod resolver;
pub mod surface;
pub mod types;
pub mod visibility;
mod ui;

// Re-export public types and functions
pub use config::ExtensionConfig;
pub use extension::ResolutionPreview;
pub use hooks::{HookChain, NodeHook};
pub use node::{EditorNode, HostNode, WidgetCache};
pub use resolver::{compute_output_resolution, get_active_resolution, ResolutionSource};
pub use surface::{DrawingSurface, RecordingSurface};
pub use types::*;
pub use ui::{PersistedState, PreviewApp};

/// Runs the demo application.
///
/// Restores the previous session's node from eframe storage when present.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use resolution_preview::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Resolution Preview",
        options,
        Box::new(|cc| Ok(Box::new(PreviewApp::from_storage(cc.storage)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_resolution_default() {
        let resolution = ActiveResolution::default();
        assert_eq!(resolution, ActiveResolution::new(512, 512));
        assert_eq!(resolution.to_string(), "512×512");
    }

    #[test]
    fn test_preview_attaches_by_default() {
        let config = ExtensionConfig::default();
        let node = EditorNode::resolution_picker(&presets::builtin_presets());
        assert!(ResolutionPreview::for_node_type(&config, &node.node_type).is_some());
    }
}
