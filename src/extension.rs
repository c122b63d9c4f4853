//! The preview attached to resolution picker nodes.
//!
//! [`ResolutionPreview`] is the core [`NodeHook`]. It keeps the custom
//! widgets' visibility in step with the preset selector, resizes the node on
//! the draw pass after a layout change and draws the preview under the
//! widget stack.

use crate::config::ExtensionConfig;
use crate::constants::*;
use crate::hooks::NodeHook;
use crate::image::SampleImage;
use crate::layout::compute_node_size;
use crate::node::{cached_widget, HostNode, WidgetCache};
use crate::numeric::parse_leading_int;
use crate::renderer::{render_preview, PreviewScene};
use crate::surface::DrawingSurface;
use crate::types::{ResolutionMode, WidgetValue};
use crate::visibility::{PendingAction, PendingActions, VisibilityController};

/// Per-node preview state.
#[derive(Debug, Clone)]
pub struct ResolutionPreview {
    config: ExtensionConfig,
    widgets: WidgetCache,
    visibility: VisibilityController,
    image: SampleImage,
    last_scene: Option<PreviewScene>,
}

impl ResolutionPreview {
    /// Creates the preview for one node.
    pub fn new(config: ExtensionConfig) -> Self {
        let image = SampleImage::new(config.sample_image_path.clone());
        Self {
            config,
            widgets: WidgetCache::default(),
            visibility: VisibilityController::new(),
            image,
            last_scene: None,
        }
    }

    /// Creates the preview if `config` targets `node_type`.
    pub fn for_node_type(config: &ExtensionConfig, node_type: &str) -> Option<Self> {
        config
            .applies_to(node_type)
            .then(|| Self::new(config.clone()))
    }

    /// The configuration this preview was created with.
    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    /// The sample image and its load state.
    pub fn image(&self) -> &SampleImage {
        &self.image
    }

    /// Mutable access to the sample image, for hosts reporting load failure.
    pub fn image_mut(&mut self) -> &mut SampleImage {
        &mut self.image
    }

    /// Cached widget positions.
    pub fn widgets(&self) -> &WidgetCache {
        &self.widgets
    }

    /// Actions waiting for the next draw.
    pub fn pending(&self) -> &PendingActions {
        self.visibility.pending()
    }

    /// The scene drawn by the last draw pass, if the preview was drawn.
    pub fn last_scene(&self) -> Option<&PreviewScene> {
        self.last_scene.as_ref()
    }

    fn mode(&self, node: &dyn HostNode) -> ResolutionMode {
        cached_widget(node, self.widgets.resolution, RESOLUTION_WIDGET)
            .map(|w| ResolutionMode::from_selector(&w.value.as_text()))
            .unwrap_or(ResolutionMode::Preset)
    }

    fn preview_enabled(&self, node: &dyn HostNode) -> bool {
        cached_widget(node, self.widgets.draw_preview, DRAW_PREVIEW_WIDGET)
            .map(|w| w.value.as_bool())
            .unwrap_or(true)
    }

    fn refresh_layout(&mut self, node: &mut dyn HostNode) {
        let mode = self.mode(node);
        let preview_enabled = self.preview_enabled(node);
        self.visibility
            .update(node, &self.widgets, mode, preview_enabled);
    }

    /// Writes the default snap back when the snap selector holds something
    /// that is not a positive integer.
    fn correct_snap(&mut self, node: &mut dyn HostNode) {
        let Some(index) = self.widgets.snap else {
            return;
        };
        let Some(widget) = node
            .widgets_mut()
            .get_mut(index)
            .filter(|w| w.name == SNAP_WIDGET)
        else {
            return;
        };
        let raw = widget.value.as_text();
        if !matches!(parse_leading_int(&raw), Some(value) if value > 0) {
            log::warn!("invalid snap value {raw:?}, using {DEFAULT_SNAP}");
            widget.value = WidgetValue::Text(DEFAULT_SNAP.to_string());
        }
    }

    fn apply_pending(&mut self, node: &mut dyn HostNode) {
        for action in self.visibility.take_pending() {
            match action {
                PendingAction::Resize => {
                    let size = compute_node_size(
                        node.visible_widget_count(),
                        self.preview_enabled(node),
                        self.mode(node).is_custom(),
                    );
                    log::debug!("resizing node to {}×{}", size.0, size.1);
                    node.set_size(size);
                }
            }
        }
    }
}

impl NodeHook for ResolutionPreview {
    fn on_node_created(&mut self, node: &mut dyn HostNode) {
        node.set_min_size((NODE_WIDTH, MIN_HEIGHT));
        self.image = SampleImage::new(self.config.sample_image_path.clone());
        self.widgets.fill(node);
        self.refresh_layout(node);
        self.visibility.request_resize();
        node.set_dirty_canvas();
        log::debug!("resolution preview attached");
    }

    fn on_configure(&mut self, node: &mut dyn HostNode) {
        self.widgets.invalidate();
        self.widgets.fill(node);
        self.visibility.reset();
        self.refresh_layout(node);
        node.set_dirty_canvas();
        log::debug!("resolution preview reconfigured");
    }

    fn on_widget_changed(
        &mut self,
        node: &mut dyn HostNode,
        widget: &str,
        _value: &WidgetValue,
        _old_value: &WidgetValue,
    ) {
        self.widgets.fill(node);
        match widget {
            RESOLUTION_WIDGET | DRAW_PREVIEW_WIDGET => self.refresh_layout(node),
            SNAP_WIDGET => self.correct_snap(node),
            SHOW_CHECKER_WIDGET | SHOW_IMAGE_WIDGET | SWAP_WIDGET | CUSTOM_WIDTH_WIDGET
            | CUSTOM_HEIGHT_WIDGET => {}
            _ => return,
        }
        node.set_dirty_canvas();
    }

    fn on_draw_foreground(&mut self, node: &mut dyn HostNode, surface: &mut dyn DrawingSurface) {
        if node.is_collapsed() {
            return;
        }
        self.widgets.fill(node);
        self.apply_pending(node);
        self.last_scene = render_preview(node, &self.widgets, Some(&self.image), surface);
    }

    fn on_image_loaded(&mut self, node: &mut dyn HostNode, width: u32, height: u32) {
        if self.image.finish_loading(width, height) {
            log::debug!("sample image loaded at {width}×{height}");
        }
        node.set_dirty_canvas();
    }
}
