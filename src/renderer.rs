//! Preview drawing.
//!
//! Drawing happens in two steps. [`PreviewScene::compute`] resolves the
//! resolution and derives every rectangle the preview needs;
//! [`PreviewScene::draw`] replays that geometry onto a [`DrawingSurface`].
//! Coordinates are node-relative; the host translates them onto its canvas.

use eframe::egui::{self, Align2, Pos2, Rect};

use crate::constants::*;
use crate::image::SampleImage;
use crate::layout::{
    checker_tiles, compute_aspect_rect, compute_preview_bounds, fit_image_rect, CheckerTile,
};
use crate::node::{cached_widget, HostNode, WidgetCache};
use crate::resolver::ResolutionSource;
use crate::surface::{CompositeMode, DrawingSurface};
use crate::types::{ActiveResolution, LayoutMetrics};

/// Widget values that drive the preview, read from the node.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewState {
    /// Resolution inputs
    pub source: ResolutionSource,
    /// Whether the preview is drawn at all
    pub preview_enabled: bool,
    /// Whether the checkerboard overlay is drawn
    pub show_checker: bool,
    /// Whether the sample image is drawn
    pub show_image: bool,
}

impl PreviewState {
    /// Reads the preview inputs from the node's widgets.
    ///
    /// Returns `None` when the node has no preset selector, in which case
    /// there is nothing to preview. Missing toggles read as off, except the
    /// preview toggle which reads as on.
    pub fn read(node: &dyn HostNode, cache: &WidgetCache) -> Option<Self> {
        let preset = cached_widget(node, cache.resolution, RESOLUTION_WIDGET)?
            .value
            .as_text();
        let text = |index: Option<usize>, name: &str| {
            cached_widget(node, index, name)
                .map(|w| w.value.as_text())
                .unwrap_or_default()
        };
        let flag = |index: Option<usize>, name: &str, default: bool| {
            cached_widget(node, index, name)
                .map(|w| w.value.as_bool())
                .unwrap_or(default)
        };

        Some(Self {
            source: ResolutionSource {
                preset,
                custom_width: text(cache.custom_width, CUSTOM_WIDTH_WIDGET),
                custom_height: text(cache.custom_height, CUSTOM_HEIGHT_WIDGET),
                snap: text(cache.snap, SNAP_WIDGET),
                swap: flag(cache.swap, SWAP_WIDGET, false),
            },
            preview_enabled: flag(cache.draw_preview, DRAW_PREVIEW_WIDGET, true),
            show_checker: flag(cache.show_checker, SHOW_CHECKER_WIDGET, false),
            show_image: flag(cache.show_image, SHOW_IMAGE_WIDGET, false),
        })
    }
}

/// Fully resolved preview geometry for one draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewScene {
    /// Resolution being previewed
    pub resolution: ActiveResolution,
    /// Frame placement and scale
    pub metrics: LayoutMetrics,
    /// The preview frame
    pub frame: Rect,
    /// The target aspect ratio fitted inside the frame
    pub resolution_box: Rect,
    /// Where the sample image goes, when it is shown and loaded
    pub image_rect: Option<Rect>,
    /// Checkerboard squares, empty when the overlay is off
    pub checker: Vec<CheckerTile>,
    /// Label text, `"{width}×{height}"`
    pub label: String,
    /// Anchor of the label's bottom center
    pub label_pos: Pos2,
}

impl PreviewScene {
    /// Computes the scene for the given inputs.
    ///
    /// # Arguments
    ///
    /// * `state` - Widget values driving the preview
    /// * `node_size` - Current node size
    /// * `visible_widgets_height` - Height of the visible widget stack
    /// * `image` - The sample image, if the host has one
    pub fn compute(
        state: &PreviewState,
        node_size: (f32, f32),
        visible_widgets_height: f32,
        image: Option<&SampleImage>,
    ) -> Self {
        let resolution = state.source.resolve();
        let metrics = compute_preview_bounds(node_size.0, node_size.1, visible_widgets_height);
        let frame = Rect::from_min_size(
            egui::pos2(metrics.x, metrics.y),
            egui::vec2(metrics.preview_width, metrics.preview_height),
        );

        let fitted = compute_aspect_rect(
            metrics.preview_width,
            metrics.preview_height,
            resolution.width as f32,
            resolution.height as f32,
        );
        let resolution_box = Rect::from_min_size(
            frame.min + egui::vec2(fitted.rect_x, fitted.rect_y),
            egui::vec2(fitted.rect_width, fitted.rect_height),
        );

        let image_rect = match (state.show_image, image.and_then(SampleImage::dimensions)) {
            (true, Some((width, height))) => {
                let fitted =
                    fit_image_rect(metrics.preview_width, metrics.preview_height, width, height);
                Some(Rect::from_min_size(
                    frame.min + egui::vec2(fitted.rect_x, fitted.rect_y),
                    egui::vec2(fitted.rect_width, fitted.rect_height),
                ))
            }
            _ => None,
        };

        let checker = if state.show_checker {
            checker_tiles(frame, CHECKER_TILE_SIZE * metrics.scale)
        } else {
            Vec::new()
        };

        Self {
            resolution,
            metrics,
            frame,
            resolution_box,
            image_rect,
            checker,
            label: resolution.to_string(),
            label_pos: egui::pos2(frame.center().x, frame.max.y + LABEL_OFFSET),
        }
    }

    /// Replays the scene onto `surface`.
    ///
    /// Layers, bottom to top: frame background, resolution box, sample image
    /// (clipped to the resolution box), checkerboard (multiplied, clipped to
    /// the frame), frame border, label.
    pub fn draw(&self, surface: &mut dyn DrawingSurface, image: Option<&SampleImage>) {
        surface.save();

        surface.set_fill_color(FRAME_COLOR);
        surface.fill_rect(self.frame);

        surface.set_fill_color(RESOLUTION_BOX_COLOR);
        surface.fill_rect(self.resolution_box);

        if let (Some(dest), Some(image)) = (self.image_rect, image) {
            surface.save();
            surface.clip_rect(self.resolution_box);
            surface.draw_image(image, dest);
            surface.restore();
        }

        if !self.checker.is_empty() {
            surface.save();
            surface.clip_rect(self.frame);
            surface.set_composite(CompositeMode::Multiply);
            for tile in &self.checker {
                surface.set_fill_color(tile.color);
                surface.fill_rect(tile.rect);
            }
            surface.set_composite(CompositeMode::SourceOver);
            surface.restore();
        }

        surface.set_stroke(BORDER_COLOR, BORDER_WIDTH);
        surface.stroke_rect(self.frame);

        surface.set_fill_color(LABEL_COLOR);
        surface.fill_text(&self.label, self.label_pos, Align2::CENTER_BOTTOM, LABEL_FONT_SIZE);

        surface.restore();
    }
}

/// Draws the preview for a node.
///
/// # Returns
///
/// The drawn scene, or `None` when the preview is off or the node has no
/// preset selector.
pub fn render_preview(
    node: &dyn HostNode,
    cache: &WidgetCache,
    image: Option<&SampleImage>,
    surface: &mut dyn DrawingSurface,
) -> Option<PreviewScene> {
    let state = PreviewState::read(node, cache)?;
    if !state.preview_enabled {
        return None;
    }
    let scene = PreviewScene::compute(&state, node.size(), node.visible_widgets_height(), image);
    scene.draw(surface, image);
    Some(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::EditorNode;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn state(preset: &str) -> PreviewState {
        PreviewState {
            source: ResolutionSource {
                preset: preset.to_string(),
                custom_width: "512".into(),
                custom_height: "512".into(),
                snap: "64".into(),
                swap: false,
            },
            preview_enabled: true,
            show_checker: false,
            show_image: false,
        }
    }

    fn loaded_image() -> SampleImage {
        let mut image = SampleImage::new("sample.png");
        image.finish_loading(512, 512);
        image
    }

    #[test]
    fn test_scene_geometry_for_wide_preset() {
        let scene = PreviewScene::compute(&state("1920x1080: 1080p"), (322.0, 420.0), 144.0, None);
        assert_eq!(scene.resolution, ActiveResolution::new(1920, 1080));
        assert_eq!(scene.label, "1920×1080");
        assert!(scene.frame.expand(1e-3).contains_rect(scene.resolution_box));
        assert!((scene.resolution_box.width() - scene.frame.width()).abs() < 1e-3);
        assert!(scene.resolution_box.height() < scene.frame.height());
        assert!((scene.resolution_box.center().y - scene.frame.center().y).abs() < 1e-3);
        assert!(scene.label_pos.y > scene.frame.max.y);
        assert!(scene.checker.is_empty());
        assert!(scene.image_rect.is_none());
    }

    #[test]
    fn test_scene_checker_scales_with_preview() {
        let mut state = state("1024x1024");
        state.show_checker = true;
        let scene = PreviewScene::compute(&state, (10_000.0, 10_000.0), 0.0, None);
        assert_eq!(scene.metrics.scale, MAX_PREVIEW_SCALE);
        // 720×540 frame with 48px tiles: 15 × 12 squares.
        assert_eq!(scene.checker.len(), 15 * 12);
        assert!((scene.checker[0].rect.width() - 48.0).abs() < 1e-3);
    }

    #[test]
    fn test_image_skipped_until_loaded() {
        let mut state = state("1024x1024");
        state.show_image = true;
        let pending = SampleImage::new("sample.png");
        let scene = PreviewScene::compute(&state, (322.0, 420.0), 144.0, Some(&pending));
        assert!(scene.image_rect.is_none());

        let loaded = loaded_image();
        let scene = PreviewScene::compute(&state, (322.0, 420.0), 144.0, Some(&loaded));
        let image_rect = scene.image_rect.unwrap();
        assert!((image_rect.width() - image_rect.height()).abs() < 1e-3);
        assert!((image_rect.height() - scene.frame.height()).abs() < 1e-3);
    }

    #[test]
    fn test_image_hidden_when_toggle_off() {
        let loaded = loaded_image();
        let scene = PreviewScene::compute(&state("1024x1024"), (322.0, 420.0), 144.0, Some(&loaded));
        assert!(scene.image_rect.is_none());
    }

    #[test]
    fn test_draw_order() {
        let mut state = state("1024x768");
        state.show_checker = true;
        state.show_image = true;
        let image = loaded_image();
        let scene = PreviewScene::compute(&state, (322.0, 420.0), 144.0, Some(&image));

        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface, Some(&image));
        let commands = &surface.commands;

        assert_eq!(commands.first(), Some(&DrawCommand::Save));
        assert_eq!(commands.last(), Some(&DrawCommand::Restore));
        assert_eq!(commands[1], DrawCommand::FillColor(FRAME_COLOR));
        assert_eq!(commands[2], DrawCommand::FillRect(scene.frame));
        assert_eq!(commands[4], DrawCommand::FillRect(scene.resolution_box));

        let position = |wanted: &dyn Fn(&DrawCommand) -> bool| {
            commands.iter().position(|c| wanted(c)).unwrap()
        };
        let image_at = position(&|c| matches!(c, DrawCommand::Image { .. }));
        let multiply_at = position(&|c| *c == DrawCommand::Composite(CompositeMode::Multiply));
        let border_at = position(&|c| matches!(c, DrawCommand::StrokeRect(_)));
        let text_at = position(&|c| matches!(c, DrawCommand::Text { .. }));
        assert!(image_at < multiply_at && multiply_at < border_at && border_at < text_at);

        // The image is clipped to the resolution box, the checkerboard to the frame.
        assert_eq!(commands[image_at - 1], DrawCommand::Clip(scene.resolution_box));
        assert_eq!(commands[multiply_at - 1], DrawCommand::Clip(scene.frame));
        assert_eq!(surface.texts(), vec!["1024×768"]);

        let saves = commands.iter().filter(|c| **c == DrawCommand::Save).count();
        let restores = commands.iter().filter(|c| **c == DrawCommand::Restore).count();
        assert_eq!(saves, restores);
    }

    #[test]
    fn test_render_preview_respects_toggle() {
        let mut node = EditorNode::resolution_picker(&["1024x1024".to_string()]);
        node.size = (322.0, 420.0);
        let mut cache = WidgetCache::default();
        cache.fill(&node);

        let mut surface = RecordingSurface::new();
        assert!(render_preview(&node, &cache, None, &mut surface).is_some());
        assert!(!surface.is_empty());

        node.set_widget_value(DRAW_PREVIEW_WIDGET, false);
        let mut surface = RecordingSurface::new();
        assert!(render_preview(&node, &cache, None, &mut surface).is_none());
        assert!(surface.is_empty());
    }

    #[test]
    fn test_render_preview_without_selector_draws_nothing() {
        let node = EditorNode::new("Any");
        let mut surface = RecordingSurface::new();
        assert!(render_preview(&node, &WidgetCache::default(), None, &mut surface).is_none());
        assert!(surface.is_empty());
    }

    #[test]
    fn test_render_preview_degenerate_node_still_draws() {
        let mut node = EditorNode::resolution_picker(&["1024x1024".to_string()]);
        node.size = (50.0, 50.0);
        let mut cache = WidgetCache::default();
        cache.fill(&node);
        let mut surface = RecordingSurface::new();
        let scene = render_preview(&node, &cache, None, &mut surface).unwrap();
        assert_eq!(scene.metrics.scale, MIN_PREVIEW_SCALE);
        assert_eq!(surface.texts(), vec!["1024×1024"]);
    }
}
