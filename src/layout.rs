//! Preview geometry and node sizing.
//!
//! All functions here are pure: they take node dimensions and widget counts
//! and return positions in node-relative canvas units. A node too small to
//! hold the preview yields a near-zero frame rather than an error, so the
//! draw pass never has to bail out.

use eframe::egui;

use crate::constants::*;
use crate::numeric::floats_equal;
use crate::types::{AspectRect, LayoutMetrics};

/// Computes the node size implied by the widget stack and preview state.
///
/// # Arguments
///
/// * `visible_widget_count` - Number of widgets currently shown
/// * `preview_enabled` - Whether the preview section is drawn
/// * `custom_mode_active` - Whether the custom width/height/snap section is shown
///
/// # Returns
///
/// `(width, height)`; width is always [`NODE_WIDTH`]
pub fn compute_node_size(
    visible_widget_count: usize,
    preview_enabled: bool,
    custom_mode_active: bool,
) -> (f32, f32) {
    let mut height = visible_widget_count as f32 * WIDGET_ROW_HEIGHT;

    if preview_enabled {
        height += PREVIEW_SECTION_HEIGHT;
        height = height.max(MIN_HEIGHT_WITH_PREVIEW);
    }

    if custom_mode_active {
        height += CUSTOM_SECTION_HEIGHT;
    }

    (NODE_WIDTH, height.max(MIN_HEIGHT))
}

/// Places the preview frame below the widget stack.
///
/// The frame keeps the base 240×180 proportions and scales to the available
/// space, never beyond 3×. It is centered horizontally in the node and
/// vertically in the band left under the widgets.
///
/// # Arguments
///
/// * `node_width` - Current node width
/// * `node_height` - Current node height
/// * `visible_widgets_height` - Height taken by the visible widget rows
pub fn compute_preview_bounds(
    node_width: f32,
    node_height: f32,
    visible_widgets_height: f32,
) -> LayoutMetrics {
    let available_width = node_width - PREVIEW_PADDING_X;
    let available_height = node_height - visible_widgets_height - PREVIEW_SPACING_Y;

    let scale = (available_width / PREVIEW_BASE_WIDTH)
        .min(available_height / PREVIEW_BASE_HEIGHT)
        .min(MAX_PREVIEW_SCALE);
    let scale = if scale > MIN_PREVIEW_SCALE {
        scale
    } else {
        MIN_PREVIEW_SCALE
    };

    let preview_width = PREVIEW_BASE_WIDTH * scale;
    let preview_height = PREVIEW_BASE_HEIGHT * scale;

    LayoutMetrics {
        x: (node_width - preview_width) / 2.0,
        y: visible_widgets_height + (available_height - preview_height).max(0.0) / 2.0,
        preview_width,
        preview_height,
        scale,
    }
}

/// Fits a `target_width`×`target_height` aspect ratio inside the preview frame.
///
/// Wider targets keep the frame width and shrink in height (letterbox);
/// taller or equal targets keep the frame height and shrink in width
/// (pillarbox). The fitted box is centered in the frame.
pub fn compute_aspect_rect(
    preview_width: f32,
    preview_height: f32,
    target_width: f32,
    target_height: f32,
) -> AspectRect {
    let preview_aspect_ratio = preview_width / preview_height;
    let target_aspect = target_width / target_height;

    let (rect_width, rect_height) = if target_aspect > preview_aspect_ratio {
        (preview_width, preview_width / target_aspect)
    } else {
        (preview_height * target_aspect, preview_height)
    };

    AspectRect {
        rect_x: (preview_width - rect_width) / 2.0,
        rect_y: (preview_height - rect_height) / 2.0,
        rect_width,
        rect_height,
        preview_aspect_ratio,
    }
}

/// Fits the sample image inside the preview frame by its native aspect ratio.
///
/// Same fitting as [`compute_aspect_rect`], with an explicit equality branch
/// so an image matching the frame's aspect fills it exactly instead of
/// flipping between the two branches on rounding noise.
pub fn fit_image_rect(
    preview_width: f32,
    preview_height: f32,
    image_width: u32,
    image_height: u32,
) -> AspectRect {
    let preview_aspect = f64::from(preview_width) / f64::from(preview_height);
    let image_aspect = f64::from(image_width) / f64::from(image_height);

    let (rect_width, rect_height) = if image_aspect > preview_aspect {
        (preview_width, (f64::from(preview_width) / image_aspect) as f32)
    } else if floats_equal(image_aspect, preview_aspect) {
        (preview_width, preview_height)
    } else {
        ((f64::from(preview_height) * image_aspect) as f32, preview_height)
    };

    AspectRect {
        rect_x: (preview_width - rect_width) / 2.0,
        rect_y: (preview_height - rect_height) / 2.0,
        rect_width,
        rect_height,
        preview_aspect_ratio: preview_aspect as f32,
    }
}

/// One checkerboard square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckerTile {
    /// Tile rectangle, already clipped to the frame
    pub rect: egui::Rect,
    /// Tile shade
    pub color: egui::Color32,
}

/// Tiles `frame` with alternating checkerboard squares.
///
/// Columns and rows are `ceil(extent / tile_size)`; the last tile on each
/// axis is cut to the remaining space so nothing is drawn past the frame.
/// Shade alternates on the parity of `column + row`.
pub fn checker_tiles(frame: egui::Rect, tile_size: f32) -> Vec<CheckerTile> {
    if tile_size.is_nan() || tile_size <= 0.0 || frame.width() <= 0.0 || frame.height() <= 0.0 {
        return Vec::new();
    }

    let columns = (frame.width() / tile_size).ceil() as usize;
    let rows = (frame.height() / tile_size).ceil() as usize;
    let mut tiles = Vec::with_capacity(columns * rows);

    for column in 0..columns {
        for row in 0..rows {
            let offset_x = column as f32 * tile_size;
            let offset_y = row as f32 * tile_size;
            let width = tile_size.min(frame.width() - offset_x);
            let height = tile_size.min(frame.height() - offset_y);
            if width <= 0.0 || height <= 0.0 {
                continue;
            }
            let color = if (column + row) % 2 == 0 {
                CHECKER_DARK
            } else {
                CHECKER_LIGHT
            };
            tiles.push(CheckerTile {
                rect: egui::Rect::from_min_size(
                    frame.min + egui::vec2(offset_x, offset_y),
                    egui::vec2(width, height),
                ),
                color,
            });
        }
    }

    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_node_size_with_preview_hits_floor() {
        let (width, height) = compute_node_size(6, true, false);
        assert_eq!(width, NODE_WIDTH);
        // 6 × 24 + 220 = 364, floored at 420.
        assert_eq!(height, 420.0);
    }

    #[test]
    fn test_node_size_custom_adds_increment() {
        let (_, preset) = compute_node_size(6, true, false);
        let (_, custom) = compute_node_size(6, true, true);
        assert_eq!(custom - preset, CUSTOM_SECTION_HEIGHT);
    }

    #[test]
    fn test_node_size_large_widget_stack() {
        let (_, height) = compute_node_size(10, true, false);
        assert_eq!(height, 10.0 * WIDGET_ROW_HEIGHT + PREVIEW_SECTION_HEIGHT);
    }

    #[test]
    fn test_node_size_without_preview_uses_minimum() {
        assert_eq!(compute_node_size(2, false, false).1, MIN_HEIGHT);
        assert_eq!(compute_node_size(2, false, true).1, MIN_HEIGHT);
        assert_eq!(compute_node_size(8, false, true).1, 8.0 * 24.0 + 72.0);
    }

    #[test]
    fn test_preview_bounds_for_default_node() {
        let metrics = compute_preview_bounds(322.0, 420.0, 6.0 * WIDGET_ROW_HEIGHT);
        let expected_scale = 302.0 / 240.0;
        assert!(approx(metrics.scale, expected_scale));
        assert!(approx(metrics.preview_width, 302.0));
        assert!(approx(metrics.preview_height, 180.0 * expected_scale));
        assert!(approx(metrics.x, 10.0));
        // Band below widgets is 236 tall; slack is split evenly.
        let slack = 236.0 - 180.0 * expected_scale;
        assert!(approx(metrics.y, 144.0 + slack / 2.0));
    }

    #[test]
    fn test_preview_scale_capped() {
        let metrics = compute_preview_bounds(10_000.0, 10_000.0, 0.0);
        assert_eq!(metrics.scale, MAX_PREVIEW_SCALE);
        assert_eq!(metrics.preview_width, 720.0);
        assert_eq!(metrics.preview_height, 540.0);
    }

    #[test]
    fn test_preview_degenerates_without_panicking() {
        let metrics = compute_preview_bounds(100.0, 50.0, 200.0);
        assert_eq!(metrics.scale, MIN_PREVIEW_SCALE);
        assert!(metrics.preview_width > 0.0 && metrics.preview_width < 5.0);
        assert!(metrics.scale > 0.0 && metrics.scale <= MAX_PREVIEW_SCALE);
    }

    #[test]
    fn test_aspect_rect_letterboxes_wide_target() {
        let rect = compute_aspect_rect(240.0, 180.0, 16.0, 9.0);
        assert_eq!(rect.rect_width, 240.0);
        assert!(approx(rect.rect_height, 135.0));
        assert_eq!(rect.rect_x, 0.0);
        assert!(approx(rect.rect_y, 22.5));
        assert!(approx(rect.preview_aspect_ratio, 4.0 / 3.0));
    }

    #[test]
    fn test_aspect_rect_pillarboxes_tall_target() {
        let rect = compute_aspect_rect(240.0, 180.0, 768.0, 1024.0);
        assert_eq!(rect.rect_height, 180.0);
        assert!(approx(rect.rect_width, 135.0));
        assert!(approx(rect.rect_x, 52.5));
        assert_eq!(rect.rect_y, 0.0);
    }

    #[test]
    fn test_aspect_rect_same_aspect_fills_frame() {
        let rect = compute_aspect_rect(240.0, 180.0, 1024.0, 768.0);
        assert!(approx(rect.rect_width, 240.0));
        assert!(approx(rect.rect_height, 180.0));
    }

    #[test]
    fn test_fit_image_matching_aspect_fills_frame() {
        let rect = fit_image_rect(240.0, 180.0, 640, 480);
        assert_eq!((rect.rect_width, rect.rect_height), (240.0, 180.0));
        assert_eq!((rect.rect_x, rect.rect_y), (0.0, 0.0));
    }

    #[test]
    fn test_fit_image_wide_letterboxes() {
        let rect = fit_image_rect(240.0, 180.0, 1920, 1080);
        assert_eq!(rect.rect_width, 240.0);
        assert!(approx(rect.rect_height, 135.0));
        assert_eq!(rect.rect_x, 0.0);
        assert!(approx(rect.rect_y, 22.5));
    }

    #[test]
    fn test_fit_image_square_pillarboxes() {
        let rect = fit_image_rect(240.0, 180.0, 512, 512);
        assert_eq!(rect.rect_height, 180.0);
        assert!(approx(rect.rect_width, 180.0));
        assert!(approx(rect.rect_x, 30.0));
    }

    #[test]
    fn test_checker_tiles_cover_frame_without_overdraw() {
        let frame = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(40.0, 20.0));
        let tiles = checker_tiles(frame, 16.0);
        // ceil(40/16) = 3 columns, ceil(20/16) = 2 rows.
        assert_eq!(tiles.len(), 6);
        let area: f32 = tiles.iter().map(|t| t.rect.area()).sum();
        assert!(approx(area, frame.area()));
        for tile in &tiles {
            assert!(frame.contains_rect(tile.rect));
        }
        let last = tiles.last().unwrap();
        assert!(approx(last.rect.width(), 8.0));
        assert!(approx(last.rect.height(), 4.0));
    }

    #[test]
    fn test_checker_tiles_alternate() {
        let frame = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(32.0, 32.0));
        let tiles = checker_tiles(frame, 16.0);
        // Column-major: (0,0), (0,1), (1,0), (1,1).
        assert_eq!(tiles[0].color, CHECKER_DARK);
        assert_eq!(tiles[1].color, CHECKER_LIGHT);
        assert_eq!(tiles[2].color, CHECKER_LIGHT);
        assert_eq!(tiles[3].color, CHECKER_DARK);
    }

    #[test]
    fn test_checker_tiles_degenerate_inputs() {
        let frame = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(32.0, 32.0));
        assert!(checker_tiles(frame, 0.0).is_empty());
        assert!(checker_tiles(frame, f32::NAN).is_empty());
        let empty = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(0.0, 10.0));
        assert!(checker_tiles(empty, 16.0).is_empty());
    }
}
