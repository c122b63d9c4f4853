//! Shared constants for the resolution preview.
//! Centralizes tweakable values used by layout, resolution parsing and drawing.

use eframe::egui::Color32;

// Node dimensions
/// Fixed node width computed on resize, in canvas units.
pub const NODE_WIDTH: f32 = 322.0;
/// Minimum node height regardless of preview state.
pub const MIN_HEIGHT: f32 = 220.0;
/// Minimum node height while the preview is enabled.
pub const MIN_HEIGHT_WITH_PREVIEW: f32 = 420.0;
/// Height reserved for one visible widget row.
pub const WIDGET_ROW_HEIGHT: f32 = 24.0;
/// Height added for the preview section (frame, label and spacing).
pub const PREVIEW_SECTION_HEIGHT: f32 = 220.0;
/// Height added while the custom width/height/snap widgets are shown.
pub const CUSTOM_SECTION_HEIGHT: f32 = 72.0;

// Preview frame
/// Unscaled preview frame width.
pub const PREVIEW_BASE_WIDTH: f32 = 240.0;
/// Unscaled preview frame height.
pub const PREVIEW_BASE_HEIGHT: f32 = 180.0;
/// Horizontal space not available to the preview frame.
pub const PREVIEW_PADDING_X: f32 = 20.0;
/// Vertical space below the widget stack not available to the preview frame.
pub const PREVIEW_SPACING_Y: f32 = 40.0;
/// Upper bound of the preview scale.
pub const MAX_PREVIEW_SCALE: f32 = 3.0;
/// Lower bound of the preview scale; a node too small for the preview
/// draws a near-zero frame instead.
pub const MIN_PREVIEW_SCALE: f32 = 0.01;
/// Unscaled checkerboard tile edge.
pub const CHECKER_TILE_SIZE: f32 = 16.0;
/// Offset of the label baseline below the frame.
pub const LABEL_OFFSET: f32 = 12.0;
/// Label font size.
pub const LABEL_FONT_SIZE: f32 = 10.0;
/// Border stroke width.
pub const BORDER_WIDTH: f32 = 1.0;

// Colors
/// Preview frame background.
pub const FRAME_COLOR: Color32 = Color32::from_rgb(0x00, 0x00, 0x00);
/// Fill of the box showing the target aspect ratio.
pub const RESOLUTION_BOX_COLOR: Color32 = Color32::from_rgb(0xff, 0xff, 0xff);
/// Light checkerboard shade.
pub const CHECKER_LIGHT: Color32 = Color32::from_rgb(0xff, 0xff, 0xff);
/// Dark checkerboard shade.
pub const CHECKER_DARK: Color32 = Color32::from_rgb(0xcc, 0xcc, 0xcc);
/// Frame outline.
pub const BORDER_COLOR: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
/// Resolution label text.
pub const LABEL_COLOR: Color32 = Color32::from_rgb(0xff, 0xff, 0xff);

// Resolution limits
/// Resolution used when a preset cannot be parsed or a custom field is empty.
pub const FALLBACK_RESOLUTION: u32 = 512;
/// Resolution the node outputs when the selected preset cannot be parsed.
pub const OUTPUT_FALLBACK_RESOLUTION: u32 = 1024;
/// Smallest accepted width or height.
pub const MIN_RESOLUTION: u32 = 64;
/// Largest accepted width or height.
pub const MAX_RESOLUTION: u32 = 8192;
/// Snap multiple used when the snap field is invalid.
pub const DEFAULT_SNAP: u32 = 64;
/// Snap choices offered by the `divisible_by` selector.
pub const SNAP_CHOICES: [&str; 7] = ["1", "2", "4", "8", "16", "32", "64"];
/// Tolerance for aspect ratio comparisons.
pub const FLOAT_EPSILON: f64 = 1e-10;

// Widget names
/// Preset selector.
pub const RESOLUTION_WIDGET: &str = "resolution";
/// Preview on/off toggle.
pub const DRAW_PREVIEW_WIDGET: &str = "draw_preview";
/// Checkerboard toggle.
pub const SHOW_CHECKER_WIDGET: &str = "show_checker";
/// Sample image toggle.
pub const SHOW_IMAGE_WIDGET: &str = "show_image";
/// Swap width and height toggle.
pub const SWAP_WIDGET: &str = "swap_dimensions";
/// Custom width field.
pub const CUSTOM_WIDTH_WIDGET: &str = "custom_width";
/// Custom height field.
pub const CUSTOM_HEIGHT_WIDGET: &str = "custom_height";
/// Snap multiple selector.
pub const SNAP_WIDGET: &str = "divisible_by";

/// Node type the extension attaches to by default.
pub const NODE_TYPE_NAME: &str = "OlmResolutionPicker";
/// Default sample image location, relative to the working directory.
pub const SAMPLE_IMAGE_PATH: &str = "./assets/test_image.png";

// Demo host
/// Height of the node title bar drawn above the widget stack.
pub const TITLE_BAR_HEIGHT: f32 = 24.0;
/// Corner radius for the node body.
pub const NODE_CORNER_RADIUS: f32 = 4.0;
/// Grid spacing on the canvas in world units.
pub const GRID_SIZE: f32 = 20.0;
/// Where the node is placed on a fresh canvas, in world units.
pub const NODE_ORIGIN: (f32, f32) = (40.0, 60.0);
/// Lower zoom limit for the canvas.
pub const MIN_ZOOM: f32 = 0.25;
/// Upper zoom limit for the canvas.
pub const MAX_ZOOM: f32 = 4.0;
/// Side length of the generated sample image.
pub const SAMPLE_IMAGE_SIZE: usize = 256;
/// eframe storage key for the persisted node and settings.
pub const STORAGE_KEY: &str = "resolution_preview_state";
