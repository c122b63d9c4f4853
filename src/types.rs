//! Core data types shared by the resolution preview modules.
//!
//! This module defines the selection mode, the resolved resolution, widget
//! values as the host stores them, and the geometry records produced by the
//! layout calculator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::FALLBACK_RESOLUTION;

/// Where the active resolution comes from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResolutionMode {
    /// A `WxH` entry picked from the preset list
    Preset,
    /// User-entered width and height, snapped to a multiple
    Custom,
}

impl ResolutionMode {
    /// Determines the mode from the preset selector's text.
    ///
    /// Any value containing `custom` (case-insensitive) selects custom mode.
    pub fn from_selector(value: &str) -> Self {
        if value.to_lowercase().contains("custom") {
            ResolutionMode::Custom
        } else {
            ResolutionMode::Preset
        }
    }

    /// Whether this is [`ResolutionMode::Custom`].
    pub fn is_custom(self) -> bool {
        self == ResolutionMode::Custom
    }
}

/// A concrete width and height, both positive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ActiveResolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ActiveResolution {
    /// Creates a resolution from its dimensions.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The 512×512 resolution used whenever parsing fails.
    pub const fn fallback() -> Self {
        Self::new(FALLBACK_RESOLUTION, FALLBACK_RESOLUTION)
    }

    /// Returns the resolution with width and height exchanged.
    pub fn swapped(self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl Default for ActiveResolution {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for ActiveResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

/// Value held by a node widget.
///
/// Combo and text widgets hold text, toggles hold booleans, number fields
/// hold numbers. The host decides the variant; readers convert as needed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum WidgetValue {
    /// Toggle state
    Bool(bool),
    /// Number field contents
    Number(f64),
    /// Combo or text field contents
    Text(String),
}

impl WidgetValue {
    /// Renders the value as the text a text field would show.
    ///
    /// Whole numbers print without a fractional part (`512`, not `512.0`).
    pub fn as_text(&self) -> String {
        match self {
            WidgetValue::Text(text) => text.clone(),
            WidgetValue::Number(number) => number.to_string(),
            WidgetValue::Bool(flag) => flag.to_string(),
        }
    }

    /// Interprets the value as a toggle. Only `true` and the text `"true"`
    /// count as set.
    pub fn as_bool(&self) -> bool {
        match self {
            WidgetValue::Bool(flag) => *flag,
            WidgetValue::Text(text) => text.trim().eq_ignore_ascii_case("true"),
            WidgetValue::Number(_) => false,
        }
    }
}

impl From<bool> for WidgetValue {
    fn from(value: bool) -> Self {
        WidgetValue::Bool(value)
    }
}

impl From<f64> for WidgetValue {
    fn from(value: f64) -> Self {
        WidgetValue::Number(value)
    }
}

impl From<&str> for WidgetValue {
    fn from(value: &str) -> Self {
        WidgetValue::Text(value.to_string())
    }
}

impl From<String> for WidgetValue {
    fn from(value: String) -> Self {
        WidgetValue::Text(value)
    }
}

/// A single named widget on the host node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Widget {
    /// Widget name, unique within a node
    pub name: String,
    /// Current value
    pub value: WidgetValue,
    /// Whether the widget is hidden from the node body
    #[serde(default)]
    pub hidden: bool,
    /// Replacement for the widget's computed size. `Some((0.0, 0.0))` tells
    /// the host layout not to reserve a row for the widget.
    #[serde(skip)]
    pub size_override: Option<(f32, f32)>,
}

impl Widget {
    /// Creates a visible widget with the given name and value.
    pub fn new(name: impl Into<String>, value: impl Into<WidgetValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            hidden: false,
            size_override: None,
        }
    }

    /// Height the widget occupies in the node's widget stack.
    ///
    /// # Arguments
    ///
    /// * `row_height` - Height of a regular widget row
    pub fn layout_height(&self, row_height: f32) -> f32 {
        match self.size_override {
            Some((_, height)) => height,
            None if self.hidden => 0.0,
            None => row_height,
        }
    }
}

/// Visibility of the three custom-resolution widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomVisibility {
    /// Whether `custom_width` is shown
    pub width_visible: bool,
    /// Whether `custom_height` is shown
    pub height_visible: bool,
    /// Whether `divisible_by` is shown
    pub snap_visible: bool,
}

/// Placement and scale of the preview frame inside the node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Left edge of the frame, node-relative
    pub x: f32,
    /// Top edge of the frame, node-relative
    pub y: f32,
    /// Scaled frame width
    pub preview_width: f32,
    /// Scaled frame height
    pub preview_height: f32,
    /// Scale applied to the base frame size, in `(0, 3.0]`
    pub scale: f32,
}

/// A target aspect ratio fitted inside the preview frame.
///
/// `rect_x` and `rect_y` are offsets from the frame's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRect {
    /// Horizontal offset inside the frame
    pub rect_x: f32,
    /// Vertical offset inside the frame
    pub rect_y: f32,
    /// Fitted width
    pub rect_width: f32,
    /// Fitted height
    pub rect_height: f32,
    /// Aspect ratio of the frame itself
    pub preview_aspect_ratio: f32,
}
