//! Host node capabilities and the editor's concrete node.
//!
//! The preview never owns the node it decorates. It talks to it through
//! [`HostNode`], reading widget values and writing back only widget
//! visibility, corrected widget values and the node size.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::*;
use crate::presets::is_header;
use crate::types::{Widget, WidgetValue};

/// Unique identifier for editor nodes.
pub type NodeId = Uuid;

/// What the preview needs from the node it is attached to.
pub trait HostNode {
    /// Current pixel size as `(width, height)`.
    fn size(&self) -> (f32, f32);

    /// Resizes the node.
    fn set_size(&mut self, size: (f32, f32));

    /// Sets the smallest size the user may drag the node to.
    fn set_min_size(&mut self, size: (f32, f32));

    /// Widgets in display order.
    fn widgets(&self) -> &[Widget];

    /// Mutable access to the widgets, in display order.
    fn widgets_mut(&mut self) -> &mut [Widget];

    /// Whether the node is collapsed to its title bar.
    fn is_collapsed(&self) -> bool;

    /// Requests a redraw of the node's canvas.
    fn set_dirty_canvas(&mut self);

    /// Index of the widget named `name`.
    fn find_widget(&self, name: &str) -> Option<usize> {
        self.widgets().iter().position(|w| w.name == name)
    }

    /// Number of widgets currently shown.
    fn visible_widget_count(&self) -> usize {
        self.widgets().iter().filter(|w| !w.hidden).count()
    }

    /// Height of the visible widget stack.
    fn visible_widgets_height(&self) -> f32 {
        self.widgets()
            .iter()
            .map(|w| w.layout_height(WIDGET_ROW_HEIGHT))
            .sum()
    }
}

/// A node as the editor stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorNode {
    /// Unique identifier for this node
    pub id: NodeId,
    /// Registered node type name
    pub node_type: String,
    /// Size as `(width, height)`
    pub size: (f32, f32),
    /// Smallest size the user may resize to
    #[serde(default)]
    pub min_size: (f32, f32),
    /// Widgets in display order
    pub widgets: Vec<Widget>,
    /// Whether the node is collapsed to its title bar
    #[serde(default)]
    pub collapsed: bool,
    /// Set when the node asked for a redraw since the flag was last taken
    #[serde(skip)]
    pub dirty: bool,
}

impl EditorNode {
    /// Creates an empty node of the given type.
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            node_type: node_type.into(),
            size: (NODE_WIDTH, MIN_HEIGHT),
            min_size: (0.0, 0.0),
            widgets: Vec::new(),
            collapsed: false,
            dirty: false,
        }
    }

    /// Creates a resolution picker node with its full widget set.
    ///
    /// # Arguments
    ///
    /// * `presets` - Preset selector entries; the first one that is not a
    ///   group header is selected
    pub fn resolution_picker(presets: &[String]) -> Self {
        let initial = presets
            .iter()
            .find(|entry| !is_header(entry))
            .cloned()
            .unwrap_or_else(|| "1024x1024".to_string());
        let mut node = Self::new(NODE_TYPE_NAME);
        node.widgets = vec![
            Widget::new(RESOLUTION_WIDGET, initial),
            Widget::new(DRAW_PREVIEW_WIDGET, true),
            Widget::new(SHOW_CHECKER_WIDGET, false),
            Widget::new(SHOW_IMAGE_WIDGET, false),
            Widget::new(SWAP_WIDGET, false),
            Widget::new(CUSTOM_WIDTH_WIDGET, 512.0),
            Widget::new(CUSTOM_HEIGHT_WIDGET, 512.0),
            Widget::new(SNAP_WIDGET, "64"),
        ];
        node
    }

    /// Returns a widget by name.
    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.name == name)
    }

    /// Sets a widget value by name. Returns `false` when no such widget exists.
    pub fn set_widget_value(&mut self, name: &str, value: impl Into<WidgetValue>) -> bool {
        match self.widgets.iter_mut().find(|w| w.name == name) {
            Some(widget) => {
                widget.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Clears and returns the redraw request flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Serializes the node to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Restores a node from JSON produced by [`EditorNode::to_json`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl HostNode for EditorNode {
    fn size(&self) -> (f32, f32) {
        self.size
    }

    fn set_size(&mut self, size: (f32, f32)) {
        self.size = (size.0.max(self.min_size.0), size.1.max(self.min_size.1));
    }

    fn set_min_size(&mut self, size: (f32, f32)) {
        self.min_size = size;
    }

    fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    fn widgets_mut(&mut self) -> &mut [Widget] {
        &mut self.widgets
    }

    fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    fn set_dirty_canvas(&mut self) {
        self.dirty = true;
    }
}

/// Widget positions looked up once per node lifetime.
///
/// Each slot is filled the first time its widget is found and kept until
/// [`WidgetCache::invalidate`], which the preview calls when the node is
/// reconfigured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetCache {
    /// Index of the preset selector
    pub resolution: Option<usize>,
    /// Index of the preview toggle
    pub draw_preview: Option<usize>,
    /// Index of the checkerboard toggle
    pub show_checker: Option<usize>,
    /// Index of the sample image toggle
    pub show_image: Option<usize>,
    /// Index of the swap toggle
    pub swap: Option<usize>,
    /// Index of the custom width field
    pub custom_width: Option<usize>,
    /// Index of the custom height field
    pub custom_height: Option<usize>,
    /// Index of the snap selector
    pub snap: Option<usize>,
}

impl WidgetCache {
    /// Looks up every widget that is not cached yet.
    pub fn fill(&mut self, node: &dyn HostNode) {
        let slots = [
            (&mut self.resolution, RESOLUTION_WIDGET),
            (&mut self.draw_preview, DRAW_PREVIEW_WIDGET),
            (&mut self.show_checker, SHOW_CHECKER_WIDGET),
            (&mut self.show_image, SHOW_IMAGE_WIDGET),
            (&mut self.swap, SWAP_WIDGET),
            (&mut self.custom_width, CUSTOM_WIDTH_WIDGET),
            (&mut self.custom_height, CUSTOM_HEIGHT_WIDGET),
            (&mut self.snap, SNAP_WIDGET),
        ];
        for (slot, name) in slots {
            if slot.is_none() {
                *slot = node.find_widget(name);
            }
        }
    }

    /// Forgets every cached position.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    /// Indices of the custom width, height and snap widgets.
    pub fn custom_widgets(&self) -> [Option<usize>; 3] {
        [self.custom_width, self.custom_height, self.snap]
    }
}

/// Returns the widget at a cached `index`, provided it still carries `name`.
pub fn cached_widget<'a>(
    node: &'a dyn HostNode,
    index: Option<usize>,
    name: &str,
) -> Option<&'a Widget> {
    node.widgets().get(index?).filter(|w| w.name == name)
}
