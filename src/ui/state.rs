//! Application state for the demo host.
//!
//! The host owns one resolution picker node, the hook chain attached to it
//! and the canvas navigation state. Only the node and the extension settings
//! are persisted; everything else is rebuilt at startup.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::config::ExtensionConfig;
use crate::constants::*;
use crate::extension::ResolutionPreview;
use crate::hooks::{HookChain, NodeHook};
use crate::node::EditorNode;
use crate::presets::{builtin_presets, load_preset_list};
use crate::types::WidgetValue;

/// Canvas navigation and display state.
pub struct CanvasState {
    /// Pan offset in screen space
    pub offset: egui::Vec2,
    /// Current zoom level (1.0 = normal)
    pub zoom_factor: f32,
    /// Whether the background grid is drawn
    pub show_grid: bool,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            offset: egui::Vec2::ZERO,
            zoom_factor: 1.0,
            show_grid: true,
        }
    }
}

/// Result of a background file operation.
#[derive(Debug)]
pub enum FileOperationResult {
    /// A preset file was read and parsed
    PresetsLoaded(PathBuf, Vec<String>),
    /// The operation failed with the given message
    OperationFailed(String),
}

/// State of background file operations.
pub struct FileState {
    /// Sending half handed to background tasks
    pub file_operation_sender: Sender<FileOperationResult>,
    /// Receiving half polled every frame
    pub file_operation_receiver: Receiver<FileOperationResult>,
    /// Set when the user asked to open a preset file
    pub pending_open: bool,
    /// Last error shown in the status line
    pub last_error: Option<String>,
}

impl Default for FileState {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            file_operation_sender: sender,
            file_operation_receiver: receiver,
            pending_open: false,
            last_error: None,
        }
    }
}

/// What survives an application restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    /// Extension settings
    #[serde(default)]
    pub config: ExtensionConfig,
    /// The edited node
    pub node: EditorNode,
}

impl PersistedState {
    /// Serializes the state to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes state from JSON.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON produced by [`PersistedState::to_json`]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The demo application: one resolution picker node on a canvas.
pub struct PreviewApp {
    /// Extension settings
    pub config: ExtensionConfig,
    /// The node being edited
    pub node: EditorNode,
    /// Entries offered by the preset selector
    pub presets: Vec<String>,
    /// Hooks attached to the node, `None` when the extension does not apply
    pub hooks: Option<HookChain<ResolutionPreview>>,
    /// Canvas navigation state
    pub canvas: CanvasState,
    /// Background file operation state
    pub file: FileState,
    /// Texture backing the sample image, once uploaded
    pub sample_texture: Option<egui::TextureHandle>,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
}

impl Default for PreviewApp {
    fn default() -> Self {
        Self::new(ExtensionConfig::default())
    }
}

impl PreviewApp {
    /// Creates the app with a freshly created node.
    pub fn new(config: ExtensionConfig) -> Self {
        let presets = initial_presets(&config);
        let node = EditorNode::resolution_picker(&presets);
        let mut app = Self::with_node(config, node, presets);
        if let Some(hooks) = app.hooks.as_mut() {
            hooks.on_node_created(&mut app.node);
        }
        app
    }

    /// Recreates the app from persisted state, reconfiguring the node.
    pub fn restore(state: PersistedState) -> Self {
        let presets = initial_presets(&state.config);
        let mut app = Self::with_node(state.config, state.node, presets);
        if let Some(hooks) = app.hooks.as_mut() {
            hooks.on_configure(&mut app.node);
        }
        app
    }

    /// Restores the app from eframe storage, falling back to a fresh node.
    pub fn from_storage(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|s| s.get_string(STORAGE_KEY))
            .and_then(|json| match PersistedState::from_json(&json) {
                Ok(state) => Some(state),
                Err(err) => {
                    log::warn!("discarding stored state: {err}");
                    None
                }
            })
            .map(Self::restore)
            .unwrap_or_default()
    }

    fn with_node(config: ExtensionConfig, node: EditorNode, presets: Vec<String>) -> Self {
        let hooks = ResolutionPreview::for_node_type(&config, &node.node_type).map(HookChain::with_core);
        if hooks.is_none() {
            log::warn!(
                "extension targets {:?}, node is {:?}; preview disabled",
                config.node_type,
                node.node_type
            );
        }
        Self {
            config,
            node,
            presets,
            hooks,
            canvas: CanvasState::default(),
            file: FileState::default(),
            sample_texture: None,
            dark_mode: true,
        }
    }

    /// State to persist between runs.
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            config: self.config.clone(),
            node: self.node.clone(),
        }
    }

    /// The core preview handler, if attached.
    pub fn preview(&self) -> Option<&ResolutionPreview> {
        self.hooks.as_ref().map(HookChain::core)
    }

    /// Changes a widget value and notifies the hooks.
    ///
    /// # Returns
    ///
    /// `true` if the widget exists and its value changed.
    pub fn set_widget_value(&mut self, name: &str, value: WidgetValue) -> bool {
        let Some(old_value) = self.node.widget(name).map(|w| w.value.clone()) else {
            return false;
        };
        if old_value == value {
            return false;
        }
        self.node.set_widget_value(name, value.clone());
        if let Some(hooks) = self.hooks.as_mut() {
            hooks.on_widget_changed(&mut self.node, name, &value, &old_value);
        }
        true
    }
}

/// Preset list for startup: the configured file, or the built-in list.
fn initial_presets(config: &ExtensionConfig) -> Vec<String> {
    match &config.presets_path {
        Some(path) => load_preset_list(path).unwrap_or_else(|err| {
            log::warn!("{err:#}; using built-in presets");
            builtin_presets()
        }),
        None => builtin_presets(),
    }
}
