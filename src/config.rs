//! Runtime configuration of the preview extension.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{NODE_TYPE_NAME, SAMPLE_IMAGE_PATH};

/// Settings for attaching the preview to editor nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Node type the preview attaches to
    pub node_type: String,
    /// Where the host loads the sample image from
    pub sample_image_path: String,
    /// Preset file to load instead of the built-in list
    pub presets_path: Option<PathBuf>,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            node_type: NODE_TYPE_NAME.to_string(),
            sample_image_path: SAMPLE_IMAGE_PATH.to_string(),
            presets_path: None,
        }
    }
}

impl ExtensionConfig {
    /// Whether nodes of `node_type` get the preview.
    pub fn applies_to(&self, node_type: &str) -> bool {
        self.node_type == node_type
    }
}
