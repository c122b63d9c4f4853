//! Preset list loading.
//!
//! Preset files hold one resolution per line:
//!
//! ```text
//! // comments start with two slashes
//! --SDXL
//! 1024x1024: square
//! 1216x832
//! ```
//!
//! `--name` lines become group headers shown as `-- name --`. Entries outside
//! 64..=8192 or that do not parse are skipped. A `Custom` entry is always
//! appended so the custom fields stay reachable.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::constants::{MAX_RESOLUTION, MIN_RESOLUTION};

/// Entry that switches the node into custom mode.
pub const CUSTOM_ENTRY: &str = "Custom";

/// Preset list built into the crate, used until a file is loaded.
pub const BUILTIN_PRESETS: &str = "\
--SD 1.5
512x512: square
512x768: portrait
768x512: landscape
--SDXL
1024x1024: square
896x1152: portrait
832x1216: portrait
1152x896: landscape
1216x832: landscape
1344x768: wide
1536x640: ultrawide
--Video
1280x720: 720p
1920x1080: 1080p
";

/// Whether a preset entry is a group header rather than a resolution.
pub fn is_header(entry: &str) -> bool {
    entry.starts_with("--")
}

/// Parses preset file contents into selector entries.
///
/// # Arguments
///
/// * `text` - Contents of a preset file
///
/// # Returns
///
/// Entries in file order, always ending with [`CUSTOM_ENTRY`] unless the
/// file already lists it.
pub fn parse_preset_list(text: &str) -> Vec<String> {
    let mut entries = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if let Some(header) = line.strip_prefix("--") {
            entries.push(format!("-- {} --", header.trim()));
            continue;
        }

        let (resolution, label) = match line.split_once(':') {
            Some((resolution, label)) => (resolution.trim(), label.trim()),
            None => (line, ""),
        };

        if !resolution.contains('x') {
            continue;
        }
        let Some((width, height)) = parse_dimensions(resolution) else {
            log::debug!("skipping preset line {line:?}");
            continue;
        };
        let range = i64::from(MIN_RESOLUTION)..=i64::from(MAX_RESOLUTION);
        if !range.contains(&width) || !range.contains(&height) {
            log::debug!("skipping out-of-range preset {resolution}");
            continue;
        }

        if label.is_empty() {
            entries.push(resolution.to_string());
        } else {
            entries.push(format!("{resolution}: {label}"));
        }
    }

    if entries.is_empty() {
        entries.push("512x512".to_string());
    }
    if !entries.iter().any(|entry| entry == CUSTOM_ENTRY) {
        entries.push(CUSTOM_ENTRY.to_string());
    }
    entries
}

fn parse_dimensions(resolution: &str) -> Option<(i64, i64)> {
    let lowered = resolution.to_lowercase();
    let mut parts = lowered.split('x');
    let width = parts.next()?.trim().parse().ok()?;
    let height = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((width, height))
}

/// Loads a preset list from disk.
///
/// A missing file is not an error: the small default list
/// `["512x512", "1024x1024"]` is returned instead. Any other I/O failure is
/// reported with the path attached.
pub fn load_preset_list(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        log::debug!("preset file {} missing, using defaults", path.display());
        return Ok(vec!["512x512".to_string(), "1024x1024".to_string()]);
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read preset file {}", path.display()))?;
    Ok(parse_preset_list(&text))
}

/// The built-in preset list.
pub fn builtin_presets() -> Vec<String> {
    parse_preset_list(BUILTIN_PRESETS)
}
