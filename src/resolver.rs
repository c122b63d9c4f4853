//! Active resolution: turns widget values into a concrete width and height.
//!
//! Two entry points exist because the preview and the node's executed output
//! follow slightly different rules:
//!
//! - [`get_active_resolution`] drives the preview. Custom sizes are clamped
//!   first and snapped afterwards; failures fall back to 512×512.
//! - [`compute_output_resolution`] is what the node hands downstream. Custom
//!   sizes are snapped first and clamped afterwards; failures fall back to
//!   1024×1024.

use crate::constants::{
    DEFAULT_SNAP, MAX_RESOLUTION, MIN_RESOLUTION, OUTPUT_FALLBACK_RESOLUTION,
};
use crate::numeric::{
    clamp_resolution, parse_leading_int, round_to_multiple, round_to_multiple_even,
};
use crate::types::{ActiveResolution, ResolutionMode};

/// Raw widget text that determines the active resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionSource {
    /// Preset selector text, e.g. `"1024x768: XGA"` or `"Custom"`
    pub preset: String,
    /// Custom width field text
    pub custom_width: String,
    /// Custom height field text
    pub custom_height: String,
    /// Snap selector text
    pub snap: String,
    /// Whether width and height are exchanged
    pub swap: bool,
}

impl ResolutionSource {
    /// Mode implied by the preset selector.
    pub fn mode(&self) -> ResolutionMode {
        ResolutionMode::from_selector(&self.preset)
    }

    /// Resolves the source with the preview rules.
    pub fn resolve(&self) -> ActiveResolution {
        get_active_resolution(
            self.mode(),
            &self.preset,
            &self.custom_width,
            &self.custom_height,
            &self.snap,
            self.swap,
        )
    }

    /// Resolves the source with the rules the node applies when it executes.
    pub fn output(&self) -> ActiveResolution {
        let dimension = |raw: &str| {
            parse_leading_int(raw).map_or(0, |value| value.clamp(0, i64::from(u32::MAX)) as u32)
        };
        compute_output_resolution(
            &self.preset,
            dimension(&self.custom_width),
            dimension(&self.custom_height),
            &self.snap,
            self.swap,
        )
    }
}

/// Reads the snap multiple, substituting the default (64) for anything that
/// is not a positive integer.
pub fn resolve_snap(raw: &str) -> u32 {
    match parse_leading_int(raw) {
        Some(value) if value > 0 => value.min(i64::from(u32::MAX)) as u32,
        _ => DEFAULT_SNAP,
    }
}

/// Parses a preset entry of the form `"WxH"` or `"WxH: description"`.
///
/// Only the text before the first `:` is considered. Both sides must be
/// positive numbers; extra `x`-separated parts are ignored. The separator is
/// a lowercase `x` only, matching the preset file loader; `"1920X1080"`
/// previews as the fallback even though the executed output accepts it.
pub fn parse_preset(preset: &str) -> Option<ActiveResolution> {
    let base = preset.split(':').next().unwrap_or_default().trim();
    let mut parts = base.split('x');
    let width = parse_dimension(parts.next()?)?;
    let height = parse_dimension(parts.next()?)?;
    Some(ActiveResolution::new(width, height))
}

fn parse_dimension(part: &str) -> Option<u32> {
    let value: f64 = part.trim().parse().ok()?;
    if !value.is_finite() || value < 0.5 {
        return None;
    }
    Some(value.round().min(f64::from(u32::MAX)) as u32)
}

/// Computes the resolution the preview displays.
///
/// In custom mode each raw dimension is clamped into 64..=8192 and then
/// rounded to the snap multiple. In preset mode the preset text is parsed;
/// if that fails the 512×512 fallback is used. Swapping applies last, to
/// every outcome including the fallback.
///
/// # Arguments
///
/// * `mode` - Preset or custom selection
/// * `preset` - Preset selector text
/// * `custom_width` - Custom width field text
/// * `custom_height` - Custom height field text
/// * `snap` - Snap selector text
/// * `swap` - Whether to exchange width and height
pub fn get_active_resolution(
    mode: ResolutionMode,
    preset: &str,
    custom_width: &str,
    custom_height: &str,
    snap: &str,
    swap: bool,
) -> ActiveResolution {
    let resolution = match mode {
        ResolutionMode::Custom => {
            let snap = f64::from(resolve_snap(snap));
            let width = f64::from(clamp_resolution(custom_width));
            let height = f64::from(clamp_resolution(custom_height));
            ActiveResolution::new(
                round_to_multiple(width, snap) as u32,
                round_to_multiple(height, snap) as u32,
            )
        }
        ResolutionMode::Preset => parse_preset(preset).unwrap_or_else(|| {
            log::debug!("unparsable preset {preset:?}, previewing fallback");
            ActiveResolution::fallback()
        }),
    };

    if swap {
        resolution.swapped()
    } else {
        resolution
    }
}

/// Computes the width and height the node outputs when executed.
///
/// Custom mode applies only when the whole selector text is `custom`.
/// Custom dimensions are rounded to the snap multiple, halves to even, and
/// then clamped into 64..=8192. Header entries (`-- name --`) and unparsable presets produce
/// 1024×1024. Swapping applies last.
pub fn compute_output_resolution(
    preset: &str,
    custom_width: u32,
    custom_height: u32,
    divisible_by: &str,
    swap: bool,
) -> ActiveResolution {
    let resolution = if preset.trim().eq_ignore_ascii_case("custom") {
        let snap = match divisible_by.trim().parse::<i64>() {
            Ok(value) if value > 0 => value as f64,
            _ => f64::from(DEFAULT_SNAP),
        };
        let snap_and_clamp = |value: u32| {
            let rounded = round_to_multiple_even(f64::from(value), snap);
            rounded.clamp(f64::from(MIN_RESOLUTION), f64::from(MAX_RESOLUTION)) as u32
        };
        ActiveResolution::new(snap_and_clamp(custom_width), snap_and_clamp(custom_height))
    } else if preset.starts_with("--") {
        log::debug!("header {preset:?} selected, output falls back");
        ActiveResolution::new(OUTPUT_FALLBACK_RESOLUTION, OUTPUT_FALLBACK_RESOLUTION)
    } else {
        parse_output_preset(preset).unwrap_or_else(|| {
            log::warn!("failed to parse resolution {preset:?}, output falls back");
            ActiveResolution::new(OUTPUT_FALLBACK_RESOLUTION, OUTPUT_FALLBACK_RESOLUTION)
        })
    };

    if swap {
        resolution.swapped()
    } else {
        resolution
    }
}

/// Output presets must be exactly two integers separated by `x`.
fn parse_output_preset(preset: &str) -> Option<ActiveResolution> {
    let base = preset.split(':').next().unwrap_or_default().trim();
    let lowered = base.to_lowercase();
    let (width, height) = lowered.split_once('x')?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    Some(ActiveResolution::new(width, height))
}
