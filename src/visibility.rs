//! Mode-dependent widget visibility and deferred node resizing.
//!
//! The custom width, height and snap widgets only make sense in custom mode.
//! Hiding them changes how tall the node should be, but resizing from inside
//! a value-changed callback would fight the host's own layout pass, so the
//! resize is queued here and carried out on the next draw.

use std::collections::VecDeque;

use crate::node::{HostNode, WidgetCache};
use crate::types::{CustomVisibility, ResolutionMode};

/// Computes which custom widgets should be shown for `mode`.
pub fn update_custom_visibility(mode: ResolutionMode) -> CustomVisibility {
    let custom = mode.is_custom();
    CustomVisibility {
        width_visible: custom,
        height_visible: custom,
        snap_visible: custom,
    }
}

/// Applies the visibility for `mode` to the node's custom widgets.
///
/// Hidden widgets also get a zero size override so the host does not keep
/// an empty row for them.
///
/// # Returns
///
/// The applied visibility and whether any widget changed.
pub fn apply_custom_visibility(
    node: &mut dyn HostNode,
    cache: &WidgetCache,
    mode: ResolutionMode,
) -> (CustomVisibility, bool) {
    let visibility = update_custom_visibility(mode);
    let flags = [
        visibility.width_visible,
        visibility.height_visible,
        visibility.snap_visible,
    ];

    let mut changed = false;
    let widgets = node.widgets_mut();
    for (index, visible) in cache.custom_widgets().into_iter().zip(flags) {
        let Some(widget) = index.and_then(|i| widgets.get_mut(i)) else {
            continue;
        };
        let size_override = if visible { None } else { Some((0.0, 0.0)) };
        if widget.hidden == visible || widget.size_override != size_override {
            widget.hidden = !visible;
            widget.size_override = size_override;
            changed = true;
        }
    }

    (visibility, changed)
}

/// Work deferred to the next draw pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingAction {
    /// Recompute the node size from the widget stack
    Resize,
}

/// Queue of deferred actions. Each action is queued at most once between
/// drains.
#[derive(Debug, Clone, Default)]
pub struct PendingActions {
    queue: VecDeque<PendingAction>,
}

impl PendingActions {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `action` unless it is already waiting.
    ///
    /// # Returns
    ///
    /// `true` if the action was added.
    pub fn request(&mut self, action: PendingAction) -> bool {
        if self.queue.contains(&action) {
            return false;
        }
        self.queue.push_back(action);
        true
    }

    /// Queues a node resize.
    pub fn request_resize(&mut self) -> bool {
        self.request(PendingAction::Resize)
    }

    /// Whether `action` is waiting.
    pub fn is_pending(&self, action: PendingAction) -> bool {
        self.queue.contains(&action)
    }

    /// Number of waiting actions.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Removes and returns every waiting action, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = PendingAction> + '_ {
        self.queue.drain(..)
    }
}

/// The state that determines the node's height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LayoutKey {
    mode: ResolutionMode,
    preview_enabled: bool,
}

/// Keeps widget visibility in step with the selection mode and queues a
/// resize whenever the mode or the preview toggle changes.
#[derive(Debug, Clone, Default)]
pub struct VisibilityController {
    last_layout: Option<LayoutKey>,
    pending: PendingActions,
}

impl VisibilityController {
    /// Creates a controller that has not seen any layout yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies visibility for `mode` and records the layout state.
    ///
    /// # Arguments
    ///
    /// * `node` - The node whose widgets are updated
    /// * `cache` - Cached widget positions
    /// * `mode` - Current selection mode
    /// * `preview_enabled` - Current preview toggle
    ///
    /// # Returns
    ///
    /// The visibility now applied to the custom widgets.
    pub fn update(
        &mut self,
        node: &mut dyn HostNode,
        cache: &WidgetCache,
        mode: ResolutionMode,
        preview_enabled: bool,
    ) -> CustomVisibility {
        let (visibility, changed) = apply_custom_visibility(node, cache, mode);
        if changed {
            log::debug!("custom widgets now {}", if mode.is_custom() { "shown" } else { "hidden" });
        }

        let key = LayoutKey {
            mode,
            preview_enabled,
        };
        if self.last_layout != Some(key) {
            self.last_layout = Some(key);
            self.pending.request_resize();
        }
        visibility
    }

    /// Forgets the recorded layout so the next update queues a resize.
    pub fn reset(&mut self) {
        self.last_layout = None;
    }

    /// Queues a resize regardless of the layout state.
    pub fn request_resize(&mut self) -> bool {
        self.pending.request_resize()
    }

    /// Deferred actions waiting for the next draw.
    pub fn pending(&self) -> &PendingActions {
        &self.pending
    }

    /// Removes and returns the waiting actions.
    pub fn take_pending(&mut self) -> Vec<PendingAction> {
        self.pending.drain().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::node::EditorNode;

    fn picker() -> (EditorNode, WidgetCache) {
        let node = EditorNode::resolution_picker(&["1024x1024".to_string()]);
        let mut cache = WidgetCache::default();
        cache.fill(&node);
        (node, cache)
    }

    #[test]
    fn test_visibility_follows_mode() {
        assert_eq!(
            update_custom_visibility(ResolutionMode::Custom),
            CustomVisibility {
                width_visible: true,
                height_visible: true,
                snap_visible: true
            }
        );
        let preset = update_custom_visibility(ResolutionMode::Preset);
        assert!(!preset.width_visible && !preset.height_visible && !preset.snap_visible);
    }

    #[test]
    fn test_apply_hides_and_collapses_custom_widgets() {
        let (mut node, cache) = picker();
        let (_, changed) = apply_custom_visibility(&mut node, &cache, ResolutionMode::Preset);
        assert!(changed);
        for name in [CUSTOM_WIDTH_WIDGET, CUSTOM_HEIGHT_WIDGET, SNAP_WIDGET] {
            let widget = node.widget(name).unwrap();
            assert!(widget.hidden);
            assert_eq!(widget.size_override, Some((0.0, 0.0)));
        }
        assert!(!node.widget(RESOLUTION_WIDGET).unwrap().hidden);
        assert_eq!(node.visible_widget_count(), 5);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let (mut node, cache) = picker();
        let (first, changed_first) =
            apply_custom_visibility(&mut node, &cache, ResolutionMode::Preset);
        let (second, changed_second) =
            apply_custom_visibility(&mut node, &cache, ResolutionMode::Preset);
        assert_eq!(first, second);
        assert!(changed_first);
        assert!(!changed_second);
    }

    #[test]
    fn test_apply_shows_widgets_again() {
        let (mut node, cache) = picker();
        apply_custom_visibility(&mut node, &cache, ResolutionMode::Preset);
        let (_, changed) = apply_custom_visibility(&mut node, &cache, ResolutionMode::Custom);
        assert!(changed);
        assert_eq!(node.visible_widget_count(), 8);
        assert_eq!(node.widget(SNAP_WIDGET).unwrap().size_override, None);
    }

    #[test]
    fn test_pending_actions_deduplicate() {
        let mut pending = PendingActions::new();
        assert!(pending.request_resize());
        assert!(!pending.request_resize());
        assert_eq!(pending.len(), 1);
        assert_eq!(pending.drain().collect::<Vec<_>>(), vec![PendingAction::Resize]);
        assert!(pending.is_empty());
        assert!(pending.request_resize());
    }

    #[test]
    fn test_same_mode_twice_queues_one_resize() {
        let (mut node, cache) = picker();
        let mut controller = VisibilityController::new();
        let first = controller.update(&mut node, &cache, ResolutionMode::Custom, true);
        let second = controller.update(&mut node, &cache, ResolutionMode::Custom, true);
        assert_eq!(first, second);
        assert_eq!(controller.take_pending(), vec![PendingAction::Resize]);

        controller.update(&mut node, &cache, ResolutionMode::Custom, true);
        assert!(controller.pending().is_empty());
    }

    #[test]
    fn test_preview_toggle_queues_resize() {
        let (mut node, cache) = picker();
        let mut controller = VisibilityController::new();
        controller.update(&mut node, &cache, ResolutionMode::Preset, true);
        controller.take_pending();

        controller.update(&mut node, &cache, ResolutionMode::Preset, false);
        assert!(controller.pending().is_pending(PendingAction::Resize));
    }

    #[test]
    fn test_reset_forces_resize() {
        let (mut node, cache) = picker();
        let mut controller = VisibilityController::new();
        controller.update(&mut node, &cache, ResolutionMode::Preset, true);
        controller.take_pending();
        controller.reset();
        controller.update(&mut node, &cache, ResolutionMode::Preset, true);
        assert_eq!(controller.take_pending(), vec![PendingAction::Resize]);
    }
}
