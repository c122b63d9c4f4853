//! Lifecycle hooks and their chaining.
//!
//! A host may already have behaviour installed on a node type before the
//! preview attaches. Rather than wrapping and re-calling the previous hook,
//! every participant implements [`NodeHook`] and a [`HookChain`] calls them in
//! registration order, with the core handler always last.

use crate::node::HostNode;
use crate::surface::DrawingSurface;
use crate::types::WidgetValue;

/// Callbacks a node type receives over its lifetime.
///
/// Every method defaults to doing nothing, so handlers implement only what
/// they care about.
#[allow(unused_variables)]
pub trait NodeHook {
    /// The node was just created.
    fn on_node_created(&mut self, node: &mut dyn HostNode) {}

    /// The node was restored from saved state.
    fn on_configure(&mut self, node: &mut dyn HostNode) {}

    /// A widget value changed.
    ///
    /// # Arguments
    ///
    /// * `node` - The node owning the widget
    /// * `widget` - Name of the widget that changed
    /// * `value` - New value
    /// * `old_value` - Value before the change
    fn on_widget_changed(
        &mut self,
        node: &mut dyn HostNode,
        widget: &str,
        value: &WidgetValue,
        old_value: &WidgetValue,
    ) {
    }

    /// The node's foreground is being drawn.
    fn on_draw_foreground(&mut self, node: &mut dyn HostNode, surface: &mut dyn DrawingSurface) {}

    /// An image requested by a handler finished loading.
    fn on_image_loaded(&mut self, node: &mut dyn HostNode, width: u32, height: u32) {}
}

/// Ordered hook handlers ending with a core handler of type `C`.
pub struct HookChain<C: NodeHook> {
    handlers: Vec<Box<dyn NodeHook>>,
    core: C,
}

impl<C: NodeHook> HookChain<C> {
    /// Creates a chain holding only the core handler.
    pub fn with_core(core: C) -> Self {
        Self {
            handlers: Vec::new(),
            core,
        }
    }

    /// Adds a handler that runs after the handlers already registered and
    /// before the core handler.
    pub fn push(&mut self, handler: Box<dyn NodeHook>) {
        self.handlers.push(handler);
    }

    /// Builder form of [`HookChain::push`].
    pub fn with(mut self, handler: Box<dyn NodeHook>) -> Self {
        self.push(handler);
        self
    }

    /// Number of handlers including the core.
    pub fn len(&self) -> usize {
        self.handlers.len() + 1
    }

    /// Always `false`; a chain has at least its core handler.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The core handler.
    pub fn core(&self) -> &C {
        &self.core
    }

    /// The core handler, mutably.
    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    fn each(&mut self, mut f: impl FnMut(&mut dyn NodeHook)) {
        for handler in &mut self.handlers {
            f(handler.as_mut());
        }
        f(&mut self.core);
    }
}

impl<C: NodeHook> NodeHook for HookChain<C> {
    fn on_node_created(&mut self, node: &mut dyn HostNode) {
        self.each(|h| h.on_node_created(node));
    }

    fn on_configure(&mut self, node: &mut dyn HostNode) {
        self.each(|h| h.on_configure(node));
    }

    fn on_widget_changed(
        &mut self,
        node: &mut dyn HostNode,
        widget: &str,
        value: &WidgetValue,
        old_value: &WidgetValue,
    ) {
        self.each(|h| h.on_widget_changed(node, widget, value, old_value));
    }

    fn on_draw_foreground(&mut self, node: &mut dyn HostNode, surface: &mut dyn DrawingSurface) {
        self.each(|h| h.on_draw_foreground(node, surface));
    }

    fn on_image_loaded(&mut self, node: &mut dyn HostNode, width: u32, height: u32) {
        self.each(|h| h.on_image_loaded(node, width, height));
    }
}
