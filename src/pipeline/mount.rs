//! Mount API - application root and mounting.
//!
//! [`Ui`] owns the document and the lifecycle registry. Builders, mounting
//! and navigation all take it by reference, so every subsystem shares one
//! registry without any global state, and tests can create as many
//! independent instances as they like.
//!
//! # Example
//!
//! ```ignore
//! use spark_nav::{Ui, Direction};
//! use spark_nav::primitives::{el, Component};
//!
//! let ui = Ui::new();
//! let app = el("div").id("app").parent(ui.document().body()).build(&ui)?;
//!
//! let root = el("button").selectable(true).build(&ui)?;
//! ui.mount("#app", Component::new(root, || println!("unmounted")))?;
//!
//! ui.navigate(Direction::Right, None)?;
//! ui.flush();
//! ```

use crate::dom::Document;
use crate::engine::LifecycleRegistry;
use crate::error::Result;
use crate::primitives::{Component, Mountable};
use crate::state::{Navigator, NavigatorConfig};
use crate::types::{Direction, NodeId};

// =============================================================================
// Ui
// =============================================================================

/// Application root.
#[derive(Debug, Clone)]
pub struct Ui {
    document: Document,
    lifecycle: LifecycleRegistry<Document>,
    navigator: NavigatorConfig,
}

impl Ui {
    /// Fresh document with its own lifecycle registry.
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// Wrap an existing document. Subscribes a new registry to it.
    pub fn with_document(document: Document) -> Self {
        let lifecycle = LifecycleRegistry::observe(document.clone());
        Self {
            document,
            lifecycle,
            navigator: NavigatorConfig::default(),
        }
    }

    pub fn with_navigator_config(mut self, config: NavigatorConfig) -> Self {
        self.navigator = config;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn lifecycle(&self) -> &LifecycleRegistry<Document> {
        &self.lifecycle
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Run `callback` once `node` leaves the tree.
    pub fn on_removed(&self, node: NodeId, callback: impl FnOnce() + 'static) -> Result<()> {
        self.lifecycle.register(node, callback)
    }

    /// Append a component's root to `parent` and track its cleanup.
    pub fn attach_component(&self, parent: NodeId, mut component: Component) -> Result<NodeId> {
        let root = component.root();
        self.document.append_child(parent, root)?;
        if let Some(cleanup) = component.take_cleanup() {
            self.lifecycle.register(root, cleanup)?;
        }
        Ok(root)
    }

    /// Detach `node`, run the cleanups its removal makes due, then free its
    /// subtree. Returns the number of nodes freed.
    pub fn unmount(&self, node: NodeId) -> Result<usize> {
        self.document.detach(node)?;
        self.flush();
        self.document.release(node)
    }

    /// Deliver pending tree mutations, running any due cleanups.
    pub fn flush(&self) -> usize {
        self.document.deliver_mutations()
    }

    // -------------------------------------------------------------------------
    // Mount
    // -------------------------------------------------------------------------

    /// Mount `content` into the first element matching `selector`.
    ///
    /// Text replaces the target's children; elements and components are
    /// appended. Returns the target, or `None` when nothing matches.
    pub fn mount(&self, selector: &str, content: impl Into<Mountable>) -> Result<Option<NodeId>> {
        let Some(target) = self.document.query(selector) else {
            tracing::debug!(selector, "mount target not found");
            return Ok(None);
        };

        match content.into() {
            Mountable::Text(text) => {
                let node = self.document.create_text(&text);
                if let Err(err) = self.document.replace_children(target, &[node]) {
                    self.discard(node);
                    return Err(err);
                }
            }
            Mountable::Element(node) => self.document.append_child(target, node)?,
            Mountable::Component(component) => {
                self.attach_component(target, component)?;
            }
        }

        tracing::debug!(selector, %target, "mounted");
        Ok(Some(target))
    }

    /// Free a node a failed build left behind. Nothing else can reach it.
    pub(crate) fn discard(&self, node: NodeId) {
        let released = self
            .document
            .detach(node)
            .and_then(|_| self.document.release(node));
        if let Err(err) = released {
            tracing::debug!(%node, %err, "could not free abandoned node");
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    pub fn navigator(&self) -> Navigator<'_, Document> {
        Navigator::with_config(&self.document, self.navigator)
    }

    /// Best focus target in `direction`, without moving focus.
    pub fn find_next(&self, direction: Direction, scope: Option<NodeId>) -> Option<NodeId> {
        self.navigator().find_next(direction, scope)
    }

    /// Move focus in `direction`. Returns the newly focused node.
    pub fn navigate(&self, direction: Direction, scope: Option<NodeId>) -> Result<Option<NodeId>> {
        let next = self.find_next(direction, scope);
        if let Some(node) = next {
            self.document.focus(node)?;
        }
        Ok(next)
    }

    pub fn is_focused_within(&self, node: NodeId) -> bool {
        self.document.is_focused_within(node)
    }

    pub fn no_element_focused(&self) -> bool {
        self.document.no_element_focused()
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::el;
    use crate::state::set_nav_scope;
    use crate::types::Rect;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_mount_text_replaces_children() {
        let ui = Ui::new();
        let doc = ui.document();
        let app = el("div")
            .id("app")
            .parent(doc.body())
            .child("old")
            .build(&ui)
            .unwrap();

        assert_eq!(ui.mount("#app", "new").unwrap(), Some(app));
        assert_eq!(doc.children(app).len(), 1);
        assert_eq!(doc.text_content(app).as_deref(), Some("new"));
    }

    #[test]
    fn test_mount_missing_target() {
        let ui = Ui::new();
        let node = ui.document().create_element("div");
        assert_eq!(ui.mount("#nowhere", node).unwrap(), None);
        assert_eq!(ui.document().parent(node), None);
    }

    #[test]
    fn test_mount_component_tracks_cleanup() {
        let ui = Ui::new();
        let doc = ui.document();
        el("main").parent(doc.body()).build(&ui).unwrap();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let root = doc.create_element("div");
        let component = Component::new(root, move || count_clone.set(count_clone.get() + 1));

        let target = ui.mount("main", component).unwrap().unwrap();
        assert_eq!(doc.parent(root), Some(target));

        doc.replace_children(target, &[]).unwrap();
        assert_eq!(count.get(), 0);
        ui.flush();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_navigate_moves_focus() {
        let ui = Ui::new();
        let doc = ui.document();
        set_nav_scope(doc, doc.body(), true).unwrap();

        let first = el("button").selectable(true).parent(doc.body()).build(&ui).unwrap();
        let second = el("button").selectable(true).parent(doc.body()).build(&ui).unwrap();
        doc.set_rect(first, Rect::from_xywh(0.0, 0.0, 10.0, 10.0)).unwrap();
        doc.set_rect(second, Rect::from_xywh(20.0, 0.0, 10.0, 10.0)).unwrap();
        doc.focus(first).unwrap();

        assert_eq!(ui.navigate(Direction::Right, None).unwrap(), Some(second));
        assert_eq!(doc.focused(), Some(second));
        assert!(ui.is_focused_within(doc.body()));

        assert_eq!(ui.navigate(Direction::Right, None).unwrap(), None);
        assert_eq!(doc.focused(), Some(second));

        assert_eq!(ui.navigate(Direction::Left, None).unwrap(), Some(first));
    }

    #[test]
    fn test_on_removed() {
        let ui = Ui::new();
        let node = el("div").parent(ui.document().body()).build(&ui).unwrap();
        let called = Rc::new(Cell::new(false));
        let called_clone = called.clone();
        ui.on_removed(node, move || called_clone.set(true)).unwrap();

        ui.document().detach(node).unwrap();
        assert!(!called.get());
        assert_eq!(ui.flush(), 1);
        assert!(called.get());
    }

    #[test]
    fn test_unmount_runs_cleanup_and_frees_nodes() {
        let ui = Ui::new();
        let doc = ui.document();
        let baseline = doc.node_count();
        let count = Rc::new(Cell::new(0));

        for _ in 0..1000 {
            let count = count.clone();
            let node = el("div")
                .parent(doc.body())
                .child("x")
                .build(&ui)
                .unwrap();
            ui.on_removed(node, move || count.set(count.get() + 1)).unwrap();
            assert_eq!(ui.unmount(node).unwrap(), 2);
        }

        assert_eq!(count.get(), 1000);
        assert_eq!(doc.node_count(), baseline);
        assert!(ui.lifecycle().is_empty());
    }
}
