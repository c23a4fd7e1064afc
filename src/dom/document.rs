//! Document - in-memory UI tree.
//!
//! An arena of element and text nodes behind a cheap-clone handle. Every
//! clone points at the same tree, so callbacks can capture a `Document` and
//! mutate it later.
//!
//! Child-list mutations are queued per observer and only handed out by
//! [`Document::deliver_mutations`], which plays the role of the host's
//! notification checkpoint. Nothing observes a removal synchronously.
//!
//! Focus lives in a signal so reactive code can follow it.
//!
//! # Example
//!
//! ```ignore
//! use spark_nav::dom::Document;
//!
//! let doc = Document::new();
//! let button = doc.create_element("button");
//! doc.append_child(doc.body(), button)?;
//! doc.focus(button)?;
//! assert!(doc.is_focused_within(doc.body()));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use super::host::Host;
use super::mutation::{
    MutationCallback, MutationRecord, MutationSource, ObserveOptions, ObserverId,
};
use crate::error::{Error, Result};
use crate::types::{NodeId, Rect};

// =============================================================================
// Nodes
// =============================================================================

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String },
    Text { content: String },
}

struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: HashMap<String, String>,
    rect: Rect,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            attributes: HashMap::new(),
            rect: Rect::default(),
        }
    }

    fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }
}

// =============================================================================
// Observer Registrations
// =============================================================================

struct Registration {
    root: NodeId,
    options: ObserveOptions,
    queue: Vec<MutationRecord>,
    /// Taken out while the callback runs.
    callback: Option<MutationCallback>,
}

impl Registration {
    fn wants(&self, tree: &Tree, target: NodeId) -> bool {
        if !self.options.contains(ObserveOptions::CHILD_LIST) {
            return false;
        }
        self.root == target
            || (self.options.contains(ObserveOptions::SUBTREE) && tree.contains(self.root, target))
    }
}

// =============================================================================
// Tree State
// =============================================================================

struct Tree {
    nodes: HashMap<NodeId, NodeData>,
    next_id: u64,
    document_element: NodeId,
    head: NodeId,
    body: NodeId,
    observers: Vec<Registration>,
}

impl Tree {
    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, NodeData::new(kind));
        id
    }

    fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(&id).ok_or(Error::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(&id).ok_or(Error::UnknownNode(id))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        let node = self.node_mut(id)?;
        if !node.is_element() {
            return Err(Error::invalid_argument(format!("{id} is not an element")));
        }
        Ok(node)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    /// Strict descendants in document order (pre-order).
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.nodes.get(&root) {
            Some(node) => node.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// `root` followed by its descendants.
    fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut nodes = vec![root];
        nodes.extend(self.descendants(root));
        nodes
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
    }

    /// Detach `child` from its parent and queue the removal.
    /// Returns the old parent.
    fn detach(&mut self, child: NodeId) -> Option<NodeId> {
        let parent = self.nodes.get(&child)?.parent?;
        let removed = self.subtree(child);
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|&c| c != child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
        self.record(parent, Vec::new(), removed);
        Some(parent)
    }

    /// Drop `root` and every descendant from the arena. Returns how many
    /// nodes were freed. `root` must already be detached.
    fn release(&mut self, root: NodeId) -> usize {
        let doomed = self.subtree(root);
        for id in &doomed {
            self.nodes.remove(id);
        }
        doomed.len()
    }

    fn record(&mut self, target: NodeId, added_nodes: Vec<NodeId>, removed_nodes: Vec<NodeId>) {
        let interested: Vec<usize> = self
            .observers
            .iter()
            .enumerate()
            .filter(|(_, reg)| reg.wants(self, target))
            .map(|(index, _)| index)
            .collect();

        for index in interested {
            self.observers[index].queue.push(MutationRecord {
                target,
                added_nodes: added_nodes.clone(),
                removed_nodes: removed_nodes.clone(),
            });
        }
    }

    fn check_insertable(&self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.node(parent)?.is_element() {
            return Err(Error::hierarchy(format!("{parent} cannot have children")));
        }
        self.node(child)?;
        if self.contains(child, parent) {
            return Err(Error::hierarchy(format!(
                "{child} is an inclusive ancestor of {parent}"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Document Handle
// =============================================================================

/// Shared handle to an in-memory tree rooted at `html > (head, body)`.
#[derive(Clone)]
pub struct Document {
    tree: Rc<RefCell<Tree>>,
    focused: Signal<Option<NodeId>>,
}

impl Document {
    pub fn new() -> Self {
        let mut tree = Tree {
            nodes: HashMap::new(),
            next_id: 1,
            document_element: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            observers: Vec::new(),
        };

        let html = tree.insert(element_kind("html"));
        let head = tree.insert(element_kind("head"));
        let body = tree.insert(element_kind("body"));
        tree.link(html, head);
        tree.link(html, body);
        tree.document_element = html;
        tree.head = head;
        tree.body = body;

        Self {
            tree: Rc::new(RefCell::new(tree)),
            focused: signal(None),
        }
    }

    // -------------------------------------------------------------------------
    // Well-known nodes
    // -------------------------------------------------------------------------

    pub fn document_element(&self) -> NodeId {
        self.tree.borrow().document_element
    }

    pub fn head(&self) -> NodeId {
        self.tree.borrow().head
    }

    pub fn body(&self) -> NodeId {
        self.tree.borrow().body
    }

    // -------------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------------

    /// Create a detached element. Tag names are stored lower-case.
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.tree.borrow_mut().insert(element_kind(tag))
    }

    /// Create a detached text node.
    pub fn create_text(&self, content: &str) -> NodeId {
        self.tree.borrow_mut().insert(NodeKind::Text {
            content: content.to_string(),
        })
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Append `child` as the last child of `parent`, moving it if it is
    /// already attached somewhere.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        {
            let mut tree = self.tree.borrow_mut();
            tree.check_insertable(parent, child)?;
            tree.detach(child);
            tree.link(parent, child);
            let added = tree.subtree(child);
            tree.record(parent, added, Vec::new());
        }
        self.sync_focus();
        Ok(())
    }

    /// Remove `child` from `parent`.
    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        {
            let mut tree = self.tree.borrow_mut();
            tree.node(parent)?;
            if tree.node(child)?.parent != Some(parent) {
                return Err(Error::NotFound { parent, child });
            }
            tree.detach(child);
        }
        self.sync_focus();
        Ok(())
    }

    /// Detach `node` from whatever parent it has.
    ///
    /// Returns `false` if it was already detached.
    pub fn detach(&self, node: NodeId) -> Result<bool> {
        let detached = {
            let mut tree = self.tree.borrow_mut();
            tree.node(node)?;
            tree.detach(node).is_some()
        };
        self.sync_focus();
        Ok(detached)
    }

    /// Free a detached subtree.
    ///
    /// Ids inside it become unknown to the document; later calls with them
    /// fail with [`Error::UnknownNode`]. Records already queued for the
    /// subtree are still delivered. Returns the number of nodes freed.
    pub fn release(&self, node: NodeId) -> Result<usize> {
        let freed = {
            let mut tree = self.tree.borrow_mut();
            if [tree.document_element, tree.head, tree.body].contains(&node) {
                return Err(Error::hierarchy(format!("{node} is a well-known node")));
            }
            if let Some(parent) = tree.node(node)?.parent {
                return Err(Error::hierarchy(format!(
                    "{node} is still attached to {parent}"
                )));
            }
            tree.release(node)
        };
        tracing::trace!(%node, freed, "released subtree");
        Ok(freed)
    }

    /// Replace every child of `parent` with `children`.
    pub fn replace_children(&self, parent: NodeId, children: &[NodeId]) -> Result<()> {
        {
            let mut tree = self.tree.borrow_mut();
            for &child in children {
                tree.check_insertable(parent, child)?;
            }
            let existing = tree.node(parent)?.children.clone();
            for child in existing {
                tree.detach(child);
            }
            for &child in children {
                tree.detach(child);
                tree.link(parent, child);
                let added = tree.subtree(child);
                tree.record(parent, added, Vec::new());
            }
        }
        self.sync_focus();
        Ok(())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.borrow().nodes.get(&node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .borrow()
            .nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Strict descendants of `node` in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.borrow().descendants(node)
    }

    /// Inclusive containment.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree.borrow().contains(ancestor, node)
    }

    /// Attached under the document element.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let tree = self.tree.borrow();
        tree.contains(tree.document_element, node)
    }

    /// Nearest inclusive ancestor matching `predicate`.
    ///
    /// The tree is not borrowed while `predicate` runs, so it may query
    /// this document.
    pub fn closest(&self, node: NodeId, predicate: impl Fn(NodeId) -> bool) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if !self.tree.borrow().nodes.contains_key(&id) {
                return None;
            }
            if predicate(id) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.tree.borrow().nodes.get(&node).map(|n| n.kind.clone())
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.tree
            .borrow()
            .nodes
            .get(&node)
            .is_some_and(NodeData::is_element)
    }

    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        match self.kind(node)? {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Text { .. } => None,
        }
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> Option<String> {
        let tree = self.tree.borrow();
        let mut text = String::new();
        for id in tree.node(node).ok().map(|_| tree.subtree(node))? {
            if let Some(NodeKind::Text { content }) = tree.nodes.get(&id).map(|n| &n.kind) {
                text.push_str(content);
            }
        }
        Some(text)
    }

    /// First connected element matching `selector`, in document order.
    ///
    /// Supports `#id` and bare tag names.
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        let selector = selector.trim();
        let tree = self.tree.borrow();
        tree.subtree(tree.document_element).into_iter().find(|id| {
            let Some(node) = tree.nodes.get(id) else {
                return false;
            };
            let NodeKind::Element { tag } = &node.kind else {
                return false;
            };
            match selector.strip_prefix('#') {
                Some(wanted) => node.attributes.get("id").is_some_and(|v| v == wanted),
                None => tag.eq_ignore_ascii_case(selector),
            }
        })
    }

    // -------------------------------------------------------------------------
    // Attributes
    // -------------------------------------------------------------------------

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        tree.element_mut(node)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree
            .borrow()
            .nodes
            .get(&node)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.tree
            .borrow()
            .nodes
            .get(&node)
            .is_some_and(|n| n.attributes.contains_key(name))
    }

    /// Returns whether the attribute was present.
    pub fn remove_attribute(&self, node: NodeId, name: &str) -> bool {
        self.tree
            .borrow_mut()
            .nodes
            .get_mut(&node)
            .is_some_and(|n| n.attributes.remove(name).is_some())
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Store the layout rect of `node`.
    pub fn set_rect(&self, node: NodeId, rect: Rect) -> Result<()> {
        self.tree.borrow_mut().node_mut(node)?.rect = rect;
        Ok(())
    }

    /// Stored rect, zero-sized when never set.
    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.tree.borrow().nodes.get(&node).map(|n| n.rect)
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// Focus `node`. Focusing a detached element is a no-op.
    pub fn focus(&self, node: NodeId) -> Result<()> {
        if !self.is_element(node) {
            return Err(Error::invalid_argument(format!("cannot focus {node}")));
        }
        if !self.is_connected(node) {
            tracing::trace!(%node, "focus ignored for detached node");
            return Ok(());
        }
        if self.focused.get() != Some(node) {
            self.focused.set(Some(node));
        }
        Ok(())
    }

    pub fn blur(&self) {
        if self.focused.get().is_some() {
            self.focused.set(None);
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get()
    }

    /// The focus signal itself, for deriveds and effects.
    pub fn focused_signal(&self) -> Signal<Option<NodeId>> {
        self.focused.clone()
    }

    /// `node` is focused or contains the focused node.
    pub fn is_focused_within(&self, node: NodeId) -> bool {
        self.focused().is_some_and(|focused| self.contains(node, focused))
    }

    /// Nothing is focused, or only the body is.
    pub fn no_element_focused(&self) -> bool {
        match self.focused() {
            None => true,
            Some(focused) => focused == self.body(),
        }
    }

    /// Drop focus once the focused node has left the tree.
    fn sync_focus(&self) {
        let Some(focused) = self.focused.get() else {
            return;
        };
        if !self.is_connected(focused) {
            self.focused.set(None);
        }
    }

    // -------------------------------------------------------------------------
    // Mutation Delivery
    // -------------------------------------------------------------------------

    /// Hand every queued batch to its observer.
    ///
    /// Runs until no observer has pending records, so mutations made by a
    /// callback are delivered in the same call. Returns the number of
    /// batches delivered.
    pub fn deliver_mutations(&self) -> usize {
        let mut delivered = 0;
        loop {
            let pending = {
                let mut tree = self.tree.borrow_mut();
                tree.observers
                    .iter_mut()
                    .enumerate()
                    .find_map(|(index, reg)| {
                        if reg.queue.is_empty() {
                            return None;
                        }
                        let callback = reg.callback.take()?;
                        Some((index, std::mem::take(&mut reg.queue), callback))
                    })
            };
            let Some((index, records, mut callback)) = pending else {
                break;
            };

            tracing::trace!(observer = index, records = records.len(), "mutation batch");
            callback(&records);
            delivered += 1;

            if let Some(reg) = self.tree.borrow_mut().observers.get_mut(index) {
                reg.callback = Some(callback);
            }
        }
        delivered
    }

    /// Drain an observer's queue without running its callback.
    pub fn take_records(&self, observer: ObserverId) -> Vec<MutationRecord> {
        self.tree
            .borrow_mut()
            .observers
            .get_mut(observer.0)
            .map(|reg| std::mem::take(&mut reg.queue))
            .unwrap_or_default()
    }

    pub fn has_pending_mutations(&self) -> bool {
        self.tree
            .borrow()
            .observers
            .iter()
            .any(|reg| !reg.queue.is_empty())
    }

    pub fn node_count(&self) -> usize {
        self.tree.borrow().nodes.len()
    }
}

fn element_kind(tag: &str) -> NodeKind {
    NodeKind::Element {
        tag: tag.to_ascii_lowercase(),
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.node_count())
            .field("focused", &self.focused())
            .finish()
    }
}

// =============================================================================
// Port Implementations
// =============================================================================

impl MutationSource for Document {
    fn observe(
        &self,
        root: NodeId,
        options: ObserveOptions,
        callback: MutationCallback,
    ) -> ObserverId {
        let mut tree = self.tree.borrow_mut();
        tree.observers.push(Registration {
            root,
            options,
            queue: Vec::new(),
            callback: Some(callback),
        });
        ObserverId(tree.observers.len() - 1)
    }
}

impl Host for Document {
    fn document_element(&self) -> NodeId {
        Document::document_element(self)
    }

    fn body(&self) -> NodeId {
        Document::body(self)
    }

    fn is_element(&self, node: NodeId) -> bool {
        Document::is_element(self, node)
    }

    fn focused(&self) -> Option<NodeId> {
        Document::focused(self)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        Document::contains(self, ancestor, node)
    }

    fn closest(&self, node: NodeId, predicate: &dyn Fn(NodeId) -> bool) -> Option<NodeId> {
        Document::closest(self, node, predicate)
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.rect(node).unwrap_or_default()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        Document::attribute(self, node, name)
    }

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        Document::has_attribute(self, node, name)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<()> {
        Document::set_attribute(self, node, name, value)
    }

    fn remove_attribute(&self, node: NodeId, name: &str) -> bool {
        Document::remove_attribute(self, node, name)
    }

    fn descendants_with_attribute(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        tree.descendants(root)
            .into_iter()
            .filter(|id| {
                tree.nodes
                    .get(id)
                    .is_some_and(|n| n.attributes.contains_key(name))
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
