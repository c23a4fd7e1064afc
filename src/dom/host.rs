//! Host tree queries.
//!
//! The lifecycle registry and the navigator only talk to the UI tree
//! through this trait, so any toolkit that can answer these questions can
//! drive them.

use crate::error::Result;
use crate::types::{NodeId, Rect};

pub trait Host {
    /// Root of the whole tree. Default navigation origin when nothing is
    /// focused.
    fn document_element(&self) -> NodeId;

    /// Default navigation scope.
    fn body(&self) -> NodeId;

    /// Whether `node` is an element (as opposed to text, or unknown).
    fn is_element(&self, node: NodeId) -> bool;

    /// Currently focused node, if any.
    fn focused(&self) -> Option<NodeId>;

    /// Inclusive containment: a node contains itself.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Nearest inclusive ancestor of `node` matching `predicate`.
    fn closest(&self, node: NodeId, predicate: &dyn Fn(NodeId) -> bool) -> Option<NodeId>;

    /// Bounding rect of `node`. Only meaningful while the node is attached.
    fn bounding_rect(&self, node: NodeId) -> Rect;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<()>;

    /// Returns whether the attribute was present.
    fn remove_attribute(&self, node: NodeId, name: &str) -> bool;

    /// Strict descendants of `root` carrying attribute `name`, in document
    /// order.
    fn descendants_with_attribute(&self, root: NodeId, name: &str) -> Vec<NodeId>;
}
