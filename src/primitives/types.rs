//! Primitive types - children, components and mountable content.

use std::fmt;

use crate::types::{Cleanup, NodeId};

// =============================================================================
// Component
// =============================================================================

/// A rendered component: its root element and an optional cleanup.
///
/// The cleanup moves into the lifecycle registry once the root is attached
/// through [`component`](super::component) or [`Ui::mount`](crate::Ui::mount).
/// Until then it stays here and can be run by hand.
pub struct Component {
    root: NodeId,
    cleanup: Option<Cleanup>,
}

impl Component {
    pub fn new(root: NodeId, cleanup: impl FnOnce() + 'static) -> Self {
        Self {
            root,
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// A component with nothing to clean up.
    pub fn without_cleanup(root: NodeId) -> Self {
        Self {
            root,
            cleanup: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether the cleanup is still held here (not yet handed to the
    /// registry, not yet run).
    pub fn has_cleanup(&self) -> bool {
        self.cleanup.is_some()
    }

    pub fn take_cleanup(&mut self) -> Option<Cleanup> {
        self.cleanup.take()
    }

    /// Run the held cleanup now, if any.
    pub fn run_cleanup(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("root", &self.root)
            .field("has_cleanup", &self.has_cleanup())
            .finish()
    }
}

// =============================================================================
// Child
// =============================================================================

/// Anything that can be placed under an element.
pub enum Child {
    Text(String),
    Element(NodeId),
    Component(Component),
    /// Produced on demand; receives the parent it will be appended to.
    Lazy(Box<dyn FnOnce(NodeId) -> Child>),
    Many(Vec<Child>),
}

impl Child {
    /// Renders nothing.
    pub fn none() -> Self {
        Child::Many(Vec::new())
    }

    pub fn lazy(produce: impl FnOnce(NodeId) -> Child + 'static) -> Self {
        Child::Lazy(Box::new(produce))
    }
}

impl fmt::Debug for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Child::Element(node) => f.debug_tuple("Element").field(node).finish(),
            Child::Component(component) => f.debug_tuple("Component").field(component).finish(),
            Child::Lazy(_) => f.write_str("Lazy(..)"),
            Child::Many(children) => f.debug_tuple("Many").field(children).finish(),
        }
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<NodeId> for Child {
    fn from(node: NodeId) -> Self {
        Child::Element(node)
    }
}

impl From<Component> for Child {
    fn from(component: Component) -> Self {
        Child::Component(component)
    }
}

impl From<Vec<Child>> for Child {
    fn from(children: Vec<Child>) -> Self {
        Child::Many(children)
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(child: Option<T>) -> Self {
        child.map_or_else(Child::none, Into::into)
    }
}

// =============================================================================
// Mountable
// =============================================================================

/// Content accepted by [`Ui::mount`](crate::Ui::mount).
#[derive(Debug)]
pub enum Mountable {
    /// Replaces the target's children with a single text node.
    Text(String),
    Element(NodeId),
    Component(Component),
}

impl From<&str> for Mountable {
    fn from(text: &str) -> Self {
        Mountable::Text(text.to_string())
    }
}

impl From<String> for Mountable {
    fn from(text: String) -> Self {
        Mountable::Text(text)
    }
}

impl From<NodeId> for Mountable {
    fn from(node: NodeId) -> Self {
        Mountable::Element(node)
    }
}

impl From<Component> for Mountable {
    fn from(component: Component) -> Self {
        Mountable::Component(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_component_run_cleanup_once() {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let mut component = Component::new(NodeId(7), move || count_clone.set(count_clone.get() + 1));

        assert!(component.has_cleanup());
        component.run_cleanup();
        component.run_cleanup();
        assert_eq!(count.get(), 1);
        assert!(!component.has_cleanup());
    }

    #[test]
    fn test_child_conversions() {
        assert!(matches!(Child::from("hi"), Child::Text(t) if t == "hi"));
        assert!(matches!(Child::from(NodeId(3)), Child::Element(NodeId(3))));
        assert!(matches!(Child::from(None::<&str>), Child::Many(v) if v.is_empty()));
        assert!(matches!(Child::from(Some("x")), Child::Text(_)));
    }
}
