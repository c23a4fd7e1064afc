//! Tree-mutation feed.
//!
//! A host reports child-list changes as batches of [`MutationRecord`]s.
//! Delivery is asynchronous from the caller's point of view: a mutation is
//! queued when it happens and handed to observers later, at whatever
//! checkpoint the host chooses.

use crate::types::NodeId;

bitflags::bitflags! {
    /// What an observer wants to hear about.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObserveOptions: u8 {
        /// Children added to or removed from the observed node.
        const CHILD_LIST = 0b0000_0001;
        /// Extend observation to every descendant of the observed node.
        const SUBTREE = 0b0000_0010;
    }
}

/// One child-list change.
///
/// `removed_nodes` holds the detached node followed by all of its
/// descendants in document order, so a cleanup registered deep inside a
/// detached subtree is still reported. `added_nodes` is built the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// Parent whose child list changed.
    pub target: NodeId,
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
}

impl MutationRecord {
    pub fn is_removal(&self) -> bool {
        !self.removed_nodes.is_empty()
    }
}

/// Handle for an observer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) usize);

/// Batch callback. Receives every record queued since the last delivery,
/// in the order the mutations happened.
pub type MutationCallback = Box<dyn FnMut(&[MutationRecord])>;

/// A host that can report tree mutations.
pub trait MutationSource {
    /// Start observing `root`. There is no way to stop; registrations live
    /// as long as the host.
    fn observe(
        &self,
        root: NodeId,
        options: ObserveOptions,
        callback: MutationCallback,
    ) -> ObserverId;
}
