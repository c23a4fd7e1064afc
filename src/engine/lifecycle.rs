//! Lifecycle Registry - cleanup callbacks for nodes leaving the tree.
//!
//! Tracks one cleanup per node and runs it exactly once when the node is
//! reported removed by the host's mutation feed:
//! - One subscription, made at construction, covering the whole tree
//! - Re-registering a node replaces its cleanup
//! - Removal is noticed on the next mutation delivery, never synchronously
//! - A panicking cleanup is logged and does not stop the rest of the batch
//!
//! # Example
//!
//! ```ignore
//! use spark_nav::dom::Document;
//! use spark_nav::engine::LifecycleRegistry;
//!
//! let doc = Document::new();
//! let lifecycle = LifecycleRegistry::observe(doc.clone());
//!
//! let panel = doc.create_element("div");
//! doc.append_child(doc.body(), panel)?;
//! lifecycle.register(panel, || println!("panel gone"))?;
//!
//! doc.detach(panel)?;
//! doc.deliver_mutations(); // prints "panel gone"
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crate::dom::{Host, MutationRecord, MutationSource, ObserveOptions, ObserverId};
use crate::error::{Error, Result};
use crate::types::{Cleanup, NodeId};

type Entries = Rc<RefCell<HashMap<NodeId, Cleanup>>>;

// =============================================================================
// Registry
// =============================================================================

/// Maps nodes to cleanup callbacks.
///
/// Clones share the same table. The feed subscription only holds a weak
/// reference, so once every clone is dropped later deliveries do nothing.
pub struct LifecycleRegistry<H> {
    host: H,
    entries: Entries,
    observer: ObserverId,
}

impl<H: Host + MutationSource> LifecycleRegistry<H> {
    /// Create a registry and subscribe it to every child-list change under
    /// the host's document element.
    pub fn observe(host: H) -> Self {
        let entries: Entries = Rc::new(RefCell::new(HashMap::new()));
        let weak = Rc::downgrade(&entries);

        let observer = host.observe(
            host.document_element(),
            ObserveOptions::CHILD_LIST | ObserveOptions::SUBTREE,
            Box::new(move |records: &[MutationRecord]| {
                if let Some(entries) = weak.upgrade() {
                    run_removals(&entries, records);
                }
            }),
        );

        Self {
            host,
            entries,
            observer,
        }
    }
}

impl<H: Host> LifecycleRegistry<H> {
    /// Run `callback` once `node` leaves the tree.
    ///
    /// Replaces any cleanup already registered for `node`; the replaced
    /// callback is dropped without running.
    pub fn register(&self, node: NodeId, callback: impl FnOnce() + 'static) -> Result<()> {
        if !self.host.is_element(node) {
            return Err(Error::invalid_argument(format!(
                "{node} must be an element to track its removal"
            )));
        }

        let replaced = self.entries.borrow_mut().insert(node, Box::new(callback));
        if replaced.is_some() {
            tracing::debug!(%node, "lifecycle.register replaced existing cleanup");
        }
        Ok(())
    }

    /// Forget the cleanup for `node` without running it.
    pub fn unregister(&self, node: NodeId) -> bool {
        let removed = self.entries.borrow_mut().remove(&node);
        removed.is_some()
    }

    pub fn is_registered(&self, node: NodeId) -> bool {
        self.entries.borrow().contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Feed subscription backing this registry.
    pub fn observer(&self) -> ObserverId {
        self.observer
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: Clone> Clone for LifecycleRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            entries: self.entries.clone(),
            observer: self.observer,
        }
    }
}

impl<H> fmt::Debug for LifecycleRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleRegistry")
            .field("tracked", &self.entries.borrow().len())
            .field("observer", &self.observer)
            .finish()
    }
}

// =============================================================================
// Batch Processing
// =============================================================================

/// Run cleanups for every removed node, in the order the host reported them.
fn run_removals(entries: &Entries, records: &[MutationRecord]) {
    for record in records.iter().filter(|record| record.is_removal()) {
        for &node in &record.removed_nodes {
            // Entry leaves the table before the callback runs, so the
            // callback may register again.
            let cleanup = entries.borrow_mut().remove(&node);
            let Some(cleanup) = cleanup else { continue };

            tracing::debug!(%node, parent = %record.target, "lifecycle.cleanup");
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(cleanup)) {
                tracing::error!(
                    %node,
                    reason = panic_message(payload.as_ref()),
                    "lifecycle cleanup panicked"
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
