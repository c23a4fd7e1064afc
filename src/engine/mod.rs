//! Lifecycle engine - cleanup tracking for tree nodes.
//!
//! Components own nodes but not their removal: the host can detach a
//! subtree at any time. The registry ties a cleanup to each tracked node
//! and runs it when the host's mutation feed reports the node gone.

mod lifecycle;

pub use lifecycle::*;
