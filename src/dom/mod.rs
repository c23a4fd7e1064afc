//! Host tree - the ports the core depends on, plus an in-memory tree.
//!
//! - [`Host`]: geometry, focus, containment and attribute queries
//! - [`MutationSource`]: batched child-list notifications
//! - [`Document`]: arena-backed tree implementing both

mod document;
mod host;
mod mutation;

pub use document::*;
pub use host::*;
pub use mutation::*;
