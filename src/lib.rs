//! # spark-nav
//!
//! Lifecycle tracking and gamepad-style directional focus navigation for UI
//! trees.
//!
//! ## Architecture
//!
//! The core talks to the UI tree only through two ports:
//!
//! ```text
//! Host            geometry, focus, containment, attributes
//! MutationSource  batched child-list notifications
//! ```
//!
//! [`dom::Document`] implements both in memory. On top of them:
//!
//! - [`engine::LifecycleRegistry`] runs a node's cleanup exactly once after
//!   the feed reports the node removed
//! - [`state::Navigator`] finds the next focus target for a d-pad direction
//!   among nodes tagged with [`state::set_selectable`]
//! - [`primitives`] builds elements and components declaratively
//! - [`Ui`] is the application root that owns the document and registry
//!
//! ## Modules
//!
//! - [`types`] - Core types (NodeId, Rect, Direction)
//! - [`dom`] - Host ports and the in-memory document
//! - [`engine`] - Lifecycle registry
//! - [`state`] - Selectability tags and the directional navigator
//! - [`primitives`] - Element builder, children, components
//! - [`pipeline`] - Application root and mounting

pub mod dom;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod primitives;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{Error, Result};

pub use dom::{Document, Host, MutationRecord, MutationSource, NodeKind, ObserveOptions};

pub use engine::LifecycleRegistry;

pub use pipeline::Ui;

pub use primitives::{component, el, tag, Child, Component, ElementBuilder, Mountable};

pub use state::{
    find_closest_focus_target, is_selectable, selectable_tag, set_nav_scope, set_selectable,
    set_selectable_with_threshold, Navigator, NavigatorConfig, SelectableTag,
    DEFAULT_JUMP_THRESHOLD,
};
