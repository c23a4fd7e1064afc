//! Primitives - declarative tree building.
//!
//! - [`el`] / [`tag`] - element builder with attribute passthrough
//! - [`Child`] - closed set of things an element can contain
//! - [`component`] - render, place, and track cleanup of a component
//!
//! Everything builds into the [`Ui`](crate::Ui) it is given; components
//! attached this way have their cleanup run by the lifecycle registry once
//! their root leaves the tree.

mod component;
mod element;
mod tags;
mod types;

pub use component::component;
pub use element::{el, render_child, ElementBuilder};
pub use tags::{is_known_tag, tag, TAG_NAMES};
pub use types::*;
