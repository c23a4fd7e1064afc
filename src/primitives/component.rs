//! Component wiring.
//!
//! A render function builds a subtree and returns its root plus a cleanup.
//! [`component`] places the root and hands the cleanup to the lifecycle
//! registry, so it runs when the root leaves the tree.

use crate::error::Result;
use crate::pipeline::Ui;
use crate::types::NodeId;

use super::types::Component;

/// Render a component and optionally append it to `parent`.
///
/// If the root ends up attached (because of `parent`, or because `render`
/// attached it itself) the cleanup is registered and the returned
/// component no longer holds it. A detached root keeps its cleanup so the
/// caller can attach it later with [`Ui::attach_component`].
pub fn component<F>(ui: &Ui, parent: Option<NodeId>, render: F) -> Result<Component>
where
    F: FnOnce(&Ui) -> Result<Component>,
{
    let mut component = render(ui)?;
    let root = component.root();

    if let Some(parent) = parent {
        ui.document().append_child(parent, root)?;
    }
    if ui.document().parent(root).is_some() {
        if let Some(cleanup) = component.take_cleanup() {
            ui.lifecycle().register(root, cleanup)?;
        }
    }

    Ok(component)
}
