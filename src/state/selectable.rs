//! Selectability - tagging nodes as directional-navigation targets.
//!
//! Tags are stored as attributes on the node, so any [`Host`] with
//! attribute storage can carry them:
//! - `tabindex="0"` makes the node focusable
//! - `data-gamepad-selectable` marks it as a candidate
//! - `data-gamepad-jump-threshold` holds the alignment threshold in pixels
//!
//! A scope boundary is marked with `data-gamepad-dpad-scope`.

use crate::dom::Host;
use crate::error::Result;
use crate::types::NodeId;

pub const TAB_INDEX_ATTR: &str = "tabindex";
pub const SELECTABLE_ATTR: &str = "data-gamepad-selectable";
pub const JUMP_THRESHOLD_ATTR: &str = "data-gamepad-jump-threshold";
pub const NAV_SCOPE_ATTR: &str = "data-gamepad-dpad-scope";

/// Alignment threshold used when none is given.
pub const DEFAULT_JUMP_THRESHOLD: f64 = 30.0;

// =============================================================================
// Tag
// =============================================================================

/// Typed view of a node's selectable tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectableTag {
    /// Maximum cross-axis offset, in pixels, for a candidate to count as
    /// aligned. `NaN` when the stored value does not parse.
    pub threshold: f64,
}

impl SelectableTag {
    pub fn has_valid_threshold(&self) -> bool {
        !self.threshold.is_nan()
    }
}

// =============================================================================
// Marking
// =============================================================================

/// Tag or untag `node` with the default threshold.
pub fn set_selectable<H: Host + ?Sized>(host: &H, node: NodeId, enabled: bool) -> Result<()> {
    set_selectable_with_threshold(host, node, enabled, DEFAULT_JUMP_THRESHOLD)
}

/// Tag `node` with `threshold`, or strip every tag attribute when
/// `enabled` is false. Both directions are idempotent.
pub fn set_selectable_with_threshold<H: Host + ?Sized>(
    host: &H,
    node: NodeId,
    enabled: bool,
    threshold: f64,
) -> Result<()> {
    if enabled {
        host.set_attribute(node, TAB_INDEX_ATTR, "0")?;
        host.set_attribute(node, SELECTABLE_ATTR, "true")?;
        host.set_attribute(node, JUMP_THRESHOLD_ATTR, &threshold.to_string())?;
    } else {
        host.remove_attribute(node, TAB_INDEX_ATTR);
        host.remove_attribute(node, SELECTABLE_ATTR);
        host.remove_attribute(node, JUMP_THRESHOLD_ATTR);
    }
    Ok(())
}

pub fn is_selectable<H: Host + ?Sized>(host: &H, node: NodeId) -> bool {
    host.has_attribute(node, SELECTABLE_ATTR)
}

/// Read the tag on `node`, if it has one.
pub fn selectable_tag<H: Host + ?Sized>(host: &H, node: NodeId) -> Option<SelectableTag> {
    if !is_selectable(host, node) {
        return None;
    }
    Some(SelectableTag {
        threshold: jump_threshold(host, node),
    })
}

/// Threshold stored on `node`, `NaN` when missing or unparseable.
pub fn jump_threshold<H: Host + ?Sized>(host: &H, node: NodeId) -> f64 {
    parse_threshold(host.attribute(node, JUMP_THRESHOLD_ATTR).as_deref())
}

/// Parse a stored threshold. Surrounding whitespace is ignored.
///
/// Only finite numbers count; `"inf"`, `"nan"` and friends read as `NaN`.
pub fn parse_threshold(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(f64::NAN)
}

// =============================================================================
// Scopes
// =============================================================================

/// Declare or undeclare `node` as a navigation scope.
pub fn set_nav_scope<H: Host + ?Sized>(host: &H, node: NodeId, enabled: bool) -> Result<()> {
    if enabled {
        host.set_attribute(node, NAV_SCOPE_ATTR, "true")?;
    } else {
        host.remove_attribute(node, NAV_SCOPE_ATTR);
    }
    Ok(())
}

pub fn is_nav_scope<H: Host + ?Sized>(host: &H, node: NodeId) -> bool {
    host.has_attribute(node, NAV_SCOPE_ATTR)
}

/// Nearest inclusive ancestor of `node` declared as a scope.
pub fn closest_nav_scope<H: Host + ?Sized>(host: &H, node: NodeId) -> Option<NodeId> {
    host.closest(node, &|candidate| is_nav_scope(host, candidate))
}
