//! Directional Navigator - d-pad style spatial focus search.
//!
//! Given the focused node and a direction, picks the best selectable node to
//! move to:
//! - Candidates are the selectable descendants of the scope
//! - A candidate must lie fully on the far side of the origin and be
//!   aligned with it within the origin's jump threshold
//! - Among those, the lowest weighted squared distance wins, with
//!   cross-axis offset weighted 10x so same-row/column targets beat closer
//!   diagonal ones
//! - Ties keep the first candidate in document order
//!
//! Navigation never crosses scopes: the origin must sit inside the scope,
//! and its nearest declared scope must be that same node.
//!
//! The query is read-only. Moving focus to the result is up to the caller.
//!
//! # Example
//!
//! ```ignore
//! use spark_nav::state::Navigator;
//! use spark_nav::Direction;
//!
//! if let Some(next) = Navigator::new(&doc).find_next(Direction::Right, None) {
//!     doc.focus(next)?;
//! }
//! ```

use crate::dom::Host;
use crate::types::{Direction, NodeId, Rect};

use super::selectable::{closest_nav_scope, jump_threshold, SELECTABLE_ATTR};

/// Cross-axis penalty factor.
pub const CROSS_AXIS_WEIGHT: f64 = 10.0;

// =============================================================================
// Config
// =============================================================================

/// Navigator tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigatorConfig {
    /// Multiplier on the squared cross-axis offset.
    pub cross_axis_weight: f64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            cross_axis_weight: CROSS_AXIS_WEIGHT,
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Offset from origin to an aligned candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisOffset {
    /// Gap along the direction of travel (never negative).
    pub primary: f64,
    /// Signed offset along the perpendicular axis.
    pub cross: f64,
}

impl AxisOffset {
    pub fn weighted_distance(&self, cross_axis_weight: f64) -> f64 {
        self.primary * self.primary + cross_axis_weight * self.cross * self.cross
    }
}

/// Alignment test for one candidate.
///
/// Edges touching counts as "beyond" (`>=` / `<=`). The cross-axis check is
/// strict, so a `NaN` threshold rejects everything.
pub fn aligned_offset(
    direction: Direction,
    origin: &Rect,
    candidate: &Rect,
    threshold: f64,
) -> Option<AxisOffset> {
    let horizontal_cross = candidate.top - origin.top;
    let vertical_cross = candidate.left - origin.left;

    match direction {
        Direction::Right => (candidate.left >= origin.right
            && horizontal_cross.abs() < threshold)
            .then(|| AxisOffset {
                primary: candidate.left - origin.right,
                cross: horizontal_cross,
            }),
        Direction::Left => (candidate.right <= origin.left
            && horizontal_cross.abs() < threshold)
            .then(|| AxisOffset {
                primary: origin.left - candidate.right,
                cross: horizontal_cross,
            }),
        Direction::Up => (candidate.bottom <= origin.top && vertical_cross.abs() < threshold)
            .then(|| AxisOffset {
                primary: origin.top - candidate.bottom,
                cross: vertical_cross,
            }),
        Direction::Down => (candidate.top >= origin.bottom
            && vertical_cross.abs() < threshold)
            .then(|| AxisOffset {
                primary: candidate.top - origin.bottom,
                cross: vertical_cross,
            }),
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// Spatial focus search over a host tree.
pub struct Navigator<'a, H: Host + ?Sized> {
    host: &'a H,
    config: NavigatorConfig,
}

impl<'a, H: Host + ?Sized> Navigator<'a, H> {
    pub fn new(host: &'a H) -> Self {
        Self::with_config(host, NavigatorConfig::default())
    }

    pub fn with_config(host: &'a H, config: NavigatorConfig) -> Self {
        Self { host, config }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Best focus target from the current focus in `direction`.
    ///
    /// `scope` defaults to the host body. Returns `None` when nothing
    /// qualifies or the origin is outside `scope`.
    pub fn find_next(&self, direction: Direction, scope: Option<NodeId>) -> Option<NodeId> {
        let host = self.host;
        let origin = host.focused().unwrap_or_else(|| host.document_element());
        let scope = scope.unwrap_or_else(|| host.body());

        if !host.contains(scope, origin) {
            tracing::trace!(%origin, %scope, "navigation origin outside scope");
            return None;
        }
        if closest_nav_scope(host, origin) != Some(scope) {
            tracing::trace!(%origin, %scope, "navigation scope is not the nearest declared scope");
            return None;
        }

        let threshold = jump_threshold(host, origin);
        if threshold.is_nan() {
            tracing::debug!(
                %origin,
                "origin has no usable jump threshold; no candidate can align"
            );
        }

        let origin_rect = host.bounding_rect(origin);
        let mut closest = None;
        let mut closest_distance = f64::INFINITY;

        for candidate in host.descendants_with_attribute(scope, SELECTABLE_ATTR) {
            if candidate == origin {
                continue;
            }
            let rect = host.bounding_rect(candidate);
            let Some(offset) = aligned_offset(direction, &origin_rect, &rect, threshold) else {
                continue;
            };

            let distance = offset.weighted_distance(self.config.cross_axis_weight);
            if distance < closest_distance {
                closest_distance = distance;
                closest = Some(candidate);
            }
        }

        tracing::trace!(%direction, %origin, target = ?closest, "navigation result");
        closest
    }
}

/// One-shot [`Navigator::find_next`] with the default config.
pub fn find_closest_focus_target<H: Host + ?Sized>(
    host: &H,
    direction: Direction,
    scope: Option<NodeId>,
) -> Option<NodeId> {
    Navigator::new(host).find_next(direction, scope)
}

// =============================================================================
// TESTS
// =============================================================================
