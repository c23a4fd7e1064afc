//! Core types for spark-nav.
//!
//! These are the values that flow between the host tree, the lifecycle
//! registry and the directional navigator.

use std::fmt;

// =============================================================================
// Node Identity
// =============================================================================

/// Identity of a node in a host tree.
///
/// Ids are never reused within a document, so holding one never keeps a node
/// alive and never aliases a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// Raw numeric value of the id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

// =============================================================================
// Cleanup
// =============================================================================

/// Cleanup callback run once when a tracked node leaves the tree.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Geometry
// =============================================================================

/// Axis-aligned bounding rectangle in host coordinates.
///
/// `top < bottom` and `left < right` for anything with a size; y grows
/// downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Create a rect from its four edges.
    pub const fn new(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Create a rect from an origin and a size.
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(y, x, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

// =============================================================================
// Direction
// =============================================================================

/// Directional input (d-pad / arrow keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All four directions, clockwise from `Up`.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Parse a direction name (`"UP"`, `"right"`, ...).
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_uppercase().as_str() {
            "UP" => Some(Self::Up),
            "RIGHT" => Some(Self::Right),
            "DOWN" => Some(Self::Down),
            "LEFT" => Some(Self::Left),
            _ => None,
        }
    }

    /// Travel along the x axis.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "UP",
            Self::Right => "RIGHT",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
        };
        f.write_str(name)
    }
}
