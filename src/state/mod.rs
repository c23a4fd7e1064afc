//! State Module - focus navigation state
//!
//! - **Selectable** - tagging nodes as navigation candidates, declaring scopes
//! - **Navigator** - directional (d-pad) focus search

mod navigator;
mod selectable;

pub use navigator::*;
pub use selectable::*;
