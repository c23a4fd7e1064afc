//! Error types.
//!
//! Absence is not an error here: a navigation query with no qualifying
//! target returns `None`. Errors are reserved for caller bugs such as
//! handing the lifecycle registry a text node.

use thiserror::Error;

use crate::types::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("hierarchy request error: {message}")]
    HierarchyRequest { message: String },

    #[error("{child} is not a child of {parent}")]
    NotFound { parent: NodeId, child: NodeId },
}

impl Error {
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn hierarchy(message: impl Into<String>) -> Self {
        Self::HierarchyRequest {
            message: message.into(),
        }
    }
}
