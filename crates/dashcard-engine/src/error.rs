//! Engine error types

use dashcard_model::ViewId;

/// Errors from editor operations on a dashboard
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Adding the view would break the unique-view-id invariant
    #[error("duplicate view id: {0}")]
    DuplicateViewId(ViewId),

    /// The referenced view does not exist in the dashboard
    #[error("view not found: {0}")]
    ViewNotFound(ViewId),

    /// A positional card operation pointed outside the view
    #[error("card index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// The offending index
        index: usize,
        /// Current number of cards
        len: usize,
    },
}
