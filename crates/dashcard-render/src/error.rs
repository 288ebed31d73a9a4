//! Render error types
//!
//! Rendering degrades rather than fails: missing entities, malformed
//! configs and unknown kinds all produce placeholder output. The two
//! variants here are the exceptions - structural problems in the card
//! tree itself that recursion must not paper over.

use dashcard_model::CardId;

/// Fatal configuration errors in the card tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The same card id appeared twice on one render path
    #[error("cyclic card containment at {card_id}")]
    CycleDetected {
        /// The card whose id repeated
        card_id: CardId,
    },

    /// Container nesting exceeded the configured limit
    #[error("render tree exceeds depth limit of {limit}")]
    DepthExceeded {
        /// The limit that was exceeded
        limit: usize,
    },
}
