//! Dashcard Render - cards to a logical node tree
//!
//! Dispatches each card kind to its rendering routine and produces a
//! [`RenderedNode`] tree the embedder can paint however it likes.
//! Guarantees the shell can rely on:
//! - Missing entities and invalid configs degrade to placeholders;
//!   the only fatal render paths are cyclic containment and depth
//!   overflow.
//! - Dispatch is an exhaustive match over the closed card-kind set.
//! - [`render_view`] returns a session guard whose drop releases every
//!   store subscription it registered.

#![warn(unreachable_pub)]

pub mod error;
pub mod node;
pub mod render;
pub mod resolve;
pub mod session;

pub use error::RenderError;
pub use node::{EntityRow, Layout, NodePayload, RenderedNode, SeverityBand};
pub use render::{Renderer, DEFAULT_GRID_COLUMNS, DEFAULT_MAX_DEPTH};
pub use resolve::StateOverlay;
pub use session::{referenced_entities, render_view, RenderSession};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
