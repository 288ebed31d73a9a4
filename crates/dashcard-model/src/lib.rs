//! Dashcard Model - Core data entities
//!
//! Defines the data model the rest of the workspace operates on:
//! - Dashboards and views (ordered card containers)
//! - Cards: a closed set of kinds plus a passthrough bag for unknown fields
//! - Entities: externally-owned data points referenced by id only
//! - Actions: descriptions of what a user interaction should do
//!
//! Cards never own entities. They hold [`EntityId`] strings and resolve
//! them at render time; a missing entity is a presentation concern, not
//! a model error.

#![warn(unreachable_pub)]

pub mod action;
pub mod card;
pub mod dashboard;
pub mod entity;
pub mod ids;

// Re-exports for convenience
pub use action::{
    service_presets, Action, ActionKind, ActionPreset, CardActions, DEFAULT_DEBOUNCE_MS,
};
pub use card::{Card, CardKind};
pub use dashboard::{Dashboard, View};
pub use entity::{Entity, EntityId};
pub use ids::{CardId, ViewId};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the dashcard model
    pub use crate::{
        Action, ActionKind, Card, CardId, CardKind, Dashboard, Entity, EntityId, View, ViewId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
