//! Dashcard Engine - the whole pipeline behind one facade
//!
//! Wires the workspace together:
//! - Parse and serialize dashboard documents (YAML/JSON, lossless)
//! - Validate cards against their schemas (advisory, editor-time)
//! - Render cards and views to logical node trees
//! - Execute tap/hold actions against the entity store
//! - Editor operations: create cards with schema defaults, set fields
//!   through the validator-checked path, maintain view invariants
//!
//! The engine holds no ambient global state. It owns references to the
//! two external collaborators (entity store, service caller) and
//! everything else is a pure function of its inputs; persistence of the
//! dashboard document is the embedder's concern.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dashcard_engine::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryEntityStore::new());
//! let engine = DashboardEngine::new(store, Arc::new(NullServiceCall::new()));
//!
//! let dashboard = engine.load_yaml("views:\n  - title: Home\n")?;
//! let session = engine.render_view(&dashboard.views[0], &StateOverlay::new(), Arc::new(|_| {}))?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod editor;
pub mod engine;
pub mod error;

// Re-exports for convenience
pub use editor::Editor;
pub use engine::{DashboardEngine, EngineConfig};
pub use error::EngineError;

pub use dashcard_config::{ParseError, SerializeError};
pub use dashcard_model::prelude::*;
pub use dashcard_render::{
    NodePayload, RenderError, RenderSession, RenderedNode, Renderer, StateOverlay,
};
pub use dashcard_runtime::{
    ActionError, ActionExecutor, ActionOutcome, EntityStore, MemoryEntityStore, NullServiceCall,
    ServiceCall, StateCallback, Subscription,
};
pub use dashcard_schema::{registry, Schema, SchemaRegistry, ValidationReport};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the dashboard engine
    pub use crate::{
        Action, ActionKind, ActionOutcome, Card, CardKind, Dashboard, DashboardEngine, Editor,
        EngineConfig, Entity, EntityId, MemoryEntityStore, NullServiceCall, RenderedNode,
        StateOverlay, View, ViewId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
