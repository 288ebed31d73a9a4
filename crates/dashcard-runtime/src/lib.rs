//! Dashcard Runtime - entity store boundary and action execution
//!
//! The engine's only shared mutable resource is the entity store, and
//! this crate owns the boundary to it:
//! - [`EntityStore`] / [`ServiceCall`] traits - the narrow contracts a
//!   backend integration implements
//! - [`MemoryEntityStore`] - in-process reference store with scoped
//!   subscriptions, used by tests and previews
//! - [`ActionExecutor`] - interprets tap/hold actions against the store
//!   and the service-call collaborator
//!
//! Renderers only read from the store; all writes flow through the
//! executor.

#![warn(unreachable_pub)]

pub mod error;
pub mod executor;
pub mod service;
pub mod store;

pub use error::{ActionError, ServiceCallError, StoreError};
pub use executor::{ActionExecutor, ActionOutcome, ExecutorConfig, DEFAULT_SERVICE_TIMEOUT};
pub use service::{NullServiceCall, ServiceCall};
pub use store::{EntityStore, MemoryEntityStore, StateCallback, Subscription};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
