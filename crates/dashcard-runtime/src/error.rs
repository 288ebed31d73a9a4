//! Error types for the runtime boundary
//!
//! Action execution never panics the view: every failure mode is a
//! returned error the caller can show, and render-time missing data is
//! not represented here at all (it degrades visually instead).

use dashcard_model::EntityId;

/// Errors from the entity store boundary
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The referenced entity does not exist in the store
    #[error("entity not found: {0}")]
    NotFound(EntityId),

    /// The backing store rejected or lost the write
    #[error("store write failed: {0}")]
    WriteFailed(String),
}

/// Errors from the external service-call collaborator
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceCallError {
    /// The service ran and reported failure
    #[error("service call failed: {0}")]
    Failed(String),

    /// The collaborator could not reach the service at all
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Errors from action execution
///
/// Surfaced to the caller as a failed outcome; retries are the caller's
/// policy, never the executor's.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Action kind this build does not implement
    #[error("unsupported action kind: {0}")]
    Unsupported(String),

    /// The action is missing a required parameter
    #[error("invalid action: {0}")]
    Validation(String),

    /// Entity store rejected the state write
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The external service call failed
    #[error("service call error: {0}")]
    ServiceCall(#[from] ServiceCallError),

    /// The external call did not complete within the caller's budget
    #[error("service call timed out after {duration_ms}ms")]
    Timeout {
        /// The timeout that expired, in milliseconds
        duration_ms: u64,
    },
}
