//! Service-call collaborator
//!
//! `call-service` actions delegate to an external collaborator through
//! this trait. The engine never learns the backend's wire protocol;
//! integrations implement [`ServiceCall`] however they reach their
//! platform.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::ServiceCallError;

/// External service invocation contract
#[async_trait]
pub trait ServiceCall: Send + Sync {
    /// Invoke `service` (in `domain.service` form) with a data payload
    ///
    /// # Errors
    /// Returns [`ServiceCallError`] when the service fails or cannot be
    /// reached.
    async fn call(
        &self,
        service: &str,
        data: &IndexMap<String, Value>,
    ) -> Result<(), ServiceCallError>;
}

/// Collaborator that accepts every call and does nothing
///
/// Used by previews and tests where no backend is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullServiceCall;

impl NullServiceCall {
    /// Create a no-op collaborator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ServiceCall for NullServiceCall {
    async fn call(
        &self,
        service: &str,
        data: &IndexMap<String, Value>,
    ) -> Result<(), ServiceCallError> {
        tracing::info!(service, fields = data.len(), "service call (no backend wired)");
        Ok(())
    }
}
