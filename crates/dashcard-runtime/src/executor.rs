//! Action execution
//!
//! Interprets a user interaction against an [`Action`] descriptor:
//! toggles mutate entity state through the store, more-info/navigate
//! are pure notifications back to the caller, call-service delegates to
//! the external collaborator under a timeout.
//!
//! The executor is stateless between invocations. Debouncing repeated
//! taps is the caller's job, and two in-flight executions on different
//! entities have no ordering relationship.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use dashcard_model::{Action, ActionKind, Entity, EntityId};

use crate::error::ActionError;
use crate::service::ServiceCall;
use crate::store::EntityStore;

/// Default budget for an external service call
pub const DEFAULT_SERVICE_TIMEOUT: Duration = Duration::from_secs(10);

/// Executor configuration
#[derive(Debug, Clone, Copy)]
pub struct ExecutorConfig {
    /// Budget for call-service round trips; expiry resolves to a
    /// failure outcome instead of hanging
    pub service_timeout: Duration,
}

impl ExecutorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a service-call timeout
    #[inline]
    #[must_use]
    pub fn with_service_timeout(mut self, timeout: Duration) -> Self {
        self.service_timeout = timeout;
        self
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            service_timeout: DEFAULT_SERVICE_TIMEOUT,
        }
    }
}

/// What an execution accomplished
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Entity state was flipped and written back
    Toggled {
        /// The entity that changed
        entity_id: EntityId,
        /// State before the toggle
        previous: Value,
        /// State written back
        new_state: Value,
    },
    /// Caller should present entity detail; nothing was mutated
    ShowMoreInfo {
        /// The entity to present, when the action names one
        entity_id: Option<EntityId>,
    },
    /// Caller should navigate; nothing was mutated
    Navigate {
        /// Destination path or URL
        path: Option<String>,
    },
    /// The external service accepted the call
    ServiceCalled {
        /// The service that was invoked
        service: String,
    },
    /// Nothing to do; the reason says why
    Noop {
        /// Why the execution had no effect
        reason: String,
    },
}

/// One-shot interpreter for action descriptors
pub struct ActionExecutor {
    store: Arc<dyn EntityStore>,
    services: Arc<dyn ServiceCall>,
    config: ExecutorConfig,
}

impl ActionExecutor {
    /// Create an executor over a store and service collaborator
    #[must_use]
    pub fn new(store: Arc<dyn EntityStore>, services: Arc<dyn ServiceCall>) -> Self {
        Self {
            store,
            services,
            config: ExecutorConfig::default(),
        }
    }

    /// With executor configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Execute one action
    ///
    /// `entity` is the card's already-resolved target, when the caller
    /// has one; otherwise the action's own `target` is looked up.
    /// Cancellation is by abandonment: dropping the returned future
    /// stops the work, and the configured timeout bounds external calls.
    ///
    /// # Errors
    /// Returns [`ActionError`] for unsupported kinds, invalid
    /// parameters, store rejections, and failed or timed-out service
    /// calls.
    pub async fn execute(
        &self,
        action: &Action,
        entity: Option<&Entity>,
    ) -> Result<ActionOutcome, ActionError> {
        match &action.kind {
            ActionKind::Toggle => self.execute_toggle(action, entity).await,
            ActionKind::MoreInfo => {
                let entity_id = entity.map(|e| e.id.clone()).or_else(|| action.target.clone());
                Ok(ActionOutcome::ShowMoreInfo { entity_id })
            }
            ActionKind::Navigate => Ok(ActionOutcome::Navigate {
                path: action.navigate_to.clone(),
            }),
            ActionKind::CallService => self.execute_call_service(action).await,
            ActionKind::Other(tag) => Err(ActionError::Unsupported(tag.clone())),
        }
    }

    async fn execute_toggle(
        &self,
        action: &Action,
        entity: Option<&Entity>,
    ) -> Result<ActionOutcome, ActionError> {
        let resolved = match entity {
            Some(entity) => Some(entity.clone()),
            None => action.target.as_ref().and_then(|id| self.store.get(id)),
        };
        let Some(entity) = resolved else {
            return Ok(ActionOutcome::Noop {
                reason: "no target entity".to_string(),
            });
        };

        let Some(new_state) = flip_state(&entity.state) else {
            return Ok(ActionOutcome::Noop {
                reason: format!("state '{}' is not toggleable", entity.state),
            });
        };

        self.store.write(&entity.id, new_state.clone()).await?;
        tracing::info!(entity = %entity.id, from = %entity.state, to = %new_state, "toggled");

        Ok(ActionOutcome::Toggled {
            entity_id: entity.id,
            previous: entity.state,
            new_state,
        })
    }

    async fn execute_call_service(&self, action: &Action) -> Result<ActionOutcome, ActionError> {
        let service = action
            .service
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ActionError::Validation("call-service action requires a 'service'".to_string())
            })?;

        let call = self.services.call(service, &action.service_data);
        match tokio::time::timeout(self.config.service_timeout, call).await {
            Ok(Ok(())) => {
                tracing::info!(service, "service call succeeded");
                Ok(ActionOutcome::ServiceCalled {
                    service: service.to_string(),
                })
            }
            Ok(Err(error)) => {
                tracing::warn!(service, %error, "service call failed");
                Err(error.into())
            }
            Err(_) => {
                let duration_ms = u64::try_from(self.config.service_timeout.as_millis())
                    .unwrap_or(u64::MAX);
                tracing::warn!(service, duration_ms, "service call timed out");
                Err(ActionError::Timeout { duration_ms })
            }
        }
    }
}

impl std::fmt::Debug for ActionExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionExecutor")
            .field("config", &self.config)
            .finish()
    }
}

// Flip a toggleable state. Booleans invert; the known on/off and
// open/closed string pairs swap; anything else is not toggleable.
fn flip_state(state: &Value) -> Option<Value> {
    match state {
        Value::Bool(b) => Some(Value::Bool(!b)),
        Value::String(s) => match s.as_str() {
            "on" => Some(Value::String("off".to_string())),
            "off" => Some(Value::String("on".to_string())),
            "open" => Some(Value::String("closed".to_string())),
            "closed" => Some(Value::String("open".to_string())),
            _ => None,
        },
        _ => None,
    }
}
