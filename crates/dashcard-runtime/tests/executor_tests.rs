//! Executor behavior against the in-memory store: toggle semantics,
//! notification outcomes, service-call validation and timeouts.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{json, Value};

use dashcard_model::{Action, ActionKind, Entity, EntityId};
use dashcard_runtime::{
    ActionError, ActionExecutor, ActionOutcome, EntityStore, ExecutorConfig, MemoryEntityStore,
    NullServiceCall, ServiceCall, ServiceCallError,
};

fn executor_with(store: Arc<MemoryEntityStore>) -> ActionExecutor {
    ActionExecutor::new(store, Arc::new(NullServiceCall::new()))
}

fn store_with(id: &str, state: Value) -> Arc<MemoryEntityStore> {
    let store = Arc::new(MemoryEntityStore::new());
    store.register(Entity::new(id, state));
    store
}

#[tokio::test]
async fn toggle_twice_restores_original_state() {
    let store = store_with("light.lamp", json!("on"));
    let executor = executor_with(Arc::clone(&store));
    let id = EntityId::from("light.lamp");
    let action = Action::toggle().with_target("light.lamp");

    // First toggle: on -> off. The store is updated between calls, so
    // the second reads the fresh state and flips it back.
    executor.execute(&action, None).await.unwrap();
    assert_eq!(store.get(&id).unwrap().state, json!("off"));

    executor.execute(&action, None).await.unwrap();
    assert_eq!(store.get(&id).unwrap().state, json!("on"));
}

#[tokio::test]
async fn toggle_inverts_boolean_state() {
    let store = store_with("switch.fan", json!(false));
    let executor = executor_with(Arc::clone(&store));
    let action = Action::toggle().with_target("switch.fan");

    let outcome = executor.execute(&action, None).await.unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::Toggled {
            entity_id: EntityId::from("switch.fan"),
            previous: json!(false),
            new_state: json!(true),
        }
    );
}

#[tokio::test]
async fn toggle_flips_cover_states() {
    let store = store_with("cover.garage", json!("open"));
    let executor = executor_with(Arc::clone(&store));
    let action = Action::toggle().with_target("cover.garage");

    executor.execute(&action, None).await.unwrap();
    assert_eq!(
        store.get(&EntityId::from("cover.garage")).unwrap().state,
        json!("closed")
    );
}

#[tokio::test]
async fn toggle_of_numeric_state_is_noop() {
    let store = store_with("sensor.temp", json!(21.5));
    let executor = executor_with(Arc::clone(&store));
    let action = Action::toggle().with_target("sensor.temp");

    let outcome = executor.execute(&action, None).await.unwrap();
    assert!(matches!(outcome, ActionOutcome::Noop { .. }));
    // State untouched.
    assert_eq!(
        store.get(&EntityId::from("sensor.temp")).unwrap().state,
        json!(21.5)
    );
}

#[tokio::test]
async fn toggle_without_target_is_noop() {
    let store = Arc::new(MemoryEntityStore::new());
    let executor = executor_with(store);

    let outcome = executor.execute(&Action::toggle(), None).await.unwrap();
    assert!(matches!(outcome, ActionOutcome::Noop { .. }));
}

#[tokio::test]
async fn more_info_and_navigate_never_mutate() {
    let store = store_with("light.lamp", json!("on"));
    let executor = executor_with(Arc::clone(&store));

    let more_info = Action::new(ActionKind::MoreInfo).with_target("light.lamp");
    let outcome = executor.execute(&more_info, None).await.unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::ShowMoreInfo {
            entity_id: Some(EntityId::from("light.lamp")),
        }
    );

    let navigate = Action::new(ActionKind::Navigate).with_navigate_to("/energy");
    let outcome = executor.execute(&navigate, None).await.unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::Navigate {
            path: Some("/energy".to_string()),
        }
    );

    assert_eq!(
        store.get(&EntityId::from("light.lamp")).unwrap().state,
        json!("on")
    );
}

#[tokio::test]
async fn call_service_requires_service_name() {
    let store = Arc::new(MemoryEntityStore::new());
    let executor = executor_with(store);

    let action = Action::new(ActionKind::CallService);
    let result = executor.execute(&action, None).await;
    assert!(matches!(result, Err(ActionError::Validation(_))));
}

#[tokio::test]
async fn unknown_action_kind_is_unsupported() {
    let store = Arc::new(MemoryEntityStore::new());
    let executor = executor_with(store);

    let action = Action::new(ActionKind::Other("fire-event".to_string()));
    let result = executor.execute(&action, None).await;
    assert!(matches!(result, Err(ActionError::Unsupported(tag)) if tag == "fire-event"));
}

struct SlowServiceCall;

#[async_trait]
impl ServiceCall for SlowServiceCall {
    async fn call(
        &self,
        _service: &str,
        _data: &IndexMap<String, Value>,
    ) -> Result<(), ServiceCallError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }
}

#[tokio::test]
async fn slow_service_call_times_out() {
    let store = Arc::new(MemoryEntityStore::new());
    let executor = ActionExecutor::new(store, Arc::new(SlowServiceCall))
        .with_config(ExecutorConfig::new().with_service_timeout(Duration::from_millis(250)));

    let action = Action::new(ActionKind::CallService).with_service("light.turn_on");
    let result = executor.execute(&action, None).await;
    assert!(matches!(
        result,
        Err(ActionError::Timeout { duration_ms: 250 })
    ));
}

struct FailingServiceCall;

#[async_trait]
impl ServiceCall for FailingServiceCall {
    async fn call(
        &self,
        service: &str,
        _data: &IndexMap<String, Value>,
    ) -> Result<(), ServiceCallError> {
        Err(ServiceCallError::Failed(format!("{service} rejected")))
    }
}

#[tokio::test]
async fn failed_service_call_surfaces_error() {
    let store = Arc::new(MemoryEntityStore::new());
    let executor = ActionExecutor::new(store, Arc::new(FailingServiceCall));

    let action = Action::new(ActionKind::CallService).with_service("climate.set_temperature");
    let result = executor.execute(&action, None).await;
    assert!(matches!(result, Err(ActionError::ServiceCall(_))));
}
