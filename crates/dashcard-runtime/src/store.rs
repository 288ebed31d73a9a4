//! Entity store boundary
//!
//! Provides the [`EntityStore`] trait the rest of the engine depends on
//! and [`MemoryEntityStore`], the in-process reference implementation:
//! - Entity registration and lookup
//! - State writes with per-entity arrival-order notification
//! - Scoped subscriptions released on guard drop
//!
//! No cross-entity ordering is guaranteed; callbacks for one entity are
//! delivered in the order its writes arrived.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::Value;

use dashcard_model::{Entity, EntityId};

use crate::error::StoreError;

/// Callback invoked with the updated entity after a state change
pub type StateCallback = Arc<dyn Fn(&Entity) + Send + Sync>;

/// Scoped subscription guard
///
/// Dropping the guard releases the subscription. Rendered views hold
/// their subscriptions and release them on teardown, so no polling or
/// callback outlives the view that needed it.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Create a guard that runs `release` when dropped
    #[must_use]
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard that releases nothing (for test doubles)
    #[must_use]
    pub fn noop() -> Self {
        Self { release: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// The narrow store contract the engine depends on
///
/// Backend integrations (websocket bridges, test fixtures) implement
/// this; renderers read through it, the action executor writes through
/// it.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Current snapshot of an entity, if the store knows it
    fn get(&self, id: &EntityId) -> Option<Entity>;

    /// Subscribe to state changes of one entity
    fn subscribe(&self, id: &EntityId, callback: StateCallback) -> Subscription;

    /// Write a new state for an entity
    ///
    /// # Errors
    /// Returns [`StoreError`] when the entity is unknown or the backing
    /// store rejects the write.
    async fn write(&self, id: &EntityId, new_state: Value) -> Result<(), StoreError>;
}

type SubscriberList = Vec<(u64, StateCallback)>;

#[derive(Default)]
struct Subscribers {
    next_id: AtomicU64,
    by_entity: DashMap<EntityId, SubscriberList>,
    global: RwLock<SubscriberList>,
}

/// In-process entity store
///
/// Concurrent maps keyed by entity id; notification happens on the
/// writer's call path, per entity in arrival order.
#[derive(Default)]
pub struct MemoryEntityStore {
    entities: DashMap<EntityId, Entity>,
    subscribers: Arc<Subscribers>,
}

impl MemoryEntityStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) an entity
    pub fn register(&self, entity: Entity) {
        self.entities.insert(entity.id.clone(), entity);
    }

    /// All known entity ids
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.key().clone()).collect()
    }

    /// Number of registered entities
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Subscribe to every entity's changes (editor live previews)
    #[must_use]
    pub fn subscribe_all(&self, callback: StateCallback) -> Subscription {
        let id = self.subscribers.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.global.write().push((id, callback));

        let subscribers = Arc::clone(&self.subscribers);
        Subscription::new(move || {
            subscribers.global.write().retain(|(sub_id, _)| *sub_id != id);
        })
    }

    fn notify(&self, entity: &Entity) {
        // Clone callbacks out before invoking so a callback that reads
        // the store again never re-enters a held map shard.
        let mut callbacks: Vec<StateCallback> = Vec::new();
        if let Some(list) = self.subscribers.by_entity.get(&entity.id) {
            callbacks.extend(list.iter().map(|(_, cb)| Arc::clone(cb)));
        }
        callbacks.extend(
            self.subscribers
                .global
                .read()
                .iter()
                .map(|(_, cb)| Arc::clone(cb)),
        );

        for callback in callbacks {
            callback(entity);
        }
    }
}

#[async_trait]
impl EntityStore for MemoryEntityStore {
    fn get(&self, id: &EntityId) -> Option<Entity> {
        self.entities.get(id).map(|e| e.clone())
    }

    fn subscribe(&self, id: &EntityId, callback: StateCallback) -> Subscription {
        let sub_id = self.subscribers.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .by_entity
            .entry(id.clone())
            .or_default()
            .push((sub_id, callback));

        let subscribers = Arc::clone(&self.subscribers);
        let entity_id = id.clone();
        Subscription::new(move || {
            if let Some(mut list) = subscribers.by_entity.get_mut(&entity_id) {
                list.retain(|(existing, _)| *existing != sub_id);
            }
        })
    }

    async fn write(&self, id: &EntityId, new_state: Value) -> Result<(), StoreError> {
        let updated = {
            let mut entry = self
                .entities
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            entry.update_state(new_state);
            entry.clone()
        };

        tracing::debug!(entity = %id, state = %updated.state, "entity state written");
        self.notify(&updated);
        Ok(())
    }
}

impl std::fmt::Debug for MemoryEntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryEntityStore")
            .field("entities", &self.entities.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    fn store_with(id: &str, state: Value) -> MemoryEntityStore {
        let store = MemoryEntityStore::new();
        store.register(Entity::new(id, state));
        store
    }

    #[tokio::test]
    async fn write_updates_state() {
        let store = store_with("light.lamp", json!("off"));
        let id = EntityId::from("light.lamp");

        store.write(&id, json!("on")).await.unwrap();
        assert_eq!(store.get(&id).unwrap().state, json!("on"));
    }

    #[tokio::test]
    async fn write_unknown_entity_fails() {
        let store = MemoryEntityStore::new();
        let result = store.write(&EntityId::from("light.ghost"), json!("on")).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn subscribers_see_writes_in_arrival_order() {
        let store = store_with("sensor.power", json!(0));
        let id = EntityId::from("sensor.power");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = store.subscribe(
            &id,
            Arc::new(move |entity: &Entity| sink.lock().push(entity.state.clone())),
        );

        store.write(&id, json!(100)).await.unwrap();
        store.write(&id, json!(200)).await.unwrap();
        store.write(&id, json!(300)).await.unwrap();

        assert_eq!(*seen.lock(), vec![json!(100), json!(200), json!(300)]);
    }

    #[tokio::test]
    async fn dropped_subscription_stops_delivery() {
        let store = store_with("sensor.power", json!(0));
        let id = EntityId::from("sensor.power");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = store.subscribe(
            &id,
            Arc::new(move |entity: &Entity| sink.lock().push(entity.state.clone())),
        );

        store.write(&id, json!(1)).await.unwrap();
        drop(sub);
        store.write(&id, json!(2)).await.unwrap();

        assert_eq!(*seen.lock(), vec![json!(1)]);
    }

    #[tokio::test]
    async fn global_subscription_sees_every_entity() {
        let store = MemoryEntityStore::new();
        store.register(Entity::new("light.a", json!("off")));
        store.register(Entity::new("light.b", json!("off")));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = store.subscribe_all(Arc::new(move |entity: &Entity| {
            sink.lock().push(entity.id.clone());
        }));

        store.write(&EntityId::from("light.a"), json!("on")).await.unwrap();
        store.write(&EntityId::from("light.b"), json!("on")).await.unwrap();

        assert_eq!(
            *seen.lock(),
            vec![EntityId::from("light.a"), EntityId::from("light.b")]
        );
    }

    #[tokio::test]
    async fn callback_may_read_store() {
        let store = Arc::new(store_with("sensor.power", json!(0)));
        let id = EntityId::from("sensor.power");

        let reader = Arc::clone(&store);
        let observed = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&observed);
        let probe_id = id.clone();
        let _sub = store.subscribe(
            &id,
            Arc::new(move |_entity: &Entity| {
                *sink.lock() = reader.get(&probe_id).map(|e| e.state);
            }),
        );

        store.write(&id, json!(42)).await.unwrap();
        assert_eq!(*observed.lock(), Some(json!(42)));
    }
}
