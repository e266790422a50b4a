use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{Event, NewEvent};

/// Repository trait for Event persistence.
///
/// Implementations assign the identifier on `create`; callers never choose it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new `DRAFT` event
    async fn create(&self, input: NewEvent) -> EventResult<Event>;

    /// Get an event by ID
    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>>;

    /// Events in creation order
    async fn list(&self, offset: u64, limit: u64) -> EventResult<Vec<Event>>;

    async fn count(&self) -> EventResult<u64>;

    /// Replace the editable attributes of an existing event
    async fn update(&self, id: Uuid, input: NewEvent) -> EventResult<Event>;
}

#[derive(Debug, Default)]
struct Store {
    events: HashMap<Uuid, Event>,
    order: Vec<Uuid>,
}

/// In-memory implementation of EventRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, input: NewEvent) -> EventResult<Event> {
        let mut store = self.store.write().await;

        let event = Event::new(Uuid::now_v7(), input);
        store.order.push(event.id);
        store.events.insert(event.id, event.clone());

        tracing::info!(event_id = %event.id, "Created event");
        Ok(event)
    }

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let store = self.store.read().await;
        Ok(store.events.get(&id).cloned())
    }

    async fn list(&self, offset: u64, limit: u64) -> EventResult<Vec<Event>> {
        let store = self.store.read().await;

        let events = store
            .order
            .iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .filter_map(|id| store.events.get(id).cloned())
            .collect();

        Ok(events)
    }

    async fn count(&self) -> EventResult<u64> {
        let store = self.store.read().await;
        Ok(store.events.len() as u64)
    }

    async fn update(&self, id: Uuid, input: NewEvent) -> EventResult<Event> {
        let mut store = self.store.write().await;

        let event = store.events.get_mut(&id).ok_or(EventError::NotFound(id))?;
        event.apply(input);

        tracing::info!(event_id = %id, "Updated event");
        Ok(event.clone())
    }
}
