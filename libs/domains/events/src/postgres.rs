use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{EventError, EventResult},
    models::{Event, NewEvent},
    repository::EventRepository,
};

#[derive(Clone)]
pub struct PgEventRepository {
    db: DatabaseConnection,
}

impl PgEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, input: NewEvent) -> EventResult<Event> {
        let event = Event::new(Uuid::now_v7(), input);

        let model = entity::ActiveModel::for_insert(event)
            .insert(&self.db)
            .await?;

        tracing::info!(event_id = %model.id, "Created event");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, offset: u64, limit: u64) -> EventResult<Vec<Event>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> EventResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }

    async fn update(&self, id: Uuid, input: NewEvent) -> EventResult<Event> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(EventError::NotFound(id))?;

        let mut event: Event = model.into();
        event.apply(input);

        let model = entity::ActiveModel::for_update(event)
            .update(&self.db)
            .await?;

        tracing::info!(event_id = %id, "Updated event");
        Ok(model.into())
    }
}
