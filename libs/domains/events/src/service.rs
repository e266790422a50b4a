use axum_helpers::{BindingErrors, BindingObject, PageMetadata};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::models::{Event, EventDto, NewEvent, PageRequest};
use crate::repository::EventRepository;
use crate::validator::EventValidator;

/// Service layer for Event business logic
#[derive(Clone)]
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
    validator: EventValidator,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R, validator: EventValidator) -> Self {
        Self {
            repository: Arc::new(repository),
            validator,
        }
    }

    /// Validate, map and persist a new event
    pub async fn create_event(&self, dto: EventDto) -> EventResult<Event> {
        let input = self.bind(dto)?;
        self.repository.create(input).await
    }

    /// Get an event by ID
    pub async fn get_event(&self, id: Uuid) -> EventResult<Event> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    /// One page of events plus paging metadata
    pub async fn list_events(&self, page: PageRequest) -> EventResult<(Vec<Event>, PageMetadata)> {
        let total = self.repository.count().await?;
        let events = self.repository.list(page.offset(), page.limit()).await?;

        Ok((events, PageMetadata::new(page.number(), page.limit(), total)))
    }

    /// Validate and replace the editable attributes of an event
    pub async fn update_event(&self, id: Uuid, dto: EventDto) -> EventResult<Event> {
        let input = self.bind(dto)?;
        self.repository.update(id, input).await
    }

    /// Structural checks first; business rules run only once those pass.
    fn bind(&self, dto: EventDto) -> EventResult<NewEvent> {
        dto.validate()
            .map_err(|e| BindingErrors::from_validation(EventDto::OBJECT_NAME, &e))?;

        let mut errors = BindingErrors::for_object::<EventDto>();
        self.validator.validate(&dto, &mut errors);
        errors.into_result()?;

        Ok(NewEvent::from_dto(dto)?)
    }
}
