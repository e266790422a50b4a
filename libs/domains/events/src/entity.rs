use crate::models::{Event, EventStatus};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the events table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub begin_enrollment_date_time: DateTime,
    pub close_enrollment_date_time: DateTime,
    pub begin_event_date_time: DateTime,
    pub end_event_date_time: DateTime,
    pub location: Option<String>,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
    pub offline: bool,
    pub free: bool,
    pub event_status: EventStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub const TAG: &'static str = "events";
    /// Mount point below `/api`
    pub const URL: &'static str = "/events";
}

impl From<Model> for Event {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            begin_enrollment_date_time: model.begin_enrollment_date_time,
            close_enrollment_date_time: model.close_enrollment_date_time,
            begin_event_date_time: model.begin_event_date_time,
            end_event_date_time: model.end_event_date_time,
            location: model.location,
            base_price: model.base_price,
            max_price: model.max_price,
            limit_of_enrollment: model.limit_of_enrollment,
            offline: model.offline,
            free: model.free,
            event_status: model.event_status,
        }
    }
}

impl ActiveModel {
    /// Insert form of a freshly built event.
    pub fn for_insert(event: Event) -> Self {
        let now = chrono::Utc::now();

        Self {
            id: Set(event.id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Self::editable(event)
        }
    }

    /// Update form: identifier and status are left untouched.
    pub fn for_update(event: Event) -> Self {
        Self {
            id: Unchanged(event.id),
            event_status: NotSet,
            created_at: NotSet,
            updated_at: Set(chrono::Utc::now().into()),
            ..Self::editable(event)
        }
    }

    fn editable(event: Event) -> Self {
        Self {
            id: NotSet,
            name: Set(event.name),
            description: Set(event.description),
            begin_enrollment_date_time: Set(event.begin_enrollment_date_time),
            close_enrollment_date_time: Set(event.close_enrollment_date_time),
            begin_event_date_time: Set(event.begin_event_date_time),
            end_event_date_time: Set(event.end_event_date_time),
            location: Set(event.location),
            base_price: Set(event.base_price),
            max_price: Set(event.max_price),
            limit_of_enrollment: Set(event.limit_of_enrollment),
            offline: Set(event.offline),
            free: Set(event.free),
            event_status: Set(event.event_status),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}
