use axum_helpers::{BindingErrors, BindingObject};
use chrono::NaiveDateTime;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Format used when a timestamp is reported back as a rejected value.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Publication status of an event
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Newly created, not visible to attendees
    #[default]
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "PUBLISHED")]
    Published,
    #[sea_orm(string_value = "BEGAN_ENROLLMENT")]
    BeganEnrollment,
}

/// Client input for creating or replacing an event.
///
/// Required attributes are optional here so that a missing one is reported
/// as a field error instead of a parse failure. Server-owned attributes
/// (`id`, `free`, `offline`, `eventStatus`) are unknown fields and make the
/// body unreadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventDto {
    #[validate(
        required(code = "NotEmpty", message = "must not be empty"),
        length(min = 1, code = "NotEmpty", message = "must not be empty")
    )]
    #[schema(example = "Spring REST API")]
    pub name: Option<String>,

    #[validate(
        required(code = "NotEmpty", message = "must not be empty"),
        length(min = 1, code = "NotEmpty", message = "must not be empty")
    )]
    #[schema(example = "REST API development with Spring")]
    pub description: Option<String>,

    #[validate(required(code = "NotNull", message = "must not be null"))]
    #[schema(value_type = Option<String>, example = "2018-11-23T14:21:00")]
    pub begin_enrollment_date_time: Option<NaiveDateTime>,

    #[validate(required(code = "NotNull", message = "must not be null"))]
    #[schema(value_type = Option<String>, example = "2018-11-24T14:21:00")]
    pub close_enrollment_date_time: Option<NaiveDateTime>,

    #[validate(required(code = "NotNull", message = "must not be null"))]
    #[schema(value_type = Option<String>, example = "2018-11-25T14:21:00")]
    pub begin_event_date_time: Option<NaiveDateTime>,

    #[validate(required(code = "NotNull", message = "must not be null"))]
    #[schema(value_type = Option<String>, example = "2018-11-26T14:21:00")]
    pub end_event_date_time: Option<NaiveDateTime>,

    /// Absent for online events
    #[schema(example = "Gangnam station D2 startup factory")]
    pub location: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, code = "Min", message = "must be greater than or equal to 0"))]
    pub base_price: i32,

    /// `0` means no upper bound
    #[serde(default)]
    #[validate(range(min = 0, code = "Min", message = "must be greater than or equal to 0"))]
    pub max_price: i32,

    #[serde(default)]
    #[validate(range(min = 0, code = "Min", message = "must be greater than or equal to 0"))]
    pub limit_of_enrollment: i32,
}

impl BindingObject for EventDto {
    const OBJECT_NAME: &'static str = "eventDto";
}

/// Client-editable attributes of an event after binding.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub begin_enrollment_date_time: NaiveDateTime,
    pub close_enrollment_date_time: NaiveDateTime,
    pub begin_event_date_time: NaiveDateTime,
    pub end_event_date_time: NaiveDateTime,
    pub location: Option<String>,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
}

impl NewEvent {
    /// Copy every attribute out of `dto`.
    ///
    /// Fails with the same field errors structural validation reports when a
    /// required attribute is missing.
    pub fn from_dto(dto: EventDto) -> Result<Self, BindingErrors> {
        let mut errors = BindingErrors::for_object::<EventDto>();

        const NOT_EMPTY: (&str, &str) = ("NotEmpty", "must not be empty");
        const NOT_NULL: (&str, &str) = ("NotNull", "must not be null");

        for (field, present, (code, message)) in [
            ("beginEnrollmentDateTime", dto.begin_enrollment_date_time.is_some(), NOT_NULL),
            ("beginEventDateTime", dto.begin_event_date_time.is_some(), NOT_NULL),
            ("closeEnrollmentDateTime", dto.close_enrollment_date_time.is_some(), NOT_NULL),
            ("description", dto.description.is_some(), NOT_EMPTY),
            ("endEventDateTime", dto.end_event_date_time.is_some(), NOT_NULL),
            ("name", dto.name.is_some(), NOT_EMPTY),
        ] {
            if !present {
                errors.reject_value(field, code, message, None);
            }
        }

        let (
            Some(name),
            Some(description),
            Some(begin_enrollment_date_time),
            Some(close_enrollment_date_time),
            Some(begin_event_date_time),
            Some(end_event_date_time),
        ) = (
            dto.name,
            dto.description,
            dto.begin_enrollment_date_time,
            dto.close_enrollment_date_time,
            dto.begin_event_date_time,
            dto.end_event_date_time,
        )
        else {
            return Err(errors);
        };

        Ok(Self {
            name,
            description,
            begin_enrollment_date_time,
            close_enrollment_date_time,
            begin_event_date_time,
            end_event_date_time,
            location: dto.location,
            base_price: dto.base_price,
            max_price: dto.max_price,
            limit_of_enrollment: dto.limit_of_enrollment,
        })
    }
}

/// A persisted event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "2018-11-23T14:21:00")]
    pub begin_enrollment_date_time: NaiveDateTime,
    #[schema(value_type = String, example = "2018-11-24T14:21:00")]
    pub close_enrollment_date_time: NaiveDateTime,
    #[schema(value_type = String, example = "2018-11-25T14:21:00")]
    pub begin_event_date_time: NaiveDateTime,
    #[schema(value_type = String, example = "2018-11-26T14:21:00")]
    pub end_event_date_time: NaiveDateTime,
    pub location: Option<String>,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
    /// Derived: a location is set
    pub offline: bool,
    /// Derived: both prices are zero
    pub free: bool,
    pub event_status: EventStatus,
}

impl Event {
    /// A `DRAFT` event with derived flags already computed.
    pub fn new(id: Uuid, input: NewEvent) -> Self {
        let mut event = Self {
            id,
            name: input.name,
            description: input.description,
            begin_enrollment_date_time: input.begin_enrollment_date_time,
            close_enrollment_date_time: input.close_enrollment_date_time,
            begin_event_date_time: input.begin_event_date_time,
            end_event_date_time: input.end_event_date_time,
            location: input.location,
            base_price: input.base_price,
            max_price: input.max_price,
            limit_of_enrollment: input.limit_of_enrollment,
            offline: false,
            free: false,
            event_status: EventStatus::Draft,
        };
        event.update();
        event
    }

    /// Replace the client-editable attributes. Identifier and status are kept.
    pub fn apply(&mut self, input: NewEvent) {
        self.name = input.name;
        self.description = input.description;
        self.begin_enrollment_date_time = input.begin_enrollment_date_time;
        self.close_enrollment_date_time = input.close_enrollment_date_time;
        self.begin_event_date_time = input.begin_event_date_time;
        self.end_event_date_time = input.end_event_date_time;
        self.location = input.location;
        self.base_price = input.base_price;
        self.max_price = input.max_price;
        self.limit_of_enrollment = input.limit_of_enrollment;
        self.update();
    }

    /// Recompute `free` and `offline` from prices and location.
    pub fn update(&mut self) {
        self.free = self.base_price == 0 && self.max_price == 0;
        self.offline = self
            .location
            .as_deref()
            .is_some_and(|location| !location.trim().is_empty());
    }
}

/// Zero-based page selection for listing events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageRequest {
    /// Page number, starting at 0
    #[serde(default)]
    pub page: u64,
    /// Page size, capped at 100
    #[serde(default = "default_page_size")]
    pub size: u64,
}

fn default_page_size() -> u64 {
    PageRequest::DEFAULT_SIZE
}

impl PageRequest {
    pub const DEFAULT_SIZE: u64 = 20;
    pub const MAX_SIZE: u64 = 100;
    /// Highest page whose offset still fits a signed 64-bit `OFFSET`.
    pub const MAX_PAGE: u64 = i64::MAX as u64 / Self::MAX_SIZE;

    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Requested size clamped to `1..=MAX_SIZE`.
    pub fn limit(&self) -> u64 {
        self.size.clamp(1, Self::MAX_SIZE)
    }

    /// Requested page clamped to `MAX_PAGE`.
    pub fn number(&self) -> u64 {
        self.page.min(Self::MAX_PAGE)
    }

    pub fn offset(&self) -> u64 {
        self.number() * self.limit()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}
