//! Events Domain
//!
//! Scheduled events (enrollment window, event window, pricing, enrollment
//! limit) with two-stage input validation and HAL responses.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, Location header, HAL links
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← structural checks, business rules, mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory and Postgres)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Event, EventDto, derived flags
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::LinkBuilder;
//! use domain_events::{
//!     handlers,
//!     repository::InMemoryEventRepository,
//!     service::EventService,
//!     validator::EventValidator,
//! };
//!
//! let service = EventService::new(InMemoryEventRepository::new(), EventValidator::new());
//! let router = handlers::router(service, LinkBuilder::new("http://localhost:8080"));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validator;

pub use error::{EventError, EventResult};
pub use handlers::ApiDoc;
pub use models::{Event, EventDto, EventStatus, NewEvent, PageRequest};
pub use postgres::PgEventRepository;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::EventService;
pub use validator::EventValidator;
