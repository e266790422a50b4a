use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, HalCollection, HalJson, HalResource, Link, LinkBuilder, Links,
    PageMetadata, QueryParams, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestBindingResponse, BadRequestQueryResponse, BadRequestUuidResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::EventResult;
use crate::models::{Event, EventDto, EventStatus, PageRequest};
use crate::repository::EventRepository;
use crate::service::EventService;

/// Public path of the events collection, used when building links.
pub const EVENTS_PATH: &str = "/api/events";

/// Relation name of the embedded events in a collection
pub const EVENT_LIST_REL: &str = "eventList";

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(list_events, create_event, get_event, update_event),
    components(
        schemas(Event, EventDto, EventStatus, PageMetadata),
        responses(
            NotFoundResponse,
            BadRequestBindingResponse,
            BadRequestQueryResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Event management endpoints")
    )
)]
pub struct ApiDoc;

pub struct EventsContext<R: EventRepository> {
    service: EventService<R>,
    links: LinkBuilder,
}

pub type EventsState<R> = Arc<EventsContext<R>>;

/// Create the event router. `links` prefixes every href in responses.
pub fn router<R: EventRepository + 'static>(service: EventService<R>, links: LinkBuilder) -> Router {
    let state = Arc::new(EventsContext { service, links });

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/{id}", get(get_event).put(update_event))
        .with_state(state)
}

fn event_href(links: &LinkBuilder, event: &Event) -> String {
    links.href(&format!("{EVENTS_PATH}/{}", event.id))
}

fn event_resource(links: &LinkBuilder, event: Event) -> HalResource<Event> {
    let href = event_href(links, &event);
    let event_links = Links::new()
        .with("self", Link::new(href.clone()))
        .with("query-events", links.link(EVENTS_PATH))
        .with("update-event", Link::new(href));

    HalResource::new(event, event_links)
}

fn page_links(links: &LinkBuilder, page: &PageMetadata) -> Links {
    let page_href = |number: u64| {
        links.link(&format!("{EVENTS_PATH}?page={}&size={}", number, page.size))
    };

    let mut result = Links::new().with("self", page_href(page.number));
    if page.total_pages > 0 {
        result = result.with("first", page_href(0));
    }
    if page.has_previous() {
        result = result.with("prev", page_href(page.number - 1));
    }
    if page.has_next() {
        result = result.with("next", page_href(page.number + 1));
    }
    if page.total_pages > 0 {
        result = result.with("last", page_href(page.total_pages - 1));
    }
    result
}

/// List events page by page
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    params(PageRequest),
    responses(
        (status = 200, description = "One page of events", body = HalCollection<Event>, content_type = "application/hal+json"),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
    QueryParams(page): QueryParams<PageRequest>,
) -> EventResult<HalJson<HalCollection<Event>>> {
    let (events, metadata) = state.service.list_events(page).await?;

    let items = events
        .into_iter()
        .map(|event| event_resource(&state.links, event))
        .collect();
    let links = page_links(&state.links, &metadata);

    Ok(HalJson(HalCollection::new(
        EVENT_LIST_REL,
        items,
        links,
        metadata,
    )))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = EventDto,
    responses(
        (status = 201, description = "Event created", body = HalResource<Event>, content_type = "application/hal+json",
            headers(("Location" = String, description = "URL of the new event"))),
        (status = 400, response = BadRequestBindingResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    headers: HeaderMap,
    ValidatedJson(dto): ValidatedJson<EventDto>,
) -> EventResult<impl IntoResponse> {
    let event = match state.service.create_event(dto).await {
        Ok(event) => event,
        Err(e) => {
            AuditEvent::new("event.create", None, AuditOutcome::Failure)
                .with_ip(extract_ip_from_headers(&headers))
                .with_user_agent(extract_user_agent(&headers))
                .with_details(json!({ "error": e.to_string() }))
                .log();
            return Err(e);
        }
    };

    AuditEvent::new(
        "event.create",
        Some(format!("event:{}", event.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "name": event.name,
        "free": event.free,
        "offline": event.offline,
    }))
    .log();

    let location = event_href(&state.links, &event);
    let resource = event_resource(&state.links, event);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        HalJson(resource),
    ))
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = HalResource<Event>, content_type = "application/hal+json"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    UuidPath(id): UuidPath,
) -> EventResult<HalJson<HalResource<Event>>> {
    let event = state.service.get_event(id).await?;
    Ok(HalJson(event_resource(&state.links, event)))
}

/// Replace the editable attributes of an event
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = Uuid, Path, description = "Event ID")
    ),
    request_body = EventDto,
    responses(
        (status = 200, description = "Event updated", body = HalResource<Event>, content_type = "application/hal+json"),
        (status = 400, response = BadRequestBindingResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    UuidPath(id): UuidPath,
    headers: HeaderMap,
    ValidatedJson(dto): ValidatedJson<EventDto>,
) -> EventResult<HalJson<HalResource<Event>>> {
    let event = state.service.update_event(id, dto).await?;

    AuditEvent::new(
        "event.update",
        Some(format!("event:{}", event.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "name": event.name }))
    .log();

    Ok(HalJson(event_resource(&state.links, event)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_links_on_middle_page() {
        let links = page_links(&LinkBuilder::default(), &PageMetadata::new(1, 10, 25));

        assert_eq!(links.get("self").unwrap().href, "/api/events?page=1&size=10");
        assert_eq!(links.get("first").unwrap().href, "/api/events?page=0&size=10");
        assert_eq!(links.get("prev").unwrap().href, "/api/events?page=0&size=10");
        assert_eq!(links.get("next").unwrap().href, "/api/events?page=2&size=10");
        assert_eq!(links.get("last").unwrap().href, "/api/events?page=2&size=10");
    }

    #[test]
    fn test_page_links_on_empty_collection() {
        let links = page_links(&LinkBuilder::default(), &PageMetadata::new(0, 20, 0));

        assert_eq!(links.len(), 1);
        assert!(links.get("self").is_some());
    }
}
