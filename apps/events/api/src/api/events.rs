use axum::Router;
use axum_helpers::LinkBuilder;
use domain_events::{EventService, EventValidator, PgEventRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgEventRepository::new(state.db.clone());
    let service = EventService::new(repository, EventValidator::new());
    handlers::router(service, LinkBuilder::new(state.config.public_base_url.clone()))
}
