use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::BindingError, axum_helpers::HealthResponse)
    ),
    info(
        title = "Events API",
        version = "0.1.0",
        description = "API for creating, listing and updating scheduled events"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = domain_events::entity::Model::URL, api = domain_events::ApiDoc)
    )
)]
pub struct ApiDoc;
