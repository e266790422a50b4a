//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly with OpenAPI viewers, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: standard error bodies, error codes, request-binding errors
//! - **[`extractors`]**: UUID path and validated JSON extractors
//! - **[`hal`]**: HAL hypermedia representations
//! - **[`audit`]**: audit records for data modifications
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new())?.merge(health_router(app_info!()));
//! create_production_app(router, &ServerConfig::default(), async {}).await?;
//! ```

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod hal;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, cors_layer_from_env, security_headers};

pub use errors::{AppError, BindingError, BindingErrors, BindingObject, ErrorCode, ErrorResponse};

pub use extractors::{QueryParams, UuidPath, ValidatedJson};

pub use hal::{HAL_JSON, HalCollection, HalJson, HalResource, Link, LinkBuilder, Links, PageMetadata};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
