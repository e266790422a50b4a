use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, BindingErrors};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event not found: {0}")]
    NotFound(Uuid),

    /// Structural or business-rule violations
    #[error(transparent)]
    Invalid(#[from] BindingErrors),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type EventResult<T> = Result<T, EventError>;

/// Convert EventError to AppError for standardized error responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound(id) => AppError::NotFound(format!("Event {} not found", id)),
            EventError::Invalid(errors) => AppError::Binding(errors),
            EventError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let not_found = EventError::NotFound(Uuid::now_v7()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let mut errors = BindingErrors::new("eventDto");
        errors.reject("wrongPrices", "Values for prices are wrong");
        let invalid = EventError::Invalid(errors).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let database = EventError::Database(DbErr::Custom("boom".to_string())).into_response();
        assert_eq!(database.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
