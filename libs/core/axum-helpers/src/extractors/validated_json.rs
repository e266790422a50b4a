//! JSON extractor that binds and validates a request body.

use crate::errors::{BindingErrors, BindingObject};
use axum::{
    extract::{FromRequest, Json, Request, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor with `validator` checks.
///
/// Unparseable bodies (bad syntax, unknown properties, wrong types) are
/// rejected with a single global `HttpMessageNotReadable` error; failed field
/// checks are rejected with one field error per violation. Both render as the
/// [`BindingErrors`] array with status 400. A missing JSON content type keeps
/// axum's default 415 response.
///
/// ```ignore
/// use axum_helpers::{BindingObject, ValidatedJson};
///
/// #[derive(Deserialize, Validate)]
/// struct EventDto {
///     #[validate(length(min = 1, code = "NotEmpty"))]
///     name: String,
/// }
///
/// impl BindingObject for EventDto {
///     const OBJECT_NAME: &'static str = "eventDto";
/// }
///
/// async fn create(ValidatedJson(dto): ValidatedJson<EventDto>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + BindingObject,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(reject_body::<T>)?;

        data.validate().map_err(|e| {
            BindingErrors::from_validation(T::OBJECT_NAME, &e).into_response()
        })?;

        Ok(ValidatedJson(data))
    }
}

fn reject_body<T: BindingObject>(rejection: JsonRejection) -> Response {
    match rejection {
        JsonRejection::JsonDataError(e) => {
            BindingErrors::not_readable(T::OBJECT_NAME, e.body_text()).into_response()
        }
        JsonRejection::JsonSyntaxError(e) => {
            BindingErrors::not_readable(T::OBJECT_NAME, e.body_text()).into_response()
        }
        other => other.into_response(),
    }
}
