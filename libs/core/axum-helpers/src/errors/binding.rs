//! Ordered accumulation of request-binding errors.
//!
//! A [`BindingErrors`] collects field-level errors (tied to one property of
//! the bound object) and global errors (about the object as a whole). It
//! serializes to a flat JSON array, field errors first and global errors
//! second, each in the order they were recorded:
//!
//! ```json
//! [
//!   {
//!     "field": "endEventDateTime",
//!     "objectName": "eventDto",
//!     "code": "wrongDValue",
//!     "defaultMessage": "endEventDateTime is wrong",
//!     "rejectedValue": "2018-11-20T14:21:00"
//!   },
//!   {
//!     "objectName": "eventDto",
//!     "code": "wrongPrices",
//!     "defaultMessage": "Values for prices are wrong"
//!   }
//! ]
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer, ser::SerializeSeq};
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Code used when the request body cannot be read into the target type.
pub const MESSAGE_NOT_READABLE: &str = "HttpMessageNotReadable";

/// Implemented by request bodies so errors can name the object they belong to.
pub trait BindingObject {
    /// Name reported as `objectName`, e.g. `"eventDto"`.
    const OBJECT_NAME: &'static str;
}

/// One entry of the serialized error array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BindingError {
    /// Absent for global errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub object_name: String,
    pub code: String,
    pub default_message: String,
    /// String form of the offending value, absent when there was none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} binding error(s) on '{object_name}'", self.len())]
pub struct BindingErrors {
    object_name: String,
    field_errors: Vec<BindingError>,
    global_errors: Vec<BindingError>,
}

impl BindingErrors {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            field_errors: Vec::new(),
            global_errors: Vec::new(),
        }
    }

    /// Empty accumulator named after `T`.
    pub fn for_object<T: BindingObject>() -> Self {
        Self::new(T::OBJECT_NAME)
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Record a global error.
    pub fn reject(&mut self, code: impl Into<String>, default_message: impl Into<String>) {
        self.global_errors.push(BindingError {
            field: None,
            object_name: self.object_name.clone(),
            code: code.into(),
            default_message: default_message.into(),
            rejected_value: None,
        });
    }

    /// Record an error against `field`, keeping the rejected value's string form.
    pub fn reject_value(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        default_message: impl Into<String>,
        rejected_value: Option<String>,
    ) {
        self.field_errors.push(BindingError {
            field: Some(field.into()),
            object_name: self.object_name.clone(),
            code: code.into(),
            default_message: default_message.into(),
            rejected_value,
        });
    }

    pub fn field_errors(&self) -> &[BindingError] {
        &self.field_errors
    }

    pub fn global_errors(&self) -> &[BindingError] {
        &self.global_errors
    }

    /// Field errors first, then global errors.
    pub fn iter(&self) -> impl Iterator<Item = &BindingError> {
        self.field_errors.iter().chain(self.global_errors.iter())
    }

    pub fn has_errors(&self) -> bool {
        !self.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.global_errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.field_errors.len() + self.global_errors.len()
    }

    /// `Ok(())` when nothing was recorded, otherwise the accumulator itself.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Convert `validator` output into field errors, ordered by field name.
    ///
    /// Field names are reported in camelCase to match the JSON body.
    pub fn from_validation(object_name: impl Into<String>, errors: &ValidationErrors) -> Self {
        let mut binding = Self::new(object_name);

        let mut fields: Vec<_> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| (camel_case(&field.to_string()), errs))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        for (field, errs) in fields {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                let rejected = err.params.get("value").and_then(value_to_string);

                binding.reject_value(field.clone(), err.code.to_string(), message, rejected);
            }
        }

        binding
    }

    /// A single global `HttpMessageNotReadable` error carrying the parser message.
    pub fn not_readable(object_name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut binding = Self::new(object_name);
        binding.reject(MESSAGE_NOT_READABLE, message);
        binding
    }
}

impl Serialize for BindingErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for error in self.iter() {
            seq.serialize_element(error)?;
        }
        seq.end()
    }
}

impl IntoResponse for BindingErrors {
    fn into_response(self) -> Response {
        tracing::info!(
            object = %self.object_name,
            errors = self.len(),
            "Request rejected by validation"
        );
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

fn value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
