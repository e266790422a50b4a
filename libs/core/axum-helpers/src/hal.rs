//! HAL (`application/hal+json`) representations.
//!
//! A [`HalResource`] renders its content's fields at the top level next to a
//! `_links` object. A [`HalCollection`] embeds resources under
//! `_embedded.<rel>` and carries paging metadata:
//!
//! ```json
//! {
//!   "_embedded": { "eventList": [ { "id": "...", "_links": { "self": { "href": "/api/events/..." } } } ] },
//!   "_links": { "self": { "href": "/api/events?page=0&size=20" } },
//!   "page": { "size": 20, "totalElements": 1, "totalPages": 1, "number": 0 }
//! }
//! ```

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::errors::AppError;

pub const HAL_JSON: &str = "application/hal+json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Relation name to link, serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(Vec<(String, Link)>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `rel`, replacing an existing link with the same relation.
    pub fn with(mut self, rel: impl Into<String>, link: Link) -> Self {
        let rel = rel.into();
        match self.0.iter_mut().find(|(r, _)| *r == rel) {
            Some(entry) => entry.1 = link,
            None => self.0.push((rel, link)),
        }
        self
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|(r, _)| r == rel).map(|(_, l)| l)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (rel, link) in &self.0 {
            map.serialize_entry(rel, link)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HalResource<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl<T> HalResource<T> {
    pub fn new(content: T, links: Links) -> Self {
        Self { content, links }
    }
}

/// Paging metadata; `number` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
}

impl PageMetadata {
    pub fn new(number: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };

        Self {
            size,
            total_elements,
            total_pages,
            number,
        }
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }
}

/// `_embedded` is omitted when the page holds no resources.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HalCollection<T> {
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub embedded: Option<BTreeMap<String, Vec<HalResource<T>>>>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
    pub page: PageMetadata,
}

impl<T> HalCollection<T> {
    pub fn new(
        rel: impl Into<String>,
        items: Vec<HalResource<T>>,
        links: Links,
        page: PageMetadata,
    ) -> Self {
        let embedded = if items.is_empty() {
            None
        } else {
            Some(BTreeMap::from([(rel.into(), items)]))
        };

        Self {
            embedded,
            links,
            page,
        }
    }
}

/// Builds absolute or relative hrefs from a configured base URL.
///
/// An empty base produces server-relative links such as `/api/events/1`.
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// `path` is appended as-is and should start with `/`.
    pub fn link(&self, path: &str) -> Link {
        Link::new(self.href(path))
    }

    pub fn href(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Serializes `T` as the response body with `Content-Type: application/hal+json`.
pub struct HalJson<T>(pub T);

impl<T: Serialize> IntoResponse for HalJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, HeaderValue::from_static(HAL_JSON))],
                body,
            )
                .into_response(),
            Err(e) => AppError::SerdeJson(e).into_response(),
        }
    }
}
