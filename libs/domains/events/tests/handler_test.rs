//! Handler tests for Events domain
//!
//! These tests drive the events router directly with `oneshot()`:
//! - Request binding (unknown fields, missing fields, business rules)
//! - HAL response bodies and the Location header
//! - HTTP status codes and error bodies
//!
//! They use the in-memory repository, so no database is needed.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{HAL_JSON, LinkBuilder};
use domain_events::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

const BASE_URL: &str = "http://localhost:8080";

fn app() -> Router {
    let service = EventService::new(InMemoryEventRepository::new(), EventValidator::new());
    handlers::router(service, LinkBuilder::new(BASE_URL))
}

fn valid_body() -> Value {
    json!({
        "name": "Spring",
        "description": "REST API Development with Spring",
        "beginEnrollmentDateTime": "2018-11-23T14:21:00",
        "closeEnrollmentDateTime": "2018-11-24T14:21:00",
        "beginEventDateTime": "2018-11-25T14:21:00",
        "endEventDateTime": "2018-11-26T14:21:00",
        "basePrice": 100,
        "maxPrice": 200,
        "limitOfEnrollment": 100,
        "location": "Gangnam station D2 startup factory"
    })
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create(app: &Router, body: &Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_event_returns_201_with_links() {
    let app = app();

    let response = app
        .oneshot(json_request("POST", "/", &valid_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        HAL_JSON
    );

    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let body = json_body(response.into_body()).await;
    let id = body["id"].as_str().unwrap();

    assert_eq!(location, format!("{BASE_URL}/api/events/{id}"));
    assert_eq!(body["_links"]["self"]["href"], location);
    assert_eq!(body["_links"]["update-event"]["href"], location);
    assert_eq!(
        body["_links"]["query-events"]["href"],
        format!("{BASE_URL}/api/events")
    );

    assert_eq!(body["free"], false);
    assert_eq!(body["offline"], true);
    assert_eq!(body["eventStatus"], "DRAFT");
}

#[tokio::test]
async fn test_create_free_online_event() {
    let mut body = valid_body();
    body["basePrice"] = json!(0);
    body["maxPrice"] = json!(0);
    body.as_object_mut().unwrap().remove("location");

    let created = create(&app(), &body).await;

    assert_eq!(created["free"], true);
    assert_eq!(created["offline"], false);
}

#[tokio::test]
async fn test_create_rejects_server_owned_fields() {
    for (field, value) in [
        ("id", json!(100)),
        ("free", json!(true)),
        ("offline", json!(false)),
        ("eventStatus", json!("PUBLISHED")),
    ] {
        let mut body = valid_body();
        body[field] = value;

        let response = app()
            .oneshot(json_request("POST", "/", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{field}");

        let errors = json_body(response.into_body()).await;
        assert_eq!(errors[0]["code"], "HttpMessageNotReadable");
        assert_eq!(errors[0]["objectName"], "eventDto");
        assert!(errors[0].get("field").is_none());
    }
}

#[tokio::test]
async fn test_create_empty_input_is_rejected() {
    let response = app()
        .oneshot(json_request("POST", "/", &json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = json_body(response.into_body()).await;
    let errors = errors.as_array().unwrap();
    assert_eq!(errors.len(), 6);

    let fields: Vec<_> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec![
            "beginEnrollmentDateTime",
            "beginEventDateTime",
            "closeEnrollmentDateTime",
            "description",
            "endEventDateTime",
            "name",
        ]
    );
    assert_eq!(errors[0]["code"], "NotNull");
    assert_eq!(errors[3]["code"], "NotEmpty");
}

#[tokio::test]
async fn test_create_wrong_input_reports_all_business_errors() {
    let mut body = valid_body();
    body["basePrice"] = json!(100_000);
    body["maxPrice"] = json!(200);
    body["endEventDateTime"] = json!("2018-11-20T14:21:00");

    let response = app()
        .oneshot(json_request("POST", "/", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = json_body(response.into_body()).await;
    assert_eq!(
        errors,
        json!([
            {
                "field": "endEventDateTime",
                "objectName": "eventDto",
                "code": "wrongDValue",
                "defaultMessage": "endEventDateTime is wrong",
                "rejectedValue": "2018-11-20T14:21:00"
            },
            {
                "objectName": "eventDto",
                "code": "wrongPrices",
                "defaultMessage": "Values for prices are wrong"
            }
        ])
    );
}

#[tokio::test]
async fn test_create_negative_limit_reports_min() {
    let mut body = valid_body();
    body["limitOfEnrollment"] = json!(-1);

    let response = app()
        .oneshot(json_request("POST", "/", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = json_body(response.into_body()).await;
    assert_eq!(errors[0]["field"], "limitOfEnrollment");
    assert_eq!(errors[0]["code"], "Min");
    assert_eq!(errors[0]["rejectedValue"], "-1");
}

#[tokio::test]
async fn test_create_malformed_json_is_not_readable() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = json_body(response.into_body()).await;
    assert_eq!(errors[0]["code"], "HttpMessageNotReadable");
}

#[tokio::test]
async fn test_get_event_returns_hal_resource() {
    let app = app();
    let created = create(&app, &valid_body()).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        HAL_JSON
    );

    let body = json_body(response.into_body()).await;
    assert_eq!(body, created);
}

#[tokio::test]
async fn test_get_unknown_event_returns_404() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri(format!("/{}", uuid::Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_with_invalid_uuid_returns_400() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_UUID");
}

#[tokio::test]
async fn test_list_events_pages_with_metadata() {
    let app = app();
    for i in 0..3 {
        let mut body = valid_body();
        body["name"] = json!(format!("event-{i}"));
        create(&app, &body).await;
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?page=1&size=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    let events = body["_embedded"]["eventList"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["name"], "event-2");
    assert!(events[0]["_links"]["self"]["href"].is_string());

    assert_eq!(
        body["page"],
        json!({ "size": 2, "totalElements": 3, "totalPages": 2, "number": 1 })
    );
    assert_eq!(
        body["_links"]["self"]["href"],
        format!("{BASE_URL}/api/events?page=1&size=2")
    );
    assert!(body["_links"].get("next").is_none());
    assert!(body["_links"]["prev"].is_object());
}

#[tokio::test]
async fn test_list_with_huge_page_number_is_clamped() {
    let app = app();
    create(&app, &valid_body()).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/?page={}&size=10", u64::MAX))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert!(body.get("_embedded").is_none());
    assert_eq!(body["page"]["number"], PageRequest::MAX_PAGE);
    assert_eq!(body["page"]["totalElements"], 1);
    assert!(body["_links"].get("next").is_none());
    assert!(body["_links"]["prev"].is_object());
}

#[tokio::test]
async fn test_list_with_unparseable_page_returns_400() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/?page=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_QUERY");
    assert_eq!(body["code"], 1007);
}

#[tokio::test]
async fn test_list_empty_collection_omits_embedded() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert!(body.get("_embedded").is_none());
    assert_eq!(body["page"]["totalElements"], 0);
}

#[tokio::test]
async fn test_update_event_recomputes_flags() {
    let app = app();
    let created = create(&app, &valid_body()).await;
    let id = created["id"].as_str().unwrap();

    let mut body = valid_body();
    body["name"] = json!("Spring Boot");
    body["basePrice"] = json!(0);
    body["maxPrice"] = json!(0);
    body["location"] = json!("   ");

    let response = app
        .oneshot(json_request("PUT", &format!("/{id}"), &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let updated = json_body(response.into_body()).await;
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Spring Boot");
    assert_eq!(updated["free"], true);
    assert_eq!(updated["offline"], false);
    assert_eq!(updated["eventStatus"], "DRAFT");
}

#[tokio::test]
async fn test_update_with_wrong_prices_returns_400() {
    let app = app();
    let created = create(&app, &valid_body()).await;
    let id = created["id"].as_str().unwrap();

    let mut body = valid_body();
    body["basePrice"] = json!(100_000);

    let response = app
        .oneshot(json_request("PUT", &format!("/{id}"), &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = json_body(response.into_body()).await;
    assert_eq!(errors[0]["code"], "wrongPrices");
}

#[tokio::test]
async fn test_update_unknown_event_returns_404() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", uuid::Uuid::now_v7()),
            &valid_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
