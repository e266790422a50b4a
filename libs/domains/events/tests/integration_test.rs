//! Integration tests for Events domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure the entity
//! mapping matches the migrated schema. They need Docker:
//!
//! ```sh
//! cargo test -p domain_events --test integration_test -- --ignored
//! ```

use domain_events::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn input(builder: &TestDataBuilder, suffix: &str) -> NewEvent {
    NewEvent {
        name: builder.name("event", suffix),
        description: "Integration test event".to_string(),
        begin_enrollment_date_time: builder.date_time(0),
        close_enrollment_date_time: builder.date_time(1),
        begin_event_date_time: builder.date_time(2),
        end_event_date_time: builder.date_time(3),
        location: Some("Gangnam".to_string()),
        base_price: 100,
        max_price: 200,
        limit_of_enrollment: 100,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_event() {
    let db = TestDatabase::new().await;
    let repo = PgEventRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let created = repo.create(input(&builder, "main")).await.unwrap();

    assert_eq!(created.name, builder.name("event", "main"));
    assert_eq!(created.event_status, EventStatus::Draft);
    assert_eq!(created.begin_event_date_time, builder.date_time(2));
    assert!(created.offline);
    assert!(!created.free);

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "event should exist");

    assert_uuid_eq(retrieved.id, created.id, "retrieved event id");
    assert_eq!(retrieved, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_keeps_identity_and_status() {
    let db = TestDatabase::new().await;
    let repo = PgEventRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update");

    let created = repo.create(input(&builder, "before")).await.unwrap();

    let mut changed = input(&builder, "after");
    changed.base_price = 0;
    changed.max_price = 0;
    changed.location = None;

    let updated = repo.update(created.id, changed).await.unwrap();

    assert_uuid_eq(updated.id, created.id, "updated event id");
    assert_eq!(updated.name, builder.name("event", "after"));
    assert_eq!(updated.event_status, EventStatus::Draft);
    assert!(updated.free);
    assert!(!updated.offline);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_event() {
    let db = TestDatabase::new().await;
    let repo = PgEventRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_missing");

    let result = repo.update(builder.id(), input(&builder, "x")).await;
    assert!(matches!(result, Err(EventError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_and_count() {
    let db = TestDatabase::new().await;
    db.truncate("events").await;
    let repo = PgEventRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_and_count");

    for i in 0..3 {
        repo.create(input(&builder, &format!("e{i}"))).await.unwrap();
    }

    assert_eq!(repo.count().await.unwrap(), 3);

    let page = repo.list(1, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].name, builder.name("event", "e1"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_rejects_before_insert() {
    let db = TestDatabase::new().await;
    db.truncate("events").await;
    let service = EventService::new(PgEventRepository::new(db.connection()), EventValidator::new());

    let result = service.create_event(EventDto::default()).await;
    assert!(matches!(result, Err(EventError::Invalid(_))));

    let repo = PgEventRepository::new(db.connection());
    assert_eq!(repo.count().await.unwrap(), 0);
}
