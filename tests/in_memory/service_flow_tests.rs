//! Service operations end to end over the in-memory store.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;
use tasklist::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskView,
    services::{TaskErrorKind, TaskLifecycleService},
    validation::TaskPayload,
};

type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

fn payload(value: serde_json::Value) -> TaskPayload {
    TaskPayload::from_value(value).expect("object payload")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_of_one_task(service: TestService) {
    let created = service
        .create(&payload(
            json!({"title": "Buy milk", "description": "2 liters", "checked": false}),
        ))
        .await
        .expect("task creation should succeed");
    let id = created.id();

    let fetched = service.fetch_one(id).await.expect("fetch should succeed");
    assert_eq!(
        fetched,
        TaskView {
            title: "Buy milk".to_owned(),
            description: Some("2 liters".to_owned()),
            checked: false,
        }
    );

    let toggled = service
        .toggle_checked(id)
        .await
        .expect("toggle should succeed");
    assert!(toggled);

    service.delete(id).await.expect("delete should succeed");
    let after = service
        .fetch_one(id)
        .await
        .expect_err("deleted task must be gone");
    assert_eq!(after.kind(), TaskErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn string_flags_are_accepted(service: TestService) {
    let created = service
        .create(&payload(json!({"title": "Stringly", "checked": "1"})))
        .await
        .expect("task creation should succeed");

    assert!(created.checked());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_reflects_updates(service: TestService) {
    let created = service
        .create(&payload(json!({"title": "Draft", "checked": 0})))
        .await
        .expect("task creation should succeed");
    service
        .update(
            created.id(),
            &payload(json!({"title": "Final", "description": "done", "checked": 1})),
        )
        .await
        .expect("update should succeed");

    let listed = service.list().await.expect("listing should succeed");

    assert_eq!(
        listed,
        vec![TaskView {
            title: "Final".to_owned(),
            description: Some("done".to_owned()),
            checked: true,
        }]
    );
}
