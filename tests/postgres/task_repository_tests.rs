//! Store contract and service checks against `PostgreSQL`.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::rstest;
use tasklist::task::{
    services::{TaskLifecycleError, TaskLifecycleService},
    validation::{TaskPayload, fields},
};

use crate::postgres::helpers::open_schema;
use crate::test_helpers;

macro_rules! with_schema {
    ($schema:ident) => {
        let Some($schema) = open_schema().await? else {
            return Ok(());
        };
    };
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_insert_and_find() -> Result<(), eyre::Report> {
    with_schema!(schema);
    test_helpers::assert_insert_and_find(schema.repository().as_ref()).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_title_exists_is_exact() -> Result<(), eyre::Report> {
    with_schema!(schema);
    test_helpers::assert_title_exists_is_exact(schema.repository().as_ref()).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_update_overwrites() -> Result<(), eyre::Report> {
    with_schema!(schema);
    test_helpers::assert_update_overwrites(schema.repository().as_ref()).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_delete_removes() -> Result<(), eyre::Report> {
    with_schema!(schema);
    test_helpers::assert_delete_removes(schema.repository().as_ref()).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_missing_rows_report_absence() -> Result<(), eyre::Report> {
    with_schema!(schema);
    test_helpers::assert_missing_rows(schema.repository().as_ref()).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn postgres_concurrent_toggles_alternate() -> Result<(), eyre::Report> {
    with_schema!(schema);
    test_helpers::assert_concurrent_toggles_alternate(schema.repository(), 40).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_unique_insert_refuses_taken_title() -> Result<(), eyre::Report> {
    with_schema!(schema);
    test_helpers::assert_unique_insert_refuses_taken_title(schema.repository().as_ref()).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn postgres_concurrent_unique_inserts_store_one() -> Result<(), eyre::Report> {
    with_schema!(schema);
    test_helpers::assert_concurrent_unique_inserts_store_one(schema.repository(), 16).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_ensure_schema_is_repeatable() -> Result<(), eyre::Report> {
    with_schema!(schema);
    let repository = schema.repository();
    repository.ensure_schema().await?;
    test_helpers::assert_missing_rows(repository.as_ref()).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_service_rejects_duplicate_titles() -> Result<(), eyre::Report> {
    with_schema!(schema);
    let service = TaskLifecycleService::new(schema.repository(), Arc::new(DefaultClock));
    let payload = TaskPayload::new()
        .with(fields::TITLE, "Buy milk")
        .with(fields::CHECKED, 1);

    service.create(&payload).await?;
    let duplicate = service.create(&payload).await;

    eyre::ensure!(
        matches!(duplicate, Err(TaskLifecycleError::Validation(_))),
        "duplicate create returned {duplicate:?}"
    );
    let listed = service.list().await?;
    eyre::ensure!(listed.len() == 1, "expected one task, found {}", listed.len());
    Ok(())
}
