//! Store contract checks against the in-memory repository.

use std::sync::Arc;

use crate::test_helpers;
use rstest::{fixture, rstest};
use tasklist::task::{adapters::memory::InMemoryTaskRepository, ports::TaskRepository};

#[fixture]
fn repo() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn insert_and_find(repo: InMemoryTaskRepository) -> Result<(), eyre::Report> {
    test_helpers::assert_insert_and_find(&repo).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn title_exists_is_exact(repo: InMemoryTaskRepository) -> Result<(), eyre::Report> {
    test_helpers::assert_title_exists_is_exact(&repo).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_overwrites(repo: InMemoryTaskRepository) -> Result<(), eyre::Report> {
    test_helpers::assert_update_overwrites(&repo).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes(repo: InMemoryTaskRepository) -> Result<(), eyre::Report> {
    test_helpers::assert_delete_removes(&repo).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_rows_report_absence(repo: InMemoryTaskRepository) -> Result<(), eyre::Report> {
    test_helpers::assert_missing_rows(&repo).await
}

#[rstest]
#[case(2)]
#[case(100)]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_toggles_alternate(
    repo: InMemoryTaskRepository,
    #[case] toggles: usize,
) -> Result<(), eyre::Report> {
    test_helpers::assert_concurrent_toggles_alternate(Arc::new(repo), toggles).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unique_insert_refuses_taken_title(
    repo: InMemoryTaskRepository,
) -> Result<(), eyre::Report> {
    test_helpers::assert_unique_insert_refuses_taken_title(&repo).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_unique_inserts_store_one(
    repo: InMemoryTaskRepository,
) -> Result<(), eyre::Report> {
    test_helpers::assert_concurrent_unique_inserts_store_one(Arc::new(repo), 32).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clones_share_state(repo: InMemoryTaskRepository) -> Result<(), eyre::Report> {
    let clone = repo.clone();
    let created = repo
        .insert(&test_helpers::new_task("Shared", None, false))
        .await?;

    eyre::ensure!(
        clone.find_by_id(created.id()).await?.is_some(),
        "clone did not observe insert"
    );
    Ok(())
}
