//! Per-test `PostgreSQL` schemas for the repository suite.
//!
//! Tests run only when `TASKLIST_TEST_DATABASE_URL` names a reachable
//! server. Each test gets its own schema, selected through the pool's
//! `search_path`, and the schema is dropped when the handle goes away.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use eyre::WrapErr;
use tasklist::task::adapters::postgres::{PostgresTaskRepository, TaskPgPool};

/// Environment variable holding the test server URL.
pub const DATABASE_URL_VAR: &str = "TASKLIST_TEST_DATABASE_URL";

const POOL_SIZE: u32 = 4;

static NEXT_SCHEMA: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// An isolated schema holding a freshly created `tasks` table.
pub struct TestSchema {
    url: String,
    name: String,
    repository: Arc<PostgresTaskRepository>,
}

impl TestSchema {
    /// Returns the repository bound to this schema.
    pub fn repository(&self) -> Arc<PostgresTaskRepository> {
        Arc::clone(&self.repository)
    }
}

impl Drop for TestSchema {
    fn drop(&mut self) {
        let Ok(mut connection) = PgConnection::establish(&self.url) else {
            return;
        };
        if let Err(err) =
            connection.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.name))
        {
            eprintln!("failed to drop test schema {}: {err}", self.name);
        }
    }
}

/// Opens a new schema, or returns `None` when no test server is configured.
///
/// # Errors
///
/// Returns an error when the server is configured but unusable.
pub async fn open_schema() -> Result<Option<TestSchema>, eyre::Report> {
    let Some(url) = std::env::var(DATABASE_URL_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
    else {
        eprintln!("{DATABASE_URL_VAR} is unset; skipping PostgreSQL test");
        return Ok(None);
    };
    let name = format!(
        "tasklist_test_{}_{}",
        std::process::id(),
        NEXT_SCHEMA.fetch_add(1, Ordering::Relaxed)
    );

    let setup_url = url.clone();
    let setup_name = name.clone();
    let pool = tokio::task::spawn_blocking(move || build_pool(&setup_url, setup_name))
    .await
    .wrap_err("join pool setup")??;

    let schema = TestSchema {
        url,
        name,
        repository: Arc::new(PostgresTaskRepository::new(pool)),
    };
    schema
        .repository
        .ensure_schema()
        .await
        .wrap_err("create tasks table")?;
    Ok(Some(schema))
}

fn build_pool(url: &str, name: String) -> Result<TaskPgPool, eyre::Report> {
    let mut connection = PgConnection::establish(url).wrap_err("connect to test server")?;
    connection
        .batch_execute(&format!(
            "DROP SCHEMA IF EXISTS {name} CASCADE; CREATE SCHEMA {name};"
        ))
        .wrap_err("create test schema")?;

    Pool::builder()
        .max_size(POOL_SIZE)
        .connection_customizer(Box::new(SearchPath(name)))
        .build(ConnectionManager::<PgConnection>::new(url))
        .wrap_err("build test pool")
}
