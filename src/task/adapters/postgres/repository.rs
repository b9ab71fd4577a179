//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow, TaskSummaryRow},
    schema::tasks,
};
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskChanges, TaskId, TaskSummary},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema for the `tasks` table; safe to apply repeatedly.
const CREATE_TASKS_SQL: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/migrations/2024-10-26-204051_create_tasks/up.sql"
));

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool for the database URL and wraps it in a repository.
    ///
    /// Blocks while the pool opens its first connections.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the pool cannot be
    /// built.
    pub fn connect(database_url: &str, max_size: u32) -> TaskRepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .map_err(TaskRepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Creates the `tasks` table when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the DDL fails.
    pub async fn ensure_schema(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TASKS_SQL)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::runtime)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = to_row(task);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn insert_with_unique_title(&self, task: &NewTask) -> TaskRepositoryResult<Option<Task>> {
        let new_row = to_row(task);
        self.run_blocking(move |connection| {
            let inserted = connection
                .transaction::<_, diesel::result::Error, _>(|tx| {
                    // Serialises writers until commit so the title check stays valid.
                    diesel::sql_query("LOCK TABLE tasks IN SHARE ROW EXCLUSIVE MODE").execute(tx)?;
                    let taken = diesel::select(diesel::dsl::exists(
                        tasks::table.filter(tasks::title.eq(&new_row.title)),
                    ))
                    .get_result::<bool>(tx)?;
                    if taken {
                        return Ok(None);
                    }
                    diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .returning(TaskRow::as_returning())
                        .get_result::<TaskRow>(tx)
                        .map(Some)
                })
                .map_err(TaskRepositoryError::persistence)?;
            inserted.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let key = to_key(id)?;
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(key)
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_summaries(&self) -> TaskRepositoryResult<Vec<TaskSummary>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .select(TaskSummaryRow::as_select())
                .load::<TaskSummaryRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows
                .into_iter()
                .map(|row| TaskSummary {
                    title: Some(row.title),
                    description: row.description,
                    checked: Some(row.checked),
                })
                .collect())
        })
        .await
    }

    async fn title_exists(&self, title: &str) -> TaskRepositoryResult<bool> {
        let lookup_title = title.to_owned();
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                tasks::table.filter(tasks::title.eq(lookup_title)),
            ))
            .get_result::<bool>(connection)
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn update(&self, id: TaskId, changes: &TaskChanges) -> TaskRepositoryResult<Task> {
        let key = to_key(id)?;
        let input = changes.input();
        let changeset = TaskChangeset {
            title: input.title.clone(),
            description: input.description.clone(),
            checked: input.checked,
            updated_at: changes.updated_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(key))
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .ok_or(TaskRepositoryError::NotFound(id))?;
            row_to_task(row)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let key = to_key(id)?;
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(key))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn toggle_checked(
        &self,
        id: TaskId,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<bool>> {
        let key = to_key(id)?;
        self.run_blocking(move |connection| {
            // A single UPDATE keeps concurrent toggles from reading stale values.
            diesel::update(tasks::table.find(key))
                .set((
                    tasks::checked.eq(diesel::dsl::not(tasks::checked)),
                    tasks::updated_at.eq(at),
                ))
                .returning(tasks::checked)
                .get_result::<bool>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_row(task: &NewTask) -> NewTaskRow {
    let input = task.input();
    NewTaskRow {
        title: input.title.clone(),
        description: input.description.clone(),
        checked: input.checked,
        created_at: task.created_at(),
        updated_at: task.created_at(),
    }
}

fn to_key(id: TaskId) -> TaskRepositoryResult<i32> {
    i32::try_from(id.value()).map_err(TaskRepositoryError::persistence)
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        checked,
        created_at,
        updated_at,
    } = row;

    let task_id =
        TaskId::from_persisted(i64::from(id)).map_err(TaskRepositoryError::invalid_persisted_data)?;
    let data = PersistedTaskData {
        id: task_id,
        title,
        description,
        checked,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
