//! `PostgreSQL` repository implementation for task storage with
//! transactional counter maintenance.

use super::{
    models::{TaskRow, row_to_task, task_to_new_row, task_to_row_changes},
    schema::{comments, tasks},
};
use crate::project::adapters::postgres::schema::projects;
use crate::project::adapters::postgres::{
    models as project_models, models::ProjectRow,
};
use crate::project::domain::{CompletionChange, Project, ProjectId};
use crate::task::{
    domain::{Task, TaskId, TaskUpdate},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed task repository.
///
/// Counter-coupled operations lock the owning project row (`FOR UPDATE`)
/// and write the adjusted counters inside the same transaction as the task
/// mutation.
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
        .map_err(TaskRepositoryError::persistence)?
    }
}

/// Loads the owning project row under a row lock.
fn lock_project(
    connection: &mut PgConnection,
    project_id: ProjectId,
) -> TaskRepositoryResult<Project> {
    let row = projects::table
        .find(project_id.into_inner())
        .select(ProjectRow::as_select())
        .for_update()
        .first::<ProjectRow>(connection)
        .optional()?
        .ok_or(TaskRepositoryError::ProjectNotFound(project_id))?;
    project_models::row_to_project(row).map_err(TaskRepositoryError::persistence)
}

/// Writes the project's counters and update timestamp back.
fn write_project(connection: &mut PgConnection, project: &Project) -> TaskRepositoryResult<()> {
    let changes =
        project_models::to_row_changes(project).map_err(TaskRepositoryError::persistence)?;
    diesel::update(projects::table.find(project.id().into_inner()))
        .set(&changes)
        .execute(connection)?;
    Ok(())
}

/// Loads a task row under a row lock.
fn lock_task(
    connection: &mut PgConnection,
    project_id: ProjectId,
    task_id: TaskId,
) -> TaskRepositoryResult<Task> {
    let row = tasks::table
        .find((project_id.into_inner(), task_id.into_inner()))
        .select(TaskRow::as_select())
        .for_update()
        .first::<TaskRow>(connection)
        .optional()?
        .ok_or(TaskRepositoryError::TaskNotFound {
            project_id,
            task_id,
        })?;
    row_to_task(row)
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let project_id = task.project_id();
        let completed = task.status().counts_as_completed();
        let created_at = task.created_at();
        let new_row = task_to_new_row(task)?;

        self.run_blocking(move |connection| {
            connection.transaction::<(), TaskRepositoryError, _>(|connection| {
                let mut project = lock_project(connection, project_id)?;
                project.record_task_created(completed, created_at);
                write_project(connection, &project)?;

                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .execute(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateTask(task_id)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find((project_id.into_inner(), task_id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        update: TaskUpdate,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            connection.transaction::<Task, TaskRepositoryError, _>(|connection| {
                let mut task = lock_task(connection, project_id, task_id)?;
                let change = task.apply_update(update, now);
                diesel::update(
                    tasks::table.find((project_id.into_inner(), task_id.into_inner())),
                )
                .set(&task_to_row_changes(&task)?)
                .execute(connection)?;

                if change != CompletionChange::Unchanged {
                    let mut project = lock_project(connection, project_id)?;
                    project.apply_completion_change(change, now)?;
                    write_project(connection, &project)?;
                }
                Ok(task)
            })
        })
        .await
    }

    async fn delete(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<(), TaskRepositoryError, _>(|connection| {
                let task = lock_task(connection, project_id, task_id)?;
                let mut project = lock_project(connection, project_id)?;
                project.record_task_deleted(task.status().counts_as_completed(), now)?;
                write_project(connection, &project)?;

                diesel::delete(comments::table.filter(
                    comments::project_id
                        .eq(project_id.into_inner())
                        .and(comments::task_id.eq(task_id.into_inner())),
                ))
                .execute(connection)?;
                diesel::delete(
                    tasks::table.find((project_id.into_inner(), task_id.into_inner())),
                )
                .execute(connection)?;
                Ok(())
            })
        })
        .await
    }

    async fn list_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .order((tasks::display_order.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}
