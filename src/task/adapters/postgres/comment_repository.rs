//! `PostgreSQL` repository implementation for comment storage with
//! transactional comment-count maintenance.

use super::{
    models::{CommentRow, TaskRow, comment_to_new_row, row_to_comment, row_to_task,
        task_to_row_changes},
    schema::{comments, tasks},
};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Comment, CommentId, CommentUpdate, Task, TaskId},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by comment adapters.
pub type CommentPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for CommentRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: CommentPgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CommentPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CommentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CommentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CommentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CommentRepositoryError::persistence)?
    }
}

/// Loads the owning task row under a row lock.
fn lock_task(
    connection: &mut PgConnection,
    project_id: ProjectId,
    task_id: TaskId,
) -> CommentRepositoryResult<Task> {
    let row = tasks::table
        .find((project_id.into_inner(), task_id.into_inner()))
        .select(TaskRow::as_select())
        .for_update()
        .first::<TaskRow>(connection)
        .optional()?
        .ok_or(CommentRepositoryError::TaskNotFound {
            project_id,
            task_id,
        })?;
    row_to_task(row).map_err(CommentRepositoryError::persistence)
}

/// Writes the task's comment counter and update timestamp back.
fn write_task(connection: &mut PgConnection, task: &Task) -> CommentRepositoryResult<()> {
    let changes = task_to_row_changes(task).map_err(CommentRepositoryError::persistence)?;
    diesel::update(
        tasks::table.find((task.project_id().into_inner(), task.id().into_inner())),
    )
    .set(&changes)
    .execute(connection)?;
    Ok(())
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let comment_id = comment.id();
        let project_id = comment.project_id();
        let task_id = comment.task_id();
        let created_at = comment.created_at();
        let new_row = comment_to_new_row(comment);

        self.run_blocking(move |connection| {
            connection.transaction::<(), CommentRepositoryError, _>(|connection| {
                let mut task = lock_task(connection, project_id, task_id)?;
                task.record_comment_added(created_at);
                write_task(connection, &task)?;

                diesel::insert_into(comments::table)
                    .values(&new_row)
                    .execute(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            CommentRepositoryError::DuplicateComment(comment_id)
                        }
                        _ => CommentRepositoryError::persistence(err),
                    })?;
                Ok(())
            })
        })
        .await
    }

    async fn list_for_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> CommentRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = comments::table
                .filter(
                    comments::project_id
                        .eq(project_id.into_inner())
                        .and(comments::task_id.eq(task_id.into_inner())),
                )
                .order((comments::created_at.asc(), comments::id.asc()))
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(CommentRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }

    async fn update(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        comment_id: CommentId,
        update: CommentUpdate,
        now: DateTime<Utc>,
    ) -> CommentRepositoryResult<Comment> {
        self.run_blocking(move |connection| {
            connection.transaction::<Comment, CommentRepositoryError, _>(|connection| {
                let row = comments::table
                    .find((
                        project_id.into_inner(),
                        task_id.into_inner(),
                        comment_id.into_inner(),
                    ))
                    .select(CommentRow::as_select())
                    .for_update()
                    .first::<CommentRow>(connection)
                    .optional()?
                    .ok_or(CommentRepositoryError::CommentNotFound {
                        task_id,
                        comment_id,
                    })?;
                let mut comment = row_to_comment(row)?;
                comment.apply_update(update, now);

                diesel::update(comments::table.find((
                    project_id.into_inner(),
                    task_id.into_inner(),
                    comment_id.into_inner(),
                )))
                .set((
                    comments::body.eq(comment.body().as_str().to_owned()),
                    comments::is_active.eq(comment.is_active()),
                    comments::updated_at.eq(comment.updated_at()),
                ))
                .execute(connection)?;
                Ok(comment)
            })
        })
        .await
    }

    async fn delete(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        comment_id: CommentId,
        now: DateTime<Utc>,
    ) -> CommentRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<(), CommentRepositoryError, _>(|connection| {
                let mut task = lock_task(connection, project_id, task_id)?;
                task.record_comment_removed(now)?;

                let deleted = diesel::delete(comments::table.find((
                    project_id.into_inner(),
                    task_id.into_inner(),
                    comment_id.into_inner(),
                )))
                .execute(connection)?;
                if deleted == 0 {
                    return Err(CommentRepositoryError::CommentNotFound {
                        task_id,
                        comment_id,
                    });
                }
                write_task(connection, &task)?;
                Ok(())
            })
        })
        .await
    }
}
