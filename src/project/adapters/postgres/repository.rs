//! `PostgreSQL` repository implementation for project storage.

use super::{
    models::{ProjectRow, row_to_project, to_new_row, to_row_changes},
    schema::projects,
};
use crate::project::{
    domain::{Project, ProjectId, ProjectUpdate},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::task::adapters::postgres::schema::{comments, tasks};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by project adapters.
pub type ProjectPgPool = Pool<ConnectionManager<PgConnection>>;

impl From<DieselError> for ProjectRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: ProjectPgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProjectPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = to_new_row(project)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn update(
        &self,
        id: ProjectId,
        update: ProjectUpdate,
        now: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Project> {
        self.run_blocking(move |connection| {
            connection.transaction::<Project, ProjectRepositoryError, _>(|connection| {
                let row = projects::table
                    .find(id.into_inner())
                    .select(ProjectRow::as_select())
                    .for_update()
                    .first::<ProjectRow>(connection)
                    .optional()?
                    .ok_or(ProjectRepositoryError::NotFound(id))?;
                let mut project = row_to_project(row)?;
                project.apply_update(update, now);

                diesel::update(projects::table.find(id.into_inner()))
                    .set(&to_row_changes(&project)?)
                    .execute(connection)?;
                Ok(project)
            })
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<(), ProjectRepositoryError, _>(|connection| {
                // Cascade so no task or comment outlives its project.
                diesel::delete(comments::table.filter(comments::project_id.eq(id.into_inner())))
                    .execute(connection)?;
                diesel::delete(tasks::table.filter(tasks::project_id.eq(id.into_inner())))
                    .execute(connection)?;
                let deleted = diesel::delete(projects::table.find(id.into_inner()))
                    .execute(connection)?;
                if deleted == 0 {
                    return Err(ProjectRepositoryError::NotFound(id));
                }
                Ok(())
            })
        })
        .await
    }

    async fn list_for_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .filter(projects::owner_id.eq(owner_id.into_inner()))
                .order(projects::created_at.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }
}
