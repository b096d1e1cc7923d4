use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::debug;

use crate::db::bind_values;
use crate::errors::{AppError, FOREIGN_KEY_VIOLATION};
use crate::jobs::filter::JobFilter;
use crate::models::job::{JobRow, NewJob};
use crate::sql::{build_partial_update, ColumnMap};

/// Fields a job update may touch. Their columns share the logical names.
pub const JOB_COLUMNS: ColumnMap = ColumnMap::new(&["title", "salary", "equity"], &[]);

const JOB_RETURNING: &str = "id, title, salary, equity::FLOAT8 AS equity, company_handle";

pub async fn create_job(pool: &PgPool, job: &NewJob) -> Result<JobRow, AppError> {
    let sql = format!(
        "INSERT INTO jobs (title, salary, equity, company_handle)
         VALUES ($1, $2, $3, $4)
         RETURNING {JOB_RETURNING}"
    );
    let row = sqlx::query_as::<_, JobRow>(&sql)
        .bind(&job.title)
        .bind(job.salary)
        .bind(job.equity)
        .bind(&job.company_handle)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            AppError::from_violation(
                e,
                FOREIGN_KEY_VIOLATION,
                format!("Company does not exist: {}", job.company_handle),
            )
        })?;

    Ok(row)
}

/// Lists jobs matching `filter`, ordered by title.
pub async fn find_jobs(pool: &PgPool, filter: &JobFilter) -> Result<Vec<JobRow>, AppError> {
    let clause = filter.to_where();
    let sql = format!(
        "SELECT {JOB_RETURNING} FROM jobs {} ORDER BY title, id",
        clause.to_sql()
    );
    debug!(%sql, params = clause.values.len(), "Finding jobs");

    Ok(bind_values(sqlx::query_as::<_, JobRow>(&sql), clause.values)
        .fetch_all(pool)
        .await?)
}

pub async fn get_job(pool: &PgPool, id: i32) -> Result<JobRow, AppError> {
    let sql = format!("SELECT {JOB_RETURNING} FROM jobs WHERE id = $1");
    sqlx::query_as::<_, JobRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No job: {id}")))
}

/// Partial update: only the fields present in `data` change.
pub async fn update_job(
    pool: &PgPool,
    id: i32,
    data: &Map<String, Value>,
) -> Result<JobRow, AppError> {
    let update = build_partial_update(data, &JOB_COLUMNS)?;
    let sql = format!(
        "UPDATE jobs SET {} WHERE id = {} RETURNING {JOB_RETURNING}",
        update.set_clause,
        update.next_placeholder()
    );
    debug!(%sql, "Updating job {id}");

    let row = bind_values(sqlx::query_as::<_, JobRow>(&sql), update.values)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No job: {id}")))?;

    Ok(row)
}

pub async fn remove_job(pool: &PgPool, id: i32) -> Result<(), AppError> {
    sqlx::query_scalar::<_, i32>("DELETE FROM jobs WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No job: {id}")))?;

    Ok(())
}
