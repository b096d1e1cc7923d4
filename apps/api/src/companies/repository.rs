use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::debug;

use crate::companies::filter::CompanyFilter;
use crate::db::bind_values;
use crate::errors::{AppError, UNIQUE_VIOLATION};
use crate::models::company::{CompanyDetail, CompanyRow, NewCompany};
use crate::models::job::CompanyJobRow;
use crate::sql::{build_partial_update, ColumnMap};

/// Fields a company update may touch, and the two whose columns are snake_case.
pub const COMPANY_COLUMNS: ColumnMap = ColumnMap::new(
    &["name", "description", "numEmployees", "logoUrl"],
    &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")],
);

const COMPANY_RETURNING: &str = "handle, name, description, num_employees, logo_url";

pub async fn create_company(pool: &PgPool, company: &NewCompany) -> Result<CompanyRow, AppError> {
    let sql = format!(
        "INSERT INTO companies (handle, name, description, num_employees, logo_url)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING {COMPANY_RETURNING}"
    );
    let row = sqlx::query_as::<_, CompanyRow>(&sql)
        .bind(&company.handle)
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.num_employees)
        .bind(&company.logo_url)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            AppError::from_violation(
                e,
                UNIQUE_VIOLATION,
                format!("Duplicate company: {}", company.handle),
            )
        })?;

    Ok(row)
}

/// Lists companies matching `filter`, ordered by name.
pub async fn find_companies(
    pool: &PgPool,
    filter: &CompanyFilter,
) -> Result<Vec<CompanyRow>, AppError> {
    let clause = filter.to_where();
    let sql = format!(
        "SELECT {COMPANY_RETURNING} FROM companies {} ORDER BY name",
        clause.to_sql()
    );
    debug!(%sql, params = clause.values.len(), "Finding companies");

    Ok(bind_values(sqlx::query_as::<_, CompanyRow>(&sql), clause.values)
        .fetch_all(pool)
        .await?)
}

/// Returns a company with its jobs, ordered by job id.
pub async fn get_company(pool: &PgPool, handle: &str) -> Result<CompanyDetail, AppError> {
    let sql = format!("SELECT {COMPANY_RETURNING} FROM companies WHERE handle = $1");
    let company = sqlx::query_as::<_, CompanyRow>(&sql)
        .bind(handle)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No company: {handle}")))?;

    let jobs = sqlx::query_as::<_, CompanyJobRow>(
        "SELECT id, title, salary, equity::FLOAT8 AS equity
         FROM jobs
         WHERE company_handle = $1
         ORDER BY id",
    )
    .bind(handle)
    .fetch_all(pool)
    .await?;

    Ok(CompanyDetail { company, jobs })
}

/// Partial update: only the fields present in `data` change.
pub async fn update_company(
    pool: &PgPool,
    handle: &str,
    data: &Map<String, Value>,
) -> Result<CompanyRow, AppError> {
    let update = build_partial_update(data, &COMPANY_COLUMNS)?;
    let sql = format!(
        "UPDATE companies SET {} WHERE handle = {} RETURNING {COMPANY_RETURNING}",
        update.set_clause,
        update.next_placeholder()
    );
    debug!(%sql, "Updating company {handle}");

    let row = bind_values(sqlx::query_as::<_, CompanyRow>(&sql), update.values)
        .bind(handle)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No company: {handle}")))?;

    Ok(row)
}

pub async fn remove_company(pool: &PgPool, handle: &str) -> Result<(), AppError> {
    sqlx::query_scalar::<_, String>("DELETE FROM companies WHERE handle = $1 RETURNING handle")
        .bind(handle)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No company: {handle}")))?;

    Ok(())
}
