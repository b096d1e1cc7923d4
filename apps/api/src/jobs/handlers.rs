//! Axum route handlers for jobs.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::jobs::filter::JobFilter;
use crate::jobs::repository::{create_job, find_jobs, get_job, remove_job, update_job};
use crate::jobs::{NEW_JOB_RULES, UPDATE_JOB_RULES};
use crate::middleware::auth::AdminUser;
use crate::models::job::{JobRow, NewJob};
use crate::state::AppState;
use crate::validation::{json_body, query_params, validate_object};

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job: JobRow,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobRow>,
}

#[derive(Debug, Serialize)]
pub struct JobDeletedResponse {
    pub deleted: i32,
}

/// POST /jobs
///
/// Admin only. Body is `{ title, salary?, equity?, companyHandle }`.
pub async fn handle_create_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<JobResponse>), AppError> {
    let body = json_body(body)?;
    validate_object(&body, NEW_JOB_RULES)?;
    let new_job: NewJob =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;

    let job = create_job(&state.db, &new_job).await?;
    info!(admin = %admin.username, "Created job {} for company {}", job.id, job.company_handle);
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// GET /jobs?title=&minSalary=&hasEquity=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    query: Result<Query<JobFilter>, QueryRejection>,
) -> Result<Json<JobListResponse>, AppError> {
    let filter = query_params(query)?;
    filter.validate()?;

    let jobs = find_jobs(&state.db, &filter).await?;
    Ok(Json(JobListResponse { jobs }))
}

/// GET /jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<JobResponse>, AppError> {
    let job = get_job(&state.db, id).await?;
    Ok(Json(JobResponse { job }))
}

/// PATCH /jobs/:id
///
/// Admin only. Any subset of `{ title, salary, equity }`; an empty body is
/// rejected with `NO_DATA`.
pub async fn handle_update_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<JobResponse>, AppError> {
    let body = json_body(body)?;
    let fields = validate_object(&body, UPDATE_JOB_RULES)?;

    let job = update_job(&state.db, id, fields).await?;
    info!(admin = %admin.username, "Updated job {id}");
    Ok(Json(JobResponse { job }))
}

/// DELETE /jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<JobDeletedResponse>, AppError> {
    remove_job(&state.db, id).await?;
    info!(admin = %admin.username, "Removed job {id}");
    Ok(Json(JobDeletedResponse { deleted: id }))
}
