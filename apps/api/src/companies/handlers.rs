//! Axum route handlers for companies.

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

use crate::companies::filter::CompanyFilter;
use crate::companies::repository::{
    create_company, find_companies, get_company, remove_company, update_company,
};
use crate::companies::{NEW_COMPANY_RULES, UPDATE_COMPANY_RULES};
use crate::errors::AppError;
use crate::middleware::auth::AdminUser;
use crate::models::company::{CompanyDetail, CompanyRow, NewCompany};
use crate::state::AppState;
use crate::validation::{json_body, query_params, validate_object};

#[derive(Debug, Serialize)]
pub struct CompanyResponse<T> {
    pub company: T,
}

#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanyRow>,
}

#[derive(Debug, Serialize)]
pub struct CompanyDeletedResponse {
    pub deleted: String,
}

/// POST /companies
pub async fn handle_create_company(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CompanyResponse<CompanyRow>>), AppError> {
    let body = json_body(body)?;
    validate_object(&body, NEW_COMPANY_RULES)?;
    let new_company: NewCompany =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;

    let company = create_company(&state.db, &new_company).await?;
    info!(admin = %admin.username, "Created company {}", company.handle);
    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// GET /companies?name=&minEmployees=&maxEmployees=
pub async fn handle_list_companies(
    State(state): State<AppState>,
    query: Result<Query<CompanyFilter>, QueryRejection>,
) -> Result<Json<CompanyListResponse>, AppError> {
    let filter = query_params(query)?;
    filter.validate()?;

    let companies = find_companies(&state.db, &filter).await?;
    Ok(Json(CompanyListResponse { companies }))
}

/// GET /companies/:handle
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<CompanyResponse<CompanyDetail>>, AppError> {
    let company = get_company(&state.db, &handle).await?;
    Ok(Json(CompanyResponse { company }))
}

/// PATCH /companies/:handle
pub async fn handle_update_company(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(handle): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CompanyResponse<CompanyRow>>, AppError> {
    let body = json_body(body)?;
    let fields = validate_object(&body, UPDATE_COMPANY_RULES)?;

    let company = update_company(&state.db, &handle, fields).await?;
    info!(admin = %admin.username, "Updated company {handle}");
    Ok(Json(CompanyResponse { company }))
}

/// DELETE /companies/:handle
pub async fn handle_delete_company(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(handle): Path<String>,
) -> Result<Json<CompanyDeletedResponse>, AppError> {
    remove_company(&state.db, &handle).await?;
    info!(admin = %admin.username, "Removed company {handle}");
    Ok(Json(CompanyDeletedResponse { deleted: handle }))
}
