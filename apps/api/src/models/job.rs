use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A job as returned by the API. `equity` is selected as `FLOAT8`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// A job listed under its company, without the redundant handle.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct CompanyJobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<f64>,
    pub company_handle: String,
}
