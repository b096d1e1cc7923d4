use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::job::CompanyJobRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRow {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company together with its open jobs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: CompanyRow,
    pub jobs: Vec<CompanyJobRow>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}
