use serde::Deserialize;

use crate::errors::AppError;
use crate::sql::{FilterClause, WhereBuilder};

/// Query parameters of `GET /companies`.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    pub fn validate(&self) -> Result<(), AppError> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(AppError::Validation(
                    "'minEmployees' cannot be greater than 'maxEmployees'".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Conditions are checked in a fixed order: name, minEmployees, maxEmployees.
    pub fn to_where(&self) -> FilterClause {
        let mut builder = WhereBuilder::new();
        if let Some(name) = &self.name {
            builder.and_contains("name", name);
        }
        if let Some(min) = self.min_employees {
            builder.and_gte("num_employees", min);
        }
        if let Some(max) = self.max_employees {
            builder.and_lte("num_employees", max);
        }
        builder.build()
    }
}
