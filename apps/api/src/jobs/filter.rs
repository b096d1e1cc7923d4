use serde::Deserialize;

use crate::errors::AppError;
use crate::sql::{FilterClause, WhereBuilder};

/// Query parameters of `GET /jobs`.
///
/// A present value always filters, `minSalary=0` included. `hasEquity=false`
/// is the same as leaving it out: the flag can only narrow to jobs with equity.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn validate(&self) -> Result<(), AppError> {
        match self.min_salary {
            Some(min) if min < 0 => Err(AppError::Validation(
                "'minSalary' must be at least 0".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Conditions are checked in a fixed order: title, minSalary, hasEquity.
    pub fn to_where(&self) -> FilterClause {
        let mut builder = WhereBuilder::new();
        if let Some(title) = &self.title {
            builder.and_contains("title", title);
        }
        if let Some(min_salary) = self.min_salary {
            builder.and_gte("salary", min_salary);
        }
        if self.has_equity == Some(true) {
            builder.and_positive("equity");
        }
        builder.build()
    }
}
