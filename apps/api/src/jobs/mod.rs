pub mod filter;
pub mod handlers;
pub mod repository;

use crate::validation::{FieldKind, FieldRule};

const TITLE: FieldKind = FieldKind::Text {
    min_len: 1,
    max_len: None,
};
const SALARY: FieldKind = FieldKind::Integer { min: 0 };
const EQUITY: FieldKind = FieldKind::Number { min: 0.0, max: 1.0 };

/// Body of `POST /jobs`.
pub const NEW_JOB_RULES: &[FieldRule] = &[
    FieldRule::required("title", TITLE),
    FieldRule::optional("salary", SALARY),
    FieldRule::optional("equity", EQUITY),
    FieldRule::required(
        "companyHandle",
        FieldKind::Text {
            min_len: 1,
            max_len: Some(25),
        },
    ),
];

/// Body of `PATCH /jobs/:id`. A job never moves between companies.
pub const UPDATE_JOB_RULES: &[FieldRule] = &[
    FieldRule::optional("title", TITLE).non_null(),
    FieldRule::optional("salary", SALARY),
    FieldRule::optional("equity", EQUITY),
];
