pub mod filter;
pub mod handlers;
pub mod repository;

use crate::validation::{FieldKind, FieldRule};

const NAME: FieldKind = FieldKind::Text {
    min_len: 1,
    max_len: None,
};
const DESCRIPTION: FieldKind = FieldKind::Text {
    min_len: 0,
    max_len: None,
};
const NUM_EMPLOYEES: FieldKind = FieldKind::Integer { min: 0 };

/// Body of `POST /companies`.
pub const NEW_COMPANY_RULES: &[FieldRule] = &[
    FieldRule::required(
        "handle",
        FieldKind::Text {
            min_len: 1,
            max_len: Some(25),
        },
    ),
    FieldRule::required("name", NAME),
    FieldRule::required("description", DESCRIPTION),
    FieldRule::optional("numEmployees", NUM_EMPLOYEES),
    FieldRule::optional("logoUrl", FieldKind::Url),
];

/// Body of `PATCH /companies/:handle`. The handle is the key and never changes.
pub const UPDATE_COMPANY_RULES: &[FieldRule] = &[
    FieldRule::optional("name", NAME).non_null(),
    FieldRule::optional("description", DESCRIPTION).non_null(),
    FieldRule::optional("numEmployees", NUM_EMPLOYEES),
    FieldRule::optional("logoUrl", FieldKind::Url),
];
