//! Injection-safe SQL fragment construction.
//!
//! Column names that reach SQL text always come from a static [`ColumnMap`]
//! allow-list and are double-quoted. Values never appear in SQL text; they are
//! collected into an ordered list whose positions line up with the `$N`
//! placeholders (1-based, contiguous).

pub mod filter;
pub mod update;

use serde_json::Value;
use thiserror::Error;

pub use filter::{FilterClause, WhereBuilder};
pub use update::{build_partial_update, PartialUpdate};

#[derive(Debug, Error, PartialEq)]
pub enum SqlError {
    #[error("No data")]
    NoData,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unsupported value for field '{field}': expected a string, number, boolean or null")]
    UnsupportedValue { field: String },
}

/// A scalar bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    /// Converts a JSON scalar. Arrays and objects have no column to land in.
    pub fn from_json(field: &str, value: &Value) -> Result<Self, SqlError> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Bool(b) => Ok(SqlValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(SqlValue::Int(i)),
                None => n.as_f64().map(SqlValue::Float).ok_or_else(|| {
                    SqlError::UnsupportedValue {
                        field: field.to_string(),
                    }
                }),
            },
            Value::String(s) => Ok(SqlValue::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(SqlError::UnsupportedValue {
                field: field.to_string(),
            }),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<i32> for SqlValue {
    fn from(i: i32) -> Self {
        SqlValue::Int(i64::from(i))
    }
}

/// Allow-list of logical field names for one entity, plus the translations
/// for names whose storage column is spelled differently.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    known: &'static [&'static str],
    renames: &'static [(&'static str, &'static str)],
}

impl ColumnMap {
    pub const fn new(
        known: &'static [&'static str],
        renames: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { known, renames }
    }

    /// Resolves a logical field to its storage column.
    ///
    /// The returned name is always one of the static strings in this map,
    /// never the caller's string.
    pub fn resolve(&self, field: &str) -> Result<&'static str, SqlError> {
        if let Some(&(_, column)) = self.renames.iter().find(|rename| rename.0 == field) {
            return Ok(column);
        }
        self.known
            .iter()
            .find(|known| **known == field)
            .copied()
            .ok_or_else(|| SqlError::UnknownField(field.to_string()))
    }

    pub fn contains(&self, field: &str) -> bool {
        self.resolve(field).is_ok()
    }
}

/// Quotes a column name as a PostgreSQL identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Ordered SQL fragments and the values their placeholders refer to.
///
/// Shared by the update builder and the filter composer so both number their
/// placeholders the same way: a placeholder's index is the length of the value
/// list right after its value was pushed.
#[derive(Debug, Default)]
pub(crate) struct Fragments {
    parts: Vec<String>,
    values: Vec<SqlValue>,
}

impl Fragments {
    /// Records `value` and returns its placeholder.
    pub(crate) fn bind(&mut self, value: SqlValue) -> String {
        self.values.push(value);
        format!("${}", self.values.len())
    }

    pub(crate) fn push(&mut self, fragment: String) {
        self.parts.push(fragment);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub(crate) fn finish(self, separator: &str) -> (String, Vec<SqlValue>) {
        (self.parts.join(separator), self.values)
    }
}
