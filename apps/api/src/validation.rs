//! Request body and query validation.
//!
//! Bodies are checked against a per-entity table of [`FieldRule`]s before they
//! are deserialized or handed to the SQL builders, so a client sees every
//! problem at once rather than the first serde error.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::Query,
    Json,
};
use serde_json::{Map, Value};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text { min_len: usize, max_len: Option<usize> },
    Integer { min: i64 },
    Number { min: f64, max: f64 },
    Url,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            nullable: false,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: true,
        }
    }

    /// Optional, but when present it must not be null (NOT NULL columns).
    pub const fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Validates `body` as an object against `rules` and returns the object.
///
/// Keys without a rule are rejected. Messages are joined with `"; "`.
pub fn validate_object<'a>(
    body: &'a Value,
    rules: &[FieldRule],
) -> Result<&'a Map<String, Value>, AppError> {
    let Some(object) = body.as_object() else {
        return Err(AppError::Validation(
            "request body must be a JSON object".to_string(),
        ));
    };

    let mut errors = Vec::new();

    for rule in rules {
        if rule.required && !object.contains_key(rule.name) {
            errors.push(format!("'{}' is required", rule.name));
        }
    }

    for (key, value) in object {
        match rules.iter().find(|r| r.name == key) {
            None => errors.push(format!("'{key}' is not an allowed field")),
            Some(rule) => {
                if let Some(msg) = check_value(rule, value) {
                    errors.push(msg);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(object)
    } else {
        Err(AppError::Validation(errors.join("; ")))
    }
}

fn check_value(rule: &FieldRule, value: &Value) -> Option<String> {
    let name = rule.name;
    if value.is_null() {
        return (!rule.nullable).then(|| format!("'{name}' cannot be null"));
    }

    match rule.kind {
        FieldKind::Text { min_len, max_len } => {
            let Some(s) = value.as_str() else {
                return Some(format!("'{name}' must be a string"));
            };
            let len = s.chars().count();
            if len < min_len {
                return Some(format!("'{name}' must be at least {min_len} characters"));
            }
            match max_len {
                Some(max) if len > max => {
                    Some(format!("'{name}' must be at most {max} characters"))
                }
                _ => None,
            }
        }
        FieldKind::Integer { min } => match value.as_i64() {
            Some(i) if i32::try_from(i).is_err() => Some(format!("'{name}' is out of range")),
            Some(i) if i < min => Some(format!("'{name}' must be at least {min}")),
            Some(_) => None,
            None => Some(format!("'{name}' must be an integer")),
        },
        FieldKind::Number { min, max } => match value.as_f64() {
            Some(n) if n < min || n > max => {
                Some(format!("'{name}' must be between {min} and {max}"))
            }
            Some(_) => None,
            None => Some(format!("'{name}' must be a number")),
        },
        FieldKind::Url => match value.as_str() {
            Some(s) if s.starts_with("http://") || s.starts_with("https://") => None,
            Some(_) => Some(format!("'{name}' must be an http(s) URL")),
            None => Some(format!("'{name}' must be a string")),
        },
    }
}

/// Unwraps a JSON body, reporting malformed JSON as a validation error.
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(value)| value)
        .map_err(|e| AppError::Validation(e.body_text()))
}

/// Unwraps query parameters, reporting unknown keys and bad types as a
/// validation error.
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|e| AppError::Validation(e.body_text()))
}
