use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgArguments, PgPoolOptions, Postgres};
use sqlx::query::QueryAs;
use sqlx::PgPool;
use tracing::info;

use crate::sql::SqlValue;

/// Creates the PostgreSQL connection pool shared by all repositories.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .context("failed to connect to DATABASE_URL")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Binds `values` in order, so `values[i]` fills placeholder `$i+1`.
/// Placeholders the caller adds after these are bound afterwards.
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: Vec<SqlValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            // NULL still needs a wire type; int4 assignment-casts to every updatable column.
            SqlValue::Null => query.bind(None::<i32>),
            SqlValue::Bool(b) => query.bind(b),
            SqlValue::Int(i) => query.bind(i),
            SqlValue::Float(f) => query.bind(f),
            SqlValue::Text(s) => query.bind(s),
        };
    }
    query
}
