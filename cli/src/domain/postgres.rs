//! SQL text for the PostgreSQL catalog probes.

/// Quote `value` as a SQL string literal, doubling embedded quotes.
#[must_use]
pub fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Query printing `1` when role `name` exists.
#[must_use]
pub fn role_exists_query(name: &str) -> String {
    format!("SELECT 1 FROM pg_roles WHERE rolname = {}", sql_literal(name))
}

/// Query printing `1` when database `name` exists.
#[must_use]
pub fn database_exists_query(name: &str) -> String {
    format!("SELECT 1 FROM pg_database WHERE datname = {}", sql_literal(name))
}
