//! SQL DDL for the `enrollments` table, one dialect per adapter.
//!
//! Both dialects map 1:1 onto [`crate::domain::Enrollment`]: a
//! store-generated `id` primary key and three nullable text columns.

/// PostgreSQL schema. `GENERATED BY DEFAULT` lets an upsert with an
/// explicit id through while still generating ids for plain inserts.
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS enrollments (
    id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
    name TEXT NULL,
    email TEXT NULL,
    course TEXT NULL
)
"#;

/// SQLite schema. `AUTOINCREMENT` keeps ids monotonic even after the
/// highest row is deleted.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS enrollments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NULL,
    email TEXT NULL,
    course TEXT NULL
)
"#;
