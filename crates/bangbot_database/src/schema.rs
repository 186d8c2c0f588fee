//! Diesel schema for the content table.

/// DDL applied on every startup. Both statements are idempotent.
pub const ENSURE_SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS commands (
    id SERIAL PRIMARY KEY,
    command VARCHAR(255) NOT NULL,
    content TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_command ON commands(command);
";

diesel::table! {
    /// One row per stored snippet; `command` is the category key.
    commands (id) {
        id -> Int4,
        #[max_length = 255]
        command -> Varchar,
        content -> Text,
        created_at -> Nullable<Timestamp>,
    }
}
