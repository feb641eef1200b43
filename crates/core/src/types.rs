/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Steam application (game) identifiers as reported by the Web API.
pub type AppId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
