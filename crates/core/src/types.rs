/// All primary keys are UUIDs generated by the application.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Placeholder name to value map bound into a design template.
pub type Fields = serde_json::Map<String, serde_json::Value>;
