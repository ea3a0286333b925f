/// All primary keys are UUIDs, generated by the database (`gen_random_uuid()`)
/// or in code via `Uuid::now_v7()`.
pub type ResourceId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
