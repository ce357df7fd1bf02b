/// Record identifiers are allocated per table, starting at 1.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts are stored in minor units (cents).
pub type Cents = i64;
