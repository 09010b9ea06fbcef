/// Hero identifiers are assigned by the backing store.
pub type HeroId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
