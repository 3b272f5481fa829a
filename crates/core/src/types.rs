/// Entity identifiers are prefixed opaque strings (e.g. `PL3f9c...`).
pub type Guid = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
