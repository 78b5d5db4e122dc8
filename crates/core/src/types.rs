/// Primary keys are PostgreSQL SERIAL (`int4`).
pub type DbId = i32;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse a path segment into a [`DbId`].
///
/// Only strictly positive decimal integers are accepted. Anything else yields
/// `None` so callers can answer "not found" instead of failing the request.
pub fn parse_id(raw: &str) -> Option<DbId> {
    raw.trim().parse::<DbId>().ok().filter(|id| *id > 0)
}
