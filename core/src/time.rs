//! Time related utils.

use crate::{Error, Result};
use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// TimeDelta is the alias for `chrono::TimeDelta`, used for clock offsets.
pub type TimeDelta = chrono::TimeDelta;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Parse a plain base-10 Unix timestamp in seconds, like `1700000000`.
///
/// Surrounding ASCII whitespace is ignored.
pub fn parse_unix_timestamp(s: &str) -> Result<DateTime> {
    let s = s.trim();
    let secs: i64 = s.parse().map_err(|e| {
        Error::decode(format!("invalid unix timestamp: {s:?}")).with_source(anyhow::Error::new(e))
    })?;

    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| Error::decode(format!("unix timestamp out of range: {secs}")))
}
