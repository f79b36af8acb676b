//! Link expiration policy
//!
//! Links live for a whole number of calendar months. When the target month
//! is shorter than the start day, the day is clamped to the end of that
//! month (Jan 31 + 1 month = Feb 28, or Feb 29 in a leap year).

use chrono::{DateTime, Months, Utc};

/// Default lifetime of a link, in calendar months
pub const DEFAULT_EXPIRY_MONTHS: u32 = 1;

/// `now` plus one calendar month
pub fn compute_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    compute_expiry_with(now, DEFAULT_EXPIRY_MONTHS)
}

/// `now` plus `months` calendar months, saturating at the largest
/// representable timestamp.
pub fn compute_expiry_with(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_add_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// A timestamp equal to `now` is not yet expired.
pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at < now
}
