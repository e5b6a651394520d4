//! Soft-delete timestamp convention.
//!
//! A row's `deleted_at` column is never null: live rows carry a fixed
//! far-future sentinel so the column participates in ordinary
//! equality/inequality filters and indexes.

use chrono::{DateTime, TimeZone, Utc};

/// The sentinel timestamp meaning "not deleted" (`9999-01-01T00:00:00Z`).
///
/// The value has zero sub-second precision so it round-trips exactly
/// through a microsecond-precision timestamp column.
pub fn deleted_sentinel() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(9999, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
