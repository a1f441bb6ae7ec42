//! Millisecond timestamps as stored in the database

use chrono::Utc;

/// Current time in milliseconds since the Unix epoch
#[inline]
pub fn get_millis() -> i64 {
    Utc::now().timestamp_millis()
}
