//! Wall-clock timestamps.

use chrono::Utc;

/// Current time in seconds since the Unix epoch, with microsecond precision.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
