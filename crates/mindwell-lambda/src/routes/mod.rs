pub mod analytics;
pub mod assessments;
pub mod bookings;
pub mod chat;
pub mod forums;
pub mod health;
pub mod instruments;
pub mod resources;

use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;

/// Calendar date used for booking and analytics windows.
pub(crate) fn today_utc() -> Date {
    Timestamp::now().to_zoned(TimeZone::UTC).date()
}
