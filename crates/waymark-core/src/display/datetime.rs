//! Timestamp and measurement formatting.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Renders a UTC timestamp in the system time zone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A length in meters, shown in meters below one kilometer.
pub struct Length(pub f64);

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 1000.0 {
            write!(f, "{:.0} m", self.0)
        } else {
            write!(f, "{:.2} km", self.0 / 1000.0)
        }
    }
}

/// A travel time in seconds, rounded to whole minutes.
pub struct TravelTime(pub f64);

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = (self.0 / 60.0).round().max(0.0) as u64;
        if minutes < 60 {
            write!(f, "{minutes} min")
        } else {
            write!(f, "{} h {:02} min", minutes / 60, minutes % 60)
        }
    }
}
