use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-open `[start, end)` interval of wall-clock time
/// Two intervals that merely touch at an endpoint do not overlap
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Construct a new TimeInterval
    /// Range is half-open on `[start, end)`; `start < end` is a caller
    /// obligation, not a runtime condition.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use raumplan::time::TimeInterval;
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    /// let end = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    /// let test = TimeInterval::new(start, end);
    ///
    /// assert_eq!(test.start, start);
    /// assert_eq!(test.end, end);
    /// ```
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeInterval {
        debug_assert!(start < end);
        TimeInterval { start, end }
    }

    /// Construct the interval covering `duration_hours` whole hours starting
    /// at `hour` o'clock on `day`. This is the only way grid coordinates
    /// become instants; nothing ever adjusts a timestamp field in place.
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use raumplan::time::TimeInterval;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let test = TimeInterval::from_day_hours(day, 9, 3);
    ///
    /// assert_eq!(test.start, Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
    /// assert_eq!(test.end, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    /// ```
    pub fn from_day_hours(day: NaiveDate, hour: u32, duration_hours: u32) -> TimeInterval {
        let start = day.and_time(NaiveTime::MIN).and_utc() + Duration::hours(i64::from(hour));
        let end = start + Duration::hours(i64::from(duration_hours));
        TimeInterval::new(start, end)
    }

    /// Whether two half-open intervals intersect. Symmetric; a booking
    /// ending at 10:00 does not conflict with one starting at 10:00.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use raumplan::time::TimeInterval;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let nine_to_ten = TimeInterval::from_day_hours(day, 9, 1);
    /// let ten_to_eleven = TimeInterval::from_day_hours(day, 10, 1);
    /// let nine_to_twelve = TimeInterval::from_day_hours(day, 9, 3);
    ///
    /// assert!(!nine_to_ten.overlaps(&ten_to_eleven));
    /// assert!(!ten_to_eleven.overlaps(&nine_to_ten));
    /// assert!(nine_to_twelve.overlaps(&ten_to_eleven));
    /// ```
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

pub trait Conflicts {
    fn conflicts_with(self, candidate: &TimeInterval) -> bool;
}

impl<'a, T> Conflicts for T
where
    T: Iterator<Item = &'a TimeInterval>,
{
    /// Self is the existing bookings for one room. Decides whether the
    /// candidate interval collides with any of them; input order does not
    /// matter.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use raumplan::time::{Conflicts, TimeInterval};
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let booked = vec![
    ///     TimeInterval::from_day_hours(day, 10, 1),
    ///     TimeInterval::from_day_hours(day, 14, 2),
    /// ];
    ///
    /// let candidate = TimeInterval::from_day_hours(day, 8, 2);
    /// assert!(!booked.iter().conflicts_with(&candidate));
    ///
    /// let candidate = TimeInterval::from_day_hours(day, 9, 2);
    /// assert!(booked.iter().conflicts_with(&candidate));
    /// ```
    fn conflicts_with(mut self, candidate: &TimeInterval) -> bool {
        self.any(|existing| existing.overlaps(candidate))
    }
}
