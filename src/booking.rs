use crate::time::{Conflicts, TimeInterval};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use itertools::Itertools;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// One confirmed reservation. The code is the only secret needed to cancel
/// it; uniqueness per ledger is upheld where codes are minted.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub room: String,
    pub interval: TimeInterval,
    pub code: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BookingError {
    #[error("Room not found")]
    RoomNotFound,
    #[error("Start time must be before end time")]
    StartNotBeforeEnd,
    #[error("Booking cannot be longer than {max_hours} hours")]
    TooLong { max_hours: u32 },
    #[error("Cannot book a time that has already passed")]
    InPast,
    #[error("Start time must be at the beginning of the hour")]
    OffHour,
    #[error("Bookings must be within the current year ({year})")]
    OutsideCurrentYear { year: i32 },
    #[error("Room is already booked for that time slot")]
    SlotTaken,
    #[error("Invalid cancellation code")]
    InvalidCode,
}

const CODE_LENGTH: usize = 6;
const CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_CHARS[rng.gen_range(0..CODE_CHARS.len())] as char)
        .collect()
}

/// In-memory booking store: a fixed room list plus the bookings taken per
/// room. This is the contract the grid reconciles against, authoritative
/// for its own state but advisory to any client working from a stale
/// snapshot; `now` is always supplied by the caller, never read here.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RoomLedger {
    rooms: Vec<String>,
    max_duration_hours: u32,
    bookings: HashMap<String, Vec<Booking>>,
}

impl Default for RoomLedger {
    fn default() -> RoomLedger {
        RoomLedger::new(
            vec![
                "Room A".to_string(),
                "Room B".to_string(),
                "Room C".to_string(),
            ],
            3,
        )
    }
}

impl RoomLedger {
    pub fn new(rooms: Vec<String>, max_duration_hours: u32) -> RoomLedger {
        RoomLedger {
            rooms,
            max_duration_hours,
            bookings: HashMap::new(),
        }
    }

    /// The rooms available for reservation.
    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    /// Read-only snapshot of one room's bookings, valid for one render pass.
    pub fn bookings_for(&self, room: &str) -> &[Booking] {
        self.bookings.get(room).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The booked intervals of one room that touch the week starting at
    /// `week_start`, sorted by start. This is the `existing` input the grid
    /// components take.
    pub fn week_intervals(&self, room: &str, week_start: NaiveDate) -> Vec<TimeInterval> {
        let window = TimeInterval::from_day_hours(week_start, 0, 24 * 7);

        self.bookings_for(room)
            .iter()
            .map(|booking| booking.interval)
            .filter(|interval| interval.overlaps(&window))
            .sorted_unstable_by_key(|interval| interval.start)
            .collect_vec()
    }

    /// Take a reservation. Validation runs in a fixed order and mirrors
    /// what selectable cells already enforce on the grid, plus the rules
    /// the grid cannot see: the room must exist, the range must be
    /// non-empty, at most `max_duration_hours` long, not in the past,
    /// start on the hour, and lie within the current year; and it must not
    /// collide with a booking already taken.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use raumplan::booking::{BookingError, RoomLedger};
    ///
    /// let mut ledger = RoomLedger::default();
    /// let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
    /// let start = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
    /// let end = Utc.with_ymd_and_hms(2024, 6, 3, 11, 0, 0).unwrap();
    ///
    /// let booking = ledger.book("Room A", start, end, now).unwrap();
    /// assert_eq!(booking.code.len(), 6);
    ///
    /// // the slot is now taken
    /// assert_eq!(
    ///     ledger.book("Room A", start, end, now),
    ///     Err(BookingError::SlotTaken)
    /// );
    /// ```
    pub fn book(
        &mut self,
        room: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        if !self.rooms.iter().any(|r| r == room) {
            return Err(BookingError::RoomNotFound);
        }

        if start >= end {
            return Err(BookingError::StartNotBeforeEnd);
        }

        if end - start > Duration::hours(i64::from(self.max_duration_hours)) {
            return Err(BookingError::TooLong {
                max_hours: self.max_duration_hours,
            });
        }

        if start < now {
            return Err(BookingError::InPast);
        }

        if start.minute() != 0 || start.second() != 0 || start.nanosecond() != 0 {
            return Err(BookingError::OffHour);
        }

        if start.year() != now.year() || end.year() != now.year() {
            return Err(BookingError::OutsideCurrentYear { year: now.year() });
        }

        let interval = TimeInterval::new(start, end);
        let taken = self.bookings.entry(room.to_string()).or_default();

        if taken.iter().map(|b| &b.interval).conflicts_with(&interval) {
            return Err(BookingError::SlotTaken);
        }

        let mut code = generate_code();
        while taken.iter().any(|b| b.code == code) {
            code = generate_code();
        }

        let booking = Booking {
            room: room.to_string(),
            interval,
            code,
        };
        taken.push(booking.clone());

        info!("booked {} from {} to {}", room, start, end);
        Ok(booking)
    }

    /// Cancel the booking matching `code` in `room`. Anything that does not
    /// match an outstanding booking, room included, reads as an invalid
    /// code; no more detail leaks to the caller.
    pub fn cancel(&mut self, room: &str, code: &str) -> Result<(), BookingError> {
        let taken = self
            .bookings
            .get_mut(room)
            .ok_or(BookingError::InvalidCode)?;

        match taken.iter().position(|b| b.code == code) {
            Some(index) => {
                let booking = taken.remove(index);
                debug!("cancelled {} at {}", booking.room, booking.interval.start);
                Ok(())
            }
            None => Err(BookingError::InvalidCode),
        }
    }
}
