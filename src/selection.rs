use crate::grid::{can_start_here, GridCell, GridConfig};
use crate::time::{Conflicts, TimeInterval};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// The current selection on the grid: nothing, or a contiguous run of hours
/// on a single day. While anchored, `1 <= duration <= max_duration` and the
/// derived interval fits the grid and collides with no booking; only
/// [`Selection::click`] upholds this, so hosts must clear the selection when
/// the room or week changes.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Selection {
    Empty,
    Anchored {
        day: NaiveDate,
        hour: u32,
        duration: u32,
    },
}

/// The hours around an anchor within which a further click resizes the
/// selection instead of restarting it. Forward it reaches the last hour a
/// capped range could cover; backward it admits a click only while the far
/// (later) edge of the resized range would still fit the cap.
///
/// # Examples
/// ```
/// use raumplan::selection::elastic_window;
///
/// assert_eq!(elastic_window(10, 1, 3), 8..=12);
/// assert_eq!(elastic_window(8, 3, 3), 8..=10);
/// ```
pub fn elastic_window(anchor: u32, duration: u32, max_duration: u32) -> RangeInclusive<u32> {
    let backward_slack = max_duration.saturating_sub(duration);
    anchor.saturating_sub(backward_slack)..=anchor + max_duration - 1
}

/// Resize an anchored run so it reaches the clicked hour, clamping to
/// `max_duration`. A click at or after the anchor grows forward and keeps
/// the start fixed; a click before it grows backward and keeps the far
/// (later) edge fixed, sliding the start when the cap bites. The result
/// duration is always in `[1, max_duration]`.
///
/// # Examples
/// ```
/// use raumplan::selection::resize_window;
///
/// assert_eq!(resize_window(10, 10, 3), (10, 1));
/// assert_eq!(resize_window(10, 12, 3), (10, 3));
/// assert_eq!(resize_window(10, 8, 3), (8, 3));
///
/// // past the cap: forward keeps the start, backward keeps the far edge
/// assert_eq!(resize_window(10, 14, 3), (10, 3));
/// assert_eq!(resize_window(10, 6, 3), (8, 3));
/// ```
pub fn resize_window(anchor: u32, clicked: u32, max_duration: u32) -> (u32, u32) {
    if clicked >= anchor {
        let duration = (clicked - anchor + 1).min(max_duration);
        (anchor, duration)
    } else {
        // far edge is the anchor hour itself
        let duration = (anchor - clicked + 1).min(max_duration);
        (anchor + 1 - duration, duration)
    }
}

impl Selection {
    /// The interval currently chosen, if any.
    pub fn interval(&self) -> Option<TimeInterval> {
        match *self {
            Selection::Empty => None,
            Selection::Anchored {
                day,
                hour,
                duration,
            } => Some(TimeInterval::from_day_hours(day, hour, duration)),
        }
    }

    fn anchored(cell: GridCell) -> Selection {
        Selection::Anchored {
            day: cell.day,
            hour: cell.hour,
            duration: 1,
        }
    }

    /// The pure `(State, Event) -> State` reducer behind every grid click.
    /// Guards are evaluated in strict priority order:
    ///
    /// 1. a cell that is no valid 1-hour anchor (past, out of range, or
    ///    booked) leaves the state unchanged;
    /// 2. from `Empty`, anchor a fresh single hour;
    /// 3. a click on another day restarts there (ranges never span days);
    /// 4. a click outside the elastic window restarts at the clicked hour;
    /// 5. a click inside it resizes; if the resized range would cross an
    ///    existing booking the click is a silent no-op, because no shorter
    ///    range preserves the edge the user asked for.
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use raumplan::grid::{GridCell, GridConfig};
    /// use raumplan::selection::Selection;
    ///
    /// let config = GridConfig::default();
    /// let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    ///
    /// let sel = Selection::Empty.click(GridCell::new(monday, 9), &[], now, &config);
    /// assert_eq!(sel, Selection::Anchored { day: monday, hour: 9, duration: 1 });
    ///
    /// // extend forward to cover 9..12
    /// let sel = sel.click(GridCell::new(monday, 11), &[], now, &config);
    /// assert_eq!(sel, Selection::Anchored { day: monday, hour: 9, duration: 3 });
    ///
    /// // one past the window restarts
    /// let sel = sel.click(GridCell::new(monday, 12), &[], now, &config);
    /// assert_eq!(sel, Selection::Anchored { day: monday, hour: 12, duration: 1 });
    /// ```
    pub fn click(
        self,
        cell: GridCell,
        existing: &[TimeInterval],
        now: DateTime<Utc>,
        config: &GridConfig,
    ) -> Selection {
        if !can_start_here(cell, 1, existing, now, config) {
            trace!("click on unselectable cell {:?} ignored", cell);
            return self;
        }

        let (day, anchor, duration) = match self {
            Selection::Empty => {
                debug!("anchored {} at {}:00", cell.day, cell.hour);
                return Selection::anchored(cell);
            }
            Selection::Anchored {
                day,
                hour,
                duration,
            } => (day, hour, duration),
        };

        if cell.day != day || !elastic_window(anchor, duration, config.max_duration).contains(&cell.hour) {
            debug!("restarted anchor at {} {}:00", cell.day, cell.hour);
            return Selection::anchored(cell);
        }

        let (hour, duration) = resize_window(anchor, cell.hour, config.max_duration);
        let candidate = TimeInterval::from_day_hours(day, hour, duration);

        if existing.iter().conflicts_with(&candidate) {
            trace!("resize to {}:00 +{}h crosses a booking, ignored", hour, duration);
            return self;
        }

        debug!("resized to {}:00 +{}h", hour, duration);
        Selection::Anchored {
            day,
            hour,
            duration,
        }
    }
}
