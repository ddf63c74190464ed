use crate::selection::Selection;
use crate::time::{Conflicts, TimeInterval};
use chrono::{DateTime, NaiveDate, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Bounds of the visible hour grid plus the booking-length cap.
/// `hours_end` is exclusive as a *start* hour: the last clickable anchor is
/// `hours_end - 1`, and no selection may run past `hours_end`.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub hours_start: u32,
    pub hours_end: u32,
    pub max_duration: u32,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig::new(8, 20, 3)
    }
}

impl GridConfig {
    /// A malformed configuration is a host-application bug, not a runtime
    /// condition, so the invariants are only debug-asserted.
    pub fn new(hours_start: u32, hours_end: u32, max_duration: u32) -> GridConfig {
        debug_assert!(hours_start < hours_end);
        debug_assert!(max_duration >= 1 && max_duration <= hours_end - hours_start);
        GridConfig {
            hours_start,
            hours_end,
            max_duration,
        }
    }

    /// Valid anchor hours, in render order.
    pub fn hours(&self) -> std::ops::Range<u32> {
        self.hours_start..self.hours_end
    }
}

/// One clickable hour-slot on one calendar day. Derived per render pass,
/// never stored.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub day: NaiveDate,
    pub hour: u32,
}

impl GridCell {
    pub fn new(day: NaiveDate, hour: u32) -> GridCell {
        GridCell { day, hour }
    }

    /// The cell's own one-hour sub-interval `[hour, hour + 1)`.
    pub fn slot(&self) -> TimeInterval {
        TimeInterval::from_day_hours(self.day, self.hour, 1)
    }
}

/// Whether a booking of `duration_hours` could begin at this cell: it must
/// end by `hours_end`, must not start before `now`, and must not collide
/// with an existing booking. The `duration_hours = 1` variant is what makes
/// a cell a valid anchor, independent of any currently selected range.
/// Hours below `hours_start` are never rendered, so only the end bound is
/// checked here.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use raumplan::grid::{can_start_here, GridCell, GridConfig};
///
/// let config = GridConfig::default();
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap();
///
/// // 9:00 has already elapsed, 10:00 has not
/// assert!(!can_start_here(GridCell::new(day, 9), 1, &[], now, &config));
/// assert!(can_start_here(GridCell::new(day, 10), 1, &[], now, &config));
///
/// // a 3-hour booking cannot start on the last visible hour
/// assert!(!can_start_here(GridCell::new(day, 19), 3, &[], now, &config));
/// ```
pub fn can_start_here(
    cell: GridCell,
    duration_hours: u32,
    existing: &[TimeInterval],
    now: DateTime<Utc>,
    config: &GridConfig,
) -> bool {
    if cell.hour + duration_hours > config.hours_end {
        return false;
    }

    let candidate = TimeInterval::from_day_hours(cell.day, cell.hour, duration_hours);

    candidate.start >= now && !existing.iter().conflicts_with(&candidate)
}

/// The three mutually exclusive visual states of a cell.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellState {
    Unselectable,
    Selectable,
    Selected,
}

/// Render state for a single cell. A cell is selected iff its own `[hour,
/// hour + 1)` slot intersects the anchored range; selected wins over
/// selectable (a selected cell is by construction selectable).
pub fn cell_state(
    cell: GridCell,
    selection: Selection,
    existing: &[TimeInterval],
    now: DateTime<Utc>,
    config: &GridConfig,
) -> CellState {
    if let Some(chosen) = selection.interval() {
        if cell.slot().overlaps(&chosen) {
            return CellState::Selected;
        }
    }

    if can_start_here(cell, 1, existing, now, config) {
        CellState::Selectable
    } else {
        CellState::Unselectable
    }
}

/// Render states for every cell of the visible week, hours within days.
/// One snapshot per render pass; `now` must be re-supplied each time so
/// slots the clock has passed stop being selectable.
pub fn week_states(
    days: &[NaiveDate],
    selection: Selection,
    existing: &[TimeInterval],
    now: DateTime<Utc>,
    config: &GridConfig,
) -> Vec<(GridCell, CellState)> {
    days.iter()
        .cartesian_product(config.hours())
        .map(|(&day, hour)| {
            let cell = GridCell::new(day, hour);
            (cell, cell_state(cell, selection, existing, now, config))
        })
        .collect_vec()
}
