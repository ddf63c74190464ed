//! Meeting-room booking on a weekly hour grid.
//!
//! The grid engine is pure: callers pass in the bookings snapshot for the
//! chosen room and week, the current instant, and the selection so far, and
//! get back the next selection or the per-cell render states. The
//! [`booking::RoomLedger`] holds the authoritative bookings the snapshots
//! come from; a client working from a stale snapshot must be prepared for
//! its submission to be rejected there.

pub mod booking;
pub mod grid;
pub mod selection;
pub mod time;
