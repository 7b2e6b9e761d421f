//! Bridge tests
//!
//! Content preservation across the load and save directions, and the
//! editing session driving both.

mod round_trip;
mod session;
