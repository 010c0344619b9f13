//! Booking domain: stay ranges, conflict resolution, booking entity

mod conflicts;
mod date_range;
mod model;
mod repository;

pub use conflicts::{check_no_conflict, conflicting_stays, ConflictingStay};
pub use date_range::{StayRange, DEFAULT_MAX_STAY_DAYS};
pub use model::{Booking, BookingStatus};
pub use repository::BookingRepository;
