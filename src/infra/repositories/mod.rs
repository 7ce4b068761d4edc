//! Repository layer - Data access abstraction
//!
//! Repositories borrow the transaction of the unit of work they were
//! obtained from, so every call made through one context commits or
//! rolls back together.

mod attendance_repository;
pub(crate) mod entities;
mod meeting_repository;
mod user_repository;

pub use attendance_repository::TxAttendanceRepository;
pub use meeting_repository::{NewMeeting, TxMeetingRepository};
pub use user_repository::TxUserRepository;

pub(crate) use attendance_repository::{ALREADY_ATTENDING, NOT_ATTENDING};
