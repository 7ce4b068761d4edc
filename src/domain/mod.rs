//! Domain layer - Core business entities and logic
//!
//! Users, meetings and the aggregates that pair an entity with the
//! other side of the attendance relationship.

pub mod meeting;
pub mod user;

pub use meeting::{
    format_meeting_time, parse_meeting_time, CreateMeeting, Meeting, MeetingDetails,
};
pub use user::{CreateUser, User, UserDetails};
