//! Meeting domain entity, attendance aggregate and time-of-day handling.

use chrono::NaiveTime;
use super::User;
use crate::config::MEETING_TIME_FORMAT;
use crate::errors::{AppError, AppResult};

/// Meeting domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    pub id: i32,
    pub title: String,
    pub time: Option<NaiveTime>,
    pub content: String,
}

impl Meeting {
    /// Time of day as `HH:MM`, or an empty string when unscheduled
    pub fn time_label(&self) -> String {
        format_meeting_time(self.time)
    }
}

/// A meeting together with everyone attending it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingDetails {
    pub meeting: Meeting,
    pub attendees: Vec<User>,
}

/// Input for creating a new meeting
#[derive(Debug, Clone)]
pub struct CreateMeeting {
    pub title: String,
    /// Raw `HH:MM` text; empty or missing means no time
    pub time: Option<String>,
    pub content: String,
}

impl CreateMeeting {
    pub fn duplicate_message(&self) -> String {
        format!("Meeting with title '{}' already exists", self.title)
    }
}

/// Parse a meeting time given as `HH:MM`.
///
/// Empty input yields `None` without attempting a parse.
pub fn parse_meeting_time(raw: &str) -> AppResult<Option<NaiveTime>> {
    if raw.is_empty() {
        return Ok(None);
    }

    NaiveTime::parse_from_str(raw, MEETING_TIME_FORMAT)
        .map(Some)
        .map_err(|_| AppError::invalid_argument(format!("Invalid time '{}': expected HH:MM", raw)))
}

/// Render a meeting time as `HH:MM`; absent time renders as `""`.
pub fn format_meeting_time(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format(MEETING_TIME_FORMAT).to_string())
        .unwrap_or_default()
}
