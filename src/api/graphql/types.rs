//! GraphQL output types and the mapping from domain aggregates.
//!
//! Cross-references are embedded one level deep only: a user's meetings
//! carry no attendees and a meeting's attendees carry no meetings.

use async_graphql::SimpleObject;

use crate::domain;

#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub meetings: Vec<Meeting>,
}

#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    pub id: i32,
    pub title: String,
    /// `HH:MM`, or empty when the meeting has no time
    pub time: String,
    pub content: String,
    pub attendees: Vec<User>,
}

impl User {
    /// User embedded in another object; its meetings are truncated
    fn embedded(user: domain::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            meetings: Vec::new(),
        }
    }
}

impl Meeting {
    /// Meeting embedded in another object; its attendees are truncated
    fn embedded(meeting: domain::Meeting) -> Self {
        Self {
            id: meeting.id,
            time: meeting.time_label(),
            title: meeting.title,
            content: meeting.content,
            attendees: Vec::new(),
        }
    }
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        User::embedded(user)
    }
}

impl From<domain::UserDetails> for User {
    fn from(details: domain::UserDetails) -> Self {
        Self {
            meetings: details.meetings.into_iter().map(Meeting::embedded).collect(),
            ..User::embedded(details.user)
        }
    }
}

impl From<domain::Meeting> for Meeting {
    fn from(meeting: domain::Meeting) -> Self {
        Meeting::embedded(meeting)
    }
}

impl From<domain::MeetingDetails> for Meeting {
    fn from(details: domain::MeetingDetails) -> Self {
        Self {
            attendees: details.attendees.into_iter().map(User::embedded).collect(),
            ..Meeting::embedded(details.meeting)
        }
    }
}
