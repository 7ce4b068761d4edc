//! User domain entity and related types.

use super::Meeting;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: i32, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A user together with every meeting they attend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub user: User,
    pub meetings: Vec<Meeting>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

impl CreateUser {
    /// Message used both for the pre-write check and a lost insert race
    pub fn duplicate_message(&self) -> String {
        format!("User with email {} already exists", self.email)
    }
}
