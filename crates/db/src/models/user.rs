//! User entity model.

use issuetrack_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    /// Role name, see `issuetrack_core::permissions`.
    pub role: String,
    pub created_at: Timestamp,
}

impl User {
    /// First and last name joined with a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname).trim().to_string()
    }
}

/// Public projection of a user for embedding in other responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.full_name(),
        }
    }
}
