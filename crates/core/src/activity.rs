//! Activity log action codes.
//!
//! Codes are persisted in `users_activity.action_type` and must never be
//! renumbered. Code 2 is reserved for comment activity, which is not recorded
//! by the issue lifecycle.

use serde::Serialize;

use crate::error::CoreError;

/// Action code type matching SMALLINT in the database.
pub type ActionCode = i16;

/// A recorded issue lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Created,
    Closed,
    Reopened,
    Reassigned,
}

impl ActivityType {
    pub const fn code(self) -> ActionCode {
        match self {
            ActivityType::Created => 1,
            ActivityType::Closed => 3,
            ActivityType::Reopened => 4,
            ActivityType::Reassigned => 5,
        }
    }

    /// Short label shown next to feed entries.
    pub const fn label(self) -> &'static str {
        match self {
            ActivityType::Created => "Created",
            ActivityType::Closed => "Closed",
            ActivityType::Reopened => "Reopened",
            ActivityType::Reassigned => "Reassigned",
        }
    }
}

impl TryFrom<ActionCode> for ActivityType {
    type Error = CoreError;

    fn try_from(code: ActionCode) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ActivityType::Created),
            3 => Ok(ActivityType::Closed),
            4 => Ok(ActivityType::Reopened),
            5 => Ok(ActivityType::Reassigned),
            other => Err(CoreError::Validation(format!(
                "Unknown activity action code {other}"
            ))),
        }
    }
}

impl From<ActivityType> for ActionCode {
    fn from(value: ActivityType) -> Self {
        value.code()
    }
}
