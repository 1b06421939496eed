//! Activity log entity model and DTOs.
//!
//! Activity rows are immutable once written (no `updated_at`).

use issuetrack_core::activity::{ActionCode, ActivityType};
use issuetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users_activity` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ActivityEntry {
    pub id: DbId,
    /// The acting user.
    pub user_id: DbId,
    pub action_type: ActionCode,
    pub project_id: DbId,
    pub issue_id: DbId,
    /// Set for reassignments: the new assignee.
    pub target_user_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl ActivityEntry {
    /// The decoded action, or `None` for codes this service does not write.
    pub fn kind(&self) -> Option<ActivityType> {
        ActivityType::try_from(self.action_type).ok()
    }
}

/// DTO for appending an activity entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewActivity {
    pub user_id: DbId,
    pub action_type: ActionCode,
    pub project_id: DbId,
    pub issue_id: DbId,
    pub target_user_id: Option<DbId>,
}

impl NewActivity {
    pub fn new(kind: ActivityType, user_id: DbId, project_id: DbId, issue_id: DbId) -> Self {
        Self {
            user_id,
            action_type: kind.code(),
            project_id,
            issue_id,
            target_user_id: None,
        }
    }

    pub fn with_target(mut self, target_user_id: DbId) -> Self {
        self.target_user_id = Some(target_user_id);
        self
    }
}
