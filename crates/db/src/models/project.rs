//! Project entity model.

use issuetrack_core::issue::ProjectStatus;
use issuetrack_core::types::{DbId, StatusId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    /// 0 = closed, 1 = open.
    pub status: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    pub fn is_open(&self) -> bool {
        self.status == ProjectStatus::Open.id()
    }
}
