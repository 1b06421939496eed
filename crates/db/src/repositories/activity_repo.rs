//! Repository for the append-only `users_activity` table.

use issuetrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{ActivityEntry, NewActivity};

/// Column list for `users_activity` SELECT queries.
const COLUMNS: &str =
    "id, user_id, action_type, project_id, issue_id, target_user_id, created_at";

/// Provides insert and query operations for activity entries.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append an activity entry, returning the stored row.
    pub async fn insert(pool: &PgPool, input: &NewActivity) -> Result<ActivityEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO users_activity (user_id, action_type, project_id, issue_id, target_user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(input.user_id)
            .bind(input.action_type)
            .bind(input.project_id)
            .bind(input.issue_id)
            .bind(input.target_user_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ActivityEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users_activity WHERE id = $1");
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All entries for an issue in the order they were recorded.
    pub async fn list_for_issue(
        pool: &PgPool,
        issue_id: DbId,
    ) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users_activity WHERE issue_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(issue_id)
            .fetch_all(pool)
            .await
    }
}
