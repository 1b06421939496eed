//! Repository for the `projects_issues` table.

use issuetrack_core::issue::IssueCounts;
use issuetrack_core::types::{DbId, StatusId};
use sqlx::PgPool;

use crate::models::issue::{Issue, NewIssue};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, body, status, created_by, assigned_to, \
                       updated_by, closed_by, created_at, updated_at, closed_at";

/// Provides CRUD and aggregate operations for issues.
pub struct IssueRepo;

impl IssueRepo {
    /// Insert a new open issue, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewIssue) -> Result<Issue, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects_issues (project_id, title, body, created_by, assigned_to)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.created_by)
            .bind(input.assigned_to)
            .fetch_one(pool)
            .await
    }

    /// Find an issue by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Issue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects_issues WHERE id = $1");
        sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Write every mutable column of `issue` back and bump `updated_at`.
    ///
    /// Returns `None` if no row with `issue.id` exists.
    pub async fn update(pool: &PgPool, issue: &Issue) -> Result<Option<Issue>, sqlx::Error> {
        let query = format!(
            "UPDATE projects_issues SET
                title = $2,
                body = $3,
                status = $4,
                assigned_to = $5,
                updated_by = $6,
                closed_by = $7,
                closed_at = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(issue.id)
            .bind(&issue.title)
            .bind(&issue.body)
            .bind(issue.status)
            .bind(issue.assigned_to)
            .bind(issue.updated_by)
            .bind(issue.closed_by)
            .bind(issue.closed_at)
            .fetch_optional(pool)
            .await
    }

    /// List a page of a project's issues, newest first, optionally filtered
    /// by status.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        status: Option<StatusId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Issue>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects_issues
             WHERE project_id = $1 AND ($2::SMALLINT IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(project_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count open and closed issues across all projects.
    ///
    /// An issue in a closed project counts as closed whatever its own status.
    pub async fn count_open_and_closed(pool: &PgPool) -> Result<IssueCounts, sqlx::Error> {
        let (open, closed): (i64, i64) = sqlx::query_as(
            "SELECT
                COUNT(*) FILTER (WHERE p.status = 1 AND i.status = 1),
                COUNT(*) FILTER (WHERE (p.status = 1 AND i.status = 0) OR p.status = 0)
             FROM projects_issues i
             JOIN projects p ON p.id = i.project_id",
        )
        .fetch_one(pool)
        .await?;
        Ok(IssueCounts { open, closed })
    }
}
