//! [`PgStore`]: the store traits over the PostgreSQL repositories.

use async_trait::async_trait;
use issuetrack_core::issue::IssueCounts;
use issuetrack_core::types::{DbId, StatusId};

use super::{ActivityLog, AttachmentStore, IssueStore, ProjectStore, UserStore};
use crate::models::activity::{ActivityEntry, NewActivity};
use crate::models::attachment::Attachment;
use crate::models::comment::Comment;
use crate::models::issue::{Issue, NewIssue};
use crate::models::project::Project;
use crate::models::user::User;
use crate::repositories::{
    ActivityRepo, AttachmentRepo, CommentRepo, IssueRepo, ProjectRepo, UserRepo,
};
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IssueStore for PgStore {
    async fn find(&self, id: DbId) -> Result<Option<Issue>, sqlx::Error> {
        IssueRepo::find_by_id(&self.pool, id).await
    }

    async fn create(&self, input: &NewIssue) -> Result<Issue, sqlx::Error> {
        IssueRepo::create(&self.pool, input).await
    }

    async fn save(&self, issue: &Issue) -> Result<Issue, sqlx::Error> {
        IssueRepo::update(&self.pool, issue)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn list_for_project(
        &self,
        project_id: DbId,
        status: Option<StatusId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Issue>, sqlx::Error> {
        IssueRepo::list_for_project(&self.pool, project_id, status, limit, offset).await
    }

    async fn list_comments(&self, issue_id: DbId) -> Result<Vec<Comment>, sqlx::Error> {
        CommentRepo::list_for_issue(&self.pool, issue_id).await
    }

    async fn count_open_and_closed(&self) -> Result<IssueCounts, sqlx::Error> {
        IssueRepo::count_open_and_closed(&self.pool).await
    }
}

#[async_trait]
impl ActivityLog for PgStore {
    async fn add(&self, entry: &NewActivity) -> Result<ActivityEntry, sqlx::Error> {
        ActivityRepo::insert(&self.pool, entry).await
    }

    async fn find(&self, id: DbId) -> Result<Option<ActivityEntry>, sqlx::Error> {
        ActivityRepo::find_by_id(&self.pool, id).await
    }

    async fn list_for_issue(&self, issue_id: DbId) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        ActivityRepo::list_for_issue(&self.pool, issue_id).await
    }
}

#[async_trait]
impl AttachmentStore for PgStore {
    async fn claim_for_issue(
        &self,
        issue_id: DbId,
        upload_token: &str,
        uploaded_by: DbId,
    ) -> Result<u64, sqlx::Error> {
        AttachmentRepo::claim_for_issue(&self.pool, issue_id, upload_token, uploaded_by).await
    }

    async fn list_for_issue(&self, issue_id: DbId) -> Result<Vec<Attachment>, sqlx::Error> {
        AttachmentRepo::list_for_issue(&self.pool, issue_id).await
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn find(&self, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        ProjectRepo::find_by_id(&self.pool, id).await
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_id(&self.pool, id).await
    }
}
