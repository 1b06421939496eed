//! Store traits the service layer depends on, with PostgreSQL and in-memory
//! implementations.
//!
//! Handlers and services hold stores as `Arc<dyn Trait>` so the same code runs
//! against [`PgStore`] in production and [`MemoryStore`] in tests.

use std::sync::Arc;

use async_trait::async_trait;
use issuetrack_core::issue::IssueCounts;
use issuetrack_core::types::{DbId, StatusId};

use crate::models::activity::{ActivityEntry, NewActivity};
use crate::models::attachment::Attachment;
use crate::models::comment::Comment;
use crate::models::issue::{Issue, NewIssue};
use crate::models::project::Project;
use crate::models::user::User;
use crate::DbPool;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence and retrieval of issues.
#[async_trait]
pub trait IssueStore: Send + Sync {
    async fn find(&self, id: DbId) -> Result<Option<Issue>, sqlx::Error>;

    /// Insert a new open issue and return it with its generated id.
    async fn create(&self, input: &NewIssue) -> Result<Issue, sqlx::Error>;

    /// Persist every mutable field of an existing issue.
    ///
    /// Fails with [`sqlx::Error::RowNotFound`] if the issue does not exist.
    async fn save(&self, issue: &Issue) -> Result<Issue, sqlx::Error>;

    /// A page of a project's issues, newest first.
    async fn list_for_project(
        &self,
        project_id: DbId,
        status: Option<StatusId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Issue>, sqlx::Error>;

    /// Comments on an issue, oldest first.
    async fn list_comments(&self, issue_id: DbId) -> Result<Vec<Comment>, sqlx::Error>;

    /// Global open/closed totals; see [`IssueCounts::record`] for the rule.
    async fn count_open_and_closed(&self) -> Result<IssueCounts, sqlx::Error>;
}

/// Append-only log of user actions.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn add(&self, entry: &NewActivity) -> Result<ActivityEntry, sqlx::Error>;

    async fn find(&self, id: DbId) -> Result<Option<ActivityEntry>, sqlx::Error>;

    async fn list_for_issue(&self, issue_id: DbId) -> Result<Vec<ActivityEntry>, sqlx::Error>;
}

/// Files uploaded against issues.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Claim attachments uploaded before the issue existed. Returns the
    /// number of attachments linked.
    async fn claim_for_issue(
        &self,
        issue_id: DbId,
        upload_token: &str,
        uploaded_by: DbId,
    ) -> Result<u64, sqlx::Error>;

    async fn list_for_issue(&self, issue_id: DbId) -> Result<Vec<Attachment>, sqlx::Error>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn find(&self, id: DbId) -> Result<Option<Project>, sqlx::Error>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find(&self, id: DbId) -> Result<Option<User>, sqlx::Error>;
}

/// The full set of stores, cheaply cloneable.
#[derive(Clone)]
pub struct Stores {
    pub issues: Arc<dyn IssueStore>,
    pub activity: Arc<dyn ActivityLog>,
    pub attachments: Arc<dyn AttachmentStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub users: Arc<dyn UserStore>,
    /// Present when backed by PostgreSQL; used for health checks.
    pub pool: Option<DbPool>,
}

impl Stores {
    pub fn postgres(pool: DbPool) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            issues: store.clone(),
            activity: store.clone(),
            attachments: store.clone(),
            projects: store.clone(),
            users: store,
            pool: Some(pool),
        }
    }

    pub fn in_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            issues: store.clone(),
            activity: store.clone(),
            attachments: store.clone(),
            projects: store.clone(),
            users: store,
            pool: None,
        }
    }
}
