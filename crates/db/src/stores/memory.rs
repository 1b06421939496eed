//! In-memory store used by tests and local tooling.
//!
//! All data lives behind one `tokio::sync::Mutex`; every operation takes the
//! lock for its whole duration, so each call is atomic on its own.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use issuetrack_core::issue::{IssueCounts, IssueStatus};
use issuetrack_core::types::{DbId, StatusId};
use tokio::sync::Mutex;

use super::{ActivityLog, AttachmentStore, IssueStore, ProjectStore, UserStore};
use crate::models::activity::{ActivityEntry, NewActivity};
use crate::models::attachment::Attachment;
use crate::models::comment::Comment;
use crate::models::issue::{Issue, NewIssue};
use crate::models::project::Project;
use crate::models::user::User;

#[derive(Default)]
struct Inner {
    next_id: DbId,
    projects: BTreeMap<DbId, Project>,
    users: BTreeMap<DbId, User>,
    issues: BTreeMap<DbId, Issue>,
    comments: Vec<Comment>,
    attachments: Vec<Attachment>,
    activity: Vec<ActivityEntry>,
    fail_attachment_claims: bool,
}

impl Inner {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared-state store; clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a project.
    pub async fn insert_project(&self, name: &str, status: StatusId) -> Project {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();
        let project = Project {
            id: inner.next_id(),
            name: name.to_string(),
            status,
            created_at: now,
            updated_at: now,
        };
        inner.projects.insert(project.id, project.clone());
        project
    }

    /// Seed a user.
    pub async fn insert_user(&self, firstname: &str, lastname: &str, role: &str) -> User {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id();
        let user = User {
            id,
            email: format!("user{id}@example.com"),
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
        };
        inner.users.insert(user.id, user.clone());
        user
    }

    /// Seed an unclaimed attachment, as if uploaded before its issue existed.
    pub async fn insert_attachment(
        &self,
        upload_token: &str,
        uploaded_by: DbId,
        filename: &str,
    ) -> Attachment {
        let mut inner = self.inner.lock().await;
        let attachment = Attachment {
            id: inner.next_id(),
            issue_id: None,
            comment_id: 0,
            uploaded_by,
            filename: filename.to_string(),
            fileextension: filename
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_string())
                .unwrap_or_default(),
            filesize: 0,
            upload_token: upload_token.to_string(),
            created_at: Utc::now(),
        };
        inner.attachments.push(attachment.clone());
        attachment
    }

    /// Seed a comment on an existing issue.
    pub async fn insert_comment(&self, issue: &Issue, created_by: DbId, text: &str) -> Comment {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();
        let comment = Comment {
            id: inner.next_id(),
            project_id: issue.project_id,
            issue_id: issue.id,
            created_by,
            comment: text.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.comments.push(comment.clone());
        comment
    }

    /// Make every subsequent attachment claim fail with a database error.
    pub async fn fail_attachment_claims(&self, fail: bool) {
        self.inner.lock().await.fail_attachment_claims = fail;
    }

    /// Snapshot of every activity entry in insertion order.
    pub async fn activity_entries(&self) -> Vec<ActivityEntry> {
        self.inner.lock().await.activity.clone()
    }

    pub async fn issue_count(&self) -> usize {
        self.inner.lock().await.issues.len()
    }

    /// Snapshot of every attachment, claimed or not.
    pub async fn attachments(&self) -> Vec<Attachment> {
        self.inner.lock().await.attachments.clone()
    }
}

#[async_trait]
impl IssueStore for MemoryStore {
    async fn find(&self, id: DbId) -> Result<Option<Issue>, sqlx::Error> {
        Ok(self.inner.lock().await.issues.get(&id).cloned())
    }

    async fn create(&self, input: &NewIssue) -> Result<Issue, sqlx::Error> {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();
        let issue = Issue {
            id: inner.next_id(),
            project_id: input.project_id,
            title: input.title.clone(),
            body: input.body.clone(),
            status: IssueStatus::Open.id(),
            created_by: input.created_by,
            assigned_to: input.assigned_to,
            updated_by: None,
            closed_by: None,
            created_at: now,
            updated_at: now,
            closed_at: None,
        };
        inner.issues.insert(issue.id, issue.clone());
        Ok(issue)
    }

    async fn save(&self, issue: &Issue) -> Result<Issue, sqlx::Error> {
        let mut inner = self.inner.lock().await;
        let stored = inner
            .issues
            .get_mut(&issue.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        *stored = Issue {
            updated_at: Utc::now(),
            ..issue.clone()
        };
        Ok(stored.clone())
    }

    async fn list_for_project(
        &self,
        project_id: DbId,
        status: Option<StatusId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Issue>, sqlx::Error> {
        let inner = self.inner.lock().await;
        Ok(inner
            .issues
            .values()
            .rev()
            .filter(|i| i.project_id == project_id)
            .filter(|i| status.map_or(true, |s| i.status == s))
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn list_comments(&self, issue_id: DbId) -> Result<Vec<Comment>, sqlx::Error> {
        let inner = self.inner.lock().await;
        let mut comments: Vec<Comment> = inner
            .comments
            .iter()
            .filter(|c| c.issue_id == issue_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.id));
        Ok(comments)
    }

    async fn count_open_and_closed(&self) -> Result<IssueCounts, sqlx::Error> {
        let inner = self.inner.lock().await;
        Ok(IssueCounts::tally(inner.issues.values().filter_map(|issue| {
            inner
                .projects
                .get(&issue.project_id)
                .map(|project| (project.status, issue.status))
        })))
    }
}

#[async_trait]
impl ActivityLog for MemoryStore {
    async fn add(&self, entry: &NewActivity) -> Result<ActivityEntry, sqlx::Error> {
        let mut inner = self.inner.lock().await;
        let stored = ActivityEntry {
            id: inner.next_id(),
            user_id: entry.user_id,
            action_type: entry.action_type,
            project_id: entry.project_id,
            issue_id: entry.issue_id,
            target_user_id: entry.target_user_id,
            created_at: Utc::now(),
        };
        inner.activity.push(stored.clone());
        Ok(stored)
    }

    async fn find(&self, id: DbId) -> Result<Option<ActivityEntry>, sqlx::Error> {
        let inner = self.inner.lock().await;
        Ok(inner.activity.iter().find(|a| a.id == id).cloned())
    }

    async fn list_for_issue(&self, issue_id: DbId) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        let inner = self.inner.lock().await;
        Ok(inner
            .activity
            .iter()
            .filter(|a| a.issue_id == issue_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AttachmentStore for MemoryStore {
    async fn claim_for_issue(
        &self,
        issue_id: DbId,
        upload_token: &str,
        uploaded_by: DbId,
    ) -> Result<u64, sqlx::Error> {
        let mut inner = self.inner.lock().await;
        if inner.fail_attachment_claims {
            return Err(sqlx::Error::Protocol(
                "attachment claim failure injected".to_string(),
            ));
        }
        let mut claimed = 0;
        for attachment in inner
            .attachments
            .iter_mut()
            .filter(|a| a.upload_token == upload_token && a.uploaded_by == uploaded_by)
        {
            attachment.issue_id = Some(issue_id);
            claimed += 1;
        }
        Ok(claimed)
    }

    async fn list_for_issue(&self, issue_id: DbId) -> Result<Vec<Attachment>, sqlx::Error> {
        let inner = self.inner.lock().await;
        Ok(inner
            .attachments
            .iter()
            .filter(|a| a.issue_id == Some(issue_id) && a.comment_id == 0)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn find(&self, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        Ok(self.inner.lock().await.projects.get(&id).cloned())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        Ok(self.inner.lock().await.users.get(&id).cloned())
    }
}
