//! Issue lifecycle service.
//!
//! Coordinates validation, persistence, and activity logging for issue
//! creation, reassignment, and status changes. The persist and log steps of
//! each operation are separate writes with no shared transaction.

use std::sync::Arc;

use chrono::Utc;
use issuetrack_core::activity::ActivityType;
use issuetrack_core::error::FieldErrors;
use issuetrack_core::issue::{IssueInput, IssueStatus};
use issuetrack_core::permissions::{Actor, ISSUE_MODIFY};
use issuetrack_core::types::DbId;
use issuetrack_db::models::activity::NewActivity;
use issuetrack_db::models::issue::{Issue, NewIssue};
use issuetrack_db::models::project::Project;
use issuetrack_db::stores::{ActivityLog, AttachmentStore, IssueStore};

use crate::error::AppResult;

/// Result of [`IssueService::create_issue`].
#[derive(Debug, Clone, PartialEq)]
pub enum CreateIssueOutcome {
    Created(Issue),
    /// Input was rejected; nothing was written.
    Invalid(FieldErrors),
}

/// Applies the issue lifecycle rules over the store traits.
///
/// Authorization for `reassign` and `change_status` is enforced by the
/// calling handler (see [`crate::middleware::rbac::CanModifyIssues`]).
pub struct IssueService {
    issues: Arc<dyn IssueStore>,
    activity: Arc<dyn ActivityLog>,
    attachments: Arc<dyn AttachmentStore>,
}

impl IssueService {
    pub fn new(
        issues: Arc<dyn IssueStore>,
        activity: Arc<dyn ActivityLog>,
        attachments: Arc<dyn AttachmentStore>,
    ) -> Self {
        Self {
            issues,
            activity,
            attachments,
        }
    }

    /// Validate and create an issue in `project` on behalf of `actor`.
    ///
    /// `assigned_to` is only honoured when the actor holds `issue-modify`.
    /// Attachments uploaded under `input.token` by the actor are claimed for
    /// the new issue; a failed claim is logged and does not fail creation.
    pub async fn create_issue(
        &self,
        input: &IssueInput,
        project: &Project,
        actor: &Actor,
    ) -> AppResult<CreateIssueOutcome> {
        let valid = match input.check() {
            Ok(valid) => valid,
            Err(errors) => {
                tracing::debug!(project_id = project.id, %errors, "Issue input rejected");
                return Ok(CreateIssueOutcome::Invalid(errors));
            }
        };

        let assigned_to = if actor.can(ISSUE_MODIFY) {
            valid.assigned_to
        } else {
            None
        };

        let issue = self
            .issues
            .create(&NewIssue {
                project_id: project.id,
                title: valid.title,
                body: valid.body,
                created_by: actor.id,
                assigned_to,
            })
            .await?;

        self.activity
            .add(&NewActivity::new(
                ActivityType::Created,
                actor.id,
                project.id,
                issue.id,
            ))
            .await?;

        if let Some(token) = valid.token.as_deref() {
            match self
                .attachments
                .claim_for_issue(issue.id, token, actor.id)
                .await
            {
                Ok(claimed) => {
                    tracing::debug!(issue_id = issue.id, claimed, "Attachments linked to issue");
                }
                Err(err) => {
                    tracing::warn!(
                        issue_id = issue.id,
                        error = %err,
                        "Failed to link uploaded attachments to issue",
                    );
                }
            }
        }

        tracing::info!(
            issue_id = issue.id,
            project_id = project.id,
            user_id = actor.id,
            "Issue created",
        );

        Ok(CreateIssueOutcome::Created(issue))
    }

    /// Assign `issue` to `new_user_id`, then record the reassignment.
    pub async fn reassign(
        &self,
        mut issue: Issue,
        new_user_id: DbId,
        actor: &Actor,
    ) -> AppResult<Issue> {
        issue.assigned_to = Some(new_user_id);
        issue.updated_by = Some(actor.id);
        let saved = self.issues.save(&issue).await?;

        self.activity
            .add(
                &NewActivity::new(
                    ActivityType::Reassigned,
                    actor.id,
                    saved.project_id,
                    saved.id,
                )
                .with_target(new_user_id),
            )
            .await?;

        tracing::info!(
            issue_id = saved.id,
            assigned_to = new_user_id,
            user_id = actor.id,
            "Issue reassigned",
        );

        Ok(saved)
    }

    /// Close or reopen `issue`.
    ///
    /// Closing stamps `closed_by` and `closed_at`. Reopening leaves both as
    /// the record of the last close. The activity entry is appended before
    /// the issue is saved.
    pub async fn change_status(
        &self,
        mut issue: Issue,
        status: IssueStatus,
        actor: &Actor,
    ) -> AppResult<Issue> {
        let kind = match status {
            IssueStatus::Closed => {
                issue.closed_by = Some(actor.id);
                issue.closed_at = Some(Utc::now());
                ActivityType::Closed
            }
            IssueStatus::Open => ActivityType::Reopened,
        };

        self.activity
            .add(&NewActivity::new(kind, actor.id, issue.project_id, issue.id))
            .await?;

        issue.status = status.id();
        issue.updated_by = Some(actor.id);
        let saved = self.issues.save(&issue).await?;

        tracing::info!(
            issue_id = saved.id,
            status = saved.status,
            user_id = actor.id,
            "Issue status changed",
        );

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use issuetrack_core::issue::ProjectStatus;
    use issuetrack_core::permissions::{ROLE_DEVELOPER, ROLE_USER};
    use issuetrack_db::stores::MemoryStore;

    use super::*;

    fn service(store: &MemoryStore) -> IssueService {
        let shared = Arc::new(store.clone());
        IssueService::new(shared.clone(), shared.clone(), shared)
    }

    fn input(title: &str, body: &str) -> IssueInput {
        IssueInput {
            title: Some(title.to_string()),
            body: Some(body.to_string()),
            ..Default::default()
        }
    }

    async fn created(svc: &IssueService, project: &Project, actor: &Actor) -> Issue {
        let outcome = svc
            .create_issue(&input("Bug", "It broke"), project, actor)
            .await
            .unwrap();
        match outcome {
            CreateIssueOutcome::Created(issue) => issue,
            CreateIssueOutcome::Invalid(errors) => panic!("unexpected validation errors: {errors}"),
        }
    }

    #[tokio::test]
    async fn missing_title_writes_nothing() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let actor = Actor::from_role(1, ROLE_DEVELOPER);

        let raw = IssueInput {
            title: None,
            body: Some("body".into()),
            ..Default::default()
        };
        let outcome = svc.create_issue(&raw, &project, &actor).await.unwrap();

        assert_matches!(outcome, CreateIssueOutcome::Invalid(errors) if errors.contains("title"));
        assert_eq!(store.issue_count().await, 0);
        assert!(store.activity_entries().await.is_empty());
    }

    #[tokio::test]
    async fn over_long_title_writes_nothing() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let actor = Actor::from_role(1, ROLE_DEVELOPER);

        let outcome = svc
            .create_issue(&input(&"x".repeat(201), "body"), &project, &actor)
            .await
            .unwrap();

        assert_matches!(outcome, CreateIssueOutcome::Invalid(errors) if errors.contains("title"));
        assert_eq!(store.issue_count().await, 0);
    }

    #[tokio::test]
    async fn assignment_ignored_without_issue_modify() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let actor = Actor::from_role(5, ROLE_USER);

        let mut raw = input("Bug", "body");
        raw.assigned_to = Some(42);
        let outcome = svc.create_issue(&raw, &project, &actor).await.unwrap();

        assert_matches!(outcome, CreateIssueOutcome::Created(issue) => {
            assert_eq!(issue.assigned_to, None);
            assert_eq!(issue.created_by, 5);
        });
    }

    #[tokio::test]
    async fn assignment_honoured_with_issue_modify() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let actor = Actor::from_role(5, ROLE_DEVELOPER);

        let mut raw = input("Bug", "body");
        raw.assigned_to = Some(42);
        let outcome = svc.create_issue(&raw, &project, &actor).await.unwrap();

        assert_matches!(outcome, CreateIssueOutcome::Created(issue) => {
            assert_eq!(issue.assigned_to, Some(42));
            assert!(issue.is_open());
        });
    }

    #[tokio::test]
    async fn creation_logs_created_activity() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let actor = Actor::from_role(5, ROLE_USER);

        let issue = created(&svc, &project, &actor).await;

        let entries = store.activity_entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind(), Some(ActivityType::Created));
        assert_eq!(entries[0].project_id, project.id);
        assert_eq!(entries[0].issue_id, issue.id);
        assert_eq!(entries[0].user_id, 5);
        assert_eq!(entries[0].target_user_id, None);
    }

    #[tokio::test]
    async fn creation_claims_attachments_for_token_and_actor() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let actor = Actor::from_role(5, ROLE_USER);
        store.insert_attachment("upload-123", 5, "trace.log").await;
        store.insert_attachment("upload-123", 6, "other.log").await;

        let mut raw = input("Bug", "body");
        raw.token = Some("upload-123".into());
        let outcome = svc.create_issue(&raw, &project, &actor).await.unwrap();
        let issue = assert_matches!(outcome, CreateIssueOutcome::Created(issue) => issue);

        let attachments = store.attachments().await;
        assert_eq!(attachments[0].issue_id, Some(issue.id));
        assert_eq!(attachments[1].issue_id, None);
    }

    #[tokio::test]
    async fn failed_attachment_claim_still_creates_issue() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let actor = Actor::from_role(5, ROLE_USER);
        store.fail_attachment_claims(true).await;

        let mut raw = input("Bug", "body");
        raw.token = Some("upload-123".into());
        let outcome = svc.create_issue(&raw, &project, &actor).await.unwrap();

        assert_matches!(outcome, CreateIssueOutcome::Created(_));
        assert_eq!(store.issue_count().await, 1);
    }

    #[tokio::test]
    async fn closing_stamps_closer_and_logs_once() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let author = Actor::from_role(5, ROLE_USER);
        let closer = Actor::from_role(9, ROLE_DEVELOPER);
        let issue = created(&svc, &project, &author).await;

        let before = Utc::now();
        let closed = svc
            .change_status(issue, IssueStatus::Closed, &closer)
            .await
            .unwrap();

        assert_eq!(closed.status, 0);
        assert_eq!(closed.closed_by, Some(9));
        let closed_at = closed.closed_at.expect("closed_at should be set");
        assert!(closed_at >= before && closed_at <= Utc::now());

        let kinds: Vec<_> = store
            .activity_entries()
            .await
            .iter()
            .filter_map(|e| e.kind())
            .collect();
        assert_eq!(kinds, vec![ActivityType::Created, ActivityType::Closed]);
    }

    #[tokio::test]
    async fn reopening_keeps_last_closer() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let actor = Actor::from_role(9, ROLE_DEVELOPER);
        let issue = created(&svc, &project, &actor).await;
        let closed = svc
            .change_status(issue, IssueStatus::Closed, &actor)
            .await
            .unwrap();

        let other = Actor::from_role(10, ROLE_DEVELOPER);
        let reopened = svc
            .change_status(closed.clone(), IssueStatus::Open, &other)
            .await
            .unwrap();

        assert_eq!(reopened.status, 1);
        assert_eq!(reopened.closed_by, closed.closed_by);
        assert_eq!(reopened.closed_at, closed.closed_at);
        assert_eq!(reopened.updated_by, Some(10));

        let entries = store.activity_entries().await;
        let reopen_entries = entries
            .iter()
            .filter(|e| e.kind() == Some(ActivityType::Reopened))
            .count();
        assert_eq!(reopen_entries, 1);
    }

    #[tokio::test]
    async fn reassign_sets_assignee_and_logs_target() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let actor = Actor::from_role(9, ROLE_DEVELOPER);
        let issue = created(&svc, &project, &actor).await;

        let reassigned = svc.reassign(issue, 7, &actor).await.unwrap();
        assert_eq!(reassigned.assigned_to, Some(7));

        let stored = IssueStore::find(&store, reassigned.id).await.unwrap().unwrap();
        assert_eq!(stored.assigned_to, Some(7));

        let reassignments: Vec<_> = store
            .activity_entries()
            .await
            .into_iter()
            .filter(|e| e.kind() == Some(ActivityType::Reassigned))
            .collect();
        assert_eq!(reassignments.len(), 1);
        assert_eq!(reassignments[0].target_user_id, Some(7));
    }

    #[tokio::test]
    async fn status_change_logs_before_saving() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let actor = Actor::from_role(9, ROLE_DEVELOPER);
        let mut issue = created(&svc, &project, &actor).await;
        issue.id = 9_999;

        let err = svc
            .change_status(issue, IssueStatus::Closed, &actor)
            .await
            .unwrap_err();
        assert_matches!(err, crate::error::AppError::Database(sqlx::Error::RowNotFound));

        let closed_entries: Vec<_> = store
            .activity_entries()
            .await
            .into_iter()
            .filter(|e| e.kind() == Some(ActivityType::Closed))
            .collect();
        assert_eq!(closed_entries.len(), 1);
        assert_eq!(closed_entries[0].issue_id, 9_999);
    }

    #[tokio::test]
    async fn reassign_saves_before_logging() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let actor = Actor::from_role(9, ROLE_DEVELOPER);
        let mut issue = created(&svc, &project, &actor).await;
        issue.id = 9_999;

        svc.reassign(issue, 7, &actor).await.unwrap_err();

        let entries = store.activity_entries().await;
        assert_eq!(entries.len(), 1);
        assert!(entries
            .iter()
            .all(|e| e.kind() != Some(ActivityType::Reassigned)));
    }

    #[tokio::test]
    async fn saving_a_missing_issue_propagates_the_store_error() {
        let store = MemoryStore::new();
        let svc = service(&store);
        let project = store.insert_project("P", ProjectStatus::Open.id()).await;
        let actor = Actor::from_role(9, ROLE_DEVELOPER);
        let mut issue = created(&svc, &project, &actor).await;
        issue.id = 9_999;

        let err = svc.reassign(issue, 7, &actor).await.unwrap_err();
        assert_matches!(err, crate::error::AppError::Database(sqlx::Error::RowNotFound));
    }
}
