//! Handlers for project issues.
//!
//! Reads require authentication; creating requires `issue-create`, and
//! reassigning or changing status requires `issue-modify`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use issuetrack_core::error::CoreError;
use issuetrack_core::issue::{IssueInput, IssueStatus};
use issuetrack_core::paging::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use issuetrack_core::types::{DbId, StatusId};
use issuetrack_db::models::attachment::Attachment;
use issuetrack_db::models::comment::Comment;
use issuetrack_db::models::issue::{Issue, IssueListParams};
use issuetrack_db::models::project::Project;
use issuetrack_db::models::user::UserSummary;
use issuetrack_db::stores::Stores;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{CanCreateIssues, CanModifyIssues};
use crate::response::DataResponse;
use crate::services::{CreateIssueOutcome, IssueContext};
use crate::state::AppState;

/// Request body for `PUT .../assignee`.
#[derive(Debug, Deserialize)]
pub struct AssignIssue {
    pub assigned_to: DbId,
}

/// Request body for `PUT .../status`. 0 closes, 1 reopens.
#[derive(Debug, Deserialize)]
pub struct ChangeIssueStatus {
    pub status: StatusId,
}

/// An issue with its related users, attachments and comments resolved.
#[derive(Debug, Serialize)]
pub struct IssueDetail {
    #[serde(flatten)]
    pub issue: Issue,
    pub url: String,
    pub creator: Option<UserSummary>,
    pub assignee: Option<UserSummary>,
    pub updater: Option<UserSummary>,
    pub closer: Option<UserSummary>,
    pub attachments: Vec<Attachment>,
    pub comments: Vec<Comment>,
}

async fn load_project(stores: &Stores, id: DbId) -> AppResult<Project> {
    stores
        .projects
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))
}

async fn user_summary(stores: &Stores, id: Option<DbId>) -> AppResult<Option<UserSummary>> {
    let Some(id) = id else {
        return Ok(None);
    };
    let user = stores.users.find(id).await?;
    Ok(user.as_ref().map(UserSummary::from))
}

/// Load the issue into a fresh per-request context and take it out.
async fn load_issue(stores: &Stores, project_id: DbId, issue_id: DbId) -> AppResult<Issue> {
    let mut ctx = IssueContext::new();
    ctx.load_project_issue(stores.issues.as_ref(), project_id, issue_id)
        .await?;
    ctx.take()
        .ok_or_else(|| AppError::not_found("Issue", issue_id))
}

// ---------------------------------------------------------------------------
// GET /issues/counts
// ---------------------------------------------------------------------------

/// Global open and closed issue totals. Every issue in a closed project
/// counts as closed.
pub async fn issue_counts(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let counts = state.stores.issues.count_open_and_closed().await?;
    Ok(Json(DataResponse { data: counts }))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/issues
// ---------------------------------------------------------------------------

/// List a project's issues, newest first, optionally filtered by status.
///
/// Paged with `limit` (default 50, at most 200) and `offset`.
pub async fn list_issues(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<IssueListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status {
        IssueStatus::try_from(status)?;
    }
    load_project(&state.stores, project_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let issues = state
        .stores
        .issues
        .list_for_project(project_id, params.status, limit, offset)
        .await?;

    Ok(Json(DataResponse { data: issues }))
}

// ---------------------------------------------------------------------------
// POST /projects/{project_id}/issues
// ---------------------------------------------------------------------------

/// Create an issue. Responds 400 with per-field messages when the title or
/// body is missing or the title is too long.
pub async fn create_issue(
    CanCreateIssues(auth): CanCreateIssues,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<IssueInput>,
) -> AppResult<impl IntoResponse> {
    let project = load_project(&state.stores, project_id).await?;

    match state
        .issues
        .create_issue(&input, &project, &auth.actor())
        .await?
    {
        CreateIssueOutcome::Created(issue) => {
            Ok((StatusCode::CREATED, Json(DataResponse { data: issue })))
        }
        CreateIssueOutcome::Invalid(fields) => Err(AppError::Core(CoreError::InvalidInput(fields))),
    }
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/issues/{issue_id}
// ---------------------------------------------------------------------------

pub async fn get_issue(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, issue_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let stores = &state.stores;
    let issue = load_issue(stores, project_id, issue_id).await?;

    let detail = IssueDetail {
        url: issue.to(""),
        creator: user_summary(stores, Some(issue.created_by)).await?,
        assignee: user_summary(stores, issue.assigned_to).await?,
        updater: user_summary(stores, issue.updated_by).await?,
        closer: user_summary(stores, issue.closed_by).await?,
        attachments: stores.attachments.list_for_issue(issue.id).await?,
        comments: stores.issues.list_comments(issue.id).await?,
        issue,
    };

    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// PUT /projects/{project_id}/issues/{issue_id}/assignee
// ---------------------------------------------------------------------------

pub async fn reassign_issue(
    CanModifyIssues(auth): CanModifyIssues,
    State(state): State<AppState>,
    Path((project_id, issue_id)): Path<(DbId, DbId)>,
    Json(input): Json<AssignIssue>,
) -> AppResult<impl IntoResponse> {
    let issue = load_issue(&state.stores, project_id, issue_id).await?;

    state
        .stores
        .users
        .find(input.assigned_to)
        .await?
        .ok_or_else(|| AppError::not_found("User", input.assigned_to))?;

    let issue = state
        .issues
        .reassign(issue, input.assigned_to, &auth.actor())
        .await?;

    Ok(Json(DataResponse { data: issue }))
}

// ---------------------------------------------------------------------------
// PUT /projects/{project_id}/issues/{issue_id}/status
// ---------------------------------------------------------------------------

/// Close (`status: 0`) or reopen (`status: 1`) an issue.
pub async fn change_issue_status(
    CanModifyIssues(auth): CanModifyIssues,
    State(state): State<AppState>,
    Path((project_id, issue_id)): Path<(DbId, DbId)>,
    Json(input): Json<ChangeIssueStatus>,
) -> AppResult<impl IntoResponse> {
    let status = IssueStatus::try_from(input.status)?;
    let issue = load_issue(&state.stores, project_id, issue_id).await?;

    let issue = state
        .issues
        .change_status(issue, status, &auth.actor())
        .await?;

    Ok(Json(DataResponse { data: issue }))
}
