//! View model for a "reassigned" activity entry.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use issuetrack_core::activity::ActivityType;
use issuetrack_core::error::CoreError;
use issuetrack_core::humanize;
use issuetrack_core::paths;
use issuetrack_db::models::activity::ActivityEntry;
use issuetrack_db::models::issue::Issue;
use issuetrack_db::models::user::User;
use issuetrack_db::stores::Stores;
use serde::Serialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReassignActivityView {
    /// Tag shown beside the entry.
    pub label: &'static str,
    pub issue_url: String,
    pub issue_title: String,
    pub assigned_name: String,
    pub actor_name: String,
    /// e.g. "March 5th at 2:30 PM".
    pub formatted_timestamp: String,
}

impl ReassignActivityView {
    /// Build from already-resolved records. `at` is wall-clock local time.
    pub fn new(
        base_url: &str,
        issue: &Issue,
        assigned: &User,
        actor: &User,
        at: &NaiveDateTime,
    ) -> Self {
        Self::build(base_url, issue, assigned, actor, humanize::activity_time(at))
    }

    /// Build from a stored timestamp, shown in the server's local time zone.
    pub fn at<Tz: TimeZone>(
        base_url: &str,
        issue: &Issue,
        assigned: &User,
        actor: &User,
        at: &DateTime<Tz>,
    ) -> Self {
        Self::build(
            base_url,
            issue,
            assigned,
            actor,
            humanize::activity_time_local(at),
        )
    }

    fn build(
        base_url: &str,
        issue: &Issue,
        assigned: &User,
        actor: &User,
        formatted_timestamp: String,
    ) -> Self {
        Self {
            label: ActivityType::Reassigned.label(),
            issue_url: paths::absolute_url(base_url, &issue.to("")),
            issue_title: issue.title.clone(),
            assigned_name: assigned.full_name(),
            actor_name: actor.full_name(),
            formatted_timestamp,
        }
    }

    /// Resolve the issue, new assignee and acting user behind `entry`.
    pub async fn load(stores: &Stores, base_url: &str, entry: &ActivityEntry) -> AppResult<Self> {
        if entry.kind() != Some(ActivityType::Reassigned) {
            return Err(CoreError::Validation(format!(
                "Activity {} is not a reassignment",
                entry.id
            ))
            .into());
        }
        let target_id = entry.target_user_id.ok_or_else(|| {
            CoreError::Validation(format!("Activity {} has no target user", entry.id))
        })?;

        let issue = stores
            .issues
            .find(entry.issue_id)
            .await?
            .ok_or_else(|| AppError::not_found("Issue", entry.issue_id))?;
        let assigned = stores
            .users
            .find(target_id)
            .await?
            .ok_or_else(|| AppError::not_found("User", target_id))?;
        let actor = stores
            .users
            .find(entry.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User", entry.user_id))?;

        Ok(Self::at(base_url, &issue, &assigned, &actor, &entry.created_at))
    }
}
