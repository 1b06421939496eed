//! Issue status values, input validation, and the open/closed counting rule.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CoreError, FieldErrors};
use crate::types::{DbId, StatusId};

// ---------------------------------------------------------------------------
// Status values
// ---------------------------------------------------------------------------

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl TryFrom<StatusId> for $name {
            type Error = CoreError;

            fn try_from(value: StatusId) -> Result<Self, Self::Error> {
                match value {
                    $( $val => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} value {other}",
                        stringify!($name),
                    ))),
                }
            }
        }
    };
}

define_status_enum! {
    /// Issue status as stored in `projects_issues.status`.
    IssueStatus {
        Closed = 0,
        Open = 1,
    }
}

define_status_enum! {
    /// Project status as stored in `projects.status`.
    ProjectStatus {
        Closed = 0,
        Open = 1,
    }
}

// ---------------------------------------------------------------------------
// Creation input
// ---------------------------------------------------------------------------

/// Maximum issue title length, in characters.
pub const MAX_TITLE_LENGTH: u64 = 200;

/// Raw input for creating an issue, as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct IssueInput {
    #[validate(
        required(message = "The title field is required."),
        length(max = 200, message = "The title may not be greater than 200 characters.")
    )]
    pub title: Option<String>,

    #[validate(required(message = "The body field is required."))]
    pub body: Option<String>,

    /// Only honoured when the creating actor holds `issue-modify`.
    pub assigned_to: Option<DbId>,

    /// Correlates attachments uploaded before the issue existed.
    pub token: Option<String>,
}

/// Issue input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidIssueInput {
    pub title: String,
    pub body: String,
    pub assigned_to: Option<DbId>,
    pub token: Option<String>,
}

impl IssueInput {
    /// Check the input, treating whitespace-only title/body as missing.
    pub fn check(&self) -> Result<ValidIssueInput, FieldErrors> {
        let normalized = IssueInput {
            title: non_blank(&self.title),
            body: non_blank(&self.body),
            assigned_to: self.assigned_to,
            token: None,
        };
        normalized.validate()?;

        Ok(ValidIssueInput {
            title: self.title.clone().unwrap_or_default(),
            body: self.body.clone().unwrap_or_default(),
            assigned_to: self.assigned_to,
            token: self.token.clone().filter(|t| !t.is_empty()),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Global open/closed issue totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueCounts {
    pub open: i64,
    pub closed: i64,
}

impl IssueCounts {
    /// Count one issue.
    ///
    /// Open requires both the issue and its project to be open. A closed
    /// project closes all of its issues regardless of their own status.
    pub fn record(&mut self, project_status: StatusId, issue_status: StatusId) {
        let project_open = project_status == ProjectStatus::Open.id();
        let project_closed = project_status == ProjectStatus::Closed.id();
        if project_open && issue_status == IssueStatus::Open.id() {
            self.open += 1;
        } else if project_closed || (project_open && issue_status == IssueStatus::Closed.id()) {
            self.closed += 1;
        }
    }

    pub fn tally<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (StatusId, StatusId)>,
    {
        let mut counts = Self::default();
        for (project_status, issue_status) in rows {
            counts.record(project_status, issue_status);
        }
        counts
    }
}
