//! Business services held in [`AppState`](crate::state::AppState).

pub mod context;
pub mod issue;

pub use context::IssueContext;
pub use issue::{CreateIssueOutcome, IssueService};
