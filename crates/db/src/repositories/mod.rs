//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod attachment_repo;
pub mod comment_repo;
pub mod issue_repo;
pub mod project_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use attachment_repo::AttachmentRepo;
pub use comment_repo::CommentRepo;
pub use issue_repo::IssueRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
