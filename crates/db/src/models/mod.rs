//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus insert DTOs where this service writes the table.

pub mod activity;
pub mod attachment;
pub mod comment;
pub mod issue;
pub mod project;
pub mod user;
