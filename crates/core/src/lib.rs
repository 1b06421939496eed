//! Domain logic for the issue tracker.
//!
//! This crate has no database or HTTP dependencies. It holds the shared id and
//! timestamp types, the domain error, role capabilities, issue and activity
//! rules, paging bounds, URL paths, and the humanized time formatting used by views.

pub mod activity;
pub mod error;
pub mod humanize;
pub mod issue;
pub mod paging;
pub mod paths;
pub mod permissions;
pub mod types;
