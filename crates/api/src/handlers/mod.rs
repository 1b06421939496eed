pub mod activity;
pub mod issue;
