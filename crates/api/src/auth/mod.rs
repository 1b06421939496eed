//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! Sign-in and account management belong to the identity service that issues
//! these tokens; this server only verifies them.

pub mod jwt;
