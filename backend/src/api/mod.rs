//! Central module for the application's shared API plumbing.
//!
//! Authentication routes live in their own `auth` module; this one carries
//! the response types and error mapping they all share.

pub mod common;
