//! Database repositories for persistence operations.

pub mod user_repository;
