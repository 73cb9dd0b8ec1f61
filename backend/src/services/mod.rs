//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business operations
//! and orchestrate interactions between repositories and the rest of the
//! application.

pub mod user_service;
