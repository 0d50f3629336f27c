//! Domain layer for the Lingora backend.
//!
//! This crate contains:
//! - Domain models (profiles, content, quizzes, vocabulary, settings)
//! - Pure business services (subscription status, entitlement, authoring)
//!
//! Nothing in here performs I/O; persistence and transport live in their
//! own crates.

pub mod models;
pub mod services;
