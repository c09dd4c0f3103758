//! # Checker Workflows
//!
//! The orchestrator driving the three checker workflows against one gallery
//! service instance:
//!
//! - **place**: plant a flag image and record how to verify it later
//! - **check**: exercise gallery CRUD and assert listing consistency
//! - **verify**: fetch a planted flag back and prove it is unmodified
//!
//! Each workflow is a linear sequence of steps with early exit on the first
//! failed step, classified into a [`CheckResult`].

pub mod orchestrator;

// Re-export for convenience
pub use orchestrator::{CheckResult, GalleryChecker, ProbeIdentifiers};
