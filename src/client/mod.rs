//! # Gallery Service Client
//!
//! HTTP client for the gallery service under test. Wraps the service's wire
//! protocol (form posts, multipart uploads, HTML listings) behind operations
//! the checker workflows can reason about: create, upload, download, decrypt,
//! delete, and presence checks against the listings.

pub mod gallery;

// Re-export for convenience
pub use gallery::GalleryClient;
