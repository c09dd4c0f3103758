//! # Common Components
//!
//! Shared utilities and data used across the checker workflows.
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing utilities
//! - [`galleries`]: Cover gallery themes and filler description generation
//! - [`covers`]: Procedural cover image synthesis

pub mod config;
pub mod covers;
pub mod galleries;

// Re-export for convenience
pub use config::{load_config, CheckerConfig};
pub use galleries::{random_description, random_theme, GalleryTheme};
