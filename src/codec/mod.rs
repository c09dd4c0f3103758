//! # Flag Image Codec
//!
//! This module hides flags inside gallery images and fingerprints image
//! content so the checker can later prove, byte for byte, that the service
//! returned exactly what it was given.

pub mod flag_image;

// Re-export main functions for convenience
pub use flag_image::{embed_flag, fingerprint_bytes, png_bytes, DecodeError, FlagArtifact};
