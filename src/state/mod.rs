//! # Placement State Persistence
//!
//! Durable per-tick records of where a flag was planted and what its
//! content fingerprint must still be at verification time.

pub mod store;

// Re-export for convenience
pub use store::{PlacementRecord, StateStore};
