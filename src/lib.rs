pub mod checker;
pub mod client;
pub mod codec;
pub mod common;
pub mod state;

pub use checker::{CheckResult, GalleryChecker};
pub use client::GalleryClient;
pub use state::{PlacementRecord, StateStore};
