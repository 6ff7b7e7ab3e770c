//! Shared plain types used by the input, camera and render crates.

pub mod types;

pub use types::Direction;
