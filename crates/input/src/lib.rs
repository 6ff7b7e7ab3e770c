//! Input layer: raw window events become [`Action`]s applied to an
//! [`InputConsumer`].
//!
//! # Invariants
//! - Input state (last pointer position, held keys) lives in explicit values,
//!   never in statics.
//! - Consumers are handed in by reference; nothing is recovered from an opaque
//!   window slot.

pub mod action;
pub mod held;
pub mod pointer;

pub use action::{Action, InputConsumer};
pub use held::HeldDirections;
pub use pointer::PointerTracker;
