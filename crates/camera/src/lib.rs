//! Free-look camera: quaternion yaw/pitch orientation, movement relative to
//! that orientation, and the view transform fed into the MVP matrix.
//!
//! # Invariants
//! - Pitch stays within [-90, 90] degrees, yaw within [0, 360).
//! - Orientation is rebuilt from the two angles on every change, never
//!   integrated, so it stays a unit quaternion.
//! - `view_transform` is a pure function of camera state.

mod camera;
pub mod config;
pub mod projection;

pub use camera::{Camera, DEFAULT_SENSITIVITY, DEFAULT_STEP};
pub use config::{CameraConfig, ConfigError, MovementMode, ProjectionConfig};
pub use projection::{MvpUniform, Projection, compose_mvp};
