//! Camera configuration, loadable from a JSON file.
//!
//! Every field has a default, so a file only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::camera::{DEFAULT_SENSITIVITY, DEFAULT_STEP};
use crate::projection::Projection;

/// Errors from loading or validating a [`CameraConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// How key input turns into camera movement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MovementMode {
    /// One `step` per key-down event, regardless of frame time.
    #[default]
    PerEvent,
    /// While a key is held, move `speed` units per second of frame time.
    TimeScaled { speed: f32 },
}

/// Projection parameters. The aspect ratio comes from the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        let p = Projection::default();
        Self {
            fov_y_degrees: p.fov_y_degrees,
            near: p.near,
            far: p.far,
        }
    }
}

impl ProjectionConfig {
    /// Projection for a surface of the given size.
    pub fn to_projection(&self, width: u32, height: u32) -> Projection {
        let mut projection = Projection {
            fov_y_degrees: self.fov_y_degrees,
            near: self.near,
            far: self.far,
            ..Projection::default()
        };
        projection.set_viewport(width, height);
        projection
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial camera position.
    pub spawn: [f32; 3],
    /// Degrees of rotation per pointer unit.
    pub sensitivity: f32,
    /// Distance of one per-event step.
    pub step: f32,
    /// Negate pointer deltas before they reach the camera.
    pub invert_look: bool,
    pub movement: MovementMode,
    pub projection: ProjectionConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            spawn: [0.0, 0.0, 5.0],
            sensitivity: DEFAULT_SENSITIVITY,
            step: DEFAULT_STEP,
            invert_look: false,
            movement: MovementMode::default(),
            projection: ProjectionConfig::default(),
        }
    }
}

impl CameraConfig {
    /// Read and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded camera config");
        Ok(config)
    }

    /// Parse and validate config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn.iter().any(|c| !c.is_finite()) {
            return Err(invalid("spawn", "coordinates must be finite"));
        }
        positive("sensitivity", self.sensitivity)?;
        positive("step", self.step)?;
        if let MovementMode::TimeScaled { speed } = self.movement {
            positive("movement.speed", speed)?;
        }

        let p = &self.projection;
        if !(p.fov_y_degrees > 0.0 && p.fov_y_degrees < 180.0) {
            return Err(invalid(
                "projection.fov_y_degrees",
                format!("{} is outside (0, 180)", p.fov_y_degrees),
            ));
        }
        positive("projection.near", p.near)?;
        if !(p.far.is_finite() && p.far > p.near) {
            return Err(invalid(
                "projection.far",
                format!("{} must be greater than near ({})", p.far, p.near),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be positive and finite")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = CameraConfig::default();
        config.validate().unwrap();
        assert_eq!(config.sensitivity, 0.75);
        assert_eq!(config.step, 1.0);
        assert_eq!(config.movement, MovementMode::PerEvent);
    }

    #[test]
    fn empty_object_uses_defaults() {
        let config = CameraConfig::from_json("{}").unwrap();
        assert_eq!(config, CameraConfig::default());
    }

    #[test]
    fn partial_file_overrides_fields() {
        let config = CameraConfig::from_json(
            r#"{
                "spawn": [1.0, 2.0, 3.0],
                "movement": { "mode": "time_scaled", "speed": 4.0 },
                "projection": { "fov_y_degrees": 60.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.spawn, [1.0, 2.0, 3.0]);
        assert_eq!(config.movement, MovementMode::TimeScaled { speed: 4.0 });
        assert_eq!(config.projection.fov_y_degrees, 60.0);
        assert_eq!(config.projection.far, 100.0);
        assert_eq!(config.sensitivity, 0.75);
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            r#"{ "sensitivity": 0.0 }"#,
            r#"{ "step": -1.0 }"#,
            r#"{ "movement": { "mode": "time_scaled", "speed": 0.0 } }"#,
            r#"{ "projection": { "fov_y_degrees": 180.0 } }"#,
            r#"{ "projection": { "near": 10.0, "far": 5.0 } }"#,
            r#"{ "projection": { "near": 0.0 } }"#,
        ];
        for json in cases {
            let err = CameraConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{json}: {err}");
        }
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        let err = CameraConfig::from_json(r#"{ "movement": { "mode": "warp" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "sensitivity": 0.5, "invert_look": true }}"#).unwrap();
        let config = CameraConfig::load(tmp.path()).unwrap();
        assert_eq!(config.sensitivity, 0.5);
        assert!(config.invert_look);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CameraConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn projection_config_takes_window_aspect() {
        let projection = ProjectionConfig::default().to_projection(1040, 640);
        assert!((projection.aspect - 1.625).abs() < 1e-6);
        assert_eq!(projection.fov_y_degrees, 45.0);
    }
}
