use freelook_common::Direction;
use freelook_input::InputConsumer;
use glam::{Mat4, Quat, Vec3};

use crate::config::CameraConfig;

/// Degrees of rotation per unit of pointer movement.
pub const DEFAULT_SENSITIVITY: f32 = 0.75;

/// World units moved per key event.
pub const DEFAULT_STEP: f32 = 1.0;

const PITCH_LIMIT: f32 = 90.0;
const FULL_TURN: f32 = 360.0;

/// Axis the pitch angle rotates about, in camera-local space.
const PITCH_AXIS: Vec3 = Vec3::NEG_X;

const DEGENERATE_EPSILON: f32 = 1e-8;

/// Free-look camera driven by key steps and pointer deltas.
///
/// Yaw and pitch are stored as angles in degrees; the two orientation
/// quaternions are rebuilt from them whenever they change.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    yaw_orientation: Quat,
    pitch_orientation: Quat,
    sensitivity: f32,
    step: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0))
    }
}

impl Camera {
    /// Camera at `spawn` with zero rotation and default tuning.
    pub fn new(spawn: Vec3) -> Self {
        Self {
            position: spawn,
            yaw: 0.0,
            pitch: 0.0,
            yaw_orientation: Quat::IDENTITY,
            pitch_orientation: Quat::IDENTITY,
            sensitivity: DEFAULT_SENSITIVITY,
            step: DEFAULT_STEP,
        }
    }

    /// Camera built from validated configuration.
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            sensitivity: config.sensitivity,
            step: config.step,
            ..Self::new(Vec3::from_array(config.spawn))
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Accumulated yaw in degrees, within [0, 360).
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Accumulated pitch in degrees, within [-90, 90].
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Distance covered by one [`move_in`](Self::move_in) call.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Combined orientation, yaw applied after pitch.
    pub fn orientation(&self) -> Quat {
        self.yaw_orientation * self.pitch_orientation
    }

    /// World-space viewing direction.
    pub fn front(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// World-space right vector, perpendicular to `front` and world up.
    ///
    /// Looking straight up or down the cross product vanishes; the yaw-only
    /// right axis is the limit of the cross product there.
    pub fn right(&self) -> Vec3 {
        let across = self.front().cross(Vec3::Y);
        if across.length_squared() < DEGENERATE_EPSILON {
            self.yaw_orientation * Vec3::X
        } else {
            across.normalize()
        }
    }

    /// Take one step in `direction`.
    pub fn move_in(&mut self, direction: Direction) {
        self.move_by(direction, self.step);
    }

    /// Move `distance` world units in `direction`, relative to the current
    /// orientation. Yaw and pitch are untouched.
    pub fn move_by(&mut self, direction: Direction, distance: f32) {
        let offset = direction.step(self.front(), self.right(), Vec3::Y) * distance;
        self.position += offset;
        tracing::trace!(?direction, distance, position = ?self.position, "camera moved");
    }

    /// Accumulate a pointer delta. Positive `dy` means the pointer moved up.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        // Finite deltas can still overflow once scaled by the sensitivity.
        let yaw_delta = dx * self.sensitivity;
        let pitch_delta = dy * self.sensitivity;
        if !yaw_delta.is_finite() || !pitch_delta.is_finite() {
            tracing::warn!(dx, dy, "ignoring non-finite pointer delta");
            return;
        }

        let pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let yaw = wrap_degrees(self.yaw + yaw_delta);

        self.pitch = pitch;
        self.yaw = yaw;
        self.pitch_orientation = Quat::from_axis_angle(PITCH_AXIS, pitch.to_radians());
        self.yaw_orientation = Quat::from_axis_angle(Vec3::Y, yaw.to_radians());
    }

    /// World-to-camera transform: the inverse rotation applied after moving
    /// the camera back to the origin.
    pub fn view_transform(&self) -> Mat4 {
        let rotation = Mat4::from_quat(self.orientation().conjugate());
        rotation * Mat4::from_translation(-self.position)
    }
}

impl InputConsumer for Camera {
    fn on_move(&mut self, direction: Direction, distance: f32) {
        self.move_by(direction, distance);
    }

    fn on_look(&mut self, dx: f32, dy: f32) {
        self.rotate(dx, dy);
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}
