use freelook_camera::{Camera, CameraConfig, MovementMode, Projection};
use freelook_common::Direction;
use freelook_input::{Action, HeldDirections, PointerTracker};
use freelook_render_wgpu::Stage;
use glam::{Mat4, Vec2};
use winit::keyboard::KeyCode;

/// What the event loop should do after a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Movement binding for a physical key.
pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Direction::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Direction::Backward),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Direction::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Direction::Right),
        KeyCode::Space => Some(Direction::Up),
        KeyCode::ControlLeft => Some(Direction::Down),
        _ => None,
    }
}

/// Everything the frame loop needs that is not a GPU handle.
pub struct AppState {
    pub stage: Stage,
    pub camera: Camera,
    pub projection: Projection,
    movement: MovementMode,
    pointer: PointerTracker,
    held: HeldDirections,
    looking: bool,
    /// Set once raw mouse motion has been seen; absolute pointer samples
    /// stop driving look from then on.
    raw_motion: bool,
    pub show_overlay: bool,
}

impl AppState {
    pub fn new(stage: Stage, config: &CameraConfig, width: u32, height: u32) -> Self {
        Self {
            stage,
            camera: Camera::from_config(config),
            projection: config.projection.to_projection(width, height),
            movement: config.movement,
            pointer: PointerTracker::inverted(config.invert_look),
            held: HeldDirections::new(),
            looking: false,
            raw_motion: false,
            show_overlay: true,
        }
    }

    pub fn movement(&self) -> MovementMode {
        self.movement
    }

    pub fn is_looking(&self) -> bool {
        self.looking
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.set_viewport(width, height);
    }

    /// Handle a physical key transition. `pressed` includes OS key repeats.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> Control {
        if pressed {
            match key {
                KeyCode::Escape => return Control::Exit,
                KeyCode::F1 => {
                    self.show_overlay = !self.show_overlay;
                    return Control::Continue;
                }
                _ => {}
            }
        }

        if !self.stage.uses_camera() {
            return Control::Continue;
        }

        let direction = direction_for_key(key);
        match self.movement {
            MovementMode::PerEvent => {
                if pressed {
                    let step = self.camera.step();
                    Action::from_binding(direction, step).apply(&mut self.camera);
                }
            }
            MovementMode::TimeScaled { .. } => {
                if let Some(direction) = direction {
                    self.held.set(direction, pressed);
                }
            }
        }
        Control::Continue
    }

    /// Start or stop pointer look.
    pub fn set_looking(&mut self, looking: bool) {
        if self.looking != looking {
            self.looking = looking;
            self.pointer.reset();
            tracing::debug!(looking, "pointer look toggled");
        }
    }

    /// Handle an absolute pointer position in window coordinates. Drives look
    /// only on platforms that deliver no raw mouse motion.
    pub fn handle_pointer(&mut self, x: f32, y: f32) {
        let Some(delta) = self.pointer.sample(x, y) else {
            return;
        };
        if !self.raw_motion {
            self.look(delta);
        }
    }

    /// Handle a raw mouse-motion delta. Unlike pointer positions this keeps
    /// turning after the cursor reaches the window edge.
    pub fn handle_motion(&mut self, dx: f32, dy: f32) {
        if !self.looking {
            return;
        }
        self.raw_motion = true;
        let delta = self.pointer.relative(dx, dy);
        self.look(delta);
    }

    fn look(&mut self, delta: Vec2) {
        if self.looking && self.stage.uses_camera() {
            Action::Look {
                dx: delta.x,
                dy: delta.y,
            }
            .apply(&mut self.camera);
        }
    }

    /// Forget transient input when the window loses focus or the pointer leaves.
    pub fn release_input(&mut self) {
        self.held.clear();
        self.pointer.reset();
    }

    /// Advance time-scaled movement by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if let MovementMode::TimeScaled { speed } = self.movement {
            let distance = speed * dt;
            for direction in self.held.iter() {
                Action::Move(direction, distance).apply(&mut self.camera);
            }
        }
    }

    /// Matrix uploaded to the `MVP` uniform this frame.
    pub fn frame_mvp(&self) -> Mat4 {
        self.stage.mvp(&self.camera, &self.projection)
    }
}
