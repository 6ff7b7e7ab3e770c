use freelook_camera::{Camera, Projection, compose_mvp, projection::fixed_view};
use glam::{Mat4, Vec3};

use crate::mesh::{MeshData, cube_mesh, triangle_mesh};
use crate::shaders::ShaderKind;

/// One step of the demo progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    /// A red triangle in clip space.
    Triangle,
    /// The triangle seen through a fixed projection and look-at view.
    Mvp,
    /// An indexed colored cube with depth testing, fixed view.
    Cube,
    /// The cube seen through the free-look camera.
    #[default]
    Camera,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Triangle, Stage::Mvp, Stage::Cube, Stage::Camera];

    /// Short identifier, also the shader override file stem.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Triangle => "triangle",
            Stage::Mvp => "mvp",
            Stage::Cube => "cube",
            Stage::Camera => "camera",
        }
    }

    /// Window title.
    pub fn title(self) -> &'static str {
        match self {
            Stage::Triangle => "Triangle",
            Stage::Mvp => "MVP Triangle",
            Stage::Cube => "Colored Cube",
            Stage::Camera => "Free-look Camera",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    pub fn uses_depth(self) -> bool {
        matches!(self, Stage::Cube | Stage::Camera)
    }

    /// Whether keyboard and pointer input reach the camera.
    pub fn uses_camera(self) -> bool {
        self == Stage::Camera
    }

    pub fn shader(self) -> ShaderKind {
        match self {
            Stage::Triangle => ShaderKind::Flat,
            Stage::Mvp => ShaderKind::Mvp,
            Stage::Cube | Stage::Camera => ShaderKind::Colored,
        }
    }

    pub fn mesh(self) -> MeshData {
        match self {
            Stage::Triangle | Stage::Mvp => triangle_mesh(),
            Stage::Cube | Stage::Camera => cube_mesh(),
        }
    }

    /// View transform for this stage, or `None` when vertices are already in
    /// clip space.
    pub fn view(self, camera: &Camera) -> Option<Mat4> {
        match self {
            Stage::Triangle => None,
            Stage::Mvp => Some(fixed_view(Vec3::new(4.0, 3.0, 3.0))),
            Stage::Cube => Some(fixed_view(Vec3::new(4.0, 3.0, -3.0))),
            Stage::Camera => Some(camera.view_transform()),
        }
    }

    /// The matrix uploaded to the `MVP` uniform this frame. The model
    /// transform is always identity.
    pub fn mvp(self, camera: &Camera, projection: &Projection) -> Mat4 {
        match self.view(camera) {
            Some(view) => compose_mvp(projection, view, Mat4::IDENTITY),
            None => Mat4::IDENTITY,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_name(stage.name()), Some(stage));
        }
        assert_eq!(Stage::from_name("sphere"), None);
    }

    #[test]
    fn only_cube_stages_use_depth() {
        assert!(!Stage::Triangle.uses_depth());
        assert!(!Stage::Mvp.uses_depth());
        assert!(Stage::Cube.uses_depth());
        assert!(Stage::Camera.uses_depth());
    }

    #[test]
    fn triangle_stage_is_clip_space() {
        let camera = Camera::default();
        let projection = Projection::default();
        assert_eq!(Stage::Triangle.mvp(&camera, &projection), Mat4::IDENTITY);
    }

    #[test]
    fn camera_stage_follows_camera() {
        let mut camera = Camera::default();
        let projection = Projection::default();
        let before = Stage::Camera.mvp(&camera, &projection);
        camera.rotate(40.0, 0.0);
        let after = Stage::Camera.mvp(&camera, &projection);
        assert_ne!(before, after);

        let expected = projection.matrix() * camera.view_transform();
        assert!(after.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn fixed_stages_ignore_camera() {
        let mut camera = Camera::default();
        let projection = Projection::default();
        let before = Stage::Cube.mvp(&camera, &projection);
        camera.rotate(40.0, 10.0);
        assert_eq!(Stage::Cube.mvp(&camera, &projection), before);
    }

    #[test]
    fn cube_origin_is_in_front_of_fixed_views() {
        let camera = Camera::default();
        let projection = Projection::default();
        for stage in [Stage::Mvp, Stage::Cube, Stage::Camera] {
            let clip = stage.mvp(&camera, &projection) * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
            assert!(clip.w > 0.0, "{stage} puts the origin behind the eye");
            let ndc_z = clip.z / clip.w;
            assert!((0.0..=1.0).contains(&ndc_z));
        }
    }
}
