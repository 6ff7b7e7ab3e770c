use glam::{Mat4, Vec3};

/// Fixed perspective projection owned by the frame loop, not the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    /// Recompute the aspect ratio for a surface size. Zero extents count as 1.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Right-handed perspective matrix with a [0, 1] depth range.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }
}

/// `projection * view * model`.
pub fn compose_mvp(projection: &Projection, view: Mat4, model: Mat4) -> Mat4 {
    projection.matrix() * view * model
}

/// Fixed look-at view used by stages without a free-look camera.
pub fn fixed_view(eye: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y)
}

/// GPU layout of the `MVP` uniform: 16 column-major floats.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MvpUniform {
    pub mvp: [[f32; 4]; 4],
}

impl MvpUniform {
    pub fn new(mvp: Mat4) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
        }
    }
}

impl Default for MvpUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn viewport_sets_aspect() {
        let mut projection = Projection::default();
        projection.set_viewport(1040, 640);
        assert!((projection.aspect - 1.625).abs() < 1e-6);

        projection.set_viewport(800, 0);
        assert_eq!(projection.aspect, 800.0);
    }

    #[test]
    fn identity_view_and_model_leave_projection() {
        let projection = Projection::default();
        let mvp = compose_mvp(&projection, Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(mvp, projection.matrix());
    }

    #[test]
    fn composition_order_is_projection_view_model() {
        let projection = Projection::default();
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
        let model = Mat4::from_rotation_y(0.5);
        let mvp = compose_mvp(&projection, view, model);
        let expected = projection.matrix() * (view * model);
        assert!(mvp.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn near_and_far_map_to_unit_depth_range() {
        let projection = Projection::default();
        let m = projection.matrix();
        let near = m * Vec4::new(0.0, 0.0, -projection.near, 1.0);
        let far = m * Vec4::new(0.0, 0.0, -projection.far, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn uniform_is_sixteen_column_major_floats() {
        assert_eq!(std::mem::size_of::<MvpUniform>(), 64);
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let uniform = MvpUniform::new(m);
        let floats = uniform.mvp.as_flattened();
        assert_eq!(&floats[12..15], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn fixed_view_looks_at_origin() {
        let view = fixed_view(Vec3::new(4.0, 3.0, 3.0));
        let origin = view.transform_point3(Vec3::ZERO);
        assert!(origin.x.abs() < 1e-5 && origin.y.abs() < 1e-5);
        assert!(origin.z < 0.0);
    }
}
