use glam::{Mat4, Vec3};

/// Spin axis shared by every cube in the field, normalized at use.
pub const SPIN_AXIS: Vec3 = Vec3::new(1.0, 0.3, 0.5);

/// One cube in the demo field: a fixed position and a spin rate.
#[derive(Debug, Clone, Copy)]
pub struct CubeInstance {
    pub position: Vec3,
    /// Rotation rate about [`SPIN_AXIS`] in degrees per second.
    pub spin_degrees_per_sec: f32,
}

impl CubeInstance {
    pub fn new(position: Vec3, spin_degrees_per_sec: f32) -> Self {
        Self {
            position,
            spin_degrees_per_sec,
        }
    }

    /// Model matrix at `elapsed_seconds`: spin about the shared axis in
    /// model space, then translate into place.
    pub fn model_matrix(&self, elapsed_seconds: f32) -> Mat4 {
        let angle = (self.spin_degrees_per_sec * elapsed_seconds).to_radians();
        Mat4::from_translation(self.position)
            * Mat4::from_axis_angle(SPIN_AXIS.normalize(), angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn spin_axis_normalizes_to_unit_length() {
        assert!((SPIN_AXIS.normalize().length() - 1.0).abs() < EPS);
    }

    #[test]
    fn model_matrix_at_zero_is_pure_translation() {
        let cube = CubeInstance::new(Vec3::new(2.0, 5.0, -15.0), 20.0);
        let m = cube.model_matrix(0.0);
        let expected = Mat4::from_translation(cube.position);
        for (a, b) in m.to_cols_array().iter().zip(expected.to_cols_array()) {
            assert!((a - b).abs() < EPS);
        }
    }

    #[test]
    fn spin_angle_grows_linearly_with_time() {
        let cube = CubeInstance::new(Vec3::ZERO, 30.0);
        let m = cube.model_matrix(2.0);
        let expected = Mat4::from_axis_angle(SPIN_AXIS.normalize(), 60.0_f32.to_radians());
        for (a, b) in m.to_cols_array().iter().zip(expected.to_cols_array()) {
            assert!((a - b).abs() < EPS);
        }
    }

    #[test]
    fn rotation_preserves_the_cube_center() {
        let cube = CubeInstance::new(Vec3::new(-1.5, -2.2, -2.5), 50.0);
        let center = cube.model_matrix(3.7).transform_point3(Vec3::ZERO);
        assert!((center - cube.position).length() < EPS);
    }
}
