/// Elementary affine matrices and rotation state
use crate::geometry::{multiply, Mat4};

/// Rotation angles around the three axes, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Combined rotation for these angles, see [`rotation`]
    pub fn matrix(&self) -> Mat4 {
        rotation(self.x, self.y, self.z)
    }
}

#[rustfmt::skip]
pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    [
        1.0, 0.0, 0.0, x,
        0.0, 1.0, 0.0, y,
        0.0, 0.0, 1.0, z,
        0.0, 0.0, 0.0, 1.0,
    ]
}

/// Uniform scale on all three axes
#[rustfmt::skip]
pub fn scaling(factor: f32) -> Mat4 {
    [
        factor, 0.0, 0.0, 0.0,
        0.0, factor, 0.0, 0.0,
        0.0, 0.0, factor, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

#[rustfmt::skip]
pub fn rotation_x(degrees: f32) -> Mat4 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, cos, -sin, 0.0,
        0.0, sin, cos, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

#[rustfmt::skip]
pub fn rotation_y(degrees: f32) -> Mat4 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        cos, 0.0, -sin, 0.0,
        0.0, 1.0, 0.0, 0.0,
        sin, 0.0, cos, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

#[rustfmt::skip]
pub fn rotation_z(degrees: f32) -> Mat4 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        cos, -sin, 0.0, 0.0,
        sin, cos, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]
}

/// Combined rotation `rotY * (rotX * rotZ)`. The axis order is fixed.
pub fn rotation(x_degrees: f32, y_degrees: f32, z_degrees: f32) -> Mat4 {
    let xz = multiply(&rotation_x(x_degrees), &rotation_z(z_degrees));
    multiply(&rotation_y(y_degrees), &xz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{to_matrix4, IDENTITY};
    use nalgebra::{Matrix4, Vector3};

    fn assert_close(actual: &Mat4, expected: &Mat4, epsilon: f32) {
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < epsilon, "element {i}: {a} != {e}");
        }
    }

    #[test]
    fn test_rotation_state() {
        assert_eq!(RotationState::zero(), RotationState::new(0.0, 0.0, 0.0));
        assert_eq!(
            RotationState::new(45.0, 30.0, 60.0).matrix(),
            rotation(45.0, 30.0, 60.0)
        );
    }

    #[test]
    fn test_identity_rotation() {
        assert_close(&RotationState::zero().matrix(), &IDENTITY, 1e-6);
    }

    #[test]
    fn test_rotation_composition_order() {
        #[rustfmt::skip]
        let expected = [
            0.12683, -0.92678, -0.35355, 0.0,
            0.61237, 0.35355, -0.70711, 0.0,
            0.78033, -0.12683, 0.61237, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        assert_close(&rotation(45.0, 30.0, 60.0), &expected, 1e-4);
    }

    #[test]
    fn test_single_axis_rotations() {
        #[rustfmt::skip]
        let quarter_x = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 0.0, -1.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        assert_close(&rotation(90.0, 0.0, 0.0), &quarter_x, 1e-6);

        // X and Z follow the right-handed convention.
        let nalgebra_x = Matrix4::new_rotation(Vector3::new(0.7, 0.0, 0.0));
        let nalgebra_z = Matrix4::new_rotation(Vector3::new(0.0, 0.0, 0.7));
        assert!((to_matrix4(&rotation_x(0.7f32.to_degrees())) - nalgebra_x).norm() < 1e-5);
        assert!((to_matrix4(&rotation_z(0.7f32.to_degrees())) - nalgebra_z).norm() < 1e-5);

        // Y is the transpose of the right-handed rotation.
        let nalgebra_y = Matrix4::new_rotation(Vector3::new(0.0, 0.7, 0.0));
        assert!((to_matrix4(&rotation_y(0.7f32.to_degrees())) - nalgebra_y.transpose()).norm() < 1e-5);
    }

    #[test]
    fn test_scale_times_translation() {
        let model = multiply(&scaling(0.6), &translation(0.0, 0.0, -1.0));
        assert!((model[10] - 0.6).abs() < 1e-6);
        assert!((model[11] + 0.6).abs() < 1e-6);
        assert_eq!(model[15], 1.0);
    }
}
