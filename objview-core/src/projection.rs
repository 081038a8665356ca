/// Projection matrices, view rig and projection configuration
use crate::geometry::{multiply, Mat4, Vec4, ZERO};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    Orthographic,
    #[default]
    Perspective,
}

/// Parameters handed to [`frustum`] or [`ortho`].
///
/// `near` and `far` are passed through positionally and are never
/// validated or reordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionSettings {
    pub mode: ProjectionMode,
    pub aspect: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl ProjectionSettings {
    pub const DEFAULT_FOV: f32 = 60.0;

    /// Central projection as configured by the desktop viewer: the near
    /// and far planes are handed over as 100 and 0.001.
    pub fn perspective(aspect: f32) -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            aspect,
            fov: Self::DEFAULT_FOV,
            near: 100.0,
            far: 0.001,
        }
    }

    /// Parallel projection as configured by the desktop viewer
    pub fn orthographic(aspect: f32) -> Self {
        Self {
            mode: ProjectionMode::Orthographic,
            aspect,
            fov: Self::DEFAULT_FOV,
            near: 0.01,
            far: 100.0,
        }
    }

    pub fn with_mode(self, mode: ProjectionMode) -> Self {
        match mode {
            ProjectionMode::Perspective => Self::perspective(self.aspect),
            ProjectionMode::Orthographic => Self::orthographic(self.aspect),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        match self.mode {
            ProjectionMode::Perspective => frustum(self.aspect, self.fov, self.near, self.far),
            ProjectionMode::Orthographic => ortho(self.aspect, self.fov, self.near, self.far),
        }
    }
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self::perspective(1.0)
    }
}

/// Symmetric frustum extents: `(right, top)`
fn extents(aspect: f32, fov: f32, near: f32) -> (f32, f32) {
    let top = near * (fov.to_radians() / 2.0).tan();
    (top * aspect, top)
}

/// Perspective projection from a symmetric frustum whose half-height is
/// `near * tan(fov / 2)`.
pub fn frustum(aspect: f32, fov: f32, near: f32, far: f32) -> Mat4 {
    let (right, top) = extents(aspect, fov, near);
    let (left, bottom) = (-right, -top);

    let mut m = ZERO;
    m[0] = (2.0 * near) / (right - left);
    m[5] = (2.0 * near) / (top - bottom);
    m[8] = (right + left) / (right - left);
    m[9] = (top + bottom) / (top - bottom);
    m[10] = -(far + near) / (far - near);
    m[11] = -1.0;
    m[14] = -(2.0 * far * near) / (far - near);
    m[15] = 1.0;
    m
}

/// Orthographic projection over the same extents as [`frustum`], so the
/// visible box still depends on `fov` and `near`.
pub fn ortho(aspect: f32, fov: f32, near: f32, far: f32) -> Mat4 {
    let (right, top) = extents(aspect, fov, near);
    let (left, bottom) = (-right, -top);

    let mut m = ZERO;
    m[0] = 2.0 / (right - left);
    m[5] = 2.0 / (top - bottom);
    m[10] = -2.0 / (far - near);
    m[12] = -(right + left) / (right - left);
    m[13] = -(top + bottom) / (top - bottom);
    m[14] = -(far + near) / (far - near);
    m[15] = 1.0;
    m
}

pub const EYE: Vec4 = Vec4::new(0.0, 0.0, -1.0, 0.0);
pub const TARGET: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.0);
pub const WORLD_UP: Vec4 = Vec4::new(0.0, 1.0, 0.0, 0.0);

/// Fixed look-at view: eye at `(0, 0, -1)` looking at the origin.
///
/// The translation part uses the raw eye position, not the derived basis.
pub fn view_matrix() -> Mat4 {
    let direction = Vec4::normalize(Vec4::subtract(EYE, TARGET));
    let right = Vec4::normalize(Vec4::cross(WORLD_UP, direction));
    let up = Vec4::cross(direction, right);

    #[rustfmt::skip]
    let rotation = [
        right.x, right.y, right.z, 0.0,
        up.x, up.y, up.z, 0.0,
        direction.x, direction.y, direction.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];

    #[rustfmt::skip]
    let translation = [
        1.0, 0.0, 0.0, -EYE.x,
        0.0, 1.0, 0.0, -EYE.y,
        0.0, 0.0, 1.0, -EYE.z,
        0.0, 0.0, 0.0, 1.0,
    ];

    multiply(&translation, &rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ProjectionSettings::default();
        assert_eq!(settings.mode, ProjectionMode::Perspective);
        assert_eq!(settings.fov, 60.0);
        assert_eq!((settings.near, settings.far), (100.0, 0.001));
    }

    #[test]
    fn test_with_mode_keeps_aspect() {
        let settings = ProjectionSettings::perspective(1.5).with_mode(ProjectionMode::Orthographic);
        assert_eq!(settings, ProjectionSettings::orthographic(1.5));
    }

    #[test]
    fn test_frustum_values() {
        let m = frustum(1.0, 45.0, 0.1, 100.0);
        assert!((m[0] - 2.41421).abs() < 1e-3);
        assert!((m[5] - 2.41421).abs() < 1e-3);
        assert!((m[10] + 1.002002).abs() < 1e-3);
        assert!((m[14] + 0.2002002).abs() < 1e-3);
        assert_eq!(m[11], -1.0);
        assert_eq!(m[8], 0.0);
        assert_eq!(m[9], 0.0);
    }

    #[test]
    fn test_ortho_values() {
        let m = ortho(1.0, 45.0, 0.1, 100.0);
        assert!((m[0] - 24.142).abs() < 1e-2);
        assert!((m[5] - 24.142).abs() < 1e-2);
        assert!((m[10] + 0.02002).abs() < 1e-3);
        assert!((m[14] + 1.002002).abs() < 1e-3);
        assert_eq!(m[15], 1.0);
    }

    #[test]
    fn test_aspect_scales_horizontal_term() {
        let wide = frustum(2.0, 60.0, 1.0, 10.0);
        let square = frustum(1.0, 60.0, 1.0, 10.0);
        assert!((wide[0] * 2.0 - square[0]).abs() < 1e-5);
        assert_eq!(wide[5], square[5]);
    }

    #[test]
    fn test_swapped_planes_are_not_corrected() {
        let m = ProjectionSettings::perspective(1.0).matrix();
        // far < near flips the sign of the depth terms.
        assert!(m[10] > 0.0);
        assert!(m[14] > 0.0);
    }

    #[test]
    fn test_view_matrix() {
        let half_sqrt2 = std::f32::consts::FRAC_1_SQRT_2;
        #[rustfmt::skip]
        let expected = [
            -half_sqrt2, 0.0, 0.0, 0.0,
            0.0, half_sqrt2, 0.0, 0.0,
            0.0, 0.0, -1.0, 1.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        for (a, e) in view_matrix().iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{a} != {e}");
        }
    }
}
