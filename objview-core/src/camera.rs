/// Mutable transform pipeline: model, view, projection, rotation and MVP
use log::{trace, warn};

use crate::geometry::{multiply, Extrema, Mat4, Vec4, ZERO};
use crate::projection::{self, ProjectionSettings};
use crate::transform::{self, RotationState};

/// Share of the viewing volume a freshly loaded model is scaled to fill
pub const FIT_RATIO: f32 = 0.6;

/// Holds the five pipeline matrices of one viewing session.
///
/// Nothing is recomputed automatically. After changing any input the caller
/// rebuilds the MVP by calling, in this order, [`mult_model_rotation`],
/// [`mult_mvp_view`] and [`mult_mvp_projection`] (or [`compose_mvp`], which
/// does all three). The order is not checked.
///
/// [`mult_model_rotation`]: CameraState::mult_model_rotation
/// [`mult_mvp_view`]: CameraState::mult_mvp_view
/// [`mult_mvp_projection`]: CameraState::mult_mvp_projection
/// [`compose_mvp`]: CameraState::compose_mvp
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    model: Mat4,
    view: Mat4,
    projection: Mat4,
    rotation: Mat4,
    mvp: Mat4,
}

impl CameraState {
    /// All matrices start zero-filled.
    pub fn new() -> Self {
        Self {
            model: ZERO,
            view: ZERO,
            projection: ZERO,
            rotation: ZERO,
            mvp: ZERO,
        }
    }

    pub fn model_matrix(&self) -> &Mat4 {
        &self.model
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    pub fn rotation_matrix(&self) -> &Mat4 {
        &self.rotation
    }

    pub fn mvp_matrix(&self) -> &Mat4 {
        &self.mvp
    }

    /// Auto-fit the model: `scale(0.6 / max extent) * translate(0, 0, -1)`.
    ///
    /// The extent is the largest signed maximum; a zero extent yields
    /// non-finite entries.
    pub fn calculate_model_matrix(&mut self, extrema: &Extrema) {
        let factor = FIT_RATIO / extrema.max_extent();
        if !factor.is_finite() {
            warn!("Degenerate bounds {extrema:?}: model scale is {factor}");
        }
        let translation = transform::translation(0.0, 0.0, -1.0);
        self.model = multiply(&transform::scaling(factor), &translation);
    }

    /// Overwrite the translation column only
    pub fn set_model_position(&mut self, x: f32, y: f32, z: f32) {
        self.model[3] = x;
        self.model[7] = y;
        self.model[11] = z;
    }

    /// Overwrite the three diagonal scale entries only
    pub fn set_model_scale(&mut self, scale: f32) {
        self.model[0] = scale;
        self.model[5] = scale;
        self.model[10] = scale;
    }

    pub fn calculate_rotation_matrix(&mut self, x_degrees: f32, y_degrees: f32, z_degrees: f32) {
        self.rotation = transform::rotation(x_degrees, y_degrees, z_degrees);
    }

    pub fn apply_rotation(&mut self, state: &RotationState) {
        self.rotation = state.matrix();
    }

    pub fn frustum(&mut self, aspect: f32, fov: f32, near: f32, far: f32) {
        self.projection = projection::frustum(aspect, fov, near, far);
    }

    pub fn ortho(&mut self, aspect: f32, fov: f32, near: f32, far: f32) {
        self.projection = projection::ortho(aspect, fov, near, far);
    }

    pub fn apply_projection(&mut self, settings: &ProjectionSettings) {
        self.projection = settings.matrix();
    }

    pub fn calculate_view_matrix(&mut self) {
        self.view = projection::view_matrix();
    }

    /// `mvp = model * rotation`
    pub fn mult_model_rotation(&mut self) {
        self.mvp = multiply(&self.model, &self.rotation);
    }

    /// `mvp = mvp * view`
    pub fn mult_mvp_view(&mut self) {
        self.mvp = multiply(&self.mvp, &self.view);
    }

    /// `mvp = mvp * projection`
    pub fn mult_mvp_projection(&mut self) {
        self.mvp = multiply(&self.mvp, &self.projection);
    }

    pub fn compose_mvp(&mut self) {
        self.mult_model_rotation();
        self.mult_mvp_view();
        self.mult_mvp_projection();
        trace!("MVP recomposed: {:?}", self.mvp);
    }

    pub fn cross(a: Vec4, b: Vec4) -> Vec4 {
        Vec4::cross(a, b)
    }

    pub fn normalize(v: Vec4) -> Vec4 {
        Vec4::normalize(v)
    }

    pub fn subtract(a: Vec4, b: Vec4) -> Vec4 {
        Vec4::subtract(a, b)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new()
    }
}
