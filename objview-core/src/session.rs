/// Viewer controller that drives the camera pipeline for a loaded mesh
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use crate::camera::CameraState;
use crate::error::Result;
use crate::geometry::{Mat4, Mesh};
use crate::projection::{ProjectionMode, ProjectionSettings};
use crate::transform::RotationState;

/// One viewing session: the current mesh plus the camera state derived
/// from it and from the user's position, scale, rotation and projection
/// choices. Every setter recomposes the MVP before returning.
#[derive(Debug, Clone, Default)]
pub struct ViewerSession {
    camera: CameraState,
    mesh: Option<Arc<Mesh>>,
    source: Option<PathBuf>,
    settings: ProjectionSettings,
    rotation: RotationState,
    position: [f32; 3],
    origin_scale: f32,
}

impl ViewerSession {
    pub fn new(settings: ProjectionSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Load a new mesh and rebuild the whole pipeline for it.
    ///
    /// On failure the previously loaded mesh and every matrix are left
    /// exactly as they were.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Arc<Mesh>> {
        let path = path.as_ref();
        let mesh = Arc::new(Mesh::load(path)?);

        self.camera.calculate_model_matrix(mesh.extrema());
        self.origin_scale = self.camera.model_matrix()[0];
        self.camera.calculate_view_matrix();
        self.camera.apply_projection(&self.settings);
        self.rotation = RotationState::zero();
        self.position = [0.0; 3];
        self.camera.apply_rotation(&self.rotation);
        self.camera.compose_mvp();

        info!("Session now shows {}", path.display());
        self.mesh = Some(Arc::clone(&mesh));
        self.source = Some(path.to_path_buf());
        Ok(mesh)
    }

    pub fn set_rotation(&mut self, x_degrees: f32, y_degrees: f32, z_degrees: f32) {
        self.rotation = RotationState::new(x_degrees, y_degrees, z_degrees);
        self.camera.apply_rotation(&self.rotation);
        self.refresh();
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = [x, y, z];
        self.camera.set_model_position(x, y, z);
        self.refresh();
    }

    /// Scale relative to the auto-fit scale computed at load time
    pub fn set_scale(&mut self, factor: f32) {
        self.camera.set_model_scale(factor * self.origin_scale);
        self.refresh();
    }

    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.settings = self.settings.with_mode(mode);
        self.camera.apply_projection(&self.settings);
        self.refresh();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.settings.aspect = aspect;
        self.camera.apply_projection(&self.settings);
        self.refresh();
    }

    /// Back to the auto-fit scale, no offset and no rotation
    pub fn reset(&mut self) {
        self.camera.set_model_scale(self.origin_scale);
        self.position = [0.0; 3];
        self.camera.set_model_position(0.0, 0.0, 0.0);
        self.rotation = RotationState::zero();
        self.camera.apply_rotation(&self.rotation);
        self.refresh();
    }

    pub fn refresh(&mut self) {
        self.camera.compose_mvp();
        debug!("Refreshed MVP (rotation {:?}, position {:?})", self.rotation, self.position);
    }

    pub fn mesh(&self) -> Option<&Arc<Mesh>> {
        self.mesh.as_ref()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn mvp(&self) -> &Mat4 {
        self.camera.mvp_matrix()
    }

    pub fn settings(&self) -> &ProjectionSettings {
        &self.settings
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    pub fn origin_scale(&self) -> f32 {
        self.origin_scale
    }

    /// `"<file name> | vertices: N | facets: M"`, or `None` before the
    /// first successful load.
    pub fn status_line(&self) -> Option<String> {
        let mesh = self.mesh.as_ref()?;
        let name = self
            .source
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Some(format!(
            "{} | vertices: {} | facets: {}",
            name,
            mesh.vertex_count(),
            mesh.facets_count()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_obj(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".obj").unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn tetrahedron() -> NamedTempFile {
        write_obj("v 0 0 0\nv 2 0 0\nv 0 2 0\nv 0 0 2\nf 1 2 3\nf 1 2 4\nf 1 3 4\nf 2 3 4\n")
    }

    #[test]
    fn test_empty_session() {
        let session = ViewerSession::default();
        assert!(session.mesh().is_none());
        assert!(session.status_line().is_none());
        assert_eq!(session.settings(), &ProjectionSettings::default());
    }

    #[test]
    fn test_load_builds_pipeline() {
        let file = tetrahedron();
        let mut session = ViewerSession::new(ProjectionSettings::orthographic(1.0));
        let mesh = session.load(file.path()).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert!((session.origin_scale() - 0.3).abs() < 1e-6);

        let camera = session.camera();
        let mut expected = camera.clone();
        expected.compose_mvp();
        assert_eq!(session.mvp(), expected.mvp_matrix());
        assert_eq!(
            camera.projection_matrix(),
            &ProjectionSettings::orthographic(1.0).matrix()
        );
    }

    #[test]
    fn test_failed_reload_keeps_previous_state() {
        let file = tetrahedron();
        let mut session = ViewerSession::default();
        session.load(file.path()).unwrap();
        session.set_rotation(10.0, 20.0, 30.0);
        let mesh_before = Arc::clone(session.mesh().unwrap());
        let mvp_before = *session.mvp();

        let bad = write_obj("v 1 2\n");
        let err = session.load(bad.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedRecord);
        assert!(session.load("model.stl").is_err());

        assert!(Arc::ptr_eq(session.mesh().unwrap(), &mesh_before));
        assert_eq!(session.mvp(), &mvp_before);
        assert_eq!(session.source(), Some(file.path()));
    }

    #[test]
    fn test_scale_is_relative_to_origin() {
        let file = tetrahedron();
        let mut session = ViewerSession::default();
        session.load(file.path()).unwrap();

        session.set_scale(2.0);
        assert!((session.camera().model_matrix()[0] - 0.6).abs() < 1e-6);

        session.set_position(1.0, 2.0, 3.0);
        session.set_rotation(0.0, 45.0, 0.0);
        session.reset();

        let model = session.camera().model_matrix();
        assert!((model[0] - 0.3).abs() < 1e-6);
        assert_eq!((model[3], model[7], model[11]), (0.0, 0.0, 0.0));
        assert_eq!(session.rotation(), RotationState::zero());
        assert_eq!(session.position(), [0.0; 3]);
    }

    #[test]
    fn test_rotation_follows_state() {
        let file = tetrahedron();
        let mut session = ViewerSession::default();
        session.load(file.path()).unwrap();
        assert_eq!(session.camera().rotation_matrix(), &RotationState::zero().matrix());

        session.set_rotation(15.0, -40.0, 90.0);
        let state = session.rotation();
        assert_eq!(state, RotationState::new(15.0, -40.0, 90.0));
        assert_eq!(session.camera().rotation_matrix(), &state.matrix());

        session.reset();
        assert_eq!(session.camera().rotation_matrix(), &RotationState::zero().matrix());
    }

    #[test]
    fn test_projection_changes_recompose() {
        let file = tetrahedron();
        let mut session = ViewerSession::default();
        session.load(file.path()).unwrap();
        let perspective = *session.mvp();

        session.set_projection_mode(ProjectionMode::Orthographic);
        assert_eq!(session.settings().mode, ProjectionMode::Orthographic);
        assert_ne!(session.mvp(), &perspective);

        session.set_aspect(2.0);
        assert_eq!(session.settings().aspect, 2.0);
    }

    #[test]
    fn test_status_line() {
        let file = tetrahedron();
        let mut session = ViewerSession::default();
        session.load(file.path()).unwrap();

        let name = file.path().file_name().unwrap().to_string_lossy();
        assert_eq!(
            session.status_line().unwrap(),
            format!("{name} | vertices: 4 | facets: 4")
        );
    }
}
