//! objview core library: OBJ geometry extraction and the camera transform
//! pipeline.
//!
//! Parsing produces an immutable [`Mesh`]; [`CameraState`] turns its bounds
//! and the caller's view parameters into model, view, projection, rotation
//! and MVP matrices, all flat row-major `[f32; 16]` arrays.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod session;
pub mod transform;

// Re-export commonly used types
pub use camera::CameraState;
pub use error::{ErrorKind, ObjError, Result};
pub use geometry::{Extrema, Mat4, Mesh, Vec4};
pub use projection::{ProjectionMode, ProjectionSettings};
pub use session::ViewerSession;
pub use transform::RotationState;
