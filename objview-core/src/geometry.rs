/// Geometry primitives: vectors, flat matrices and the parsed mesh
use std::path::Path;

use nalgebra::{Matrix4, Vector4};

use crate::error::Result;

/// A 4x4 matrix stored as 16 floats in row-major order
pub type Mat4 = [f32; 16];

pub const ZERO: Mat4 = [0.0; 16];

#[rustfmt::skip]
pub const IDENTITY: Mat4 = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

/// Row-major product `a * b`.
///
/// Returns a fresh matrix, so `m = multiply(&m, &other)` never reads a
/// partially written operand.
pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = ZERO;
    for row in 0..4 {
        for col in 0..4 {
            let mut sum = 0.0;
            for i in 0..4 {
                sum += a[row * 4 + i] * b[i * 4 + col];
            }
            result[row * 4 + col] = sum;
        }
    }
    result
}

/// View a row-major matrix as an nalgebra matrix
pub fn to_matrix4(m: &Mat4) -> Matrix4<f32> {
    Matrix4::from_row_slice(m)
}

/// A homogeneous 4-component vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Cross product of the xyz parts. The result always has `w = 1`.
    pub fn cross(a: Vec4, b: Vec4) -> Vec4 {
        Vec4::new(
            a.y * b.z - a.z * b.y,
            a.z * b.x - a.x * b.z,
            a.x * b.y - a.y * b.x,
            1.0,
        )
    }

    /// Divide by the length of all four components; the result has `w = 1`.
    pub fn normalize(v: Vec4) -> Vec4 {
        let length = (v.x * v.x + v.y * v.y + v.z * v.z + v.w * v.w).sqrt();
        Vec4::new(v.x / length, v.y / length, v.z / length, 1.0)
    }

    pub fn subtract(a: Vec4, b: Vec4) -> Vec4 {
        Vec4::new(a.x - b.x, a.y - b.y, a.z - b.z, a.w - b.w)
    }
}

impl From<Vec4> for Vector4<f32> {
    fn from(v: Vec4) -> Self {
        Vector4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4<f32>> for Vec4 {
    fn from(v: Vector4<f32>) -> Self {
        Vec4::new(v.x, v.y, v.z, v.w)
    }
}

/// Per-axis bounds of the parsed vertices.
///
/// Every bound starts at 0, not at an infinity, so a mesh lying entirely on
/// one side of an axis still has 0 as one of its bounds on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extrema {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Extrema {
    pub(crate) fn include(&mut self, [x, y, z]: [f32; 3]) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    /// Largest of the three signed maxima (no absolute value is taken)
    pub fn max_extent(&self) -> f32 {
        if self.max_x > self.max_y {
            if self.max_x > self.max_z {
                self.max_x
            } else {
                self.max_z
            }
        } else if self.max_y > self.max_z {
            self.max_y
        } else {
            self.max_z
        }
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.max_x + self.min_x) / 2.0,
            (self.max_y + self.min_y) / 2.0,
            (self.max_z + self.min_z) / 2.0,
        ]
    }
}

/// Vertex positions and face corner indices read from an OBJ file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<f32>,
    edges: Vec<u32>,
    vertex_count: u32,
    facets_count: u32,
    extrema: Extrema,
    center: [f32; 3],
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an OBJ file; see [`crate::obj::parse`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        crate::obj::parse(path)
    }

    pub(crate) fn from_parts(
        vertices: Vec<f32>,
        edges: Vec<u32>,
        vertex_count: u32,
        facets_count: u32,
        extrema: Extrema,
    ) -> Self {
        Self {
            vertices,
            edges,
            vertex_count,
            facets_count,
            center: extrema.center(),
            extrema,
        }
    }

    /// Flat `[x0, y0, z0, x1, ...]` positions in file order
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Zero-based vertex indices, one per face corner, in file order
    pub fn edges(&self) -> &[u32] {
        &self.edges
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn facets_count(&self) -> u32 {
        self.facets_count
    }

    pub fn extrema(&self) -> &Extrema {
        &self.extrema
    }

    pub fn center(&self) -> [f32; 3] {
        self.center
    }
}
