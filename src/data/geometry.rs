//! Geometry.

use std::fmt;

use cgmath::Point3;
use image::RgbaImage;
use rgb::RGB8;

use crate::{
    error::{Result, ViewerError},
    util::bbox::OptionalBoundingBox3d,
};

/// Kind of a displayed asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Surface mesh (or point cloud) loaded from a model file.
    Mesh3D,
    /// Flat quad showing a 2D image.
    TexturedPlane,
}

/// Color source stored in a geometry buffer.
///
/// Vertex colors and textures never coexist on one buffer.
#[derive(Clone, PartialEq)]
enum Surface {
    /// Mesh with optional per-vertex colors.
    Mesh {
        /// Vertex colors.
        vertex_color: Option<Vec<RGB8>>,
    },
    /// Plane textured with an image.
    Plane {
        /// Texture image.
        texture: RgbaImage,
        /// Texture coordinates, one per vertex.
        uv: Vec<[f32; 2]>,
    },
}

/// Canonical renderable surface.
#[derive(Clone, PartialEq)]
pub struct GeometryBuffer {
    /// Vertex positions.
    vertices: Vec<Point3<f32>>,
    /// Polygons as vertex index lists. Empty for point clouds.
    faces: Vec<Vec<u32>>,
    /// Color source.
    surface: Surface,
}

impl GeometryBuffer {
    /// Creates a `Mesh3D` buffer.
    ///
    /// Vertex colors are dropped with a warning when their count disagrees
    /// with the vertex count.
    pub fn mesh(
        vertices: Vec<Point3<f32>>,
        faces: Vec<Vec<u32>>,
        vertex_color: Option<Vec<RGB8>>,
    ) -> Result<Self> {
        if vertices.is_empty() {
            return Err(ViewerError::EmptyGeometry);
        }
        let vertex_color = vertex_color.filter(|colors| {
            let ok = colors.len() == vertices.len();
            if !ok {
                log::warn!(
                    "Dropping vertex colors: {} colors for {} vertices",
                    colors.len(),
                    vertices.len()
                );
            }
            ok
        });
        Ok(Self {
            vertices,
            faces,
            surface: Surface::Mesh { vertex_color },
        })
    }

    /// Creates a `TexturedPlane` buffer spanning the image's pixel size.
    ///
    /// The plane covers `[0, width] x [0, height]` at `z = 0`, so its center is
    /// `(width / 2, height / 2, 0)` and its normal is `+Z`. Texture coordinates
    /// put the first image row at the top edge (`v = 1`).
    pub fn plane(texture: RgbaImage) -> Result<Self> {
        let (w, h) = texture.dimensions();
        if w == 0 || h == 0 {
            return Err(ViewerError::EmptyGeometry);
        }
        let (w, h) = (w as f32, h as f32);
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(w, 0.0, 0.0),
            Point3::new(w, h, 0.0),
            Point3::new(0.0, h, 0.0),
        ];
        let uv = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        Ok(Self {
            vertices,
            faces: vec![vec![0, 1, 2, 3]],
            surface: Surface::Plane { texture, uv },
        })
    }

    /// Returns the asset kind.
    pub fn kind(&self) -> AssetKind {
        match self.surface {
            Surface::Mesh { .. } => AssetKind::Mesh3D,
            Surface::Plane { .. } => AssetKind::TexturedPlane,
        }
    }

    /// Returns the vertex positions.
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Returns the polygons.
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Returns the per-vertex colors, if any.
    pub fn vertex_color(&self) -> Option<&[RGB8]> {
        match &self.surface {
            Surface::Mesh { vertex_color } => vertex_color.as_deref(),
            Surface::Plane { .. } => None,
        }
    }

    /// Returns the texture image of a plane.
    pub fn texture_image(&self) -> Option<&RgbaImage> {
        match &self.surface {
            Surface::Mesh { .. } => None,
            Surface::Plane { texture, .. } => Some(texture),
        }
    }

    /// Returns the texture coordinates of a plane.
    pub fn texture_coords(&self) -> Option<&[[f32; 2]]> {
        match &self.surface {
            Surface::Mesh { .. } => None,
            Surface::Plane { uv, .. } => Some(uv),
        }
    }

    /// Returns whether the buffer is a point cloud.
    pub fn is_point_cloud(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns the bounding box of the vertices.
    pub fn bbox(&self) -> OptionalBoundingBox3d<f32> {
        self.vertices.iter().collect()
    }
}

impl fmt::Debug for GeometryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GeometryBuffer")
            .field("kind", &self.kind())
            .field("vertices_len", &self.vertices.len())
            .field("faces_len", &self.faces.len())
            .field("has_vertex_color", &self.vertex_color().is_some())
            .field(
                "texture_dimensions",
                &self.texture_image().map(|t| t.dimensions()),
            )
            .finish()
    }
}
