//! Collaborators the viewer core calls through narrow interfaces.
//!
//! Mesh and image codecs, the background-removal service and the render
//! surface live behind these traits. `native` and `raster` provide built-in
//! codecs for the formats this crate can handle itself.

use std::path::Path;

use image::RgbaImage;
use rgb::RGB8;

use crate::{
    data::{AuthoringMesh, DecodedMesh, GeometryBuffer},
    render::RenderParams,
    util::bbox::OptionalBoundingBox3d,
};

pub mod native;
pub mod raster;

/// Mesh file formats, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// Stanford PLY.
    Ply,
    /// Stereolithography.
    Stl,
    /// Wavefront OBJ.
    Obj,
    /// Binary glTF.
    Glb,
    /// ASCII glTF.
    Gltf,
    /// COLLADA.
    Dae,
    /// Object File Format.
    Off,
    /// ASCII point cloud.
    Xyz,
}

impl MeshFormat {
    /// Detects the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let format = match ext.as_str() {
            "ply" => MeshFormat::Ply,
            "stl" => MeshFormat::Stl,
            "obj" => MeshFormat::Obj,
            "glb" => MeshFormat::Glb,
            "gltf" => MeshFormat::Gltf,
            "dae" => MeshFormat::Dae,
            "off" => MeshFormat::Off,
            "xyz" => MeshFormat::Xyz,
            _ => return None,
        };
        Some(format)
    }

    /// Returns whether meshes can be saved in this format.
    pub fn is_writable(self) -> bool {
        !matches!(self, MeshFormat::Xyz)
    }
}

/// Mesh-format codec.
pub trait MeshCodec {
    /// Decodes a model file.
    ///
    /// Multi-part files are returned as `DecodedMesh::Scene`; the loader
    /// concatenates the parts.
    fn decode_mesh(&self, path: &Path, format: MeshFormat) -> anyhow::Result<DecodedMesh>;

    /// Writes a mesh, including its colors when the format can carry them.
    fn encode_mesh(
        &self,
        mesh: &AuthoringMesh,
        format: MeshFormat,
        path: &Path,
    ) -> anyhow::Result<()>;
}

/// Image codec.
pub trait ImageCodec {
    /// Decodes an image file to RGBA.
    fn decode_image(&self, path: &Path) -> anyhow::Result<RgbaImage>;
}

/// Background-removal service.
pub trait BackgroundRemover {
    /// Takes a PNG-encoded RGBA image and returns a PNG-encoded RGBA image.
    fn remove_background(&self, png: &[u8]) -> anyhow::Result<Vec<u8>>;
}

/// Render surface.
pub trait RenderSurface {
    /// Draws the buffer with the given parameters.
    fn render(&mut self, buffer: &GeometryBuffer, params: &RenderParams);

    /// Removes everything from the scene.
    fn clear_scene(&mut self);

    /// Sets the background color.
    fn set_background(&mut self, color: RGB8);

    /// Frames the camera on the given bounds.
    fn reset_camera(&mut self, bounds: OptionalBoundingBox3d<f32>);

    /// Saves the current view as an image.
    fn capture_screenshot(&mut self, path: &Path, transparent: bool) -> anyhow::Result<()>;
}
