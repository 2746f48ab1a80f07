//! Asset loading.

use std::path::Path;

use cgmath::Point3;
use image::RgbaImage;

use crate::{
    codec::{ImageCodec, MeshCodec, MeshFormat},
    data::{AuthoringMesh, DecodedMesh, GeometryBuffer},
    error::{Result, ViewerError},
    transcode,
};

/// Load options.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Whether a file holding only vertices loads as a faceless mesh.
    ///
    /// If `false`, point clouds fail with `UnsupportedGeometry`.
    pub accept_point_clouds: bool,
}

/// A loaded model: display buffer and the mesh kept for export.
#[derive(Debug, Clone)]
pub struct LoadedMesh {
    /// Display buffer.
    pub buffer: GeometryBuffer,
    /// Authoring mesh.
    pub authoring: AuthoringMesh,
}

/// Loads a model file.
///
/// Multi-part scenes are concatenated into one mesh.
pub fn load_mesh(codec: &dyn MeshCodec, path: &Path, options: &LoadOptions) -> Result<LoadedMesh> {
    let format = MeshFormat::from_path(path).ok_or_else(|| ViewerError::UnsupportedFormat {
        path: path.to_owned(),
    })?;
    let decoded = codec
        .decode_mesh(path, format)
        .map_err(|e| ViewerError::decode(path, &e))?;

    let authoring = match decoded {
        DecodedMesh::Mesh(mesh) => mesh,
        DecodedMesh::Scene(parts) => {
            log::debug!("{:?} is a scene of {} parts", path, parts.len());
            AuthoringMesh::concatenate(parts)?
        }
        DecodedMesh::PointCloud(cloud) if options.accept_point_clouds => cloud,
        DecodedMesh::PointCloud(cloud) => {
            return Err(ViewerError::UnsupportedGeometry(format!(
                "{:?} is a point cloud of {} vertices, not a mesh",
                path,
                cloud.vertex_count()
            )))
        }
        DecodedMesh::Empty => {
            return Err(ViewerError::UnsupportedGeometry(format!(
                "{:?} contains an empty scene",
                path
            )))
        }
    };
    let buffer = display_buffer(&authoring)?;
    log::info!(
        "Loaded {:?}: {} vertices, {} faces, vertex colors: {}",
        path,
        buffer.vertices().len(),
        buffer.faces().len(),
        buffer.vertex_color().is_some()
    );

    Ok(LoadedMesh { buffer, authoring })
}

/// Builds the display buffer of an authoring mesh, transferring its colors.
pub fn display_buffer(authoring: &AuthoringMesh) -> Result<GeometryBuffer> {
    if let Some(&bad) = authoring
        .faces
        .iter()
        .flatten()
        .find(|&&i| i as usize >= authoring.vertex_count())
    {
        return Err(ViewerError::UnsupportedGeometry(format!(
            "face index {} out of range for {} vertices",
            bad,
            authoring.vertex_count()
        )));
    }
    let vertices = authoring
        .positions
        .iter()
        .map(|&p| Point3::from(p))
        .collect();
    let vertex_color = authoring.colors.as_ref().and_then(|colors| {
        if colors.len() == authoring.vertex_count() {
            Some(transcode::to_display(colors))
        } else {
            log::warn!(
                "Ignoring {} native colors for {} vertices",
                colors.len(),
                authoring.vertex_count()
            );
            None
        }
    });

    GeometryBuffer::mesh(vertices, authoring.faces.clone(), vertex_color)
}

/// Loads an image file as a textured plane.
pub fn load_image(codec: &dyn ImageCodec, path: &Path) -> Result<GeometryBuffer> {
    let image = codec
        .decode_image(path)
        .map_err(|e| ViewerError::decode(path, &e))?;
    let buffer = plane_from_image(image)?;
    log::info!("Loaded image {:?}: {:?}", path, buffer.texture_image().map(|t| t.dimensions()));
    Ok(buffer)
}

/// Builds the textured plane for an image.
pub fn plane_from_image(image: RgbaImage) -> Result<GeometryBuffer> {
    GeometryBuffer::plane(image)
}
