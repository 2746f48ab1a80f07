//! Built-in mesh codec.

use std::path::Path;

use anyhow::{bail, Context};

use crate::{
    codec::{MeshCodec, MeshFormat},
    data::{AuthoringMesh, DecodedMesh},
    transcode,
};

mod obj;
mod off;
mod ply;
mod stl;
mod xyz;

/// Mesh codec for OBJ, PLY, STL, OFF and XYZ files.
///
/// glTF and COLLADA need an external codec.
#[derive(Default, Debug, Clone, Copy)]
pub struct NativeMeshCodec;

impl NativeMeshCodec {
    /// Creates a new `NativeMeshCodec`.
    pub fn new() -> Self {
        Self
    }
}

impl MeshCodec for NativeMeshCodec {
    fn decode_mesh(&self, path: &Path, format: MeshFormat) -> anyhow::Result<DecodedMesh> {
        log::debug!("Decoding {:?} as {:?}", path, format);
        let parts = match format {
            MeshFormat::Obj => obj::read(path)?,
            MeshFormat::Ply => vec![ply::read(path)?],
            MeshFormat::Stl => vec![stl::read(path)?],
            MeshFormat::Off => vec![off::read(path)?],
            MeshFormat::Xyz => vec![xyz::read(path)?],
            MeshFormat::Glb | MeshFormat::Gltf | MeshFormat::Dae => {
                bail!("No built-in decoder for {:?} files", format)
            }
        };
        Ok(DecodedMesh::from_parts(parts))
    }

    fn encode_mesh(
        &self,
        mesh: &AuthoringMesh,
        format: MeshFormat,
        path: &Path,
    ) -> anyhow::Result<()> {
        log::debug!("Encoding {} vertices to {:?} as {:?}", mesh.vertex_count(), path, format);
        match format {
            MeshFormat::Ply => ply::write(mesh, path),
            MeshFormat::Stl => stl::write(mesh, path),
            MeshFormat::Obj => obj::write(mesh, path),
            MeshFormat::Off => off::write(mesh, path),
            MeshFormat::Glb | MeshFormat::Gltf | MeshFormat::Dae | MeshFormat::Xyz => {
                bail!("No built-in encoder for {:?} files", format)
            }
        }
        .with_context(|| format!("Failed to write {:?} data", format))
    }
}

/// Returns the colors of a mesh as 8-bit RGBA when they cover every vertex.
fn vertex_rgba(mesh: &AuthoringMesh) -> Option<Vec<rgb::RGBA8>> {
    let colors = mesh.colors.as_ref()?;
    if colors.len() != mesh.vertex_count() {
        log::warn!(
            "Not writing {} colors for {} vertices",
            colors.len(),
            mesh.vertex_count()
        );
        return None;
    }
    Some(transcode::to_rgba8(colors))
}

/// Parses whitespace-separated floats.
fn parse_floats<'a>(fields: impl Iterator<Item = &'a str>) -> anyhow::Result<Vec<f32>> {
    fields
        .map(|s| {
            s.parse::<f32>()
                .with_context(|| format!("Invalid number {:?}", s))
        })
        .collect()
}
