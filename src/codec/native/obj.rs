//! Wavefront OBJ.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;

use crate::data::{AuthoringMesh, ColorArray, ColorValues};

/// Reads every object of an OBJ file as a separate part.
pub(super) fn read(path: &Path) -> anyhow::Result<Vec<AuthoringMesh>> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: false,
            ..Default::default()
        },
    )
    .context("Failed to parse OBJ")?;

    models
        .into_iter()
        .map(|model| -> anyhow::Result<AuthoringMesh> {
            let mesh = model.mesh;
            let positions = mesh
                .positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect::<Vec<_>>();
            let faces = if mesh.face_arities.is_empty() {
                mesh.indices.chunks_exact(3).map(<[u32]>::to_vec).collect()
            } else {
                let mut rest = &mesh.indices[..];
                let mut faces = Vec::with_capacity(mesh.face_arities.len());
                for &arity in &mesh.face_arities {
                    let (face, tail) = rest.split_at((arity as usize).min(rest.len()));
                    faces.push(face.to_vec());
                    rest = tail;
                }
                faces
            };
            let colors = if mesh.vertex_color.is_empty() {
                None
            } else {
                Some(ColorArray::new(3, ColorValues::F32(mesh.vertex_color))?)
            };
            log::debug!(
                "OBJ object {:?}: {} vertices, {} faces",
                model.name,
                positions.len(),
                faces.len()
            );
            Ok(AuthoringMesh {
                name: Some(model.name),
                positions,
                faces,
                colors,
            })
        })
        .collect()
}

/// Writes an OBJ file, with colors as `v x y z r g b`.
pub(super) fn write(mesh: &AuthoringMesh, path: &Path) -> anyhow::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let colors = super::vertex_rgba(mesh);

    writeln!(w, "# Vertices: {}", mesh.vertex_count())?;
    writeln!(w, "# Faces: {}", mesh.faces.len())?;
    if let Some(name) = &mesh.name {
        writeln!(w, "o {}", name)?;
    }
    for (i, p) in mesh.positions.iter().enumerate() {
        match colors.as_ref().map(|c| c[i]) {
            Some(c) => writeln!(
                w,
                "v {} {} {} {:.8} {:.8} {:.8}",
                p[0],
                p[1],
                p[2],
                f32::from(c.r) / 255.0,
                f32::from(c.g) / 255.0,
                f32::from(c.b) / 255.0
            )?,
            None => writeln!(w, "v {} {} {}", p[0], p[1], p[2])?,
        }
    }
    for face in &mesh.faces {
        write!(w, "f")?;
        for i in face {
            // OBJ indices are 1-based.
            write!(w, " {}", i + 1)?;
        }
        writeln!(w)?;
    }
    w.flush()?;

    Ok(())
}
