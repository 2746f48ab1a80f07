//! Stereolithography.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use cgmath::{InnerSpace, Vector3};

use crate::data::AuthoringMesh;

/// Reads a binary or ASCII STL file.
pub(super) fn read(path: &Path) -> anyhow::Result<AuthoringMesh> {
    let mut reader = BufReader::new(File::open(path)?);
    let stl = stl_io::read_stl(&mut reader).context("Failed to parse STL")?;
    log::debug!(
        "STL contains {} vertices, {} triangles",
        stl.vertices.len(),
        stl.faces.len()
    );

    let positions = stl.vertices.iter().map(|v| v.0).collect();
    let faces = stl
        .faces
        .iter()
        .map(|face| face.vertices.iter().map(|&i| i as u32).collect())
        .collect();

    Ok(AuthoringMesh {
        name: None,
        positions,
        faces,
        colors: None,
    })
}

/// Writes a binary STL file. Polygons are fan-triangulated; colors are dropped.
pub(super) fn write(mesh: &AuthoringMesh, path: &Path) -> anyhow::Result<()> {
    if mesh.colors.is_some() {
        log::info!("STL has no vertex colors; writing geometry only");
    }
    let vertex = |i: u32| -> anyhow::Result<[f32; 3]> {
        mesh.positions
            .get(i as usize)
            .copied()
            .with_context(|| format!("Face index {} out of range", i))
    };

    let mut triangles = Vec::new();
    for face in &mesh.faces {
        for k in 1..face.len().saturating_sub(1) {
            let tri = [vertex(face[0])?, vertex(face[k])?, vertex(face[k + 1])?];
            triangles.push(stl_io::Triangle {
                normal: stl_io::Normal::new(triangle_normal(&tri)),
                vertices: [
                    stl_io::Vertex::new(tri[0]),
                    stl_io::Vertex::new(tri[1]),
                    stl_io::Vertex::new(tri[2]),
                ],
            });
        }
    }

    let mut w = BufWriter::new(File::create(path)?);
    stl_io::write_stl(&mut w, triangles.iter())?;
    w.flush()?;

    Ok(())
}

/// Returns the unit normal by the right-hand rule, or zero when degenerate.
fn triangle_normal(tri: &[[f32; 3]; 3]) -> [f32; 3] {
    let a = Vector3::from(tri[0]);
    let ab = Vector3::from(tri[1]) - a;
    let ac = Vector3::from(tri[2]) - a;
    let n = ab.cross(ac);
    if n.magnitude2() <= f32::EPSILON {
        return [0.0; 3];
    }
    n.normalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_is_right_hand_rule() {
        let n = triangle_normal(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert!((n[2] - 1.0).abs() < 1e-6);
        assert_eq!(
            triangle_normal(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]),
            [0.0; 3]
        );
    }

    #[test]
    fn quads_are_split_into_two_triangles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.stl");
        let mesh = AuthoringMesh {
            name: None,
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            faces: vec![vec![0, 1, 2, 3]],
            colors: None,
        };
        write(&mesh, &path).unwrap();
        let back = read(&path).unwrap();
        assert_eq!(back.faces.len(), 2);
        assert_eq!(back.vertex_count(), 4);
    }
}
