//! Authoring mesh, kept for re-export.

use rgb::RGBA8;

use crate::{
    data::ColorArray,
    error::{Result, ViewerError},
    transcode,
};

/// Mesh in the form required for re-export.
///
/// Owned by the viewer for the lifetime of one loaded asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthoringMesh {
    /// Name.
    pub name: Option<String>,
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Polygons as vertex index lists.
    pub faces: Vec<Vec<u32>>,
    /// Native per-vertex colors.
    pub colors: Option<ColorArray>,
}

impl AuthoringMesh {
    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns a copy carrying the given colors instead of the native ones.
    pub fn with_colors(&self, colors: Option<&[RGBA8]>) -> Self {
        Self {
            colors: colors.map(ColorArray::from_rgba8),
            ..self.clone()
        }
    }

    /// Concatenates the parts of a scene into one mesh.
    ///
    /// Face indices are offset per part. Colors survive only when every part
    /// carries a valid color array.
    ///
    /// Fails with `UnsupportedGeometry` if a part has a face index outside its
    /// own vertices, or if the joined mesh cannot be indexed with `u32`.
    pub fn concatenate(parts: Vec<AuthoringMesh>) -> Result<Self> {
        let mut total = 0_usize;
        for (n, part) in parts.iter().enumerate() {
            if let Some(&bad) = part
                .faces
                .iter()
                .flatten()
                .find(|&&i| i as usize >= part.vertex_count())
            {
                return Err(ViewerError::UnsupportedGeometry(format!(
                    "scene part {} has face index {} out of range for {} vertices",
                    n,
                    bad,
                    part.vertex_count()
                )));
            }
            total += part.vertex_count();
        }
        if u32::try_from(total).is_err() {
            return Err(ViewerError::UnsupportedGeometry(format!(
                "scene of {} vertices is too large to index",
                total
            )));
        }

        Ok(Self::join(parts))
    }

    /// Joins parts whose face indices are known to be in range.
    fn join(parts: Vec<AuthoringMesh>) -> Self {
        let colored = parts.iter().all(|part| {
            part.colors
                .as_ref()
                .map_or(false, |c| c.len() == part.vertex_count())
        });
        if !colored && parts.iter().any(|part| part.colors.is_some()) {
            log::warn!("Dropping vertex colors: not every scene part carries colors");
        }

        let mut positions = Vec::new();
        let mut faces = Vec::new();
        let mut colors: Vec<RGBA8> = Vec::new();
        for part in &parts {
            // Fits: the total vertex count was checked against `u32`.
            let offset = positions.len() as u32;
            positions.extend_from_slice(&part.positions);
            faces.extend(
                part.faces
                    .iter()
                    .map(|face| face.iter().map(|&i| i + offset).collect::<Vec<_>>()),
            );
            if colored {
                if let Some(part_colors) = &part.colors {
                    colors.extend(transcode::to_rgba8(part_colors));
                }
            }
        }
        log::debug!(
            "Concatenated {} scene parts into {} vertices",
            parts.len(),
            positions.len()
        );

        Self {
            name: parts.iter().find_map(|part| part.name.clone()),
            positions,
            faces,
            colors: if colored {
                Some(ColorArray::from_rgba8(&colors))
            } else {
                None
            },
        }
    }
}

/// Result of decoding a model file.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedMesh {
    /// A single mesh.
    Mesh(AuthoringMesh),
    /// Several mesh parts.
    Scene(Vec<AuthoringMesh>),
    /// Vertices without faces.
    PointCloud(AuthoringMesh),
    /// Nothing usable.
    Empty,
}

impl DecodedMesh {
    /// Classifies decoded parts.
    ///
    /// Only a decode without any part is `Empty`. When every part has zero
    /// vertices the first one is passed on as a mesh, which the display
    /// buffer then rejects as empty geometry.
    pub fn from_parts(parts: Vec<AuthoringMesh>) -> Self {
        let (mut parts, degenerate): (Vec<_>, Vec<_>) = parts
            .into_iter()
            .partition(|part| !part.positions.is_empty());
        if parts.is_empty() {
            return degenerate
                .into_iter()
                .next()
                .map_or(DecodedMesh::Empty, DecodedMesh::Mesh);
        }
        if parts.iter().all(|part| part.faces.is_empty()) {
            return DecodedMesh::PointCloud(AuthoringMesh::join(parts));
        }
        if parts.len() == 1 {
            return DecodedMesh::Mesh(parts.remove(0));
        }
        DecodedMesh::Scene(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColorValues;

    fn part(vertices: usize, colors: bool) -> AuthoringMesh {
        AuthoringMesh {
            name: None,
            positions: (0..vertices).map(|i| [i as f32, 0.0, 0.0]).collect(),
            faces: vec![vec![0, 1, 2]],
            colors: if colors {
                Some(ColorArray::new(3, ColorValues::F32(vec![1.0; vertices * 3])).unwrap())
            } else {
                None
            },
        }
    }

    #[test]
    fn concatenation_offsets_faces() {
        let mesh = AuthoringMesh::concatenate(vec![part(10, true), part(20, true)]).unwrap();
        assert_eq!(mesh.vertex_count(), 30);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2], vec![10, 11, 12]]);
        let colors = mesh.colors.unwrap();
        assert_eq!(colors.len(), 30);
        assert_eq!(colors.channels(), 4);
    }

    #[test]
    fn partially_colored_scene_loses_colors() {
        let mesh = AuthoringMesh::concatenate(vec![part(3, true), part(4, false)]).unwrap();
        assert_eq!(mesh.vertex_count(), 7);
        assert!(mesh.colors.is_none());
    }

    #[test]
    fn classifies_parts() {
        assert_eq!(DecodedMesh::from_parts(Vec::new()), DecodedMesh::Empty);
        assert!(matches!(
            DecodedMesh::from_parts(vec![part(3, false)]),
            DecodedMesh::Mesh(_)
        ));
        assert!(matches!(
            DecodedMesh::from_parts(vec![part(3, false), part(3, false)]),
            DecodedMesh::Scene(_)
        ));
        let mut cloud = part(5, false);
        cloud.faces.clear();
        assert!(matches!(
            DecodedMesh::from_parts(vec![cloud]),
            DecodedMesh::PointCloud(_)
        ));
    }

    #[test]
    fn zero_vertex_part_stays_a_mesh() {
        let mut empty = part(0, false);
        empty.faces.clear();
        assert_eq!(
            DecodedMesh::from_parts(vec![empty.clone()]),
            DecodedMesh::Mesh(empty.clone())
        );
        assert!(matches!(
            DecodedMesh::from_parts(vec![empty, part(3, false)]),
            DecodedMesh::Mesh(ref mesh) if mesh.vertex_count() == 3
        ));
    }

    #[test]
    fn out_of_range_part_index_is_rejected() {
        let mut second = part(3, false);
        second.faces = vec![vec![u32::MAX, 1, 2]];
        assert!(matches!(
            AuthoringMesh::concatenate(vec![part(3, false), second]),
            Err(ViewerError::UnsupportedGeometry(_))
        ));

        let mut local = part(3, false);
        local.faces = vec![vec![0, 1, 3]];
        assert!(AuthoringMesh::concatenate(vec![part(3, false), local]).is_err());
    }
}
