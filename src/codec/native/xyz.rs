//! ASCII point clouds, one `x y z [r g b]` point per line.

use std::{fs, path::Path};

use anyhow::ensure;

use crate::data::{AuthoringMesh, ColorArray, ColorValues};

/// Reads an XYZ point cloud.
pub(super) fn read(path: &Path) -> anyhow::Result<AuthoringMesh> {
    let text = fs::read_to_string(path)?;
    let mut positions = Vec::new();
    let mut color_values = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let values = super::parse_floats(line.split_whitespace())?;
        ensure!(values.len() >= 3, "XYZ point with fewer than 3 coordinates");
        positions.push([values[0], values[1], values[2]]);
        if values.len() >= 6 {
            color_values.extend_from_slice(&values[3..6]);
        }
    }

    let colors = if !color_values.is_empty() && color_values.len() == positions.len() * 3 {
        Some(ColorArray::new(3, ColorValues::F32(color_values))?)
    } else {
        None
    };

    Ok(AuthoringMesh {
        name: None,
        positions,
        faces: Vec::new(),
        colors,
    })
}
