//! Object File Format (`OFF` and `COFF`).

use std::{
    fs,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{bail, ensure, Context};

use crate::data::{AuthoringMesh, ColorArray, ColorValues};

/// Reads an ASCII OFF file. Per-vertex colors after the coordinates are kept.
pub(super) fn read(path: &Path) -> anyhow::Result<AuthoringMesh> {
    let text = fs::read_to_string(path)?;
    let mut lines = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty());

    let header = lines.next().context("Empty OFF file")?;
    // The counts may share the header line.
    let counts_line = match header.strip_prefix("COFF").or_else(|| header.strip_prefix("OFF")) {
        Some(rest) if !rest.trim().is_empty() => rest.trim(),
        Some(_) => lines.next().context("Missing OFF element counts")?,
        None => bail!("Missing OFF header"),
    };
    let counts = counts_line
        .split_whitespace()
        .map(|s| s.parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid OFF element counts")?;
    ensure!(counts.len() >= 2, "Invalid OFF element counts");
    let (num_vertices, num_faces) = (counts[0], counts[1]);

    // Header counts are untrusted, so nothing is reserved from them.
    let mut positions = Vec::new();
    let mut color_values = Vec::new();
    let mut channels = None;
    for _ in 0..num_vertices {
        let line = lines.next().context("Unexpected end of OFF vertices")?;
        let values = super::parse_floats(line.split_whitespace())?;
        ensure!(values.len() >= 3, "OFF vertex with fewer than 3 coordinates");
        positions.push([values[0], values[1], values[2]]);
        let color = &values[3..];
        if matches!(color.len(), 3 | 4) && channels.map_or(true, |c| c == color.len()) {
            channels = Some(color.len());
            color_values.extend_from_slice(color);
        }
    }
    let colors = match channels {
        Some(c) if color_values.len() == c * num_vertices => {
            Some(ColorArray::new(c, ColorValues::F32(color_values))?)
        }
        _ => None,
    };

    let mut faces = Vec::new();
    for _ in 0..num_faces {
        let line = lines.next().context("Unexpected end of OFF faces")?;
        let mut fields = line.split_whitespace().map(|s| s.parse::<u32>());
        let n = fields.next().context("Empty OFF face")?? as usize;
        let face = fields.take(n).collect::<Result<Vec<_>, _>>()?;
        ensure!(face.len() == n, "OFF face shorter than its vertex count");
        ensure!(
            face.iter().all(|&i| (i as usize) < num_vertices),
            "OFF face index out of range"
        );
        faces.push(face);
    }

    Ok(AuthoringMesh {
        name: None,
        positions,
        faces,
        colors,
    })
}

/// Writes an ASCII OFF file, `COFF` with 8-bit RGBA when colors are present.
pub(super) fn write(mesh: &AuthoringMesh, path: &Path) -> anyhow::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let colors = super::vertex_rgba(mesh);

    writeln!(w, "{}", if colors.is_some() { "COFF" } else { "OFF" })?;
    writeln!(w, "{} {} 0", mesh.vertex_count(), mesh.faces.len())?;
    for (i, p) in mesh.positions.iter().enumerate() {
        write!(w, "{} {} {}", p[0], p[1], p[2])?;
        if let Some(c) = colors.as_ref().map(|c| c[i]) {
            write!(w, " {} {} {} {}", c.r, c.g, c.b, c.a)?;
        }
        writeln!(w)?;
    }
    for face in &mesh.faces {
        write!(w, "{}", face.len())?;
        for i in face {
            write!(w, " {}", i)?;
        }
        writeln!(w)?;
    }
    w.flush()?;

    Ok(())
}
