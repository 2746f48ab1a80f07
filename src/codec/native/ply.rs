//! Stanford PLY.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{anyhow, bail, Context};
use ply_rs::{
    parser::Parser,
    ply::{DefaultElement, Property},
};

use crate::data::{AuthoringMesh, ColorArray, ColorValues};

/// Reads an ASCII or binary PLY file.
pub(super) fn read(path: &Path) -> anyhow::Result<AuthoringMesh> {
    let mut reader = BufReader::new(File::open(path)?);
    let ply = Parser::<DefaultElement>::new()
        .read_ply(&mut reader)
        .context("Failed to parse PLY")?;

    let mut positions = Vec::new();
    let mut color_u8 = Vec::new();
    let mut color_f32 = Vec::new();
    let mut channels = 0;
    if let Some(vertices) = ply.payload.get("vertex") {
        positions.reserve(vertices.len());
        for (i, vertex) in vertices.iter().enumerate() {
            let coord = |name: &str| {
                vertex
                    .get(name)
                    .and_then(scalar)
                    .ok_or_else(|| anyhow!("Vertex {} has no numeric {:?}", i, name))
            };
            positions.push([coord("x")? as f32, coord("y")? as f32, coord("z")? as f32]);

            let rgba = ["red", "green", "blue", "alpha"]
                .iter()
                .map_while(|name| vertex.get(*name))
                .collect::<Vec<_>>();
            if rgba.len() < 3 {
                continue;
            }
            if i == 0 {
                channels = rgba.len();
            }
            for prop in rgba.iter().take(channels) {
                match prop {
                    Property::UChar(v) => color_u8.push(*v),
                    other => color_f32.push(scalar(other).unwrap_or(0.0) as f32),
                }
            }
        }
    }

    let colors = match (channels, color_u8.is_empty(), color_f32.is_empty()) {
        (0, ..) => None,
        (_, false, true) => Some(ColorArray::new(channels, ColorValues::U8(color_u8))?),
        (_, true, false) => Some(ColorArray::new(channels, ColorValues::F32(color_f32))?),
        _ => {
            log::warn!("Ignoring PLY vertex colors with mixed property types");
            None
        }
    };

    let faces = ply
        .payload
        .get("face")
        .map(|faces| {
            faces
                .iter()
                .map(|face| {
                    face.get("vertex_indices")
                        .or_else(|| face.get("vertex_index"))
                        .and_then(index_list)
                        .ok_or_else(|| anyhow!("Face without a vertex index list"))
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();

    if let Some(face) = faces
        .iter()
        .flatten()
        .find(|&&i| i as usize >= positions.len())
    {
        bail!("Face index {} out of range", face);
    }

    Ok(AuthoringMesh {
        name: None,
        positions,
        faces,
        colors,
    })
}

/// Reads a scalar property as `f64`.
fn scalar(prop: &Property) -> Option<f64> {
    match *prop {
        Property::Char(v) => Some(f64::from(v)),
        Property::UChar(v) => Some(f64::from(v)),
        Property::Short(v) => Some(f64::from(v)),
        Property::UShort(v) => Some(f64::from(v)),
        Property::Int(v) => Some(f64::from(v)),
        Property::UInt(v) => Some(f64::from(v)),
        Property::Float(v) => Some(f64::from(v)),
        Property::Double(v) => Some(v),
        _ => None,
    }
}

/// Reads an index list property.
fn index_list(prop: &Property) -> Option<Vec<u32>> {
    match prop {
        Property::ListInt(v) => v.iter().map(|&i| u32::try_from(i).ok()).collect(),
        Property::ListUInt(v) => Some(v.clone()),
        Property::ListUChar(v) => Some(v.iter().map(|&i| u32::from(i)).collect()),
        Property::ListShort(v) => v.iter().map(|&i| u32::try_from(i).ok()).collect(),
        Property::ListUShort(v) => Some(v.iter().map(|&i| u32::from(i)).collect()),
        _ => None,
    }
}

/// Writes an ASCII PLY file with 8-bit RGBA vertex colors when present.
pub(super) fn write(mesh: &AuthoringMesh, path: &Path) -> anyhow::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let colors = super::vertex_rgba(mesh);

    writeln!(w, "ply")?;
    writeln!(w, "format ascii 1.0")?;
    writeln!(w, "element vertex {}", mesh.vertex_count())?;
    for axis in ["x", "y", "z"] {
        writeln!(w, "property float {}", axis)?;
    }
    if colors.is_some() {
        for channel in ["red", "green", "blue", "alpha"] {
            writeln!(w, "property uchar {}", channel)?;
        }
    }
    writeln!(w, "element face {}", mesh.faces.len())?;
    writeln!(w, "property list uchar int vertex_indices")?;
    writeln!(w, "end_header")?;

    for (i, p) in mesh.positions.iter().enumerate() {
        write!(w, "{} {} {}", p[0], p[1], p[2])?;
        if let Some(c) = colors.as_ref().map(|c| c[i]) {
            write!(w, " {} {} {} {}", c.r, c.g, c.b, c.a)?;
        }
        writeln!(w)?;
    }
    for face in &mesh.faces {
        if face.len() > usize::from(u8::MAX) {
            bail!("Polygon with {} vertices does not fit a PLY uchar list", face.len());
        }
        write!(w, "{}", face.len())?;
        for i in face {
            write!(w, " {}", i)?;
        }
        writeln!(w)?;
    }
    w.flush()?;

    Ok(())
}
