//! Asset export.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rgb::RGB8;

use crate::{
    codec::{MeshCodec, MeshFormat},
    data::AuthoringMesh,
    error::{Result, ViewerError},
    transcode,
};

/// Writes the authoring mesh with the given display colors.
///
/// Colors that do not match the vertex count are dropped and the mesh is
/// written without them. The given mesh itself is never modified.
pub fn export(
    codec: &dyn MeshCodec,
    mesh: &AuthoringMesh,
    display_color: Option<&[RGB8]>,
    path: &Path,
) -> Result<()> {
    let format = MeshFormat::from_path(path)
        .filter(|format| format.is_writable())
        .ok_or_else(|| ViewerError::UnsupportedFormat {
            path: path.to_owned(),
        })?;

    let colors = display_color.and_then(|colors| {
        match transcode::to_authoring(colors, mesh.vertex_count()) {
            Ok(colors) => Some(colors),
            Err(e) => {
                log::warn!("Exporting without color: {}", e);
                None
            }
        }
    });
    let stamped = mesh.with_colors(colors.as_deref());

    // Write next to the destination and move into place only on success.
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);
    let written = codec
        .encode_mesh(&stamped, format, &partial)
        .and_then(|()| fs::rename(&partial, path).map_err(Into::into));
    if let Err(e) = written {
        if partial.exists() {
            if let Err(rm) = fs::remove_file(&partial) {
                log::warn!("Failed to remove {:?}: {}", partial, rm);
            }
        }
        return Err(ViewerError::export(path, &e));
    }
    log::info!(
        "Exported {} vertices to {:?} (colors: {})",
        stamped.vertex_count(),
        path,
        stamped.colors.is_some()
    );

    Ok(())
}
