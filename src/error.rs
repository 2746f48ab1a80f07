//! Errors.

use std::path::PathBuf;

/// Error kinds produced by the viewer core.
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    /// The decoded geometry has no vertices.
    #[error("Decoded geometry has no vertices")]
    EmptyGeometry,

    /// The decoded object is not something the current operation can display.
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// A color array does not have one entry per vertex.
    #[error("Color array has {colors} entries but the mesh has {vertices} vertices")]
    ColorSizeMismatch {
        /// Number of colors.
        colors: usize,
        /// Number of vertices.
        vertices: usize,
    },

    /// A flat color buffer cannot be split into 3- or 4-channel entries.
    #[error("Invalid color layout: {len} values with {channels} channels")]
    InvalidColorLayout {
        /// Channels per entry.
        channels: usize,
        /// Number of scalar values.
        len: usize,
    },

    /// A codec failed to decode the file.
    #[error("Failed to decode {path:?}: {message}")]
    Decode {
        /// Source path.
        path: PathBuf,
        /// Underlying message.
        message: String,
    },

    /// No codec handles the file extension.
    #[error("Unsupported file format: {path:?}")]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
    },

    /// Writing the mesh failed.
    #[error("Failed to export {path:?}: {message}")]
    Export {
        /// Destination path.
        path: PathBuf,
        /// Underlying message.
        message: String,
    },

    /// The background-removal service failed.
    #[error("Background removal failed: {0}")]
    BackgroundRemoval(String),

    /// The render surface failed to capture a screenshot.
    #[error("Failed to save screenshot {path:?}: {message}")]
    Screenshot {
        /// Destination path.
        path: PathBuf,
        /// Underlying message.
        message: String,
    },

    /// The operation is disabled for the current asset.
    #[error("{0} is not available for the current asset")]
    Unavailable(&'static str),
}

impl ViewerError {
    /// Creates a `Decode` error from a collaborator error.
    pub(crate) fn decode(path: impl Into<PathBuf>, e: &anyhow::Error) -> Self {
        ViewerError::Decode {
            path: path.into(),
            message: format!("{:#}", e),
        }
    }

    /// Creates an `Export` error from a collaborator error.
    pub(crate) fn export(path: impl Into<PathBuf>, e: &anyhow::Error) -> Self {
        ViewerError::Export {
            path: path.into(),
            message: format!("{:#}", e),
        }
    }
}

/// Result type of the viewer core.
pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
