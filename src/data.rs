//! Asset data.

pub use self::{
    authoring::{AuthoringMesh, DecodedMesh},
    color::{format_hex_color, parse_hex_color, ColorArray, ColorValues},
    geometry::{AssetKind, GeometryBuffer},
    presentation::{PresentationState, Style},
};

mod authoring;
mod color;
mod geometry;
mod presentation;
