//! Render parameters and control availability.
//!
//! Both are pure functions of the current asset and presentation state, and
//! are recomputed after every load and every control change.

use rgb::RGB8;

use crate::{
    data::{AssetKind, GeometryBuffer, PresentationState, Style},
    viewer::CurrentAsset,
};

/// Where the renderer takes surface color from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    /// Renderer default color.
    Default,
    /// One explicit color.
    Uniform(RGB8),
    /// The buffer's per-vertex colors.
    VertexColors,
    /// The buffer's texture image.
    Texture,
}

/// Parameters of one render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    /// Draw style.
    pub style: Style,
    /// Whether polygon edges are drawn over the surface.
    pub show_edges: bool,
    /// Color source.
    pub color: ColorSource,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

/// Computes the render parameters for a buffer.
pub fn recompute_render_params(buffer: &GeometryBuffer, state: &PresentationState) -> RenderParams {
    match buffer.kind() {
        AssetKind::TexturedPlane => RenderParams {
            style: Style::Surface,
            show_edges: false,
            color: ColorSource::Texture,
            opacity: state.opacity(),
        },
        AssetKind::Mesh3D => {
            let color = match (state.color_override(), buffer.vertex_color()) {
                (Some(c), _) => ColorSource::Uniform(c),
                (None, Some(_)) => ColorSource::VertexColors,
                (None, None) => ColorSource::Default,
            };
            RenderParams {
                style: state.style(),
                show_edges: state.style() == Style::Surface,
                color,
                opacity: state.opacity(),
            }
        }
    }
}

/// Which user controls are enabled.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAvailability {
    /// Remove-background action.
    pub remove_background: bool,
    /// Save-as-mesh action.
    pub save_as_mesh: bool,
    /// Mesh color and reset-color buttons.
    pub mesh_color: bool,
    /// Opacity slider.
    pub opacity: bool,
}

/// Computes the enabled controls for the current asset.
pub fn recompute_availability(asset: Option<&CurrentAsset>) -> ControlAvailability {
    let asset = match asset {
        Some(asset) => asset,
        None => return ControlAvailability::default(),
    };
    let kind = asset.buffer().kind();
    ControlAvailability {
        remove_background: kind == AssetKind::TexturedPlane,
        save_as_mesh: asset.authoring().is_some(),
        mesh_color: kind == AssetKind::Mesh3D,
        opacity: true,
    }
}
