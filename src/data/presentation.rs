//! Presentation state.

use rgb::RGB8;

/// Draw style.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Style {
    /// Filled surface.
    #[default]
    Surface,
    /// Edges only.
    Wireframe,
    /// Vertices only.
    Points,
}

/// User-controlled presentation of the current asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationState {
    /// Draw style.
    style: Style,
    /// Explicit mesh color, winning over vertex colors.
    color_override: Option<RGB8>,
    /// Opacity in `[0, 1]`.
    opacity: f32,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            style: Style::Surface,
            color_override: None,
            opacity: 1.0,
        }
    }
}

impl PresentationState {
    /// Creates a new `PresentationState` with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the draw style.
    pub fn style(&self) -> Style {
        self.style
    }

    /// Sets the draw style.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Returns the color override.
    pub fn color_override(&self) -> Option<RGB8> {
        self.color_override
    }

    /// Sets or clears the color override.
    pub fn set_color_override(&mut self, color: Option<RGB8>) {
        self.color_override = color;
    }

    /// Returns the opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Sets the opacity, clamped to `[0, 1]`. NaN is ignored.
    pub fn set_opacity(&mut self, opacity: f32) {
        if opacity.is_nan() {
            log::warn!("Ignoring NaN opacity");
            return;
        }
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Sets the opacity from a `0..=100` slider position.
    pub fn set_opacity_percent(&mut self, percent: u8) {
        self.set_opacity(f32::from(percent.min(100)) / 100.0);
    }
}
