//! Viewer controller.
//!
//! Owns the current asset and its presentation state, and pushes a render
//! call to the surface after every load and every control change. Operations
//! are synchronous and must not overlap on one controller.

use std::path::{Path, PathBuf};

use rgb::RGB8;

use crate::{
    codec::{raster, BackgroundRemover, ImageCodec, MeshCodec, RenderSurface},
    data::{AuthoringMesh, GeometryBuffer, PresentationState, Style},
    error::{Result, ViewerError},
    exporter,
    loader::{self, LoadOptions},
    render::{self, ControlAvailability, RenderParams},
};

/// The asset currently shown.
#[derive(Debug, Clone)]
pub struct CurrentAsset {
    /// Source file.
    source: PathBuf,
    /// Display buffer.
    buffer: GeometryBuffer,
    /// Mesh kept for export. `None` for images.
    authoring: Option<AuthoringMesh>,
}

impl CurrentAsset {
    /// Returns the source file.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns the display buffer.
    pub fn buffer(&self) -> &GeometryBuffer {
        &self.buffer
    }

    /// Returns the authoring mesh.
    pub fn authoring(&self) -> Option<&AuthoringMesh> {
        self.authoring.as_ref()
    }
}

/// Viewer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Initial background color.
    pub background: RGB8,
    /// Load options.
    pub load: LoadOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            background: RGB8::new(0xcc, 0xcc, 0xcc),
            load: LoadOptions::default(),
        }
    }
}

/// Viewer controller.
pub struct ViewerController<S> {
    /// Render surface.
    surface: S,
    /// Mesh codec.
    mesh_codec: Box<dyn MeshCodec>,
    /// Image codec.
    image_codec: Box<dyn ImageCodec>,
    /// Background-removal service.
    remover: Option<Box<dyn BackgroundRemover>>,
    /// Load options.
    load_options: LoadOptions,
    /// Current asset.
    asset: Option<CurrentAsset>,
    /// Presentation state.
    state: PresentationState,
    /// Background color.
    background: RGB8,
    /// Outcome of the last operation.
    status: String,
}

impl<S: RenderSurface> ViewerController<S> {
    /// Creates a new `ViewerController` showing nothing.
    pub fn new(
        mut surface: S,
        mesh_codec: Box<dyn MeshCodec>,
        image_codec: Box<dyn ImageCodec>,
        config: ViewerConfig,
    ) -> Self {
        surface.set_background(config.background);
        surface.clear_scene();
        Self {
            surface,
            mesh_codec,
            image_codec,
            remover: None,
            load_options: config.load,
            asset: None,
            state: PresentationState::new(),
            background: config.background,
            status: String::from("Ready"),
        }
    }

    /// Sets the background-removal service.
    pub fn with_background_remover(mut self, remover: Box<dyn BackgroundRemover>) -> Self {
        self.remover = Some(remover);
        self
    }

    /// Returns the render surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the current asset.
    pub fn asset(&self) -> Option<&CurrentAsset> {
        self.asset.as_ref()
    }

    /// Returns the presentation state.
    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// Returns the background color.
    pub fn background(&self) -> RGB8 {
        self.background
    }

    /// Returns the outcome of the last operation.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the enabled controls.
    pub fn availability(&self) -> ControlAvailability {
        render::recompute_availability(self.asset.as_ref())
    }

    /// Returns the parameters of the current render call.
    pub fn render_params(&self) -> Option<RenderParams> {
        self.asset
            .as_ref()
            .map(|asset| render::recompute_render_params(&asset.buffer, &self.state))
    }

    /// Opens a model file, replacing the current asset.
    pub fn open_mesh(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let loaded = loader::load_mesh(&*self.mesh_codec, path, &self.load_options);
        self.install(path, loaded.map(|l| (l.buffer, Some(l.authoring))))
    }

    /// Opens an image file as a textured plane, replacing the current asset.
    pub fn open_image(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let loaded = loader::load_image(&*self.image_codec, path);
        self.install(path, loaded.map(|buffer| (buffer, None)))
    }

    /// Makes a load result current, or clears the viewer on failure.
    fn install(
        &mut self,
        path: &Path,
        loaded: Result<(GeometryBuffer, Option<AuthoringMesh>)>,
    ) -> Result<()> {
        // The previous asset is dropped either way.
        self.asset = None;
        match loaded {
            Ok((buffer, authoring)) => {
                let bounds = buffer.bbox();
                self.asset = Some(CurrentAsset {
                    source: path.to_owned(),
                    buffer,
                    authoring,
                });
                self.state.reset();
                self.refresh();
                self.surface.reset_camera(bounds);
                self.set_status(format!("Loaded {}", path.display()));
                Ok(())
            }
            Err(e) => {
                self.surface.clear_scene();
                log::error!("Failed to load {:?}: {}", path, e);
                self.status = format!("Error loading {}: {}", path.display(), e);
                Err(e)
            }
        }
    }

    /// Sets the draw style.
    pub fn set_style(&mut self, style: Style) {
        self.state.set_style(style);
        self.refresh();
    }

    /// Sets the mesh color override.
    pub fn set_mesh_color(&mut self, color: RGB8) -> Result<()> {
        self.require_mesh("Mesh color")?;
        self.state.set_color_override(Some(color));
        self.refresh();
        Ok(())
    }

    /// Clears the mesh color override.
    pub fn reset_mesh_color(&mut self) -> Result<()> {
        self.require_mesh("Reset color")?;
        self.state.set_color_override(None);
        self.refresh();
        Ok(())
    }

    /// Sets the opacity from a `0..=100` slider position.
    pub fn set_opacity_percent(&mut self, percent: u8) -> Result<()> {
        if self.asset.is_none() {
            return Err(ViewerError::Unavailable("Opacity"));
        }
        self.state.set_opacity_percent(percent);
        self.refresh();
        Ok(())
    }

    /// Sets the background color.
    pub fn set_background(&mut self, color: RGB8) {
        self.background = color;
        self.surface.set_background(color);
    }

    /// Saves the current mesh with its vertex colors.
    ///
    /// A failure leaves the current asset untouched.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let asset = self.asset.as_ref();
        let authoring = match asset.and_then(|asset| asset.authoring.as_ref()) {
            Some(authoring) => authoring,
            None => {
                let e = ViewerError::Unavailable("Save as mesh");
                self.status = e.to_string();
                return Err(e);
            }
        };
        let colors = asset.and_then(|asset| asset.buffer.vertex_color());
        match exporter::export(&*self.mesh_codec, authoring, colors, path) {
            Ok(()) => {
                self.set_status(format!("Saved {}", path.display()));
                Ok(())
            }
            Err(e) => {
                log::error!("{}", e);
                self.status = e.to_string();
                Err(e)
            }
        }
    }

    /// Replaces the current image with its background removed.
    ///
    /// A failure leaves the current asset untouched.
    pub fn remove_background(&mut self) -> Result<()> {
        let result = self.remove_background_impl();
        match &result {
            Ok(()) => self.set_status(String::from("Background removed")),
            Err(e) => {
                log::error!("{}", e);
                self.status = e.to_string();
            }
        }
        result
    }

    /// Runs the background-removal service and rebuilds the plane.
    fn remove_background_impl(&mut self) -> Result<()> {
        let image = self
            .asset
            .as_ref()
            .and_then(|asset| asset.buffer.texture_image())
            .ok_or(ViewerError::Unavailable("Remove background"))?;
        let remover = self
            .remover
            .as_ref()
            .ok_or_else(|| ViewerError::BackgroundRemoval("no service configured".into()))?;

        let output = raster::encode_png(image)
            .and_then(|png| remover.remove_background(&png))
            .and_then(|png| raster::decode_png(&png))
            .map_err(|e| ViewerError::BackgroundRemoval(format!("{:#}", e)))?;
        let buffer = loader::plane_from_image(output)?;

        if let Some(asset) = self.asset.as_mut() {
            asset.buffer = buffer;
        }
        self.refresh();
        Ok(())
    }

    /// Saves a screenshot with a transparent background.
    pub fn screenshot(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match self.surface.capture_screenshot(path, true) {
            Ok(()) => {
                self.set_status(format!("Screenshot saved to {}", path.display()));
                Ok(())
            }
            Err(e) => {
                let e = ViewerError::Screenshot {
                    path: path.to_owned(),
                    message: format!("{:#}", e),
                };
                log::error!("{}", e);
                self.status = e.to_string();
                Err(e)
            }
        }
    }

    /// Redraws the current asset.
    fn refresh(&mut self) {
        self.surface.clear_scene();
        if let Some(asset) = &self.asset {
            let params = render::recompute_render_params(&asset.buffer, &self.state);
            log::debug!("Rendering {:?} with {:?}", asset.source, params);
            self.surface.render(&asset.buffer, &params);
        }
    }

    /// Fails unless the current asset is a mesh.
    fn require_mesh(&self, control: &'static str) -> Result<()> {
        if self.availability().mesh_color {
            Ok(())
        } else {
            Err(ViewerError::Unavailable(control))
        }
    }

    /// Records a successful outcome.
    fn set_status(&mut self, status: String) {
        log::info!("{}", status);
        self.status = status;
    }
}
