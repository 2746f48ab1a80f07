//! Render surface without a window.

use std::path::Path;

use anyhow::bail;
use asset_viewer::{
    codec::RenderSurface, data::GeometryBuffer, render::RenderParams,
    util::bbox::OptionalBoundingBox3d,
};
use log::debug;
use rgb::RGB8;

/// Surface that logs render calls instead of drawing them.
#[derive(Default, Debug)]
pub struct HeadlessSurface {
    /// Number of render calls.
    render_calls: usize,
}

impl HeadlessSurface {
    /// Returns the number of render calls so far.
    pub fn render_calls(&self) -> usize {
        self.render_calls
    }
}

impl RenderSurface for HeadlessSurface {
    fn render(&mut self, buffer: &GeometryBuffer, params: &RenderParams) {
        self.render_calls += 1;
        debug!("render: buffer={:?}, params={:?}", buffer, params);
    }

    fn clear_scene(&mut self) {
        debug!("clear scene");
    }

    fn set_background(&mut self, color: RGB8) {
        debug!("background: {}", asset_viewer::data::format_hex_color(color));
    }

    fn reset_camera(&mut self, bounds: OptionalBoundingBox3d<f32>) {
        match bounds.bounding_box() {
            Some(bbox) => debug!(
                "camera: center={:?}, diagonal={}",
                bbox.center(),
                bbox.diagonal()
            ),
            None => debug!("camera: nothing to frame"),
        }
    }

    fn capture_screenshot(&mut self, path: &Path, _transparent: bool) -> anyhow::Result<()> {
        bail!("Headless surface cannot capture {:?}", path)
    }
}
