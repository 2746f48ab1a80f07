//! Asset viewer.

use anyhow::Context;
use asset_viewer::{
    codec::{native::NativeMeshCodec, raster},
    loader::LoadOptions,
    CliOpt, ViewerConfig, ViewerController,
};
use clap::Parser;
use log::info;

use self::headless::HeadlessSurface;

mod headless;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("version: {}", env!("CARGO_PKG_VERSION"));

    let opt = CliOpt::parse();
    run(&opt)
}

/// Opens the asset, applies the requested presentation and writes outputs.
fn run(opt: &CliOpt) -> anyhow::Result<()> {
    let config = ViewerConfig {
        background: opt.background,
        load: LoadOptions {
            accept_point_clouds: opt.accept_point_clouds,
        },
    };
    let mut viewer = ViewerController::new(
        HeadlessSurface::default(),
        Box::new(NativeMeshCodec::new()),
        Box::new(raster::ImageCrateCodec::new()),
        config,
    );

    let opened = if opt.image || raster::is_image_path(&opt.path) {
        viewer.open_image(&opt.path)
    } else {
        viewer.open_mesh(&opt.path)
    };
    opened.with_context(|| format!("Failed to open {:?}", opt.path))?;

    viewer.set_style(opt.style);
    if let Some(color) = opt.color {
        viewer
            .set_mesh_color(color)
            .context("Failed to apply the mesh color")?;
    }
    viewer.set_opacity_percent(opt.opacity)?;
    info!("Controls: {:?}", viewer.availability());
    info!("Render: {:?}", viewer.render_params());

    if let Some(save) = &opt.save {
        viewer
            .save_as(save)
            .with_context(|| format!("Failed to save {:?}", save))?;
    }
    if let Some(screenshot) = &opt.screenshot {
        viewer.screenshot(screenshot)?;
    }
    info!(
        "{} render calls issued; status: {}",
        viewer.surface().render_calls(),
        viewer.status()
    );

    Ok(())
}
