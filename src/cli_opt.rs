//! CLI options.

use std::path::PathBuf;

use clap::Parser;
use rgb::RGB8;

use crate::data::{parse_hex_color, Style};

/// CLI options.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct CliOpt {
    /// Model or image file.
    pub path: PathBuf,
    /// Open the file as a 2D image even if the extension is not recognised.
    #[arg(long)]
    pub image: bool,
    /// Draw style.
    #[arg(long, value_enum, default_value_t = Style::Surface)]
    pub style: Style,
    /// Mesh color override, `#rrggbb`.
    #[arg(long, value_parser = parse_color)]
    pub color: Option<RGB8>,
    /// Opacity slider position.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub opacity: u8,
    /// Background color, `#rrggbb`.
    #[arg(long, value_parser = parse_color, default_value = "#cccccc")]
    pub background: RGB8,
    /// Save the mesh to this file; the extension picks the format.
    #[arg(long)]
    pub save: Option<PathBuf>,
    /// Save a screenshot to this file.
    #[arg(long)]
    pub screenshot: Option<PathBuf>,
    /// Load files holding only vertices as faceless meshes.
    #[arg(long)]
    pub accept_point_clouds: bool,
}

/// Parses a `#rrggbb` argument.
fn parse_color(s: &str) -> Result<RGB8, String> {
    parse_hex_color(s).ok_or_else(|| format!("expected a #rrggbb color, got {:?}", s))
}
