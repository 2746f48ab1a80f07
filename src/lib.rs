//! Single-asset mesh and image viewer core.
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub use self::{
    cli_opt::CliOpt,
    error::{Result, ViewerError},
    viewer::{CurrentAsset, ViewerConfig, ViewerController},
};

mod cli_opt;
pub mod codec;
pub mod data;
mod error;
pub mod exporter;
pub mod loader;
pub mod render;
pub mod transcode;
pub mod util;
pub mod viewer;
