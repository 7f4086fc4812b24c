//! Core types shared by the pipeline.

mod driver;
mod kind;
mod shutdown;

pub use driver::BuildMode;
pub use kind::AssetKind;
pub use shutdown::setup_shutdown_handler;
