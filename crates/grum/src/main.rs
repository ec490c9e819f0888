use anyhow::Result;
use winit::dpi::PhysicalSize;

use grum_engine::logging::{init_logging, LoggingConfig};
use grum_engine::window::{Runtime, RuntimeConfig};

mod app;
mod character;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("starting grum");

    let app = app::GrumApp::new()?;

    Runtime::run(
        RuntimeConfig {
            title: "Grum".to_string(),
            initial_size: PhysicalSize::new(960, 720),
        },
        app,
    )
}
