mod config;
mod error;
mod render;
mod window;

use std::io;

use clap::Parser;
use pongviz::{FramePacer, LineParser, StreamLoop};

use config::{Args, ViewerConfig};
use window::WindowScreen;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ViewerConfig::from(Args::parse());
    let viewport = config.viewport()?;
    let screen = WindowScreen::open(&config, viewport)?;

    let mut stream = StreamLoop::new(
        io::stdin().lock(),
        screen,
        FramePacer::from_viewport(&viewport),
        io::stdout().lock(),
        LineParser::new(config.frame_kind),
        viewport,
    );
    let summary = stream.run()?;

    log::info!(
        "Rendered {} of {} lines ({} skipped, {} dropped), {:.1} fps, stopped on {:?}",
        summary.frames_rendered,
        summary.lines_read,
        summary.lines_skipped,
        summary.frames_dropped,
        summary.render_rate,
        summary.stop_reason
    );

    Ok(())
}
