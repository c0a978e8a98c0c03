use clap::Parser;
use pongviz::{
    ConfigError, DEFAULT_HEIGHT, DEFAULT_REFRESH_RATE, DEFAULT_WIDTH, FrameKind, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "visualize")]
#[command(about = "View the pong ball and paddle from telemetry on stdin")]
pub struct Args {
    #[arg(long, default_value_t = DEFAULT_WIDTH, help = "Window width in pixels")]
    pub width: u32,

    #[arg(long, default_value_t = DEFAULT_HEIGHT, help = "Window height in pixels")]
    pub height: u32,

    #[arg(long, default_value_t = DEFAULT_REFRESH_RATE, help = "Updates per second")]
    pub speed: f64,

    #[arg(long, help = "Expect `x: .., y: ..` lines without a paddle field")]
    pub ball_only: bool,

    #[arg(long, default_value = "pongviz", help = "Window title")]
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: f64,
    pub frame_kind: FrameKind,
    pub title: String,
}

impl From<Args> for ViewerConfig {
    fn from(args: Args) -> Self {
        let frame_kind = if args.ball_only {
            FrameKind::BallOnly
        } else {
            FrameKind::BallAndPaddle
        };

        Self {
            width: args.width,
            height: args.height,
            refresh_rate: args.speed,
            frame_kind,
            title: args.title,
        }
    }
}

impl ViewerConfig {
    pub fn viewport(&self) -> Result<Viewport, ConfigError> {
        Viewport::new(self.width, self.height, self.refresh_rate)
    }
}
