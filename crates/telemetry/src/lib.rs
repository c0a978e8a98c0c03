pub mod error;
pub mod pacer;
pub mod parse;
pub mod stats;
pub mod stream;
pub mod viewport;

pub use error::{ConfigError, StreamError};
pub use pacer::{FramePacer, Pace};
pub use parse::{FrameKind, LineParser, ParsedFrame};
pub use stats::RenderStats;
pub use stream::{LoopState, Presented, Screen, StopReason, StreamLoop, StreamSummary};
pub use viewport::{
    BALL_RADIUS, DEFAULT_HEIGHT, DEFAULT_REFRESH_RATE, DEFAULT_WIDTH, PADDLE_WIDTH, PixelFrame,
    Viewport,
};
