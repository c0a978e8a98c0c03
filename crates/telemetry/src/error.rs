use std::io;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("viewport width must be positive")]
    ZeroWidth,
    #[error("viewport height must be positive")]
    ZeroHeight,
    #[error("refresh rate must be a positive number of frames per second, got {0}")]
    InvalidRefreshRate(f64),
}

/// Failure of the stream loop. `E` is the error type of the [`Screen`](crate::Screen)
/// the loop renders into.
#[derive(Debug, thiserror::Error)]
pub enum StreamError<E>
where
    E: std::error::Error + 'static,
{
    #[error("failed to read telemetry: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write diagnostics: {0}")]
    Diagnostics(#[source] io::Error),
    #[error("failed to present frame: {0}")]
    Display(#[source] E),
}
