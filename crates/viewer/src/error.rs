use std::io;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    UnsupportedSurface,
    #[error("display did not provide a window within {0:?}")]
    WindowTimeout(std::time::Duration),
    #[error("window was closed before it finished opening")]
    ClosedDuringStartup,
    #[error("graphics device ran out of memory")]
    OutOfMemory,
}
