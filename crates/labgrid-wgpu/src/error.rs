//! Error types for labgrid-wgpu.

use thiserror::Error;

/// Result type for viewer setup.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while starting the viewer.
///
/// Per-frame surface errors are not here; the event loop handles those
/// directly and keeps running.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid grid configuration.
    #[error("grid error: {0}")]
    Model(#[from] labgrid_model::Error),

    /// Config file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The window could not back a wgpu surface.
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// No GPU adapter can present to the window.
    #[error("no compatible GPU adapter found")]
    NoAdapter,

    /// The adapter refused to open a device.
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    /// The surface reports no usable texture format.
    #[error("surface supports no texture formats")]
    NoSurfaceFormat,

    /// The event loop failed to start or exited abnormally.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The window could not be created.
    #[error("window error: {0}")]
    Os(#[from] winit::error::OsError),
}
