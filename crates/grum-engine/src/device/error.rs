/// High-level response after a frame-acquisition error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AcquireAction {
    /// The device was lost; tear down the device and surface tiers and
    /// recreate both before the next frame.
    RecoverDevice,
    /// The surface no longer matches the window; reconfigure it in place and
    /// skip the current frame.
    ReconfigureSurface,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

pub(crate) fn map_acquire_error(err: wgpu::SurfaceError) -> AcquireAction {
    match err {
        wgpu::SurfaceError::Lost => AcquireAction::RecoverDevice,
        wgpu::SurfaceError::Outdated => AcquireAction::ReconfigureSurface,
        wgpu::SurfaceError::Timeout => AcquireAction::SkipFrame,
        wgpu::SurfaceError::Other => AcquireAction::SkipFrame,
        wgpu::SurfaceError::OutOfMemory => AcquireAction::Fatal,
    }
}
