use anyhow::Result;

/// Outcome of a surface-tier operation.
///
/// Device loss is the only expected-and-recoverable GPU failure; everything
/// else surfaces as an error and escalates.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceStatus {
    Ok,
    DeviceLost,
}

/// Presentation-provider seam between the lifecycle state machine and the
/// concrete GPU backend.
///
/// Implementations own the factory-tier state (instance, window binding) and
/// hand device/surface tier objects to the lifecycle manager, which controls
/// when each tier is created, resized, and released.
pub trait GpuPort {
    type Device;
    type Surface;

    /// Creates the rendering device.
    ///
    /// Implementations should prefer a hardware device and fall back to a
    /// software device before failing.
    fn create_device(&mut self) -> Result<Self::Device>;

    /// Creates a presentation surface bound to the window at the given size.
    fn create_surface(
        &mut self,
        device: &Self::Device,
        width: u32,
        height: u32,
    ) -> Result<Self::Surface>;

    /// Resizes an existing surface in place, leaving the device tier untouched.
    fn resize_surface(
        &mut self,
        device: &Self::Device,
        surface: &mut Self::Surface,
        width: u32,
        height: u32,
    ) -> SurfaceStatus;
}
