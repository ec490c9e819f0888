//! wgpu backing for the resource lifecycle.
//!
//! This module is responsible for:
//! - creating the wgpu Instance and the window-bound surface handle (factory tier)
//! - creating the Adapter/Device/Queue, hardware first with a software
//!   fallback (device tier)
//! - configuring the swap chain and acquiring frames (surface tier)
//!
//! Tier ownership and recovery ordering live in `crate::lifecycle`; this
//! module only provides the `GpuPort` implementation and frame plumbing.

mod error;
mod frame;
mod gpu;
mod surface;

pub use error::AcquireAction;
pub use frame::SurfaceFrame;
pub use gpu::{GpuDevice, WgpuPort};
pub use surface::GpuSurface;
