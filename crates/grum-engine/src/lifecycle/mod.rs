//! GPU resource lifecycle.
//!
//! Resources live in three tiers with independent lifetimes:
//! - factory tier: the port itself (instance, static geometry) — permanent
//! - device tier: rendering device — invalidated by device loss
//! - surface tier: swap chain — invalidated by device loss and by resizes
//!
//! `ResourceLifecycle` owns the device and surface tiers and walks them
//! forward to a drawable state through a single idempotent entry point.
//! The concrete GPU backing is injected through the `GpuPort` trait, which
//! keeps the state machine testable without a GPU.

mod manager;
mod port;

pub use manager::{LifecycleState, ResourceLifecycle};
pub use port::{GpuPort, SurfaceStatus};
