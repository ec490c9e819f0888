//! GPU rendering subsystem.
//!
//! The path renderer consumes an ordered list of mesh draws and issues GPU
//! commands via wgpu. It owns its GPU resources (pipeline, buffers) and
//! rebuilds them whenever the device generation changes, so nothing from a
//! lost device outlives it.
//!
//! Convention:
//! - CPU geometry is in the shape's local space; a per-draw affine transform
//!   maps it to window pixels (top-left origin, +Y down).
//! - The vertex shader converts window pixels to NDC using a viewport uniform.

mod ctx;
mod path;

pub use ctx::{RenderCtx, RenderTarget};
pub use path::{MeshId, PathDraw, PathRenderer};
