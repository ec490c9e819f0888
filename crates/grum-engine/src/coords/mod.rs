//! Coordinate and geometry types shared across the engine and the app.
//!
//! Canonical CPU space:
//! - Window pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! The path renderer converts to NDC in shaders using a viewport uniform.

mod transform;
mod vec2;
mod viewport;

pub use transform::Transform;
pub use vec2::Vec2;
pub use viewport::Viewport;
