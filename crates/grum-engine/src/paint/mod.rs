//! Paint model shared between the character app and the path renderer.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - paint sources (solid, radial gradient)
//!
//! Paints are plain descriptions. Their GPU-side realizations are
//! device-dependent and rebuilt by the renderer when the device tier is
//! recreated after a device loss.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, RadialGradient};

/// Paint source for filling or stroking geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Radial(RadialGradient),
}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        match self {
            Paint::Solid(c) => c.a >= 1.0,
            Paint::Radial(g) => g.stops.iter().all(|s| s.color.a >= 1.0),
        }
    }
}
