use crate::coords::Vec2;

use super::Color;

/// A single gradient stop.
///
/// `t` is expected in [0, 1] in typical usage, but is not strictly enforced.
/// The renderer clamps outside the stop range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Radial gradient definition in the geometry's local coordinate space.
///
/// Semantics:
/// - `center` is the ellipse center; `focal` is the gradient-origin offset
///   from the center (zero for a centered gradient).
/// - `radii` are the ellipse half-axes; the last stop lies on the ellipse.
/// - Stops are premultiplied linear colors, ordered by `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub focal: Vec2,
    pub radii: Vec2,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: Vec2, focal: Vec2, radii: Vec2, stops: Vec<ColorStop>) -> Self {
        Self {
            center,
            focal,
            radii,
            stops,
        }
    }

    /// Centered circular gradient of radius `r`.
    pub fn centered(r: f32, stops: Vec<ColorStop>) -> Self {
        Self::new(Vec2::zero(), Vec2::zero(), Vec2::new(r, r), stops)
    }

    /// Returns true when the gradient definition is structurally usable.
    ///
    /// The renderer may still impose additional constraints (maximum stop
    /// count, sorted positions).
    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.focal.is_finite()
            && self.radii.is_finite()
            && self.radii.x > 0.0
            && self.radii.y > 0.0
            && self.stops.len() >= 2
            && self
                .stops
                .iter()
                .all(|s| s.t.is_finite() && s.color.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops() -> Vec<ColorStop> {
        vec![
            ColorStop::new(0.0, Color::opaque(0.0, 1.0, 0.0)),
            ColorStop::new(1.0, Color::opaque(0.0, 0.3, 0.0)),
        ]
    }

    #[test]
    fn centered_gradient_is_valid() {
        assert!(RadialGradient::centered(150.0, stops()).is_valid());
    }

    #[test]
    fn single_stop_is_invalid() {
        let g = RadialGradient::centered(10.0, vec![stops()[0]]);
        assert!(!g.is_valid());
    }

    #[test]
    fn zero_radius_is_invalid() {
        let g = RadialGradient::centered(0.0, stops());
        assert!(!g.is_valid());
    }
}
