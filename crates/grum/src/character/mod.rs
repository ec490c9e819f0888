//! The character's look: geometry tables, colors, and the pupil solver.
//!
//! All geometry lives in a local model space centered on the body. The app
//! maps it to window pixels with a uniform scale + recentering transform.

mod eyes;
mod figure;

use std::time::Duration;

use grum_engine::coords::Vec2;
use grum_engine::paint::{Color, ColorStop, RadialGradient};
use grum_engine::path::PathGeometry;

pub use eyes::pupil_center;
pub use figure::{body, frown, nose, smile};

// Eye layout, in model units.
pub const EYE_X_OFFSET: f32 = 43.0;
pub const EYE_Y_OFFSET: f32 = -12.0;
pub const EYE_RADIUS: f32 = 34.0;
pub const PUPIL_RADIUS: f32 = 8.0;

// Model-to-window mapping and animation.
pub const BODY_SCALE: f32 = 3.0;
pub const ROCK_PERIOD: Duration = Duration::from_secs(2);
pub const ROCK_AMPLITUDE_DEG: f32 = 10.0;

// Stroke widths in model units; scaled up with the body.
pub const OUTLINE_WIDTH: f32 = 1.0;
pub const MOUTH_WIDTH: f32 = 3.0;

pub fn background() -> Color {
    Color::opaque(0.8, 0.76, 0.89)
}

pub fn primary() -> Color {
    Color::opaque(0.0, 0.0, 0.0)
}

pub fn nose_fill() -> Color {
    Color::opaque(0.4, 0.4, 0.4)
}

/// Green radial gradient filling the body, darkening outward.
pub fn body_gradient() -> RadialGradient {
    RadialGradient::centered(
        150.0,
        vec![
            ColorStop::new(0.0, Color::opaque(0.0, 1.0, 0.0)),
            ColorStop::new(0.6, Color::opaque(0.0, 0.7, 0.0)),
            ColorStop::new(1.0, Color::opaque(0.0, 0.3, 0.0)),
        ],
    )
}

/// Eye fill: white interior with a black rim from the last stop.
pub fn eye_gradient() -> RadialGradient {
    RadialGradient::centered(
        EYE_RADIUS,
        vec![
            ColorStop::new(0.9, Color::opaque(1.0, 1.0, 1.0)),
            ColorStop::new(1.0, Color::opaque(0.0, 0.0, 0.0)),
        ],
    )
}

/// Eye white, centered on the eye's own origin.
pub fn eye_shape() -> PathGeometry {
    PathGeometry::circle(EYE_RADIUS)
}

/// Pupil disc, centered on the solved pupil position.
pub fn pupil_shape() -> PathGeometry {
    PathGeometry::circle(PUPIL_RADIUS)
}

/// Eye centers in model units, left then right.
pub fn eye_centers() -> [Vec2; 2] {
    [
        Vec2::new(-EYE_X_OFFSET, EYE_Y_OFFSET),
        Vec2::new(EYE_X_OFFSET, EYE_Y_OFFSET),
    ]
}
