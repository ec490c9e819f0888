use grum_engine::coords::Vec2;
use grum_engine::path::{ArcSize, FillMode, PathGeometry, Sweep};

#[inline]
fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// The body silhouette: a closed contour of cubic Béziers, traced clockwise
/// from the top of the head, down the right side, across the feet, and back
/// up the left. Horns and ear notches are part of the same contour.
pub fn body() -> PathGeometry {
    PathGeometry::builder(v(-2.0, -74.5))
        .cubic(v(7.7, -74.5), v(14.5, -74.4), v(23.1, -71.9))
        .cubic(v(30.2, -69.8), v(37.5, -67.6), v(40.1, -62.4))
        .cubic(v(40.4, -61.7), v(41.2, -59.8), v(42.3, -59.8))
        .cubic(v(43.9, -59.8), v(44.9, -63.6), v(45.6, -65.4))
        .cubic(v(48.6, -73.1), v(60.3, -79.3), v(71.1, -78.8))
        .cubic(v(72.0, -78.8), v(85.9, -77.8), v(92.0, -67.3))
        .cubic(v(99.2, -54.9), v(90.5, -37.9), v(83.2, -30.1))
        .cubic(v(79.0, -25.6), v(69.8, -18.0), v(69.8, -18.0))
        .cubic(v(71.9, -7.4), v(74.7, 2.9), v(78.2, 13.0))
        .cubic(v(84.3, 30.5), v(88.2, 35.3), v(91.3, 49.6))
        .cubic(v(94.0, 61.8), v(96.2, 71.7), v(92.3, 83.2))
        .cubic(v(87.5, 97.7), v(76.5, 105.6), v(72.4, 108.4))
        .cubic(v(62.1, 115.6), v(52.4, 117.1), v(37.4, 119.5))
        .cubic(v(26.8, 121.2), v(16.3, 121.3), v(4.1, 121.5))
        .cubic(v(0.3, 121.6), v(-4.0, 121.6), v(-8.9, 121.5))
        .cubic(v(-21.2, 121.3), v(-31.7, 121.2), v(-42.3, 119.5))
        .cubic(v(-56.1, 117.4), v(-66.5, 115.9), v(-77.3, 108.4))
        .cubic(v(-81.3, 105.6), v(-92.4, 97.7), v(-97.2, 83.2))
        .cubic(v(-101.0, 71.7), v(-98.9, 61.8), v(-96.2, 49.6))
        .cubic(v(-93.6, 37.5), v(-89.4, 27.8), v(-83.1, 13.0))
        .cubic(v(-77.3, -0.7), v(-70.4, -14.5), v(-74.6, -18.0))
        .cubic(v(-74.6, -18.0), v(-74.6, -18.0), v(-74.6, -18.0))
        .cubic(v(-80.2, -22.6), v(-86.6, -28.7), v(-88.0, -30.1))
        .cubic(v(-92.9, -35.0), v(-104.8, -53.6), v(-96.8, -67.3))
        .cubic(v(-90.7, -77.8), v(-76.8, -78.7), v(-75.9, -78.8))
        .cubic(v(-65.1, -79.3), v(-53.4, -73.1), v(-50.4, -65.4))
        .cubic(v(-49.8, -63.6), v(-48.8, -59.8), v(-47.2, -59.8))
        .cubic(v(-46.0, -59.8), v(-45.2, -61.7), v(-44.9, -62.4))
        .cubic(v(-42.4, -67.6), v(-35.0, -69.8), v(-27.9, -71.9))
        .cubic(v(-19.0, -74.5), v(-12.0, -74.5), v(-2.0, -74.55))
        .closed(FillMode::Filled)
}

/// The nose: a small closed three-curve blob under the eyes.
pub fn nose() -> PathGeometry {
    PathGeometry::builder(v(0.0, 38.3))
        .cubic(v(1.8, 40.9), v(16.2, 25.1), v(14.6, 23.0))
        .cubic(v(15.3, 18.9), v(-16.4, 19.2), v(-16.3, 22.3))
        .cubic(v(-16.7, 26.2), v(-0.7, 40.9), v(0.0, 38.33))
        .closed(FillMode::Filled)
}

/// Held-button mouth: a shallow arc bowing downward (corners up).
pub fn smile() -> PathGeometry {
    PathGeometry::builder(v(-40.0, 75.0))
        .arc(
            v(40.0, 75.0),
            v(10.0, 7.0),
            Sweep::CounterClockwise,
            ArcSize::Small,
        )
        .open(FillMode::Hollow)
}

/// Resting mouth: a flatter arc bowing the other way (corners down).
///
/// The two mouths deliberately use different radii, not mirrored ones; the
/// frown is flatter than the smile.
pub fn frown() -> PathGeometry {
    PathGeometry::builder(v(-40.0, 75.0))
        .arc(
            v(40.0, 75.0),
            v(8.0, 3.0),
            Sweep::Clockwise,
            ArcSize::Small,
        )
        .open(FillMode::Hollow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grum_engine::path::{Closure, Segment};

    #[test]
    fn body_is_a_closed_filled_thirty_segment_contour() {
        let b = body();
        assert_eq!(b.segments().len(), 30);
        assert_eq!(b.closure(), Closure::Closed);
        assert_eq!(b.fill_mode(), FillMode::Filled);
        assert!(b
            .segments()
            .iter()
            .all(|s| matches!(s, Segment::Cubic { .. })));
    }

    #[test]
    fn body_contour_nearly_returns_to_its_start() {
        let b = body();
        let Segment::Cubic { to, .. } = b.segments()[29] else {
            panic!("last segment must be a cubic");
        };
        assert!((to.x - b.start().x).abs() < 0.1);
        assert!((to.y - b.start().y).abs() < 0.1);
    }

    #[test]
    fn nose_is_three_closed_cubics() {
        let n = nose();
        assert_eq!(n.segments().len(), 3);
        assert_eq!(n.closure(), Closure::Closed);
        assert_eq!(n.fill_mode(), FillMode::Filled);
    }

    #[test]
    fn mouths_share_endpoints_but_differ_in_curvature() {
        let s = smile();
        let f = frown();

        assert_eq!(s.start(), f.start());
        let (Segment::Arc { to: s_to, radii: s_radii, sweep: s_sweep, .. },
             Segment::Arc { to: f_to, radii: f_radii, sweep: f_sweep, .. }) =
            (s.segments()[0], f.segments()[0])
        else {
            panic!("mouths must be single arcs");
        };

        assert_eq!(s_to, f_to);
        assert_ne!(s_radii, f_radii, "mouths are not mirror images");
        assert_eq!(s_sweep, Sweep::CounterClockwise);
        assert_eq!(f_sweep, Sweep::Clockwise);
    }

    #[test]
    fn mouths_are_open_outlines() {
        for m in [smile(), frown()] {
            assert_eq!(m.closure(), Closure::Open);
            assert_eq!(m.fill_mode(), FillMode::Hollow);
        }
    }

    #[test]
    fn figure_geometries_tessellate() {
        assert!(!body().fill_mesh(0.02).unwrap().is_empty());
        assert!(!body().stroke_mesh(1.0, 0.02).unwrap().is_empty());
        assert!(!nose().fill_mesh(0.02).unwrap().is_empty());
        assert!(!smile().stroke_mesh(3.0, 0.02).unwrap().is_empty());
        assert!(!frown().stroke_mesh(3.0, 0.02).unwrap().is_empty());
    }
}
