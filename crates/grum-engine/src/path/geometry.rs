use crate::coords::Vec2;

/// Whether a geometry describes a filled region or only its outline.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FillMode {
    Filled,
    Hollow,
}

/// Whether the contour closes back to its start point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Closure {
    Closed,
    Open,
}

/// Sweep direction of an elliptical arc, in y-down pixel space.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Sweep {
    Clockwise,
    CounterClockwise,
}

/// Which of the two candidate arcs between the endpoints is taken.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ArcSize {
    Small,
    Large,
}

/// One curve segment of a contour.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Segment {
    /// Cubic Bézier to `to` with control points `c1`, `c2`.
    Cubic { c1: Vec2, c2: Vec2, to: Vec2 },
    /// Elliptical arc to `to` with half-axes `radii`.
    Arc {
        to: Vec2,
        radii: Vec2,
        x_rotation: f32,
        sweep: Sweep,
        size: ArcSize,
    },
}

/// An immutable vector shape: start point, ordered segments, fill/closure tags.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGeometry {
    start: Vec2,
    segments: Vec<Segment>,
    fill: FillMode,
    closure: Closure,
}

impl PathGeometry {
    pub fn builder(start: Vec2) -> PathBuilder {
        PathBuilder {
            start,
            segments: Vec::new(),
        }
    }

    /// A filled circle of radius `r` centered on the origin, as two arcs.
    pub fn circle(r: f32) -> PathGeometry {
        Self::builder(Vec2::new(-r, 0.0))
            .arc(
                Vec2::new(r, 0.0),
                Vec2::new(r, r),
                Sweep::Clockwise,
                ArcSize::Small,
            )
            .arc(
                Vec2::new(-r, 0.0),
                Vec2::new(r, r),
                Sweep::Clockwise,
                ArcSize::Small,
            )
            .closed(FillMode::Filled)
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn fill_mode(&self) -> FillMode {
        self.fill
    }

    #[inline]
    pub fn closure(&self) -> Closure {
        self.closure
    }
}

/// Builder for `PathGeometry`, consumed by `closed`/`open`.
#[derive(Debug)]
pub struct PathBuilder {
    start: Vec2,
    segments: Vec<Segment>,
}

impl PathBuilder {
    pub fn cubic(mut self, c1: Vec2, c2: Vec2, to: Vec2) -> Self {
        self.segments.push(Segment::Cubic { c1, c2, to });
        self
    }

    pub fn arc(mut self, to: Vec2, radii: Vec2, sweep: Sweep, size: ArcSize) -> Self {
        self.segments.push(Segment::Arc {
            to,
            radii,
            x_rotation: 0.0,
            sweep,
            size,
        });
        self
    }

    pub fn closed(self, fill: FillMode) -> PathGeometry {
        self.finish(fill, Closure::Closed)
    }

    pub fn open(self, fill: FillMode) -> PathGeometry {
        self.finish(fill, Closure::Open)
    }

    fn finish(self, fill: FillMode, closure: Closure) -> PathGeometry {
        PathGeometry {
            start: self.start,
            segments: self.segments,
            fill,
            closure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_records_segments_and_tags() {
        let g = PathGeometry::builder(Vec2::new(1.0, 2.0))
            .cubic(Vec2::zero(), Vec2::zero(), Vec2::new(3.0, 4.0))
            .arc(
                Vec2::new(5.0, 6.0),
                Vec2::new(2.0, 1.0),
                Sweep::CounterClockwise,
                ArcSize::Small,
            )
            .open(FillMode::Hollow);

        assert_eq!(g.start(), Vec2::new(1.0, 2.0));
        assert_eq!(g.segments().len(), 2);
        assert_eq!(g.fill_mode(), FillMode::Hollow);
        assert_eq!(g.closure(), Closure::Open);
    }

    #[test]
    fn circle_is_two_closed_arcs() {
        let c = PathGeometry::circle(8.0);
        assert_eq!(c.segments().len(), 2);
        assert_eq!(c.closure(), Closure::Closed);
        assert_eq!(c.fill_mode(), FillMode::Filled);
        assert!(matches!(c.segments()[0], Segment::Arc { .. }));
    }
}
