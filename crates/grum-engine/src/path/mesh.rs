use anyhow::{Context, Result};
use lyon::geom::ArcFlags;
use lyon::math::{point, vector, Angle};
use lyon::path::builder::SvgPathBuilder;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, StrokeOptions,
    StrokeTessellator, StrokeVertex, VertexBuffers,
};

use super::geometry::{ArcSize, Closure, PathGeometry, Segment, Sweep};

/// An indexed triangle list in the geometry's local coordinate space.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl Mesh {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl PathGeometry {
    /// Tessellates the filled interior of the contour.
    pub fn fill_mesh(&self, tolerance: f32) -> Result<Mesh> {
        let path = self.to_lyon();

        let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
        let options = FillOptions::tolerance(tolerance.clamp(0.005, 5.0))
            .with_fill_rule(FillRule::NonZero);

        FillTessellator::new()
            .tessellate_path(
                &path,
                &options,
                &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| v.position().to_array()),
            )
            .map_err(|e| anyhow::anyhow!("{e:?}"))
            .context("fill tessellation failed")?;

        Ok(Mesh {
            vertices: buffers.vertices,
            indices: buffers.indices,
        })
    }

    /// Tessellates the contour's outline at the given stroke width.
    ///
    /// The width is in local units; the per-draw transform scales it with the
    /// rest of the geometry, matching a pen stroked before transformation.
    pub fn stroke_mesh(&self, width: f32, tolerance: f32) -> Result<Mesh> {
        let path = self.to_lyon();

        let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
        let options = StrokeOptions::tolerance(tolerance.clamp(0.005, 5.0)).with_line_width(width);

        StrokeTessellator::new()
            .tessellate_path(
                &path,
                &options,
                &mut BuffersBuilder::new(&mut buffers, |v: StrokeVertex| v.position().to_array()),
            )
            .map_err(|e| anyhow::anyhow!("{e:?}"))
            .context("stroke tessellation failed")?;

        Ok(Mesh {
            vertices: buffers.vertices,
            indices: buffers.indices,
        })
    }

    fn to_lyon(&self) -> Path {
        let mut builder = Path::builder().with_svg();
        builder.move_to(point(self.start().x, self.start().y));

        for seg in self.segments() {
            match *seg {
                Segment::Cubic { c1, c2, to } => {
                    builder.cubic_bezier_to(
                        point(c1.x, c1.y),
                        point(c2.x, c2.y),
                        point(to.x, to.y),
                    );
                }
                Segment::Arc {
                    to,
                    radii,
                    x_rotation,
                    sweep,
                    size,
                } => {
                    builder.arc_to(
                        vector(radii.x, radii.y),
                        Angle::degrees(x_rotation),
                        ArcFlags {
                            large_arc: matches!(size, ArcSize::Large),
                            // SVG sweep=1 is the positive-angle direction,
                            // which is clockwise in y-down pixel space.
                            sweep: matches!(sweep, Sweep::Clockwise),
                        },
                        point(to.x, to.y),
                    );
                }
            }
        }

        if self.closure() == Closure::Closed {
            builder.close();
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::path::FillMode;

    // A closed square out of degenerate cubics (straight lines).
    fn square(s: f32) -> PathGeometry {
        PathGeometry::builder(Vec2::new(0.0, 0.0))
            .cubic(Vec2::new(s, 0.0), Vec2::new(s, 0.0), Vec2::new(s, 0.0))
            .cubic(Vec2::new(s, s), Vec2::new(s, s), Vec2::new(s, s))
            .cubic(Vec2::new(0.0, s), Vec2::new(0.0, s), Vec2::new(0.0, s))
            .closed(FillMode::Filled)
    }

    #[test]
    fn fill_mesh_of_square_is_nonempty_and_in_bounds() {
        let mesh = square(10.0).fill_mesh(0.1).unwrap();

        assert!(mesh.indices.len() >= 3);
        assert_eq!(mesh.indices.len() % 3, 0);
        for v in &mesh.vertices {
            assert!(v[0] >= -0.5 && v[0] <= 10.5);
            assert!(v[1] >= -0.5 && v[1] <= 10.5);
        }
    }

    #[test]
    fn stroke_mesh_is_nonempty() {
        let mesh = square(10.0).stroke_mesh(1.0, 0.1).unwrap();
        assert!(!mesh.is_empty());
    }

    #[test]
    fn circle_fill_covers_center() {
        // Indirect coverage check: tessellated circle spans both x signs.
        let mesh = PathGeometry::circle(8.0).fill_mesh(0.05).unwrap();
        assert!(mesh.vertices.iter().any(|v| v[0] < -4.0));
        assert!(mesh.vertices.iter().any(|v| v[0] > 4.0));
    }
}
