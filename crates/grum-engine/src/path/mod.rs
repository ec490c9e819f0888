//! Vector path geometry.
//!
//! `PathGeometry` is the immutable shape description used by the character:
//! a start point plus an ordered sequence of cubic Bézier / elliptical-arc
//! segments, tagged with a fill mode and a closure mode. Geometries are built
//! once from literal control-point tables and never mutated.
//!
//! `mesh` turns a geometry into indexed triangle lists (fills and strokes)
//! via lyon. Tessellation happens once at startup; the resulting meshes are
//! CPU-side and survive device loss.

mod geometry;
mod mesh;

pub use geometry::{ArcSize, Closure, FillMode, PathBuilder, PathGeometry, Segment, Sweep};
pub use mesh::Mesh;
