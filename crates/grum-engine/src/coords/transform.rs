use core::ops::Mul;

use super::Vec2;

/// 2D affine map (3×2 matrix, row-vector convention).
///
/// A point is mapped as `(x, y, 1) · M`:
///
/// ```text
/// x' = x·m11 + y·m21 + dx
/// y' = x·m12 + y·m22 + dy
/// ```
///
/// Composition follows the row-vector order: `a * b` applies `a` first,
/// then `b`. So `Transform::scale(3.0) * Transform::translation(cx, cy)`
/// scales about the origin and then translates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        m11: 1.0,
        m12: 0.0,
        m21: 0.0,
        m22: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    /// Uniform scale about the origin.
    #[inline]
    pub const fn scale(k: f32) -> Self {
        Self {
            m11: k,
            m12: 0.0,
            m21: 0.0,
            m22: k,
            dx: 0.0,
            dy: 0.0,
        }
    }

    /// Rotation about the origin, in degrees.
    ///
    /// Positive angles rotate clockwise in the y-down pixel space.
    #[inline]
    pub fn rotation_degrees(deg: f32) -> Self {
        let rad = deg.to_radians();
        let (s, c) = rad.sin_cos();
        Self {
            m11: c,
            m12: s,
            m21: -s,
            m22: c,
            dx: 0.0,
            dy: 0.0,
        }
    }

    #[inline]
    pub const fn translation(dx: f32, dy: f32) -> Self {
        Self {
            m11: 1.0,
            m12: 0.0,
            m21: 0.0,
            m22: 1.0,
            dx,
            dy,
        }
    }

    /// Applies the map to a point.
    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x * self.m11 + p.y * self.m21 + self.dx,
            p.x * self.m12 + p.y * self.m22 + self.dy,
        )
    }

    #[inline]
    pub fn determinant(self) -> f32 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    /// Returns the inverse map, or `None` when the matrix is degenerate
    /// (zero or near-zero determinant).
    pub fn invert(self) -> Option<Transform> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() <= f32::EPSILON {
            return None;
        }

        let inv = 1.0 / det;
        let m11 = self.m22 * inv;
        let m12 = -self.m12 * inv;
        let m21 = -self.m21 * inv;
        let m22 = self.m11 * inv;

        Some(Transform {
            m11,
            m12,
            m21,
            m22,
            dx: -(self.dx * m11 + self.dy * m21),
            dy: -(self.dx * m12 + self.dy * m22),
        })
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.m11.is_finite()
            && self.m12.is_finite()
            && self.m21.is_finite()
            && self.m22.is_finite()
            && self.dx.is_finite()
            && self.dy.is_finite()
    }

    /// Matrix entries as `[m11, m12, m21, m22, dx, dy]` for GPU upload.
    #[inline]
    pub fn to_array(self) -> [f32; 6] {
        [self.m11, self.m12, self.m21, self.m22, self.dx, self.dy]
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;

    /// `a * b` applies `a` first, then `b`.
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            m11: self.m11 * rhs.m11 + self.m12 * rhs.m21,
            m12: self.m11 * rhs.m12 + self.m12 * rhs.m22,
            m21: self.m21 * rhs.m11 + self.m22 * rhs.m21,
            m22: self.m21 * rhs.m12 + self.m22 * rhs.m22,
            dx: self.dx * rhs.m11 + self.dy * rhs.m21 + rhs.dx,
            dy: self.dx * rhs.m12 + self.dy * rhs.m22 + rhs.dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    // ── apply ─────────────────────────────────────────────────────────────

    #[test]
    fn identity_leaves_points_unchanged() {
        let p = Vec2::new(3.5, -7.0);
        assert_eq!(Transform::IDENTITY.apply(p), p);
    }

    #[test]
    fn scale_then_translate_applies_in_order() {
        // Row-vector convention: scale first, then translate.
        let t = Transform::scale(3.0) * Transform::translation(100.0, 50.0);
        assert!(close(t.apply(Vec2::new(1.0, 2.0)), Vec2::new(103.0, 56.0)));
    }

    #[test]
    fn translate_then_scale_differs() {
        let t = Transform::translation(100.0, 50.0) * Transform::scale(3.0);
        assert!(close(t.apply(Vec2::new(1.0, 2.0)), Vec2::new(303.0, 156.0)));
    }

    #[test]
    fn rotation_quarter_turn() {
        // 90° clockwise in y-down space: +X maps to +Y.
        let t = Transform::rotation_degrees(90.0);
        assert!(close(t.apply(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0)));
    }

    // ── invert ────────────────────────────────────────────────────────────

    #[test]
    fn invert_round_trips() {
        let t = Transform::scale(3.0)
            * Transform::rotation_degrees(10.0)
            * Transform::translation(400.0, 300.0);
        let inv = t.invert().unwrap();

        let p = Vec2::new(123.0, -45.0);
        assert!(close(inv.apply(t.apply(p)), p));
    }

    #[test]
    fn invert_degenerate_scale_is_none() {
        assert!(Transform::scale(0.0).invert().is_none());
    }

    #[test]
    fn invert_translation_negates() {
        let inv = Transform::translation(10.0, -4.0).invert().unwrap();
        assert!(close(inv.apply(Vec2::zero()), Vec2::new(-10.0, 4.0)));
    }
}
