use grum_engine::coords::Vec2;

use super::{EYE_RADIUS, PUPIL_RADIUS};

/// Positions a pupil inside its eye, looking at `target`.
///
/// Both points are in model units. The pupil sits on the target when the
/// target is within the pupil's orbit (eye radius minus pupil radius);
/// otherwise it is clamped to the orbit circle along the direction to the
/// target, so the pupil hugs the eye rim without crossing it.
pub fn pupil_center(eye_center: Vec2, target: Vec2) -> Vec2 {
    let orbit = EYE_RADIUS - PUPIL_RADIUS;
    let d = target - eye_center;
    let dist_squared = d.length_squared();

    if dist_squared <= orbit * orbit {
        return target;
    }

    eye_center + d * (orbit / dist_squared.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORBIT: f32 = EYE_RADIUS - PUPIL_RADIUS;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn target_at_eye_center_pins_the_pupil_there() {
        let eye = Vec2::new(-43.0, -12.0);
        assert_eq!(pupil_center(eye, eye), eye);
    }

    #[test]
    fn target_inside_orbit_is_followed_exactly() {
        let eye = Vec2::new(43.0, -12.0);
        let target = eye + Vec2::new(10.0, -5.0);
        assert_eq!(pupil_center(eye, target), target);
    }

    #[test]
    fn target_on_the_orbit_boundary_is_followed() {
        let eye = Vec2::new(0.0, 0.0);
        let target = Vec2::new(ORBIT, 0.0);
        assert_eq!(pupil_center(eye, target), target);
    }

    #[test]
    fn far_target_clamps_to_the_orbit_circle() {
        let eye = Vec2::new(-43.0, -12.0);
        let target = eye + Vec2::new(1000.0, 0.0);

        let p = pupil_center(eye, target);
        assert!(close(p, eye + Vec2::new(ORBIT, 0.0)));
    }

    #[test]
    fn clamped_pupil_preserves_direction() {
        let eye = Vec2::new(0.0, 0.0);
        let target = Vec2::new(300.0, 400.0); // 3-4-5 direction

        let p = pupil_center(eye, target);
        assert!(close(p, Vec2::new(ORBIT * 0.6, ORBIT * 0.8)));
    }

    #[test]
    fn eyes_solve_independently() {
        let left = Vec2::new(-43.0, -12.0);
        let right = Vec2::new(43.0, -12.0);
        let target = Vec2::new(0.0, 0.0);

        let lp = pupil_center(left, target);
        let rp = pupil_center(right, target);

        // Both clamp toward the shared target from opposite sides.
        assert!(lp.x > left.x);
        assert!(rp.x < right.x);
        assert!((lp.x + rp.x).abs() < 1e-4, "solutions mirror around x = 0");
    }
}
