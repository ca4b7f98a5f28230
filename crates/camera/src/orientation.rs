//! Yaw/pitch to basis-vector conversion.
//!
//! Angles are degrees throughout. Yaw −90°, pitch 0° faces −Z.

use glam::Vec3;

/// Unit front vector for the given yaw and pitch.
pub fn front_from_angles(yaw_deg: f32, pitch_deg: f32) -> Vec3 {
    let yaw = yaw_deg.to_radians();
    let pitch = pitch_deg.to_radians();
    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

/// Right and up vectors completing a right-handed orthonormal frame
/// around `front`, with roll fixed by `world_up`.
///
/// Both cross products are re-normalized: as pitch approaches ±90° the
/// front/world-up cross product shrinks toward zero magnitude, and
/// without normalization strafing would appear to slow down near the
/// poles.
pub fn right_up_from_front(front: Vec3, world_up: Vec3) -> (Vec3, Vec3) {
    let right = front.cross(world_up).normalize();
    let up = right.cross(front).normalize();
    (right, up)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_yaw_faces_negative_z() {
        let front = front_from_angles(-90.0, 0.0);
        assert!((front - Vec3::NEG_Z).length() < EPS);
    }

    #[test]
    fn straight_up_pitch_points_along_y() {
        let front = front_from_angles(-90.0, 90.0);
        assert!((front - Vec3::Y).length() < EPS);
    }

    #[test]
    fn frame_is_orthonormal_across_angle_sweep() {
        let mut yaw = -180.0;
        while yaw <= 180.0 {
            let mut pitch = -89.0;
            while pitch <= 89.0 {
                let front = front_from_angles(yaw, pitch);
                let (right, up) = right_up_from_front(front, Vec3::Y);
                assert!((front.length() - 1.0).abs() < EPS);
                assert!((right.length() - 1.0).abs() < EPS);
                assert!((up.length() - 1.0).abs() < EPS);
                assert!(front.dot(right).abs() < EPS);
                assert!(front.dot(up).abs() < EPS);
                assert!(right.dot(up).abs() < EPS);
                pitch += 11.125;
            }
            yaw += 15.0;
        }
    }

    #[test]
    fn frame_is_right_handed() {
        let front = front_from_angles(-90.0, 0.0);
        let (right, up) = right_up_from_front(front, Vec3::Y);
        // (right, up, -front) is the right-handed triple: the camera looks
        // down its own -Z axis.
        assert!((right.cross(up) + front).length() < EPS);
        assert!((front.cross(up) - right).length() < EPS);
    }

    #[test]
    fn near_pole_vectors_stay_unit_length() {
        let front = front_from_angles(37.0, 88.9);
        let (right, up) = right_up_from_front(front, Vec3::Y);
        assert!((right.length() - 1.0).abs() < EPS);
        assert!((up.length() - 1.0).abs() < EPS);
    }
}
