use glam::{Mat4, Vec3};

use crate::orientation::{front_from_angles, right_up_from_front};

/// Movement request relative to the camera's current orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-fly camera with yaw/pitch orientation and a scroll-driven zoom.
///
/// Angles are degrees. Yaw is unconstrained and wraps through the trig
/// functions; pitch is clamped per call to keep the look-at transform away
/// from the ±90° degeneracy. The orthonormal frame (`front`/`right`/`up`)
/// is recomputed after every yaw/pitch change and is read-only from the
/// outside.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space position, mutated by movement commands.
    pub position: Vec3,
    /// Movement speed in world units per second.
    pub movement_speed: f32,
    /// Multiplier applied to raw pointer deltas before they become degrees.
    pub mouse_sensitivity: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
}

impl Camera {
    pub const DEFAULT_YAW: f32 = -90.0;
    pub const DEFAULT_PITCH: f32 = 0.0;
    pub const DEFAULT_SPEED: f32 = 2.5;
    pub const DEFAULT_SENSITIVITY: f32 = 0.1;
    pub const DEFAULT_ZOOM: f32 = 45.0;
    /// Pitch clamp bound in degrees, kept just short of the gimbal flip.
    pub const PITCH_LIMIT: f32 = 89.0;
    pub const MIN_ZOOM: f32 = 1.0;
    pub const MAX_ZOOM: f32 = 45.0;

    /// Camera at `position` facing −Z, rolled upright against `world_up`.
    pub fn new(position: Vec3, world_up: Vec3) -> Self {
        Self::with_orientation(position, world_up, Self::DEFAULT_YAW, Self::DEFAULT_PITCH)
    }

    /// Camera with explicit starting angles. The orthonormal frame is
    /// computed immediately so the camera is valid before any input
    /// arrives.
    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw_deg: f32, pitch_deg: f32) -> Self {
        let mut camera = Self {
            position,
            movement_speed: Self::DEFAULT_SPEED,
            mouse_sensitivity: Self::DEFAULT_SENSITIVITY,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: world_up,
            world_up,
            yaw: yaw_deg,
            pitch: pitch_deg,
            zoom: Self::DEFAULT_ZOOM,
        };
        camera.update_orientation();
        camera
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Field-of-view proxy in degrees, for the caller's projection matrix.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Look-at view transform from `position` toward `position + front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Translate along the current frame. Forward/Backward move along
    /// `front`, Left/Right along `right`; displacement is
    /// `movement_speed * delta_seconds`. Orientation is untouched, so the
    /// frame needs no re-derivation.
    pub fn process_movement(&mut self, direction: MoveDirection, delta_seconds: f32) {
        let velocity = self.movement_speed * delta_seconds;
        match direction {
            MoveDirection::Forward => self.position += self.front * velocity,
            MoveDirection::Backward => self.position -= self.front * velocity,
            MoveDirection::Left => self.position -= self.right * velocity,
            MoveDirection::Right => self.position += self.right * velocity,
        }
    }

    /// Apply a pointer delta to yaw and pitch, then rebuild the frame.
    ///
    /// Offsets are scaled by `mouse_sensitivity`. With `invert_pitch` the
    /// vertical offset's sign is flipped first: pass true for raw screen
    /// deltas (y grows downward) so an upward mouse motion pitches the
    /// camera up, false when the caller already flips. `constrain_pitch`
    /// clamps pitch to ±[`Self::PITCH_LIMIT`].
    pub fn process_mouse_movement(
        &mut self,
        x_offset: f32,
        y_offset: f32,
        invert_pitch: bool,
        constrain_pitch: bool,
    ) {
        let x_offset = x_offset * self.mouse_sensitivity;
        let y_offset = y_offset * self.mouse_sensitivity;

        self.yaw += x_offset;
        self.pitch += if invert_pitch { -y_offset } else { y_offset };

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        }

        self.update_orientation();
    }

    /// Apply a scroll delta to the zoom. Scrolling up (positive offset)
    /// narrows the field of view. `constrain_zoom` clamps the result to
    /// [[`Self::MIN_ZOOM`], [`Self::MAX_ZOOM`]]. Position and orientation
    /// are untouched.
    pub fn process_mouse_scroll(&mut self, y_offset: f32, constrain_zoom: bool) {
        self.zoom -= y_offset;
        if constrain_zoom {
            self.zoom = self.zoom.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        }
    }

    fn update_orientation(&mut self) {
        self.front = front_from_angles(self.yaw, self.pitch);
        let (right, up) = right_up_from_front(self.front, self.world_up);
        self.right = right;
        self.up = up;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn near(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    fn mat_near(a: Mat4, b: Mat4) -> bool {
        a.to_cols_array()
            .iter()
            .zip(b.to_cols_array().iter())
            .all(|(x, y)| (x - y).abs() < EPS)
    }

    #[test]
    fn new_camera_faces_negative_z() {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y);
        assert!(near(cam.front(), Vec3::NEG_Z));
        assert!(near(cam.right(), Vec3::X));
        assert!(near(cam.up(), Vec3::Y));
        assert_eq!(cam.yaw(), Camera::DEFAULT_YAW);
        assert_eq!(cam.pitch(), Camera::DEFAULT_PITCH);
        assert_eq!(cam.zoom(), Camera::DEFAULT_ZOOM);
    }

    #[test]
    fn view_matrix_matches_look_at() {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y);
        let expected = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::Y,
        );
        assert!(mat_near(cam.view_matrix(), expected));
    }

    #[test]
    fn forward_then_backward_round_trips() {
        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y);
        cam.process_mouse_movement(123.0, 45.0, true, true);
        let start = cam.position;
        cam.process_movement(MoveDirection::Forward, 0.25);
        cam.process_movement(MoveDirection::Backward, 0.25);
        assert!(near(cam.position, start));
    }

    #[test]
    fn strafe_moves_along_right_vector() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y);
        cam.process_movement(MoveDirection::Right, 1.0);
        assert!(near(cam.position, Vec3::X * Camera::DEFAULT_SPEED));
        cam.process_movement(MoveDirection::Left, 1.0);
        assert!(near(cam.position, Vec3::ZERO));
    }

    #[test]
    fn movement_ignores_orientation_state() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::Y);
        let front = cam.front();
        cam.process_movement(MoveDirection::Forward, 0.5);
        assert!(near(cam.front(), front));
        assert_eq!(cam.yaw(), Camera::DEFAULT_YAW);
    }

    #[test]
    fn pitch_stays_clamped_under_constraint() {
        let mut cam = Camera::default();
        for _ in 0..50 {
            cam.process_mouse_movement(3.0, 400.0, false, true);
            assert!(cam.pitch() <= Camera::PITCH_LIMIT);
        }
        assert_eq!(cam.pitch(), Camera::PITCH_LIMIT);
        for _ in 0..50 {
            cam.process_mouse_movement(-3.0, -400.0, false, true);
            assert!(cam.pitch() >= -Camera::PITCH_LIMIT);
        }
        assert_eq!(cam.pitch(), -Camera::PITCH_LIMIT);
    }

    #[test]
    fn unconstrained_pitch_passes_the_limit() {
        let mut cam = Camera::default();
        cam.process_mouse_movement(0.0, 2000.0, false, false);
        assert!(cam.pitch() > Camera::PITCH_LIMIT);
        // Frame is still unit length even past the pole.
        assert!((cam.front().length() - 1.0).abs() < EPS);
    }

    #[test]
    fn invert_pitch_flips_vertical_direction() {
        let mut screen = Camera::default();
        screen.process_mouse_movement(0.0, 10.0, true, true);
        assert!(screen.pitch() < 0.0);

        let mut preflipped = Camera::default();
        preflipped.process_mouse_movement(0.0, 10.0, false, true);
        assert!(preflipped.pitch() > 0.0);
        assert_eq!(screen.pitch(), -preflipped.pitch());
    }

    #[test]
    fn sensitivity_scales_angle_step() {
        let mut cam = Camera::default();
        cam.mouse_sensitivity = 0.2;
        cam.process_mouse_movement(10.0, 0.0, true, true);
        assert!((cam.yaw() - (Camera::DEFAULT_YAW + 2.0)).abs() < EPS);
    }

    #[test]
    fn zero_offset_is_a_no_op() {
        let mut cam = Camera::with_orientation(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -47.0, 12.5);
        let (yaw, pitch, front, right, up) =
            (cam.yaw(), cam.pitch(), cam.front(), cam.right(), cam.up());
        cam.process_mouse_movement(0.0, 0.0, true, true);
        assert_eq!(cam.yaw(), yaw);
        assert_eq!(cam.pitch(), pitch);
        assert_eq!(cam.front(), front);
        assert_eq!(cam.right(), right);
        assert_eq!(cam.up(), up);
    }

    #[test]
    fn frame_stays_orthonormal_through_look_sweep() {
        let mut cam = Camera::default();
        let offsets = [
            (35.0, 12.0),
            (-140.0, 88.0),
            (720.0, -200.0),
            (-3.5, 0.25),
            (999.0, 999.0),
        ];
        for (dx, dy) in offsets {
            cam.process_mouse_movement(dx, dy, true, true);
            let (front, right, up) = (cam.front(), cam.right(), cam.up());
            assert!((front.length() - 1.0).abs() < EPS);
            assert!((right.length() - 1.0).abs() < EPS);
            assert!((up.length() - 1.0).abs() < EPS);
            assert!(front.dot(right).abs() < EPS);
            assert!(front.dot(up).abs() < EPS);
            assert!(right.dot(up).abs() < EPS);
        }
    }

    #[test]
    fn scroll_zooms_in_and_clamps() {
        let mut cam = Camera::default();
        cam.process_mouse_scroll(10.0, true);
        assert_eq!(cam.zoom(), 35.0);
        cam.process_mouse_scroll(-100.0, true);
        assert_eq!(cam.zoom(), Camera::MAX_ZOOM);
    }

    #[test]
    fn large_scroll_clamps_to_minimum() {
        let mut cam = Camera::default();
        cam.process_mouse_scroll(50.0, true);
        assert_eq!(cam.zoom(), Camera::MIN_ZOOM);
    }

    #[test]
    fn unconstrained_scroll_leaves_the_range() {
        let mut cam = Camera::default();
        cam.process_mouse_scroll(50.0, false);
        assert_eq!(cam.zoom(), -5.0);
    }

    #[test]
    fn scroll_never_touches_position_or_frame() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y);
        let (position, front) = (cam.position, cam.front());
        cam.process_mouse_scroll(7.0, true);
        assert_eq!(cam.position, position);
        assert_eq!(cam.front(), front);
    }

    #[test]
    fn explicit_orientation_constructor() {
        let cam = Camera::with_orientation(Vec3::ZERO, Vec3::Y, 0.0, 0.0);
        assert!(near(cam.front(), Vec3::X));
        assert!(near(cam.right(), Vec3::Z));
        assert!(near(cam.up(), Vec3::Y));
    }
}
