use glam::{vec3, Mat4, Vec3};

const WORLD_UP: Vec3 = Vec3::Y;

/// Camera that flies a fixed, time-parameterized orbit around the origin.
///
/// Angles are stored in degrees. The `front`/`right`/`up` basis is rebuilt on every
/// yaw or pitch change, so it always matches the stored angles.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitCamera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    pub const PITCH_LIMIT: f32 = 89.;

    pub fn new(aspect_ratio: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            yaw: -90.,
            pitch: 0.,
            front: -Vec3::Z,
            right: Vec3::X,
            up: WORLD_UP,
            fov: 45.,
            aspect_ratio,
            near: 0.1,
            far: 100.,
        };
        camera.update_basis();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
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

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update_basis();
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self.update_basis();
    }

    /// Moves the camera to where the orbit puts it at `t` seconds.
    ///
    /// Depends only on `t`, never on the previous state.
    pub fn advance(&mut self, t: f32) {
        self.position = vec3(
            (0.1 * t).sin() * 15.,
            (0.15 * t).cos() * 10.,
            (0.1 * t).cos() * 15.,
        );
        self.set_yaw(10. * t);
        self.set_pitch((0.2 * t).sin() * 15.);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    fn update_basis(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = vec3(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        )
        .normalize();
        self.right = self.front.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_orthonormal(camera: &OrbitCamera) {
        let (f, r, u) = (camera.front(), camera.right(), camera.up());
        for v in [f, r, u] {
            assert!((v.length() - 1.).abs() < EPSILON, "{:?} is not unit", v);
        }
        assert!(f.dot(r).abs() < EPSILON);
        assert!(f.dot(u).abs() < EPSILON);
        assert!(r.dot(u).abs() < EPSILON);
        // right x up points backwards for a right-handed camera frame.
        assert!(r.cross(u).abs_diff_eq(-f, 1e-4));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = OrbitCamera::new(16. / 9.);
        camera.set_pitch(200.);
        assert_eq!(camera.pitch(), 89.);
        camera.set_pitch(-200.);
        assert_eq!(camera.pitch(), -89.);
        camera.set_pitch(12.5);
        assert_eq!(camera.pitch(), 12.5);
    }

    #[test]
    fn yaw_is_not_clamped() {
        let mut camera = OrbitCamera::new(1.);
        camera.set_yaw(725.);
        assert_eq!(camera.yaw(), 725.);
    }

    #[test]
    fn basis_stays_orthonormal() {
        let mut camera = OrbitCamera::new(1.);
        assert_orthonormal(&camera);
        for (yaw, pitch) in [(0., 0.), (45., 30.), (-170., -89.), (1234., 89.), (90., 200.)] {
            camera.set_yaw(yaw);
            assert_orthonormal(&camera);
            camera.set_pitch(pitch);
            assert_orthonormal(&camera);
        }
        for i in 0..200 {
            camera.advance(i as f32 * 0.37);
            assert_orthonormal(&camera);
        }
    }

    #[test]
    fn front_follows_yaw_and_pitch() {
        let mut camera = OrbitCamera::new(1.);
        camera.set_yaw(0.);
        camera.set_pitch(0.);
        assert!(camera.front().abs_diff_eq(Vec3::X, EPSILON));
        camera.set_yaw(90.);
        assert!(camera.front().abs_diff_eq(Vec3::Z, EPSILON));
    }

    #[test]
    fn advance_is_a_pure_function_of_time() {
        let mut a = OrbitCamera::new(4. / 3.);
        let mut b = OrbitCamera::new(4. / 3.);
        a.advance(3.);
        a.advance(17.25);
        b.advance(17.25);
        assert_eq!(a.position(), b.position());
        assert_eq!(a.yaw(), b.yaw());
        assert_eq!(a.pitch(), b.pitch());
        assert_eq!(a.view_matrix(), b.view_matrix());
        assert_eq!(a.projection_matrix(), b.projection_matrix());
    }

    #[test]
    fn advance_follows_the_orbit() {
        let mut camera = OrbitCamera::new(1.);
        camera.advance(0.);
        assert!(camera.position().abs_diff_eq(vec3(0., 10., 15.), EPSILON));
        assert_eq!(camera.yaw(), 0.);
        assert_eq!(camera.pitch(), 0.);

        camera.advance(10.);
        let expected = vec3(1f32.sin() * 15., 1.5f32.cos() * 10., 1f32.cos() * 15.);
        assert!(camera.position().abs_diff_eq(expected, EPSILON));
        assert_eq!(camera.yaw(), 100.);
        assert!((camera.pitch() - 2f32.sin() * 15.).abs() < EPSILON);
    }

    #[test]
    fn view_matrix_maps_position_to_origin() {
        let mut camera = OrbitCamera::new(1.);
        camera.advance(5.);
        let eye = camera.view_matrix().transform_point3(camera.position());
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-4));
        let ahead = camera
            .view_matrix()
            .transform_point3(camera.position() + camera.front());
        assert!(ahead.abs_diff_eq(-Vec3::Z, 1e-4));
    }

    #[test]
    fn projection_tracks_aspect_ratio() {
        let mut camera = OrbitCamera::new(1.);
        let square = camera.projection_matrix();
        camera.aspect_ratio = 2.;
        let wide = camera.projection_matrix();
        assert!((square.x_axis.x - 2. * wide.x_axis.x).abs() < EPSILON);
        assert_eq!(square.y_axis.y, wide.y_axis.y);
    }
}
