//! Orbit camera for inspecting the grid.

use glam::{Mat4, Vec3, Vec4Swizzles};
use winit::event::{ElementState, MouseButton};

/// Highest pitch allowed, just short of straight up or down.
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Camera orbiting a target point with inertial damping.
///
/// Left-drag rotates, right-drag pans, the scroll wheel zooms. Input adds to
/// pending deltas; every [`update`](Self::update) applies a `damping` share
/// of them and decays the rest, so motion eases out after the pointer stops.
pub struct OrbitCamera {
    /// Point the camera orbits and looks at
    pub target: Vec3,
    /// Distance from target to eye
    pub radius: f32,
    /// Horizontal angle in radians, 0 looks down -Z from +Z
    pub yaw: f32,
    /// Vertical angle in radians
    pub pitch: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Share of pending motion applied per frame
    pub damping: f32,
    /// Radians per pixel of drag
    pub rotate_speed: f32,
    /// Scroll sensitivity
    pub zoom_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,

    // Pending motion
    yaw_delta: f32,
    pitch_delta: f32,
    pan_delta: Vec3,
    zoom_delta: f32,

    // Pointer state
    rotating: bool,
    panning: bool,
    last_mouse: Option<(f64, f64)>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::new(3.0, 3.0, 10.0))
    }
}

impl OrbitCamera {
    /// Create a camera at `eye` orbiting the origin.
    pub fn new(eye: Vec3) -> Self {
        let mut camera = Self {
            target: Vec3::ZERO,
            radius: 1.0,
            yaw: 0.0,
            pitch: 0.0,
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            damping: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            min_radius: 0.5,
            max_radius: 500.0,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            pan_delta: Vec3::ZERO,
            zoom_delta: 0.0,
            rotating: false,
            panning: false,
            last_mouse: None,
        };
        camera.look_from(eye);
        camera
    }

    fn look_from(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        self.radius = offset.length().max(f32::EPSILON);
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / self.radius).clamp(-1.0, 1.0).asin();
    }

    /// Eye position in world space.
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// Get the projection matrix for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Project a world point to pixel coordinates (origin top-left).
    ///
    /// Returns `None` for points behind the camera.
    pub fn project(&self, point: Vec3, viewport: [f32; 2]) -> Option<[f32; 2]> {
        let [width, height] = viewport;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let clip = self.view_projection_matrix(width / height) * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        Some([(ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height])
    }

    /// Camera right and up directions, for panning.
    fn basis(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }

    /// Apply one frame of damped motion.
    pub fn update(&mut self) {
        let d = self.damping;

        self.yaw += self.yaw_delta * d;
        self.pitch = (self.pitch + self.pitch_delta * d).clamp(-MAX_PITCH, MAX_PITCH);
        self.target += self.pan_delta * d;
        self.radius = (self.radius * (self.zoom_delta * d).exp()).clamp(self.min_radius, self.max_radius);

        let decay = 1.0 - d;
        self.yaw_delta *= decay;
        self.pitch_delta *= decay;
        self.pan_delta *= decay;
        self.zoom_delta *= decay;
    }

    /// Handle mouse button input.
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.rotating = pressed,
            MouseButton::Right => self.panning = pressed,
            _ => return,
        }
        if !self.rotating && !self.panning {
            self.last_mouse = None;
        }
    }

    /// Handle mouse movement.
    pub fn handle_mouse_motion(&mut self, x: f64, y: f64) {
        if !self.rotating && !self.panning {
            self.last_mouse = None;
            return;
        }

        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = (x - last_x) as f32;
            let dy = (y - last_y) as f32;

            if self.rotating {
                self.yaw_delta -= dx * self.rotate_speed;
                self.pitch_delta += dy * self.rotate_speed;
            } else {
                let (right, up) = self.basis();
                let scale = self.radius * 0.002;
                self.pan_delta += (-right * dx + up * dy) * scale;
            }
        }

        self.last_mouse = Some((x, y));
    }

    /// Handle scroll wheel; positive zooms in.
    pub fn handle_scroll(&mut self, delta: f32) {
        self.zoom_delta -= delta * self.zoom_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(cam: &mut OrbitCamera) {
        for _ in 0..2000 {
            cam.update();
        }
    }

    #[test]
    fn starts_at_requested_eye() {
        let cam = OrbitCamera::new(Vec3::new(3.0, 3.0, 10.0));
        assert!((cam.eye() - Vec3::new(3.0, 3.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn view_matrix_is_valid() {
        let cam = OrbitCamera::default();
        let view = cam.view_matrix();
        // Should be invertible
        assert!(view.determinant().abs() > 0.0001);
    }

    #[test]
    fn target_projects_to_viewport_center() {
        let cam = OrbitCamera::default();
        let [x, y] = cam.project(Vec3::ZERO, [800.0, 600.0]).unwrap();
        assert!((x - 400.0).abs() < 1e-2);
        assert!((y - 300.0).abs() < 1e-2);
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let cam = OrbitCamera::default();
        let behind = cam.eye() * 2.0;
        assert!(cam.project(behind, [800.0, 600.0]).is_none());
    }

    #[test]
    fn drag_rotates_with_inertia() {
        let mut cam = OrbitCamera::default();
        let start_yaw = cam.yaw;

        cam.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        cam.handle_mouse_motion(100.0, 100.0);
        cam.handle_mouse_motion(140.0, 100.0);
        cam.handle_mouse_button(MouseButton::Left, ElementState::Released);

        cam.update();
        let after_one = cam.yaw;
        assert!(after_one < start_yaw);

        // Keeps easing after release and converges on the full drag
        cam.update();
        assert!(cam.yaw < after_one);
        settle(&mut cam);
        let settled = cam.yaw;
        assert!((settled - (start_yaw - 40.0 * cam.rotate_speed)).abs() < 1e-3);
        cam.update();
        assert!((cam.yaw - settled).abs() < 1e-6);
    }

    #[test]
    fn motion_without_button_is_ignored() {
        let mut cam = OrbitCamera::default();
        cam.handle_mouse_motion(0.0, 0.0);
        cam.handle_mouse_motion(50.0, 50.0);
        let eye = cam.eye();
        settle(&mut cam);
        assert!((cam.eye() - eye).length() < 1e-6);
    }

    #[test]
    fn pan_moves_target() {
        let mut cam = OrbitCamera::default();
        cam.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        cam.handle_mouse_motion(0.0, 0.0);
        cam.handle_mouse_motion(30.0, 0.0);
        settle(&mut cam);
        assert!(cam.target.length() > 0.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = OrbitCamera::default();
        for _ in 0..100 {
            cam.handle_scroll(10.0);
        }
        settle(&mut cam);
        assert!((cam.radius - cam.min_radius).abs() < 1e-4);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        cam.handle_mouse_motion(0.0, 0.0);
        cam.handle_mouse_motion(0.0, 100_000.0);
        settle(&mut cam);
        assert!(cam.pitch <= MAX_PITCH);
    }
}
