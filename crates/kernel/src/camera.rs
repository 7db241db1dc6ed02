use glam::{Mat4, Vec2, Vec3};
use roomview_input::{InputState, KeyBindings};
use serde::Serialize;

/// Perspective camera aimed at an explicit target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 8.0),
            target: Vec3::new(0.0, 2.0, 0.0),
            up: Vec3::Y,
            fov_y: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PerspectiveCamera {
    /// Ignores degenerate sizes so the projection never divides by zero.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Tuning of the pointer-follow camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraConfig {
    /// Fraction of the remaining distance covered per tick.
    pub smoothing: f32,
    /// Keyboard movement in units per second.
    pub move_speed: f32,
    /// Pointer x of 1.0 pulls the camera this far along X.
    pub pointer_reach: f32,
    pub rest_height: f32,
    /// Pointer y of 1.0 lifts the camera this far above `rest_height`.
    pub pointer_lift: f32,
    pub start: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.05,
            move_speed: 5.0,
            pointer_reach: 5.0,
            rest_height: 2.0,
            pointer_lift: 2.0,
            start: Vec3::new(0.0, 2.0, 8.0),
            look_at: Vec3::new(0.0, 2.0, 0.0),
        }
    }
}

/// Damped pointer-follow on X/Y, keyboard translation on all axes, and a
/// fixed aim point.
///
/// The smoothed X/Y live in the controller, not in the camera: each tick
/// writes them to the eye and then adds the keyboard step, so held keys
/// offset X/Y for that tick only. Z has no pointer target and accumulates.
/// Smoothing is per tick; keyboard movement is scaled by delta.
#[derive(Debug, Clone)]
pub struct CameraController {
    config: CameraConfig,
    bindings: KeyBindings,
    smoothed: Vec2,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default(), KeyBindings::default())
    }
}

impl CameraController {
    pub fn new(config: CameraConfig, bindings: KeyBindings) -> Self {
        Self {
            smoothed: config.start.truncate(),
            config,
            bindings,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn smoothed(&self) -> Vec2 {
        self.smoothed
    }

    /// Place `camera` at the configured start, aimed at the look-at point.
    pub fn reset(&mut self, camera: &mut PerspectiveCamera) {
        self.smoothed = self.config.start.truncate();
        camera.eye = self.config.start;
        camera.look_at(self.config.look_at);
    }

    /// Where the pointer pulls the camera on X and Y.
    pub fn pointer_target(&self, pointer: Vec2) -> Vec2 {
        Vec2::new(
            pointer.x * self.config.pointer_reach,
            self.config.rest_height + pointer.y * self.config.pointer_lift,
        )
    }

    pub fn update(&mut self, camera: &mut PerspectiveCamera, input: &InputState, delta: f32) {
        let target = self.pointer_target(input.pointer());
        self.smoothed += (target - self.smoothed) * self.config.smoothing;
        camera.eye.x = self.smoothed.x;
        camera.eye.y = self.smoothed.y;
        camera.eye += self.bindings.movement(input) * self.config.move_speed * delta;
        camera.look_at(self.config.look_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> (CameraController, PerspectiveCamera) {
        let mut controller = CameraController::default();
        let mut camera = PerspectiveCamera::default();
        controller.reset(&mut camera);
        (controller, camera)
    }

    #[test]
    fn default_camera_is_valid() {
        let (_, cam) = start();
        assert_eq!(cam.eye, Vec3::new(0.0, 2.0, 8.0));
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
        assert_eq!(cam.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn set_aspect_ignores_zero() {
        let mut cam = PerspectiveCamera::default();
        cam.set_aspect(800, 400);
        assert_eq!(cam.aspect, 2.0);
        cam.set_aspect(0, 400);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn pointer_corner_converges() {
        let (mut controller, mut cam) = start();
        let mut input = InputState::new();
        input.set_pointer(1.0, 1.0);
        for _ in 0..200 {
            controller.update(&mut cam, &input, 1.0);
        }
        assert!((cam.eye.x - 5.0).abs() < 1e-3);
        assert!((cam.eye.y - 4.0).abs() < 1e-3);
        assert_eq!(cam.eye.z, 8.0);
    }

    #[test]
    fn single_tick_moves_five_percent() {
        let (mut controller, mut cam) = start();
        let mut input = InputState::new();
        input.set_pointer(1.0, 0.0);
        controller.update(&mut cam, &input, 0.016);
        assert!((cam.eye.x - 0.25).abs() < 1e-6);
        assert!((cam.eye.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn holding_w_moves_forward_at_move_speed() {
        for pointer in [Vec2::ZERO, Vec2::new(0.7, -0.3)] {
            let (mut controller, mut cam) = start();
            let mut input = InputState::new();
            input.set_pointer(pointer.x, pointer.y);
            input.set_key("w", true);
            for _ in 0..60 {
                controller.update(&mut cam, &input, 0.05);
            }
            // 60 ticks * 0.05 s = 3 s at 5 units/s
            assert!((cam.eye.z - (8.0 - 15.0)).abs() < 1e-3);
        }
    }

    #[test]
    fn keyboard_offsets_x_for_one_tick() {
        let (mut controller, mut cam) = start();
        let mut input = InputState::new();
        input.set_key("d", true);
        controller.update(&mut cam, &input, 0.1);
        assert!((cam.eye.x - 0.5).abs() < 1e-6);
        assert_eq!(controller.smoothed().x, 0.0);
        input.set_key("d", false);
        controller.update(&mut cam, &input, 0.1);
        assert_eq!(cam.eye.x, 0.0);
    }

    #[test]
    fn reset_restores_start() {
        let (mut controller, mut cam) = start();
        let mut input = InputState::new();
        input.set_pointer(1.0, -1.0);
        controller.update(&mut cam, &input, 0.0);
        controller.reset(&mut cam);
        assert_eq!(cam.eye, Vec3::new(0.0, 2.0, 8.0));
        assert_eq!(controller.smoothed(), Vec2::new(0.0, 2.0));
    }

    #[test]
    fn always_aims_at_look_at() {
        let (mut controller, mut cam) = start();
        let mut input = InputState::new();
        input.set_pointer(-0.4, 0.9);
        input.set_key("arrowdown", true);
        controller.update(&mut cam, &input, 0.3);
        assert_eq!(cam.target, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn zero_delta_means_no_keyboard_motion() {
        let (mut controller, mut cam) = start();
        let mut input = InputState::new();
        input.set_key("s", true);
        controller.update(&mut cam, &input, 0.0);
        assert_eq!(cam.eye.z, 8.0);
    }
}
