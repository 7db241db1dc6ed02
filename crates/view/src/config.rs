use roomview_kernel::{CameraConfig, PerspectiveCamera};
use serde::Serialize;

/// Everything a view needs to know before it is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewConfig {
    pub camera: CameraConfig,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Seeds cube colours and spin speeds.
    pub seed: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            seed: 0,
        }
    }
}

impl ViewConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// A camera at the configured start, sized for a `width` x `height`
    /// container.
    pub fn camera(&self, width: u32, height: u32) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera {
            eye: self.camera.start,
            target: self.camera.look_at,
            fov_y: self.fov_degrees.to_radians(),
            near: self.near,
            far: self.far,
            ..PerspectiveCamera::default()
        };
        camera.set_aspect(width, height);
        camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn defaults_match_the_room() {
        let config = ViewConfig::default();
        assert_eq!(config.fov_degrees, 75.0);
        assert_eq!(config.camera.start, Vec3::new(0.0, 2.0, 8.0));
        assert_eq!(config.camera.smoothing, 0.05);
    }

    #[test]
    fn camera_takes_container_aspect() {
        let cam = ViewConfig::default().camera(1200, 600);
        assert_eq!(cam.aspect, 2.0);
        assert_eq!(cam.target, Vec3::new(0.0, 2.0, 0.0));
        assert!((cam.fov_y - 75.0_f32.to_radians()).abs() < 1e-6);
    }
}
