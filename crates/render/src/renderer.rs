use roomview_kernel::{FrameTime, PerspectiveCamera};
use roomview_scene::{LightKind, ObjectKind, Scene};
use std::fmt::Write;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub scene: &'a Scene,
    pub camera: &'a PerspectiveCamera,
    pub time: FrameTime,
    /// 1-based index of the tick that produced this frame.
    pub tick: u64,
}

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    fn render(&mut self, frame: &Frame<'_>) -> Self::Output;

    /// The drawable area changed size. Zero sizes may be ignored.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Produces a human-readable dump of the frame.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    size: (u32, u32),
    list_objects: bool,
}

impl DebugTextRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            list_objects: false,
        }
    }

    /// Also print one line per object.
    pub fn listing_objects(mut self) -> Self {
        self.list_objects = true;
        self
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &Frame<'_>) -> String {
        let mut out = String::new();
        let scene = frame.scene;
        let cam = frame.camera;
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            "=== Frame {} (t={:.3}s, dt={:.4}s, {}x{}) ===",
            frame.tick, frame.time.elapsed, frame.time.delta, self.size.0, self.size.1
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.3}, {:.3}, {:.3}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            cam.eye.x,
            cam.eye.y,
            cam.eye.z,
            cam.target.x,
            cam.target.y,
            cam.target.z,
            cam.fov_y.to_degrees()
        );
        let _ = writeln!(
            out,
            "Objects: {}  Lights: {}",
            scene.object_count(),
            scene.light_count()
        );
        for light in scene.lights().values() {
            let kind = match light.kind {
                LightKind::Ambient => "ambient",
                LightKind::Directional { .. } => "directional",
                LightKind::Point { .. } => "point",
            };
            let _ = writeln!(
                out,
                "  light {:<14} {:<11} intensity={:.3}",
                light.name, kind, light.intensity
            );
        }
        if self.list_objects {
            for (id, obj) in scene.objects() {
                let p = obj.transform.position;
                let r = obj.transform.rotation;
                let shape = match &obj.kind {
                    ObjectKind::Group => "group",
                    ObjectKind::Mesh { geometry, .. } => geometry.kind(),
                };
                let _ = writeln!(
                    out,
                    "  [{:>3}] {:<16} {:<8} pos=({:.2}, {:.2}, {:.2}) rot=({:.2}, {:.2}, {:.2})",
                    id.0, obj.name, shape, p.x, p.y, p.z, r.x, r.y, r.z
                );
            }
        }
        out
    }

    fn resize(&mut self, width: u32, height: u32) {
        tracing::debug!(width, height, "text renderer resized");
        self.size = (width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use roomview_common::{Color, GeometryDescriptor, MaterialDescriptor};

    fn frame<'a>(scene: &'a Scene, camera: &'a PerspectiveCamera) -> Frame<'a> {
        Frame {
            scene,
            camera,
            time: FrameTime {
                delta: 0.016,
                elapsed: 1.5,
            },
            tick: 7,
        }
    }

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = Scene::default();
        let camera = PerspectiveCamera::default();
        let output = DebugTextRenderer::new(800, 600).render(&frame(&scene, &camera));

        assert!(output.contains("Frame 7"));
        assert!(output.contains("800x600"));
        assert!(output.contains("Objects: 0"));
        assert!(output.contains("fov=75"));
    }

    #[test]
    fn debug_renderer_lists_objects_when_asked() {
        let mut scene = Scene::default();
        let id = scene.create_object(
            "cube",
            GeometryDescriptor::cuboid(1.0, 1.0, 1.0),
            MaterialDescriptor::default(),
        );
        scene.set_position(id, Vec3::new(1.0, 2.0, 3.0));
        scene.create_light("sun", LightKind::Ambient, Color::WHITE, 0.6);
        let camera = PerspectiveCamera::default();

        let brief = DebugTextRenderer::new(1, 1).render(&frame(&scene, &camera));
        assert!(!brief.contains("pos="));
        assert!(brief.contains("intensity=0.600"));

        let full = DebugTextRenderer::new(1, 1)
            .listing_objects()
            .render(&frame(&scene, &camera));
        assert!(full.contains("pos=(1.00, 2.00, 3.00)"));
        assert!(full.contains("box"));
    }

    #[test]
    fn resize_updates_header() {
        let scene = Scene::default();
        let camera = PerspectiveCamera::default();
        let mut r = DebugTextRenderer::new(800, 600);
        r.resize(1024, 768);
        assert_eq!(r.size(), (1024, 768));
        assert!(r.render(&frame(&scene, &camera)).contains("1024x768"));
    }
}
