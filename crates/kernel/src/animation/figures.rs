use super::{Animated, wave};
use glam::Vec3;
use roomview_scene::{FigureRig, Scene};

fn breathe(scene: &mut Scene, rig: &FigureRig, elapsed: f64, rate: f64) {
    let scale_y = 1.0 + wave(elapsed, rate) * 0.02;
    scene.update_transform(rig.body, |t| t.scale.y = scale_y);
}

fn swing_arms(scene: &mut Scene, rig: &FigureRig, rest: f32, swing: f32) {
    scene.update_transform(rig.left_arm, |t| t.rotation.z = rest + swing);
    scene.update_transform(rig.right_arm, |t| t.rotation.z = -(rest + swing));
}

/// The man: breathes, swings his arms, looks around and walks in place.
#[derive(Debug, Clone)]
pub struct WalkingFigure {
    rig: FigureRig,
}

impl WalkingFigure {
    pub fn new(rig: FigureRig) -> Self {
        Self { rig }
    }
}

impl Animated for WalkingFigure {
    fn name(&self) -> &'static str {
        "walking figure"
    }

    fn update(&mut self, t: f64, scene: &mut Scene) {
        let rig = &self.rig;
        breathe(scene, rig, t, 2.0);
        swing_arms(scene, rig, 0.3, wave(t, 1.5) * 0.2);
        scene.update_transform(rig.head, |h| h.rotation.y = wave(t, 0.8) * 0.3);

        let stride = wave(t, 3.0) * 0.3;
        scene.update_transform(rig.left_leg, |l| l.rotation.x = stride);
        scene.update_transform(rig.right_leg, |l| l.rotation.x = -stride);

        let bounce = wave(t, 3.0).abs() * 0.05;
        scene.update_transform(rig.group, |g| g.position.y = rig.base_position.y + bounce);
    }
}

/// The woman: breathes, turns and drifts gently, nods and sways her arms.
#[derive(Debug, Clone)]
pub struct SwayingFigure {
    rig: FigureRig,
}

impl SwayingFigure {
    pub fn new(rig: FigureRig) -> Self {
        Self { rig }
    }
}

impl Animated for SwayingFigure {
    fn name(&self) -> &'static str {
        "swaying figure"
    }

    fn update(&mut self, t: f64, scene: &mut Scene) {
        let rig = &self.rig;
        breathe(scene, rig, t, 2.2);
        swing_arms(scene, rig, 0.4, wave(t, 1.8) * 0.25);
        scene.update_transform(rig.head, |h| {
            h.rotation.y = wave(t, 1.2) * 0.25;
            h.rotation.x = wave(t, 2.0) * 0.08;
        });

        let base = rig.base_position;
        let turn = rig.base_rotation.y + wave(t, 0.8) * 0.15;
        scene.update_transform(rig.group, |g| {
            g.rotation.y = turn;
            g.position = Vec3::new(
                base.x + wave(t, 0.6) * 0.15,
                base.y + wave(t, 2.0).abs() * 0.03,
                base.z,
            );
        });
    }
}
