//! Animated entities and the registry that updates them each tick.

mod figures;
mod props;

pub use figures::{SwayingFigure, WalkingFigure};
pub use props::{CentralSphere, ClockHands, FanBlades, FloatingCube, PulsingLight, ScreenGlow};

use roomview_scene::{RoomRig, Scene};
use std::f64::consts::TAU;

/// `sin(elapsed * rate)`. The argument is formed in f64 so a run of days
/// still resolves single frames.
pub(crate) fn wave(elapsed: f64, rate: f64) -> f32 {
    (elapsed * rate).sin() as f32
}

/// An angle folded into [0, 2π) before it is narrowed to f32.
pub(crate) fn fold(angle: f64) -> f32 {
    angle.rem_euclid(TAU) as f32
}

/// Advance a running angle by one tick's increment and return it as f32.
/// The running value stays in [0, 2π) so the increment never rounds away.
pub(crate) fn advance(angle: &mut f64, step: f64) -> f32 {
    *angle = (*angle + step).rem_euclid(TAU);
    *angle as f32
}

/// Something in the scene that changes every tick.
///
/// `elapsed` is seconds since the first tick, in f64. Implementations either compute
/// their output from `elapsed` alone or advance a running value by a fixed
/// per-tick increment; they never read wall time themselves.
pub trait Animated {
    fn name(&self) -> &'static str;
    fn update(&mut self, elapsed: f64, scene: &mut Scene);
}

/// Every animated entity of one view, updated in registration order.
#[derive(Default)]
pub struct AnimationRegistry {
    entities: Vec<Box<dyn Animated>>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full set of room animations, in the order they run each tick.
    pub fn for_room(rig: &RoomRig) -> Self {
        let mut registry = Self::new();
        for cube in &rig.cubes {
            registry.register(FloatingCube::new(*cube));
        }
        registry.register(CentralSphere::new(rig.sphere));
        registry.register(WalkingFigure::new(rig.man));
        registry.register(SwayingFigure::new(rig.woman));
        registry.register(ClockHands::new(rig.hour_hand, rig.minute_hand));
        registry.register(FanBlades::new(&rig.fan_blades));
        registry.register(PulsingLight::new(rig.point_light));
        registry.register(ScreenGlow::new(rig.screen));
        registry
    }

    pub fn register(&mut self, entity: impl Animated + 'static) {
        self.entities.push(Box::new(entity));
    }

    pub fn update_all(&mut self, elapsed: f64, scene: &mut Scene) {
        for entity in &mut self.entities {
            entity.update(elapsed, scene);
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entities.iter().map(|e| e.name())
    }
}

impl std::fmt::Debug for AnimationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomview_common::Color;
    use roomview_scene::furnish;

    fn room() -> (Scene, RoomRig) {
        let mut scene = Scene::new(Color::BLACK);
        let rig = furnish(&mut scene, 5);
        (scene, rig)
    }

    #[test]
    fn room_registry_covers_every_entity() {
        let (_, rig) = room();
        let registry = AnimationRegistry::for_room(&rig);
        // 5 cubes, sphere, two figures, clock, fan, light, screen
        assert_eq!(registry.len(), 12);
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names.iter().filter(|n| **n == "floating cube").count(), 5);
        assert!(names.contains(&"clock hands"));
    }

    #[test]
    fn hands_depend_only_on_elapsed() {
        let (mut scene, rig) = room();
        let mut registry = AnimationRegistry::for_room(&rig);
        registry.update_all(0.0, &mut scene);
        assert_eq!(scene.transform(rig.hour_hand).unwrap().rotation.z, 0.0);
        assert_eq!(scene.transform(rig.minute_hand).unwrap().rotation.z, 0.0);

        // one tick or many, t = 10 lands in the same place
        for t in [2.5, 7.0, 10.0] {
            registry.update_all(t, &mut scene);
        }
        let hour = scene.transform(rig.hour_hand).unwrap().rotation.z;
        let minute = scene.transform(rig.minute_hand).unwrap().rotation.z;
        assert!((hour - 1.0).abs() < 1e-6);
        assert!((minute - 5.0).abs() < 1e-6);
    }

    #[test]
    fn same_ticks_same_scene() {
        let (mut a, rig) = room();
        let (mut b, _) = room();
        let mut ra = AnimationRegistry::for_room(&rig);
        let mut rb = AnimationRegistry::for_room(&rig);
        for i in 0..50 {
            let t = f64::from(i) / 60.0;
            ra.update_all(t, &mut a);
            rb.update_all(t, &mut b);
        }
        assert_eq!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn empty_registry_leaves_scene_alone() {
        let (mut scene, _) = room();
        let before = scene.state_hash();
        let mut registry = AnimationRegistry::new();
        assert!(registry.is_empty());
        registry.update_all(3.0, &mut scene);
        assert_eq!(before, scene.state_hash());
    }
}
