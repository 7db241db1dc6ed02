use super::{Animated, advance, fold, wave};
use roomview_common::{LightId, ObjectId};
use roomview_scene::{BladeRig, CubeRig, Scene};

/// Bobs on a sine wave and tumbles about X and Y.
#[derive(Debug, Clone)]
pub struct FloatingCube {
    rig: CubeRig,
    spin: f64,
}

impl FloatingCube {
    pub const AMPLITUDE: f32 = 0.8;
    pub const FREQUENCY: f64 = 2.0;

    pub fn new(rig: CubeRig) -> Self {
        Self { rig, spin: 0.0 }
    }

    pub fn height_at(&self, elapsed: f64) -> f32 {
        let phase = elapsed * Self::FREQUENCY + f64::from(self.rig.offset);
        self.rig.initial_y + phase.sin() as f32 * Self::AMPLITUDE
    }
}

impl Animated for FloatingCube {
    fn name(&self) -> &'static str {
        "floating cube"
    }

    fn update(&mut self, elapsed: f64, scene: &mut Scene) {
        let spin = advance(&mut self.spin, f64::from(self.rig.rot_speed));
        let y = self.height_at(elapsed);
        scene.update_transform(self.rig.object, |t| {
            t.position.y = y;
            t.rotation.x = spin;
            t.rotation.y = spin;
        });
    }
}

/// The sphere above the table: steady spin, small bob around y = 2.
#[derive(Debug, Clone)]
pub struct CentralSphere {
    object: ObjectId,
    spin: f64,
}

impl CentralSphere {
    pub const SPIN_PER_TICK: f64 = 0.02;

    pub fn new(object: ObjectId) -> Self {
        Self { object, spin: 0.0 }
    }
}

impl Animated for CentralSphere {
    fn name(&self) -> &'static str {
        "central sphere"
    }

    fn update(&mut self, elapsed: f64, scene: &mut Scene) {
        let spin = advance(&mut self.spin, Self::SPIN_PER_TICK);
        scene.update_transform(self.object, |t| {
            t.rotation.y = spin;
            t.position.y = 2.0 + wave(elapsed, 3.0) * 0.1;
        });
    }
}

/// Wall clock. Both hands are pure functions of elapsed time.
#[derive(Debug, Clone)]
pub struct ClockHands {
    hour: ObjectId,
    minute: ObjectId,
}

impl ClockHands {
    /// Radians per second.
    pub const HOUR_RATE: f64 = 0.1;
    pub const MINUTE_RATE: f64 = 0.5;

    pub fn new(hour: ObjectId, minute: ObjectId) -> Self {
        Self { hour, minute }
    }
}

impl Animated for ClockHands {
    fn name(&self) -> &'static str {
        "clock hands"
    }

    fn update(&mut self, elapsed: f64, scene: &mut Scene) {
        let hour = fold(elapsed * Self::HOUR_RATE);
        let minute = fold(elapsed * Self::MINUTE_RATE);
        scene.update_transform(self.hour, |t| t.rotation.z = hour);
        scene.update_transform(self.minute, |t| t.rotation.z = minute);
    }
}

/// Ceiling fan blades, each spinning about its own Y axis from its mount
/// angle.
#[derive(Debug, Clone)]
pub struct FanBlades {
    blades: Vec<(ObjectId, f64)>,
}

impl FanBlades {
    pub const SPIN_PER_TICK: f64 = 0.05;

    pub fn new(blades: &[BladeRig]) -> Self {
        Self {
            blades: blades
                .iter()
                .map(|b| (b.object, f64::from(b.angle)))
                .collect(),
        }
    }
}

impl Animated for FanBlades {
    fn name(&self) -> &'static str {
        "fan blades"
    }

    fn update(&mut self, _elapsed: f64, scene: &mut Scene) {
        for (object, rotation) in &mut self.blades {
            let r = advance(rotation, Self::SPIN_PER_TICK);
            scene.update_transform(*object, |t| t.rotation.y = r);
        }
    }
}

/// The orange ceiling light breathing between 0.4 and 0.8.
#[derive(Debug, Clone)]
pub struct PulsingLight {
    light: LightId,
}

impl PulsingLight {
    pub fn new(light: LightId) -> Self {
        Self { light }
    }

    pub fn intensity_at(elapsed: f64) -> f32 {
        0.6 + wave(elapsed, 2.0) * 0.2
    }
}

impl Animated for PulsingLight {
    fn name(&self) -> &'static str {
        "pulsing light"
    }

    fn update(&mut self, elapsed: f64, scene: &mut Scene) {
        scene.set_light_intensity(self.light, Self::intensity_at(elapsed));
    }
}

/// TV screen glow between 0.3 and 0.7.
#[derive(Debug, Clone)]
pub struct ScreenGlow {
    screen: ObjectId,
}

impl ScreenGlow {
    pub fn new(screen: ObjectId) -> Self {
        Self { screen }
    }

    pub fn intensity_at(elapsed: f64) -> f32 {
        0.5 + wave(elapsed, 3.0) * 0.2
    }
}

impl Animated for ScreenGlow {
    fn name(&self) -> &'static str {
        "screen glow"
    }

    fn update(&mut self, elapsed: f64, scene: &mut Scene) {
        scene.set_emissive_intensity(self.screen, Self::intensity_at(elapsed));
    }
}
