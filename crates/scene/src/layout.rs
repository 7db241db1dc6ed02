//! The furnished room: floor, walls, furniture, décor, two figures, lights.
//!
//! Everything here is static placement. The handles of the parts that move
//! are returned in a [`RoomRig`] so the animation layer can drive them.

use crate::scene::{LightKind, Scene};
use glam::Vec3;
use roomview_common::{
    Color, GeometryDescriptor as Geo, LightId, MaterialDescriptor as Mat, ObjectId, SeededRng,
    Transform,
};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI, TAU};

pub const BACKGROUND: u32 = 0x87ceeb;

/// One floating cube and its fixed motion parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeRig {
    pub object: ObjectId,
    pub initial_y: f32,
    pub offset: f32,
    pub rot_speed: f32,
}

/// One ceiling-fan blade and the angle it was mounted at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeRig {
    pub object: ObjectId,
    pub angle: f32,
}

/// The articulated parts of a standing figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureRig {
    pub group: ObjectId,
    pub body: ObjectId,
    pub head: ObjectId,
    pub left_arm: ObjectId,
    pub right_arm: ObjectId,
    pub left_leg: ObjectId,
    pub right_leg: ObjectId,
    /// Where the group stands before any animation is applied.
    pub base_position: Vec3,
    pub base_rotation: Vec3,
}

/// Handles to every part of the room that animates.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomRig {
    pub cubes: Vec<CubeRig>,
    pub sphere: ObjectId,
    pub hour_hand: ObjectId,
    pub minute_hand: ObjectId,
    pub fan_blades: Vec<BladeRig>,
    pub point_light: LightId,
    pub screen: ObjectId,
    pub man: FigureRig,
    pub woman: FigureRig,
}

struct Builder<'a> {
    scene: &'a mut Scene,
}

impl Builder<'_> {
    fn mesh(&mut self, name: &str, geo: Geo, mat: Mat, transform: Transform) -> ObjectId {
        let id = self.scene.create_object(name, geo, mat);
        self.scene.set_transform(id, transform);
        id
    }

    fn part(
        &mut self,
        parent: ObjectId,
        name: &str,
        geo: Geo,
        mat: Mat,
        transform: Transform,
    ) -> ObjectId {
        let id = self.mesh(name, geo, mat, transform);
        self.scene.attach(id, parent);
        id
    }
}

fn at(x: f32, y: f32, z: f32) -> Transform {
    Transform::at(Vec3::new(x, y, z))
}

fn cap(radius: f32, segments: u32, theta_length: f32) -> Geo {
    Geo::Sphere {
        radius,
        width_segments: segments,
        height_segments: segments,
        theta_length,
    }
}

/// Populate `scene` with the whole room. `seed` picks the cube colours and
/// spin speeds.
pub fn furnish(scene: &mut Scene, seed: u64) -> RoomRig {
    let mut rng = SeededRng::new(seed);
    let mut b = Builder { scene };

    b.scene
        .create_light("ambient", LightKind::Ambient, Color::WHITE, 0.6);
    b.scene.create_light(
        "sun",
        LightKind::Directional {
            position: Vec3::new(10.0, 20.0, 10.0),
        },
        Color::WHITE,
        0.8,
    );
    let point_light = b.scene.create_light(
        "ceiling glow",
        LightKind::Point {
            position: Vec3::new(0.0, 5.0, 0.0),
            range: 20.0,
        },
        Color::hex(0xffa500),
        0.8,
    );

    shell(&mut b);
    let screen = living_corner(&mut b);
    table_setting(&mut b);
    let sphere = b.mesh(
        "sphere",
        Geo::sphere(0.4, 32),
        Mat::color(0xff6347).roughness(0.2).metalness(0.8),
        at(0.0, 2.0, 0.0),
    );
    bookshelf(&mut b);
    let (hour_hand, minute_hand) = wall_clock(&mut b);
    window(&mut b);
    let fan_blades = ceiling_fan(&mut b);
    plants(&mut b);
    let cubes = floating_cubes(&mut b, &mut rng);
    lamp_and_frames(&mut b);
    let man = man(&mut b);
    let woman = woman(&mut b);

    tracing::debug!(
        objects = b.scene.object_count(),
        lights = b.scene.light_count(),
        "room furnished"
    );

    RoomRig {
        cubes,
        sphere,
        hour_hand,
        minute_hand,
        fan_blades,
        point_light,
        screen,
        man,
        woman,
    }
}

fn shell(b: &mut Builder) {
    b.mesh(
        "floor",
        Geo::plane(30.0, 30.0),
        Mat::color(0x2d5016).roughness(0.8),
        Transform::default().with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
    );
    let wall = Mat::color(0xf5deb3);
    b.mesh(
        "back wall",
        Geo::plane(30.0, 12.0),
        wall,
        at(0.0, 6.0, -15.0),
    );
    b.mesh(
        "left wall",
        Geo::plane(30.0, 12.0),
        wall,
        at(-15.0, 6.0, 0.0).with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0)),
    );
    b.mesh(
        "right wall",
        Geo::plane(30.0, 12.0),
        wall,
        at(15.0, 6.0, 0.0).with_rotation(Vec3::new(0.0, -FRAC_PI_2, 0.0)),
    );
    b.mesh(
        "ceiling",
        Geo::plane(30.0, 30.0),
        Mat::color(0xffffff),
        at(0.0, 12.0, 0.0).with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
    );
}

/// Sofa, TV stand, TV and rug. Returns the TV screen.
fn living_corner(b: &mut Builder) -> ObjectId {
    let sofa = Mat::color(0x8b0000).roughness(0.7);
    b.mesh(
        "sofa base",
        Geo::cuboid(4.0, 0.8, 2.0),
        sofa,
        at(-7.0, 0.4, 5.0),
    );
    b.mesh(
        "sofa back",
        Geo::cuboid(4.0, 1.5, 0.4),
        sofa,
        at(-7.0, 1.35, 4.2),
    );
    b.mesh(
        "sofa arm left",
        Geo::cuboid(0.4, 1.0, 2.0),
        sofa,
        at(-9.0, 0.9, 5.0),
    );
    b.mesh(
        "sofa arm right",
        Geo::cuboid(0.4, 1.0, 2.0),
        sofa,
        at(-5.0, 0.9, 5.0),
    );

    b.mesh(
        "tv stand",
        Geo::cuboid(3.0, 0.6, 1.0),
        Mat::color(0x2c1810),
        at(-7.0, 0.3, -13.0),
    );
    b.mesh(
        "tv",
        Geo::cuboid(2.5, 1.5, 0.1),
        Mat::color(0x111111).metalness(0.9),
        at(-7.0, 1.7, -13.5),
    );
    let screen = b.mesh(
        "tv screen",
        Geo::plane(2.2, 1.3),
        Mat::color(0x0066cc).emissive(0x003366, 0.7),
        at(-7.0, 1.7, -13.45),
    );

    b.mesh(
        "rug",
        Geo::plane(6.0, 4.0),
        Mat::color(0x8b4726).roughness(0.95),
        at(0.0, 0.02, 0.0).with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
    );
    screen
}

fn table_setting(b: &mut Builder) {
    let wood = Mat::color(0x8b4513).roughness(0.4);
    b.mesh(
        "table top",
        Geo::cuboid(4.0, 0.2, 2.0),
        wood,
        at(0.0, 1.5, 0.0),
    );
    for (x, z) in [(-1.8, -0.8), (1.8, -0.8), (-1.8, 0.8), (1.8, 0.8)] {
        b.mesh(
            "table leg",
            Geo::cylinder(0.1, 0.1, 1.5, 16),
            wood,
            at(x, 0.75, z),
        );
    }

    let vase = Mat::color(0x1e90ff).metalness(0.8).roughness(0.2);
    b.mesh(
        "vase bottom",
        Geo::cylinder(0.2, 0.3, 0.6, 16),
        vase,
        at(-1.2, 1.9, 0.0),
    );
    b.mesh(
        "vase top",
        Geo::cylinder(0.15, 0.2, 0.4, 16),
        vase,
        at(-1.2, 2.4, 0.0),
    );
    for (i, hex) in [0xff69b4, 0xff1493, 0xffd700, 0xff6347].into_iter().enumerate() {
        let angle = i as f32 / 4.0 * TAU;
        b.mesh(
            "flower",
            Geo::sphere(0.08, 8),
            Mat::color(hex).emissive(hex, 0.3),
            at(-1.2 + angle.cos() * 0.15, 2.7, angle.sin() * 0.15),
        );
    }

    for (i, hex) in [0x8b0000, 0x00008b, 0x006400].into_iter().enumerate() {
        b.mesh(
            "book",
            Geo::cuboid(0.6, 0.1, 0.4),
            Mat::color(hex).roughness(0.8),
            at(1.3, 1.65 + i as f32 * 0.11, 0.3),
        );
    }
}

fn bookshelf(b: &mut Builder) {
    let shelf = Mat::color(0x654321).roughness(0.7);
    b.mesh(
        "shelf back",
        Geo::cuboid(3.0, 5.0, 0.2),
        shelf,
        at(-8.0, 2.5, -14.8),
    );
    for i in 0..5 {
        b.mesh(
            "shelf board",
            Geo::cuboid(3.0, 0.1, 1.0),
            shelf,
            at(-8.0, 0.5 + i as f32 * 1.2, -14.5),
        );
    }
    let spines = [0xff0000, 0x0000ff, 0x00ff00, 0xffff00, 0xff00ff, 0x00ffff];
    for row in 0..4 {
        for (slot, hex) in spines.into_iter().enumerate() {
            b.mesh(
                "shelf book",
                Geo::cuboid(0.15, 0.7, 0.5),
                Mat::color(hex).roughness(0.8),
                at(-9.2 + slot as f32 * 0.45, 1.0 + row as f32 * 1.2, -14.2),
            );
        }
    }
}

/// Returns (hour hand, minute hand).
fn wall_clock(b: &mut Builder) -> (ObjectId, ObjectId) {
    b.mesh(
        "clock body",
        Geo::cylinder(0.5, 0.5, 0.1, 32),
        Mat::color(0x2c1810),
        at(3.0, 8.0, -14.9).with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
    );
    b.mesh(
        "clock face",
        Geo::Circle {
            radius: 0.45,
            segments: 32,
        },
        Mat::color(0xffffff),
        at(3.0, 8.0, -14.85),
    );
    let hour = b.mesh(
        "hour hand",
        Geo::cuboid(0.05, 0.25, 0.01),
        Mat::color(0x000000),
        at(3.0, 8.0, -14.84),
    );
    let minute = b.mesh(
        "minute hand",
        Geo::cuboid(0.03, 0.35, 0.01),
        Mat::color(0x000000),
        at(3.0, 8.0, -14.83),
    );
    (hour, minute)
}

fn window(b: &mut Builder) {
    b.mesh(
        "window frame",
        Geo::cuboid(3.0, 3.0, 0.2),
        Mat::color(0x4a3c2a),
        at(8.0, 6.0, -14.9),
    );
    b.mesh(
        "window glass",
        Geo::plane(2.5, 2.5),
        Mat::color(0x87ceeb).opacity(0.4).metalness(0.9),
        at(8.0, 6.0, -14.85),
    );
}

fn ceiling_fan(b: &mut Builder) -> Vec<BladeRig> {
    let steel = Mat::color(0x708090).metalness(0.8);
    b.mesh(
        "fan pole",
        Geo::cylinder(0.1, 0.1, 2.0, 16),
        steel,
        at(0.0, 11.0, 0.0),
    );
    b.mesh(
        "fan body",
        Geo::cylinder(0.4, 0.3, 0.3, 16),
        steel,
        at(0.0, 10.0, 0.0),
    );
    (0..4)
        .map(|i| {
            let angle = i as f32 / 4.0 * TAU;
            let object = b.mesh(
                "fan blade",
                Geo::cuboid(1.5, 0.05, 0.3),
                steel,
                at(angle.cos() * 0.75, 9.9, angle.sin() * 0.75)
                    .with_rotation(Vec3::new(0.0, angle, 0.0)),
            );
            BladeRig { object, angle }
        })
        .collect()
}

fn plants(b: &mut Builder) {
    for i in 0..3 {
        let x = -10.0 + i as f32 * 5.0;
        b.mesh(
            "plant pot",
            Geo::cylinder(0.4, 0.3, 0.6, 16),
            Mat::color(0xa0522d).roughness(0.9),
            at(x, 0.3, 10.0),
        );
        for j in 0..6 {
            let angle = j as f32 / 6.0 * TAU;
            b.mesh(
                "leaf",
                Geo::sphere(0.3, 8),
                Mat::color(0x228b22).roughness(0.8),
                at(x + angle.cos() * 0.4, 1.0, 10.0 + angle.sin() * 0.4)
                    .with_scale(Vec3::new(1.0, 0.6, 1.0)),
            );
        }
    }
}

fn floating_cubes(b: &mut Builder, rng: &mut SeededRng) -> Vec<CubeRig> {
    (0..5)
        .map(|i| {
            let color = Color::rgb(rng.next_f32(), rng.next_f32(), rng.next_f32());
            let rot_speed = 0.01 + rng.next_f32() * 0.03;
            let initial_y = 4.0 + (i as f32).sin();
            let object = b.mesh(
                "floating cube",
                Geo::cuboid(0.6, 0.6, 0.6),
                Mat {
                    color,
                    ..Mat::default()
                }
                .roughness(0.3)
                .metalness(0.7),
                at(-6.0 + i as f32 * 3.0, initial_y, -5.0),
            );
            CubeRig {
                object,
                initial_y,
                offset: i as f32 * FRAC_PI_3,
                rot_speed,
            }
        })
        .collect()
}

fn lamp_and_frames(b: &mut Builder) {
    b.mesh(
        "lamp stand",
        Geo::cylinder(0.06, 0.1, 1.5, 16),
        Mat::color(0x2c2c2c).metalness(0.9),
        at(1.5, 2.35, 0.5),
    );
    b.mesh(
        "lamp shade",
        Geo::Cylinder {
            radius_top: 0.5,
            radius_bottom: 0.6,
            height: 0.7,
            radial_segments: 16,
            open_ended: true,
        },
        Mat::color(0xffffdd).emissive(0xffffaa, 0.5).double_sided(),
        at(1.5, 3.3, 0.5),
    );

    let frames = [
        (-14.9, 7.0, -5.0, FRAC_PI_2, 0xff6b6b),
        (-14.9, 7.0, 5.0, FRAC_PI_2, 0x4ecdc4),
        (14.9, 7.0, -5.0, -FRAC_PI_2, 0xffe66d),
    ];
    for (x, y, z, ry, hex) in frames {
        let turn = Vec3::new(0.0, ry, 0.0);
        b.mesh(
            "picture frame",
            Geo::cuboid(1.5, 2.0, 0.1),
            Mat::color(0x2c1810),
            at(x, y, z).with_rotation(turn),
        );
        let inset = if ry > 0.0 { -0.06 } else { 0.06 };
        b.mesh(
            "picture",
            Geo::plane(1.2, 1.7),
            Mat::color(hex),
            at(x + inset, y, z).with_rotation(turn),
        );
    }
}

fn man(b: &mut Builder) -> FigureRig {
    let group = b.scene.create_group("man");
    let shirt = Mat::color(0x0066cc).roughness(0.7);
    let skin = Mat::color(0xffdbac).roughness(0.8);
    let eye = Mat::color(0x000000);

    let body = b.part(
        group,
        "man body",
        Geo::cylinder(0.3, 0.35, 1.2, 16),
        shirt,
        at(0.0, 1.4, 0.0),
    );
    let head = b.part(
        group,
        "man head",
        Geo::sphere(0.25, 16),
        skin,
        at(0.0, 2.25, 0.0),
    );
    b.part(
        group,
        "man hair",
        cap(0.26, 16, FRAC_PI_2),
        Mat::color(0x2c1810).roughness(0.9),
        at(0.0, 2.35, 0.0),
    );
    b.part(
        group,
        "man eye",
        Geo::sphere(0.04, 8),
        eye,
        at(-0.08, 2.3, 0.22),
    );
    b.part(
        group,
        "man eye",
        Geo::sphere(0.04, 8),
        eye,
        at(0.08, 2.3, 0.22),
    );

    let arm = Geo::cylinder(0.08, 0.08, 0.9, 8);
    let left_arm = b.part(
        group,
        "man left arm",
        arm,
        shirt,
        at(-0.38, 1.5, 0.0).with_rotation(Vec3::new(0.0, 0.0, 0.3)),
    );
    let right_arm = b.part(
        group,
        "man right arm",
        arm,
        shirt,
        at(0.38, 1.5, 0.0).with_rotation(Vec3::new(0.0, 0.0, -0.3)),
    );
    b.part(
        group,
        "man hand",
        Geo::sphere(0.09, 8),
        skin,
        at(-0.5, 1.05, 0.0),
    );
    b.part(
        group,
        "man hand",
        Geo::sphere(0.09, 8),
        skin,
        at(0.5, 1.05, 0.0),
    );

    let pants = Mat::color(0x333333).roughness(0.8);
    let leg = Geo::cylinder(0.12, 0.1, 0.8, 8);
    let left_leg = b.part(group, "man left leg", leg, pants, at(-0.15, 0.4, 0.0));
    let right_leg = b.part(group, "man right leg", leg, pants, at(0.15, 0.4, 0.0));

    let shoe = Mat::color(0x1a1a1a);
    b.part(
        group,
        "man shoe",
        Geo::cuboid(0.15, 0.1, 0.25),
        shoe,
        at(-0.15, 0.05, 0.05),
    );
    b.part(
        group,
        "man shoe",
        Geo::cuboid(0.15, 0.1, 0.25),
        shoe,
        at(0.15, 0.05, 0.05),
    );

    let base_position = Vec3::new(2.5, 0.0, 1.0);
    let base_rotation = Vec3::new(0.0, -FRAC_PI_4, 0.0);
    b.scene.set_transform(
        group,
        Transform::at(base_position).with_rotation(base_rotation),
    );

    FigureRig {
        group,
        body,
        head,
        left_arm,
        right_arm,
        left_leg,
        right_leg,
        base_position,
        base_rotation,
    }
}

fn woman(b: &mut Builder) -> FigureRig {
    let group = b.scene.create_group("woman");
    let dress = Mat::color(0xff1493).roughness(0.6);
    let skin = Mat::color(0xffd7ba).roughness(0.7);
    let eye = Mat::color(0x000000);

    let body = b.part(
        group,
        "woman body",
        Geo::cylinder(0.25, 0.35, 1.1, 16),
        dress,
        at(0.0, 1.35, 0.0),
    );
    let head = b.part(
        group,
        "woman head",
        Geo::sphere(0.23, 16),
        skin,
        at(0.0, 2.15, 0.0),
    );
    b.part(
        group,
        "woman hair",
        Geo::sphere(0.28, 16),
        Mat::color(0x8b4513).roughness(0.9),
        at(0.0, 2.25, 0.0).with_scale(Vec3::new(1.0, 1.2, 1.0)),
    );
    b.part(
        group,
        "woman eye",
        Geo::sphere(0.04, 8),
        eye,
        at(-0.08, 2.2, 0.2),
    );
    b.part(
        group,
        "woman eye",
        Geo::sphere(0.04, 8),
        eye,
        at(0.08, 2.2, 0.2),
    );
    b.part(
        group,
        "woman smile",
        Geo::Torus {
            radius: 0.08,
            tube: 0.015,
            radial_segments: 8,
            tubular_segments: 16,
            arc: PI,
        },
        Mat::color(0xff6b9d),
        at(0.0, 2.08, 0.21).with_rotation(Vec3::new(-0.3, 0.0, 0.0)),
    );

    let arm = Geo::cylinder(0.07, 0.07, 0.85, 8);
    let left_arm = b.part(
        group,
        "woman left arm",
        arm,
        dress,
        at(-0.32, 1.4, 0.0).with_rotation(Vec3::new(0.0, 0.0, 0.4)),
    );
    let right_arm = b.part(
        group,
        "woman right arm",
        arm,
        dress,
        at(0.32, 1.4, 0.0).with_rotation(Vec3::new(0.0, 0.0, -0.4)),
    );
    b.part(
        group,
        "woman hand",
        Geo::sphere(0.08, 8),
        skin,
        at(-0.45, 0.98, 0.0),
    );
    b.part(
        group,
        "woman hand",
        Geo::sphere(0.08, 8),
        skin,
        at(0.45, 0.98, 0.0),
    );

    b.part(
        group,
        "woman skirt",
        Geo::cylinder(0.35, 0.45, 0.6, 16),
        Mat::color(0xff1493).roughness(0.7),
        at(0.0, 0.6, 0.0),
    );
    let leg_skin = Mat::color(0xffd7ba).roughness(0.8);
    let leg = Geo::cylinder(0.08, 0.08, 0.3, 8);
    let left_leg = b.part(group, "woman left leg", leg, leg_skin, at(-0.12, 0.15, 0.0));
    let right_leg = b.part(group, "woman right leg", leg, leg_skin, at(0.12, 0.15, 0.0));

    let shoe = Mat::color(0xcc0066).metalness(0.4);
    let heel = Geo::cylinder(0.08, 0.12, 0.15, 8);
    b.part(group, "woman shoe", heel, shoe, at(-0.12, 0.05, 0.0));
    b.part(group, "woman shoe", heel, shoe, at(0.12, 0.05, 0.0));

    let base_position = Vec3::new(-5.0, 0.0, 4.0);
    let base_rotation = Vec3::new(0.0, FRAC_PI_6, 0.0);
    b.scene.set_transform(
        group,
        Transform::at(base_position).with_rotation(base_rotation),
    );

    FigureRig {
        group,
        body,
        head,
        left_arm,
        right_arm,
        left_leg,
        right_leg,
        base_position,
        base_rotation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ObjectKind;

    fn room(seed: u64) -> (Scene, RoomRig) {
        let mut scene = Scene::new(Color::hex(BACKGROUND));
        let rig = furnish(&mut scene, seed);
        (scene, rig)
    }

    #[test]
    fn room_has_every_animated_part() {
        let (scene, rig) = room(1);
        assert_eq!(rig.cubes.len(), 5);
        assert_eq!(rig.fan_blades.len(), 4);
        for id in [rig.sphere, rig.hour_hand, rig.minute_hand, rig.screen] {
            assert!(scene.object(id).is_some());
        }
        assert!(scene.light(rig.point_light).is_some());
        assert_eq!(scene.light_count(), 3);
    }

    #[test]
    fn cube_parameters_follow_index() {
        let (scene, rig) = room(9);
        for (i, cube) in rig.cubes.iter().enumerate() {
            assert!((cube.initial_y - (4.0 + (i as f32).sin())).abs() < 1e-6);
            assert!((cube.offset - i as f32 * FRAC_PI_3).abs() < 1e-6);
            assert!((0.01..0.04).contains(&cube.rot_speed));
            let t = scene.transform(cube.object).unwrap();
            assert_eq!(t.position.y, cube.initial_y);
        }
    }

    #[test]
    fn same_seed_same_room() {
        let (a, rig_a) = room(42);
        let (b, rig_b) = room(42);
        assert_eq!(rig_a, rig_b);
        assert_eq!(a.state_hash(), b.state_hash());
        let (_, rig_c) = room(43);
        assert_ne!(rig_a.cubes[0].rot_speed, rig_c.cubes[0].rot_speed);
    }

    #[test]
    fn figure_parts_hang_off_their_group() {
        let (scene, rig) = room(0);
        for figure in [rig.man, rig.woman] {
            for part in [
                figure.body,
                figure.head,
                figure.left_arm,
                figure.right_arm,
                figure.left_leg,
                figure.right_leg,
            ] {
                assert_eq!(scene.object(part).unwrap().parent, Some(figure.group));
            }
            assert_eq!(scene.object(figure.group).unwrap().kind, ObjectKind::Group);
            let placed = scene.transform(figure.group).unwrap();
            assert_eq!(placed.position, figure.base_position);
        }
    }

    #[test]
    fn fan_blades_start_at_their_mount_angle() {
        let (scene, rig) = room(0);
        for blade in &rig.fan_blades {
            let mounted = scene.transform(blade.object).unwrap();
            assert_eq!(mounted.rotation.y, blade.angle);
        }
    }

    #[test]
    fn screen_glows() {
        let (scene, rig) = room(0);
        let screen = scene.object(rig.screen).unwrap();
        assert_eq!(screen.material().unwrap().emissive_intensity, 0.7);
    }
}
