use glam::{Mat4, Vec3};
use roomview_common::{Color, GeometryDescriptor, LightId, MaterialDescriptor, ObjectId, Transform};
use serde::Serialize;
use std::collections::BTreeMap;

/// What an object is: an invisible grouping node or something drawable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ObjectKind {
    Group,
    Mesh {
        geometry: GeometryDescriptor,
        material: MaterialDescriptor,
    },
}

/// Per-object data stored in the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub parent: Option<ObjectId>,
}

impl SceneObject {
    pub fn material(&self) -> Option<&MaterialDescriptor> {
        match &self.kind {
            ObjectKind::Mesh { material, .. } => Some(material),
            ObjectKind::Group => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LightKind {
    Ambient,
    /// Parallel light shining from `position` towards the origin.
    Directional { position: Vec3 },
    Point { position: Vec3, range: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Light {
    pub name: String,
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
}

/// The scene every view animates and renders.
///
/// Uses BTreeMap so iteration follows handle order, which is creation order.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: BTreeMap<ObjectId, SceneObject>,
    lights: BTreeMap<LightId, Light>,
    background: Color,
    next_object: u32,
    next_light: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            objects: BTreeMap::new(),
            lights: BTreeMap::new(),
            background,
            next_object: 0,
            next_light: 0,
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Read-only access to all objects, in creation order.
    pub fn objects(&self) -> &BTreeMap<ObjectId, SceneObject> {
        &self.objects
    }

    pub fn lights(&self) -> &BTreeMap<LightId, Light> {
        &self.lights
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(&id)
    }

    pub fn transform(&self, id: ObjectId) -> Option<Transform> {
        self.objects.get(&id).map(|o| o.transform)
    }

    /// Create a drawable object at the origin. Returns its handle.
    pub fn create_object(
        &mut self,
        name: impl Into<String>,
        geometry: GeometryDescriptor,
        material: MaterialDescriptor,
    ) -> ObjectId {
        self.insert(name.into(), ObjectKind::Mesh { geometry, material })
    }

    /// Create an empty grouping node. Children inherit its transform.
    pub fn create_group(&mut self, name: impl Into<String>) -> ObjectId {
        self.insert(name.into(), ObjectKind::Group)
    }

    fn insert(&mut self, name: String, kind: ObjectKind) -> ObjectId {
        let id = ObjectId(self.next_object);
        self.next_object += 1;
        self.objects.insert(
            id,
            SceneObject {
                name,
                kind,
                transform: Transform::default(),
                parent: None,
            },
        );
        id
    }

    pub fn create_light(
        &mut self,
        name: impl Into<String>,
        kind: LightKind,
        color: Color,
        intensity: f32,
    ) -> LightId {
        let id = LightId(self.next_light);
        self.next_light += 1;
        self.lights.insert(
            id,
            Light {
                name: name.into(),
                kind,
                color,
                intensity,
            },
        );
        id
    }

    /// Parent `child` under `parent`. Refuses unknown handles and cycles.
    pub fn attach(&mut self, child: ObjectId, parent: ObjectId) -> bool {
        if !self.objects.contains_key(&child) || !self.objects.contains_key(&parent) {
            return false;
        }
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return false;
            }
            cursor = self.objects.get(&id).and_then(|o| o.parent);
        }
        if let Some(obj) = self.objects.get_mut(&child) {
            obj.parent = Some(parent);
        }
        true
    }

    pub fn set_transform(&mut self, id: ObjectId, transform: Transform) -> bool {
        self.with_object(id, |o| o.transform = transform)
    }

    pub fn set_position(&mut self, id: ObjectId, position: Vec3) -> bool {
        self.with_object(id, |o| o.transform.position = position)
    }

    pub fn set_rotation(&mut self, id: ObjectId, rotation: Vec3) -> bool {
        self.with_object(id, |o| o.transform.rotation = rotation)
    }

    pub fn set_scale(&mut self, id: ObjectId, scale: Vec3) -> bool {
        self.with_object(id, |o| o.transform.scale = scale)
    }

    /// Edit one object's transform in place.
    pub fn update_transform(&mut self, id: ObjectId, f: impl FnOnce(&mut Transform)) -> bool {
        self.with_object(id, |o| f(&mut o.transform))
    }

    /// Set the glow strength of a mesh's material. Groups have no material.
    pub fn set_emissive_intensity(&mut self, id: ObjectId, intensity: f32) -> bool {
        match self.objects.get_mut(&id).map(|o| &mut o.kind) {
            Some(ObjectKind::Mesh { material, .. }) => {
                material.emissive_intensity = intensity;
                true
            }
            _ => false,
        }
    }

    pub fn set_light_intensity(&mut self, id: LightId, intensity: f32) -> bool {
        match self.lights.get_mut(&id) {
            Some(light) => {
                light.intensity = intensity;
                true
            }
            None => false,
        }
    }

    fn with_object(&mut self, id: ObjectId, f: impl FnOnce(&mut SceneObject)) -> bool {
        match self.objects.get_mut(&id) {
            Some(obj) => {
                f(obj);
                true
            }
            None => false,
        }
    }

    /// Object-to-world matrix, composing every ancestor's transform.
    pub fn world_matrix(&self, id: ObjectId) -> Option<Mat4> {
        let obj = self.objects.get(&id)?;
        let local = obj.transform.matrix();
        match obj.parent {
            Some(parent) => Some(self.world_matrix(parent)? * local),
            None => Some(local),
        }
    }

    /// Deterministic hash of every transform, material intensity and light
    /// intensity. Two scenes with equal hashes look the same.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        for (id, obj) in &self.objects {
            mix(&mut h, &id.0.to_le_bytes());
            let t = &obj.transform;
            for v in [t.position, t.rotation, t.scale] {
                mix(&mut h, &v.x.to_le_bytes());
                mix(&mut h, &v.y.to_le_bytes());
                mix(&mut h, &v.z.to_le_bytes());
            }
            if let Some(material) = obj.material() {
                mix(&mut h, &material.emissive_intensity.to_le_bytes());
            }
        }
        for (id, light) in &self.lights {
            mix(&mut h, &id.0.to_le_bytes());
            mix(&mut h, &light.intensity.to_le_bytes());
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(scene: &mut Scene) -> ObjectId {
        scene.create_object(
            "cube",
            GeometryDescriptor::cuboid(1.0, 1.0, 1.0),
            MaterialDescriptor::default(),
        )
    }

    #[test]
    fn scene_starts_empty() {
        let s = Scene::default();
        assert_eq!(s.object_count(), 0);
        assert_eq!(s.light_count(), 0);
    }

    #[test]
    fn handles_follow_creation_order() {
        let mut s = Scene::default();
        let a = cube(&mut s);
        let b = s.create_group("group");
        let c = cube(&mut s);
        assert!(a < b && b < c);
        let keys: Vec<ObjectId> = s.objects().keys().copied().collect();
        assert_eq!(keys, vec![a, b, c]);
    }

    #[test]
    fn setters_touch_only_their_component() {
        let mut s = Scene::default();
        let id = cube(&mut s);
        assert!(s.set_position(id, Vec3::new(1.0, 2.0, 3.0)));
        assert!(s.set_rotation(id, Vec3::new(0.0, 0.5, 0.0)));
        assert!(s.set_scale(id, Vec3::new(1.0, 1.5, 1.0)));
        let t = s.transform(id).unwrap();
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.rotation, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(t.scale, Vec3::new(1.0, 1.5, 1.0));
    }

    #[test]
    fn unknown_handles_are_rejected() {
        let mut s = Scene::default();
        assert!(!s.set_position(ObjectId(9), Vec3::ONE));
        assert!(!s.set_light_intensity(LightId(3), 1.0));
    }

    #[test]
    fn emissive_intensity_only_on_meshes() {
        let mut s = Scene::default();
        let mesh = cube(&mut s);
        let group = s.create_group("g");
        assert!(s.set_emissive_intensity(mesh, 0.3));
        assert!(!s.set_emissive_intensity(group, 0.3));
        let material = s.object(mesh).and_then(SceneObject::material).unwrap();
        assert_eq!(material.emissive_intensity, 0.3);
    }

    #[test]
    fn light_intensity_updates() {
        let mut s = Scene::default();
        let l = s.create_light("ambient", LightKind::Ambient, Color::WHITE, 0.6);
        assert!(s.set_light_intensity(l, 0.4));
        assert_eq!(s.light(l).unwrap().intensity, 0.4);
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut s = Scene::default();
        let group = s.create_group("g");
        let child = cube(&mut s);
        assert!(s.attach(child, group));
        s.set_position(group, Vec3::new(10.0, 0.0, 0.0));
        s.set_position(child, Vec3::new(0.0, 1.0, 0.0));
        let p = s.world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(10.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn attach_refuses_cycles() {
        let mut s = Scene::default();
        let a = s.create_group("a");
        let b = s.create_group("b");
        assert!(s.attach(b, a));
        assert!(!s.attach(a, b));
        assert!(!s.attach(a, a));
    }

    #[test]
    fn state_hash_tracks_mutation() {
        let mut s = Scene::default();
        let id = cube(&mut s);
        let before = s.state_hash();
        assert_eq!(before, s.clone().state_hash());
        s.set_rotation(id, Vec3::new(0.0, 0.02, 0.0));
        assert_ne!(before, s.state_hash());
    }

    #[test]
    fn update_transform_edits_in_place() {
        let mut s = Scene::default();
        let id = cube(&mut s);
        s.set_position(id, Vec3::new(4.0, 0.0, -5.0));
        assert!(s.update_transform(id, |t| t.position.y = 1.5));
        assert_eq!(s.transform(id).unwrap().position, Vec3::new(4.0, 1.5, -5.0));
        assert!(!s.update_transform(ObjectId(99), |t| t.position.y = 0.0));
    }
}
