use serde::{Deserialize, Serialize};

/// Linear RGB colour with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Colour from a packed `0xRRGGBB` value.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as f32 / 255.0,
            g: ((value >> 8) & 0xff) as f32 / 255.0,
            b: (value & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn scaled(self, k: f32) -> Self {
        Self::rgb(self.r * k, self.g * k, self.b * k)
    }
}

/// Shape of a renderable object, in the object's local space.
///
/// Planes and circles lie in the XY plane facing +Z. Cylinders, spheres and
/// boxes are centred on the origin with Y up. Tori lie in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GeometryDescriptor {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Plane {
        width: f32,
        height: f32,
    },
    Circle {
        radius: f32,
        segments: u32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        open_ended: bool,
    },
    /// Sphere, optionally cut to a cap: `theta_length` is the polar sweep
    /// from the north pole, `PI` for a full sphere.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
        theta_length: f32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
        arc: f32,
    },
}

impl GeometryDescriptor {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Box {
            width,
            height,
            depth,
        }
    }

    pub fn plane(width: f32, height: f32) -> Self {
        Self::Plane { width, height }
    }

    pub fn cylinder(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    ) -> Self {
        Self::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            open_ended: false,
        }
    }

    pub fn sphere(radius: f32, segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments: segments,
            height_segments: segments,
            theta_length: std::f32::consts::PI,
        }
    }

    /// Short tag used in debug output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Plane { .. } => "plane",
            Self::Circle { .. } => "circle",
            Self::Cylinder { .. } => "cylinder",
            Self::Sphere { .. } => "sphere",
            Self::Torus { .. } => "torus",
        }
    }
}

/// Surface description of a renderable object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    /// Below 1.0 the object is drawn blended.
    pub opacity: f32,
    pub double_sided: bool,
}

impl Default for MaterialDescriptor {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
            double_sided: false,
        }
    }
}

impl MaterialDescriptor {
    pub fn color(hex: u32) -> Self {
        Self {
            color: Color::hex(hex),
            ..Self::default()
        }
    }

    pub fn roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    pub fn emissive(mut self, hex: u32, intensity: f32) -> Self {
        self.emissive = Color::hex(hex);
        self.emissive_intensity = intensity;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colour_unpacks_channels() {
        let c = Color::hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn material_builder_keeps_defaults() {
        let m = MaterialDescriptor::color(0x0066cc).emissive(0x003366, 0.7);
        assert_eq!(m.emissive_intensity, 0.7);
        assert_eq!(m.opacity, 1.0);
        assert!(!m.is_transparent());
        assert!(MaterialDescriptor::default().opacity(0.4).is_transparent());
    }

    #[test]
    fn full_sphere_sweeps_pi() {
        match GeometryDescriptor::sphere(1.0, 16) {
            GeometryDescriptor::Sphere { theta_length, .. } => {
                assert_eq!(theta_length, std::f32::consts::PI)
            }
            other => panic!("unexpected geometry {other:?}"),
        }
    }
}
