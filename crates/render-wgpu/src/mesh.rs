use bytemuck::{Pod, Zeroable};
use roomview_common::GeometryDescriptor;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

fn v(position: [f32; 3], normal: [f32; 3]) -> Vertex {
    Vertex { position, normal }
}

/// Triangle list in object space. Front faces wind counter-clockwise.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn base(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

pub fn build(geometry: &GeometryDescriptor) -> MeshData {
    match *geometry {
        GeometryDescriptor::Box {
            width,
            height,
            depth,
        } => cuboid(width, height, depth),
        GeometryDescriptor::Plane { width, height } => plane(width, height),
        GeometryDescriptor::Circle { radius, segments } => circle(radius, segments),
        GeometryDescriptor::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            open_ended,
        } => cylinder(
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            open_ended,
        ),
        GeometryDescriptor::Sphere {
            radius,
            width_segments,
            height_segments,
            theta_length,
        } => sphere(radius, width_segments, height_segments, theta_length),
        GeometryDescriptor::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
            arc,
        } => torus(radius, tube, radial_segments, tubular_segments, arc),
    }
}

fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        v([-x, -y,  z], [0.0, 0.0, 1.0]),
        v([ x, -y,  z], [0.0, 0.0, 1.0]),
        v([ x,  y,  z], [0.0, 0.0, 1.0]),
        v([-x,  y,  z], [0.0, 0.0, 1.0]),
        // -Z face
        v([ x, -y, -z], [0.0, 0.0, -1.0]),
        v([-x, -y, -z], [0.0, 0.0, -1.0]),
        v([-x,  y, -z], [0.0, 0.0, -1.0]),
        v([ x,  y, -z], [0.0, 0.0, -1.0]),
        // +X face
        v([ x, -y,  z], [1.0, 0.0, 0.0]),
        v([ x, -y, -z], [1.0, 0.0, 0.0]),
        v([ x,  y, -z], [1.0, 0.0, 0.0]),
        v([ x,  y,  z], [1.0, 0.0, 0.0]),
        // -X face
        v([-x, -y, -z], [-1.0, 0.0, 0.0]),
        v([-x, -y,  z], [-1.0, 0.0, 0.0]),
        v([-x,  y,  z], [-1.0, 0.0, 0.0]),
        v([-x,  y, -z], [-1.0, 0.0, 0.0]),
        // +Y face
        v([-x,  y,  z], [0.0, 1.0, 0.0]),
        v([ x,  y,  z], [0.0, 1.0, 0.0]),
        v([ x,  y, -z], [0.0, 1.0, 0.0]),
        v([-x,  y, -z], [0.0, 1.0, 0.0]),
        // -Y face
        v([-x, -y, -z], [0.0, -1.0, 0.0]),
        v([ x, -y, -z], [0.0, -1.0, 0.0]),
        v([ x, -y,  z], [0.0, -1.0, 0.0]),
        v([-x, -y,  z], [0.0, -1.0, 0.0]),
    ];
    let indices = (0..6u32)
        .flat_map(|face| {
            let b = face * 4;
            [b, b + 1, b + 2, b + 2, b + 3, b]
        })
        .collect();
    MeshData { vertices, indices }
}

fn plane(width: f32, height: f32) -> MeshData {
    let (x, y) = (width / 2.0, height / 2.0);
    let n = [0.0, 0.0, 1.0];
    MeshData {
        vertices: vec![
            v([-x, -y, 0.0], n),
            v([x, -y, 0.0], n),
            v([x, y, 0.0], n),
            v([-x, y, 0.0], n),
        ],
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}

fn circle(radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let n = [0.0, 0.0, 1.0];
    let mut mesh = MeshData::default();
    mesh.vertices.push(v([0.0, 0.0, 0.0], n));
    for k in 0..=segments {
        let a = k as f32 / segments as f32 * TAU;
        mesh.vertices.push(v([radius * a.cos(), radius * a.sin(), 0.0], n));
    }
    for k in 1..=segments {
        mesh.indices.extend([0, k, k + 1]);
    }
    mesh
}

/// Disc at height `y` facing up (`up`) or down.
fn cap(mesh: &mut MeshData, radius: f32, y: f32, segments: u32, up: bool) {
    let n = if up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
    let center = mesh.base();
    mesh.vertices.push(v([0.0, y, 0.0], n));
    for k in 0..=segments {
        let t = k as f32 / segments as f32 * TAU;
        mesh.vertices.push(v([radius * t.sin(), y, radius * t.cos()], n));
    }
    for k in 1..=segments {
        let (a, b) = (center + k, center + k + 1);
        if up {
            mesh.indices.extend([center, a, b]);
        } else {
            mesh.indices.extend([center, b, a]);
        }
    }
}

fn cylinder(top: f32, bottom: f32, height: f32, segments: u32, open_ended: bool) -> MeshData {
    let segments = segments.max(3);
    let half = height / 2.0;
    let slope = if height > 0.0 { (bottom - top) / height } else { 0.0 };
    let mut mesh = MeshData::default();

    for k in 0..=segments {
        let t = k as f32 / segments as f32 * TAU;
        let (s, c) = t.sin_cos();
        let len = (1.0 + slope * slope).sqrt();
        let n = [s / len, slope / len, c / len];
        mesh.vertices.push(v([top * s, half, top * c], n));
        mesh.vertices.push(v([bottom * s, -half, bottom * c], n));
    }
    for k in 0..segments {
        let top0 = k * 2;
        let (bot0, top1, bot1) = (top0 + 1, top0 + 2, top0 + 3);
        mesh.indices.extend([top0, bot0, bot1, top0, bot1, top1]);
    }

    if !open_ended {
        if top > 0.0 {
            cap(&mut mesh, top, half, segments, true);
        }
        if bottom > 0.0 {
            cap(&mut mesh, bottom, -half, segments, false);
        }
    }
    mesh
}

fn sphere(radius: f32, width_segments: u32, height_segments: u32, theta_length: f32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let theta_end = theta_length.min(PI);
    let mut mesh = MeshData::default();

    for iy in 0..=hs {
        let theta = iy as f32 / hs as f32 * theta_end;
        for ix in 0..=ws {
            let phi = ix as f32 / ws as f32 * TAU;
            let n = [
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            ];
            mesh.vertices
                .push(v([n[0] * radius, n[1] * radius, n[2] * radius], n));
        }
    }
    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // pole rows collapse to a point; skip their degenerate halves
            if iy != 0 {
                mesh.indices.extend([a, b, d]);
            }
            if iy != hs - 1 || theta_end < PI {
                mesh.indices.extend([b, c, d]);
            }
        }
    }
    mesh
}

fn torus(radius: f32, tube: f32, radial: u32, tubular: u32, arc: f32) -> MeshData {
    let radial = radial.max(3);
    let tubular = tubular.max(3);
    let mut mesh = MeshData::default();

    for j in 0..=radial {
        let ring = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * arc;
            let (su, cu) = u.sin_cos();
            let reach = radius + tube * ring.cos();
            let p = [reach * cu, reach * su, tube * ring.sin()];
            let n = [ring.cos() * cu, ring.cos() * su, ring.sin()];
            mesh.vertices.push(v(p, n));
        }
    }
    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend([a, b, d, b, c, d]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn check(mesh: &MeshData) {
        assert!(!mesh.indices.is_empty());
        assert_eq!(mesh.indices.len() % 3, 0);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        for vert in &mesh.vertices {
            let [x, y, z] = vert.normal;
            assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn box_has_six_quads() {
        let mesh = build(&GeometryDescriptor::cuboid(4.0, 0.8, 2.0));
        check(&mesh);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        let max_x = mesh
            .vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_x, 2.0);
    }

    #[test]
    fn every_shape_is_well_formed() {
        let shapes = [
            GeometryDescriptor::plane(30.0, 12.0),
            GeometryDescriptor::Circle {
                radius: 0.45,
                segments: 32,
            },
            GeometryDescriptor::cylinder(0.3, 0.35, 1.2, 16),
            GeometryDescriptor::cylinder(0.0, 0.5, 1.0, 8),
            GeometryDescriptor::sphere(0.4, 32),
            GeometryDescriptor::Torus {
                radius: 0.08,
                tube: 0.015,
                radial_segments: 8,
                tubular_segments: 16,
                arc: PI,
            },
        ];
        for shape in &shapes {
            check(&build(shape));
        }
    }

    #[test]
    fn open_cylinder_has_no_caps() {
        let closed = build(&GeometryDescriptor::cylinder(0.5, 0.6, 0.7, 16));
        let open = build(&GeometryDescriptor::Cylinder {
            radius_top: 0.5,
            radius_bottom: 0.6,
            height: 0.7,
            radial_segments: 16,
            open_ended: true,
        });
        check(&open);
        assert_eq!(open.triangle_count(), 32);
        assert_eq!(closed.triangle_count(), 64);
    }

    #[test]
    fn hemisphere_stays_above_equator() {
        let cap = build(&GeometryDescriptor::Sphere {
            radius: 0.26,
            width_segments: 16,
            height_segments: 16,
            theta_length: FRAC_PI_2,
        });
        check(&cap);
        assert!(cap.vertices.iter().all(|v| v.position[1] >= -1e-6));
    }

    #[test]
    fn plane_faces_positive_z() {
        let mesh = build(&GeometryDescriptor::plane(2.0, 2.0));
        let corner = |i: usize| glam::Vec3::from(mesh.vertices[mesh.indices[i] as usize].position);
        let [a, b, c] = [0, 1, 2].map(corner);
        assert!((b - a).cross(c - a).z > 0.0);
    }
}
