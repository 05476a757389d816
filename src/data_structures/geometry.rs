//! Procedural primitives: floor plane, box, UV sphere and torus.
//!
//! All generators return CPU-side [`MeshData`] with unit normals pointing away
//! from the surface and triangles wound counter-clockwise when seen from the
//! outside, matching the `Ccw` front face of the render pipelines.

use std::f32::consts::PI;

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::model::ModelVertex;

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Append one quad spanned by the half-axes `u` and `v` around `center`.
    /// `u x v` has to point along `normal`.
    fn push_quad(
        &mut self,
        center: Vector3<f32>,
        u: Vector3<f32>,
        v: Vector3<f32>,
        normal: Vector3<f32>,
    ) {
        let base = self.vertices.len() as u32;
        for corner in [center - u - v, center + u - v, center + u + v, center - u + v] {
            self.vertices.push(ModelVertex {
                position: corner.into(),
                normal: normal.into(),
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A horizontal plane facing +y, centred on the origin.
pub fn plane(width: f32, depth: f32) -> MeshData {
    let mut data = MeshData::default();
    data.push_quad(
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::unit_x() * (width / 2.0),
        -Vector3::unit_z() * (depth / 2.0),
        Vector3::unit_y(),
    );
    data
}

pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
    let x = Vector3::unit_x();
    let y = Vector3::unit_y();
    let z = Vector3::unit_z();
    // (normal, u, v) with u x v == normal
    let faces = [
        (x, -z * hz, y * hy, hx),
        (-x, z * hz, y * hy, hx),
        (y, x * hx, -z * hz, hy),
        (-y, x * hx, z * hz, hy),
        (z, x * hx, y * hy, hz),
        (-z, -x * hx, y * hy, hz),
    ];
    let mut data = MeshData::default();
    for (normal, u, v, offset) in faces {
        data.push_quad(normal * offset, u, v, normal);
    }
    data
}

pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut data = MeshData::default();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let normal = Vector3::new(
                -(u * 2.0 * PI).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * 2.0 * PI).sin() * (v * PI).sin(),
            );
            data.vertices.push(ModelVertex {
                position: (normal * radius).into(),
                normal: normal.into(),
            });
        }
    }

    let row = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // the pole rows collapse to a single point, skip their empty triangles
            if iy != 0 {
                data.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                data.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    data
}

/// A ring lying in the xy plane.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial_segments = radial_segments.max(3);
    let tubular_segments = tubular_segments.max(3);
    let mut data = MeshData::default();

    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * 2.0 * PI;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * 2.0 * PI;
            let position = Vector3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vector3::new(radius * u.cos(), radius * u.sin(), 0.0);
            data.vertices.push(ModelVertex {
                position: position.into(),
                normal: (position - center).normalize().into(),
            });
        }
    }

    let row = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(data: &MeshData, index: u32) -> Vector3<f32> {
        data.vertices[index as usize].position.into()
    }

    fn assert_unit_normals(data: &MeshData) {
        for v in &data.vertices {
            let n: Vector3<f32> = v.normal.into();
            assert!((n.magnitude() - 1.0).abs() < 1e-4, "{:?}", v);
        }
    }

    /// Every non-degenerate triangle's geometric normal has to agree with the
    /// vertex normals, which only holds for counter-clockwise winding.
    fn assert_ccw(data: &MeshData) {
        for tri in data.indices.chunks(3) {
            let (p0, p1, p2) = (vertex(data, tri[0]), vertex(data, tri[1]), vertex(data, tri[2]));
            let face = (p1 - p0).cross(p2 - p0);
            if face.magnitude() < 1e-7 {
                continue;
            }
            let n: Vector3<f32> = data.vertices[tri[0] as usize].normal.into();
            assert!(face.dot(n) > 0.0, "triangle {:?} is wound clockwise", tri);
        }
    }

    fn assert_indices_in_bounds(data: &MeshData) {
        let len = data.vertices.len() as u32;
        assert!(data.indices.iter().all(|&i| i < len));
        assert_eq!(data.indices.len() % 3, 0);
    }

    #[test]
    fn plane_faces_up() {
        let data = plane(5.0, 5.0);
        assert_eq!(data.vertices.len(), 4);
        assert_eq!(data.triangle_count(), 2);
        assert!(data.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
        assert!(data.vertices.iter().all(|v| v.position[0].abs() == 2.5));
        assert_ccw(&data);
    }

    #[test]
    fn cuboid_has_six_outward_faces() {
        let data = cuboid(0.75, 0.75, 0.75);
        assert_eq!(data.vertices.len(), 24);
        assert_eq!(data.triangle_count(), 12);
        for v in &data.vertices {
            let p: Vector3<f32> = v.position.into();
            let n: Vector3<f32> = v.normal.into();
            assert!((p.dot(n) - 0.375).abs() < 1e-6);
        }
        assert_unit_normals(&data);
        assert_ccw(&data);
        assert_indices_in_bounds(&data);
    }

    #[test]
    fn sphere_vertices_sit_on_the_radius() {
        let data = sphere(0.5, 32, 32);
        assert_eq!(data.vertices.len(), 33 * 33);
        // two pole rows lose one triangle per segment
        assert_eq!(data.triangle_count(), 32 * 32 * 2 - 2 * 32);
        for v in &data.vertices {
            let p: Vector3<f32> = v.position.into();
            assert!((p.magnitude() - 0.5).abs() < 1e-5);
        }
        assert_unit_normals(&data);
        assert_ccw(&data);
        assert_indices_in_bounds(&data);
    }

    #[test]
    fn torus_normals_point_away_from_the_tube_centre() {
        let data = torus(0.3, 0.2, 32, 64);
        assert_eq!(data.vertices.len(), 33 * 65);
        assert_eq!(data.triangle_count(), 32 * 64 * 2);
        for v in &data.vertices {
            let p: Vector3<f32> = v.position.into();
            // distance to the tube's centre circle equals the tube radius
            let ring = Vector3::new(p.x, p.y, 0.0).normalize() * 0.3;
            assert!(((p - ring).magnitude() - 0.2).abs() < 1e-4);
        }
        assert_unit_normals(&data);
        assert_ccw(&data);
        assert_indices_in_bounds(&data);
    }
}
