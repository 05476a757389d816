//! Line gizmos that show where each light sits and where it points.
//!
//! Helpers are rebuilt from the [`LightRig`] on the CPU whenever the rig
//! changes and drawn as one line list in world space.

use std::f32::consts::TAU;

use cgmath::{InnerSpace, Point3, Vector3};

use crate::lights::{
    Color, DirectionalLight, HemisphereLight, LightRig, PointLight, RectAreaLight, SpotLight,
};

/// Size of the directional, hemisphere and point light gizmos.
pub const HELPER_SIZE: f32 = 0.2;
/// Drawn length of a spot cone without a range.
const UNBOUNDED_CONE_LENGTH: f32 = 5.0;
const CIRCLE_SEGMENTS: u32 = 32;
const SPOT_RAYS: u32 = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HelperVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl crate::data_structures::model::Vertex for HelperVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<HelperVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// World-space line segments, two vertices per segment.
#[derive(Clone, Debug, Default)]
pub struct HelperLines {
    pub vertices: Vec<HelperVertex>,
}

impl HelperLines {
    pub fn from_rig(rig: &LightRig) -> Self {
        let mut lines = Self::default();
        if rig.helpers.directional && rig.directional.visible {
            lines.directional(&rig.directional);
        }
        if rig.helpers.hemisphere && rig.hemisphere.visible {
            lines.hemisphere(&rig.hemisphere);
        }
        if rig.helpers.point && rig.point.visible {
            lines.point(&rig.point);
        }
        if rig.helpers.spot && rig.spot.visible {
            lines.spot(&rig.spot);
        }
        if rig.helpers.rect_area && rig.rect_area.visible {
            lines.rect_area(&rig.rect_area);
        }
        lines
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn line(&mut self, from: Point3<f32>, to: Point3<f32>, color: [f32; 3]) {
        self.vertices.push(HelperVertex {
            position: from.into(),
            color,
        });
        self.vertices.push(HelperVertex {
            position: to.into(),
            color,
        });
    }

    fn circle(
        &mut self,
        center: Point3<f32>,
        u: Vector3<f32>,
        v: Vector3<f32>,
        color: [f32; 3],
    ) {
        let at = |i: u32| {
            let (sin, cos) = (i as f32 / CIRCLE_SEGMENTS as f32 * TAU).sin_cos();
            center + u * cos + v * sin
        };
        for i in 0..CIRCLE_SEGMENTS {
            self.line(at(i), at(i + 1), color);
        }
    }

    /// A square facing the target plus a line to the target.
    fn directional(&mut self, light: &DirectionalLight) {
        let color = helper_color(light.color);
        let (u, v) = basis(-light.direction());
        let p = light.position;
        let corners = [
            p + (u + v) * HELPER_SIZE,
            p + (v - u) * HELPER_SIZE,
            p + (-u - v) * HELPER_SIZE,
            p + (u - v) * HELPER_SIZE,
        ];
        for i in 0..4 {
            self.line(corners[i], corners[(i + 1) % 4], color);
        }
        self.line(p, light.target, color);
    }

    /// An octahedron, sky coloured on top and ground coloured below.
    fn hemisphere(&mut self, light: &HemisphereLight) {
        let sky = helper_color(light.sky_color);
        let ground = helper_color(light.ground_color);
        let p = light.position;
        let top = p + Vector3::unit_y() * HELPER_SIZE;
        let bottom = p - Vector3::unit_y() * HELPER_SIZE;
        let ring = [
            p + Vector3::unit_x() * HELPER_SIZE,
            p + Vector3::unit_z() * HELPER_SIZE,
            p - Vector3::unit_x() * HELPER_SIZE,
            p - Vector3::unit_z() * HELPER_SIZE,
        ];
        for i in 0..4 {
            self.line(top, ring[i], sky);
            self.line(bottom, ring[i], ground);
            let mid = if i % 2 == 0 { sky } else { ground };
            self.line(ring[i], ring[(i + 1) % 4], mid);
        }
    }

    /// Three great circles around the light.
    fn point(&mut self, light: &PointLight) {
        let color = helper_color(light.color);
        let (x, y, z) = (
            Vector3::unit_x() * HELPER_SIZE,
            Vector3::unit_y() * HELPER_SIZE,
            Vector3::unit_z() * HELPER_SIZE,
        );
        self.circle(light.position, x, y, color);
        self.circle(light.position, y, z, color);
        self.circle(light.position, z, x, color);
    }

    /// The light's cone: axis, a few rays along the surface and the rim.
    fn spot(&mut self, light: &SpotLight) {
        let color = helper_color(light.color);
        let length = if light.distance > 0.0 {
            light.distance
        } else {
            UNBOUNDED_CONE_LENGTH
        };
        let direction = light.direction();
        let radius = length * light.angle.tan();
        let rim_center = light.position + direction * length;
        let (u, v) = basis(direction);
        let (u, v) = (u * radius, v * radius);

        self.line(light.position, light.target, color);
        for i in 0..SPOT_RAYS {
            let (sin, cos) = (i as f32 / SPOT_RAYS as f32 * TAU).sin_cos();
            self.line(light.position, rim_center + u * cos + v * sin, color);
        }
        self.circle(rim_center, u, v, color);
    }

    /// The rectangle outline and a short line along the emitting side.
    fn rect_area(&mut self, light: &RectAreaLight) {
        let color = helper_color(light.color);
        let (hw, hh) = light.half_axes();
        let p = light.position;
        let corners = [p + hw + hh, p - hw + hh, p - hw - hh, p + hw - hh];
        for i in 0..4 {
            self.line(corners[i], corners[(i + 1) % 4], color);
        }
        let reach = light.width.min(light.height) / 2.0;
        self.line(p, p + light.normal() * reach, color);
    }
}

fn helper_color(color: Color) -> [f32; 3] {
    color.to_linear()
}

/// Two unit vectors orthogonal to `axis` and to each other.
fn basis(axis: Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let axis = axis.normalize();
    let helper = if axis.y.abs() > 0.999 {
        Vector3::unit_x()
    } else {
        Vector3::unit_y()
    };
    let u = axis.cross(helper).normalize();
    let v = axis.cross(u);
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::EuclideanSpace;

    /// Centre of all helper vertices.
    fn centroid(lines: &HelperLines) -> Option<Point3<f32>> {
        if lines.is_empty() {
            return None;
        }
        let sum = lines
            .vertices
            .iter()
            .fold(Vector3::new(0.0, 0.0, 0.0), |acc, v| {
                acc + Vector3::from(v.position)
            });
        Some(Point3::from_vec(sum / lines.vertices.len() as f32))
    }

    fn only(rig: &mut LightRig, keep: &str) {
        rig.helpers.directional = keep == "directional";
        rig.helpers.hemisphere = keep == "hemisphere";
        rig.helpers.point = keep == "point";
        rig.helpers.spot = keep == "spot";
        rig.helpers.rect_area = keep == "rect_area";
    }

    #[test]
    fn every_helper_contributes_segments() {
        let rig = LightRig::default();
        let lines = HelperLines::from_rig(&rig);
        // 5 + 12 + 3 * 32 + (1 + 4 + 32) + 5
        assert_eq!(lines.segment_count(), 5 + 12 + 96 + 37 + 5);
        assert_eq!(lines.vertices.len() % 2, 0);
    }

    #[test]
    fn hidden_helpers_and_lights_are_skipped() {
        let mut rig = LightRig::default();
        only(&mut rig, "point");
        assert_eq!(HelperLines::from_rig(&rig).segment_count(), 96);
        rig.point.visible = false;
        assert!(HelperLines::from_rig(&rig).is_empty());
    }

    #[test]
    fn point_helper_is_centred_on_the_light() {
        let mut rig = LightRig::default();
        only(&mut rig, "point");
        let lines = HelperLines::from_rig(&rig);
        let center = centroid(&lines).unwrap();
        assert!((center - rig.point.position).magnitude() < 1e-4);
        for v in &lines.vertices {
            let d = (Point3::from(v.position) - rig.point.position).magnitude();
            assert!((d - HELPER_SIZE).abs() < 1e-5);
        }
    }

    #[test]
    fn hemisphere_helper_follows_its_position() {
        let mut rig = LightRig::default();
        only(&mut rig, "hemisphere");
        rig.hemisphere.position = Point3::new(0.5, 2.0, -1.0);
        let center = centroid(&HelperLines::from_rig(&rig)).unwrap();
        assert!((center - rig.hemisphere.position).magnitude() < 1e-4);
    }

    #[test]
    fn spot_rim_sits_at_the_range_on_the_cone() {
        let mut rig = LightRig::default();
        only(&mut rig, "spot");
        let spot = rig.spot.clone();
        let lines = HelperLines::from_rig(&rig);
        let rim_center = spot.position + spot.direction() * spot.distance;
        let expected_radius = spot.distance * spot.angle.tan();
        // the last 32 segments are the rim
        let rim = &lines.vertices[lines.vertices.len() - 64..];
        for v in rim {
            let r = (Point3::from(v.position) - rim_center).magnitude();
            assert!((r - expected_radius).abs() < 1e-3, "{} vs {}", r, expected_radius);
            let along = (Point3::from(v.position) - spot.position).dot(spot.direction());
            assert!((along - spot.distance).abs() < 1e-3);
        }
    }

    #[test]
    fn directional_helper_points_at_the_target() {
        let mut rig = LightRig::default();
        only(&mut rig, "directional");
        let lines = HelperLines::from_rig(&rig);
        let last = &lines.vertices[lines.vertices.len() - 2..];
        assert_eq!(Point3::from(last[0].position), rig.directional.position);
        assert_eq!(Point3::from(last[1].position), rig.directional.target);
    }

    #[test]
    fn rect_outline_spans_width_and_height() {
        let mut rig = LightRig::default();
        only(&mut rig, "rect_area");
        rig.rect_area.width = 2.0;
        let lines = HelperLines::from_rig(&rig);
        let outline: Vec<f32> = lines.vertices[..8]
            .chunks(2)
            .map(|seg| (Point3::from(seg[0].position) - Point3::from(seg[1].position)).magnitude())
            .collect();
        assert!((outline[0] - 2.0).abs() < 1e-5);
        assert!((outline[1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn basis_is_orthonormal() {
        for axis in [Vector3::unit_y(), Vector3::new(1.0, 2.0, 3.0), -Vector3::unit_y()] {
            let (u, v) = basis(axis);
            assert!(u.dot(axis).abs() < 1e-5 && v.dot(axis).abs() < 1e-5);
            assert!(u.dot(v).abs() < 1e-5);
            assert!((u.magnitude() - 1.0).abs() < 1e-5 && (v.magnitude() - 1.0).abs() < 1e-5);
        }
    }
}
