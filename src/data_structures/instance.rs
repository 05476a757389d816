//! Per-object transforms uploaded as instance vertex data.

use cgmath::{EuclideanSpace, Euler, Matrix3, Matrix4, One, Point3, Quaternion, Rad, Vector3};

use crate::data_structures::model;

/// Placement of one drawn copy of a model.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Instance {
    /// Identity transform.
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Unrotated, unscaled instance at `point`.
    pub fn at(point: Point3<f32>) -> Self {
        Self {
            position: point.to_vec(),
            ..Self::new()
        }
    }

    /// Set the rotation from euler angles in radians (x, then y, then z).
    pub fn set_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Euler::new(Rad(x), Rad(y), Rad(z)).into();
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw {
            model: self.to_matrix().into(),
            normal: Matrix3::from(self.rotation).into(),
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * GPU form of an [`Instance`].
 *
 * Scene objects are scaled uniformly, so the rotation matrix doubles as the
 * normal matrix.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    model: [[f32; 4]; 4],
    normal: [[f32; 3]; 3],
}

const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
    // model matrix columns
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32x4,
    8 => Float32x4,
    // normal matrix columns
    9 => Float32x3,
    10 => Float32x3,
    11 => Float32x3,
];

impl model::Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Rotation, SquareMatrix, Vector4};

    #[test]
    fn at_only_translates() {
        let instance = Instance::at(Point3::new(1.5, 0.0, -2.0));
        let moved = instance.to_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(moved, Vector4::new(1.5, 0.0, -2.0, 1.0));
        assert_eq!(instance.rotation, Quaternion::one());
    }

    #[test]
    fn euler_rotation_turns_around_y() {
        let mut instance = Instance::new();
        instance.set_euler(0.0, std::f32::consts::FRAC_PI_2, 0.0);
        let rotated = instance.rotation.rotate_vector(Vector3::unit_z());
        assert!((rotated - Vector3::unit_x()).magnitude() < 1e-5);
    }

    #[test]
    fn identity_packs_identity_matrices() {
        let raw = Instance::new().to_raw();
        let identity: [[f32; 4]; 4] = Matrix4::identity().into();
        assert_eq!(raw.model, identity);
    }

    #[test]
    fn raw_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<InstanceRaw>(), (16 + 9) * 4);
    }
}
