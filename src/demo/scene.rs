//! Scene layout: the three showcase meshes, the floor and their animation.

use cgmath::Point3;

use crate::data_structures::{
    geometry::{self, MeshData},
    instance::Instance,
    model::MaterialParams,
    object::SceneObject,
};

pub const SPHERE_POSITION: Point3<f32> = Point3::new(-1.5, 0.0, 0.0);
pub const BOX_POSITION: Point3<f32> = Point3::new(0.0, 0.0, 0.0);
pub const RING_POSITION: Point3<f32> = Point3::new(1.5, 0.0, 0.0);
pub const FLOOR_Y: f32 = -0.65;

/// Rotation speeds around y and x in radians per second.
const SPIN_Y: f32 = 0.1;
const SPIN_X: f32 = 0.15;

/// Orbit of the animated point light.
const POINT_ORBIT_RADIUS: f32 = 1.5;
const POINT_ORBIT_SPEED: f32 = 0.5;

/// Euler angles `(x, y)` of the spinning meshes after `elapsed` seconds.
pub fn spin(elapsed: f32) -> (f32, f32) {
    (SPIN_X * elapsed, SPIN_Y * elapsed)
}

/// Position of the animated point light after `elapsed` seconds. The height is
/// kept from `current`.
pub fn point_light_orbit(elapsed: f32, current: Point3<f32>) -> Point3<f32> {
    let angle = POINT_ORBIT_SPEED * elapsed;
    Point3::new(
        POINT_ORBIT_RADIUS * angle.cos(),
        current.y,
        POINT_ORBIT_RADIUS * angle.sin(),
    )
}

pub fn sphere_mesh() -> MeshData {
    geometry::sphere(0.5, 32, 32)
}

pub fn box_mesh() -> MeshData {
    geometry::cuboid(0.75, 0.75, 0.75)
}

pub fn ring_mesh() -> MeshData {
    geometry::torus(0.3, 0.2, 32, 64)
}

pub fn floor_mesh() -> MeshData {
    geometry::plane(5.0, 5.0)
}

/// All meshes of the scene, sharing one material.
#[derive(Debug)]
pub struct Scene {
    pub sphere: SceneObject,
    pub cube: SceneObject,
    pub ring: SceneObject,
    pub floor: SceneObject,
}

impl Scene {
    pub fn new(device: &wgpu::Device, material: MaterialParams) -> Self {
        let at = Instance::at;
        Self {
            sphere: SceneObject::new(device, "sphere", &sphere_mesh(), material, at(SPHERE_POSITION)),
            cube: SceneObject::new(device, "box", &box_mesh(), material, at(BOX_POSITION)),
            ring: SceneObject::new(device, "ring", &ring_mesh(), material, at(RING_POSITION)),
            floor: SceneObject::new(
                device,
                "floor",
                &floor_mesh(),
                material,
                at(Point3::new(0.0, FLOOR_Y, 0.0)),
            ),
        }
    }

    pub fn spinning_mut(&mut self) -> [&mut SceneObject; 3] {
        [&mut self.sphere, &mut self.cube, &mut self.ring]
    }

    pub fn objects(&self) -> [&SceneObject; 4] {
        [&self.sphere, &self.cube, &self.ring, &self.floor]
    }

    pub fn objects_mut(&mut self) -> [&mut SceneObject; 4] {
        [&mut self.sphere, &mut self.cube, &mut self.ring, &mut self.floor]
    }

    /// Rotate the showcase meshes to where they are after `elapsed` seconds.
    pub fn animate(&mut self, elapsed: f32) {
        let (x, y) = spin(elapsed);
        for object in self.spinning_mut() {
            object.instance_mut().set_euler(x, y, 0.0);
        }
    }
}
