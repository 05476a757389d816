use wgpu::util::DeviceExt;

use crate::{
    context::{BufferWriter, Context},
    data_structures::{
        geometry::MeshData,
        instance::{Instance, InstanceRaw},
        model::{MaterialParams, Model, material_layout},
    },
    render::{Instanced, Render},
};

/**
 * A `SceneObject` is one procedural mesh drawn through instancing.
 *
 * The scene only needs a single instance per object but keeping the instance
 * list lets the same object be stamped several times without a new pipeline.
 */
#[derive(Debug)]
pub struct SceneObject {
    pub model: Model,
    pub instances: Vec<Instance>,
    pub instance_buffer: wgpu::Buffer,
}

impl SceneObject {
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        data: &MeshData,
        material: MaterialParams,
        instance: Instance,
    ) -> Self {
        let layout = material_layout(device);
        let model = Model::single(device, name, data, material, &layout);
        let instances = vec![instance];
        let instance_data = instances.iter().map(Instance::to_raw).collect::<Vec<_>>();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Instance Buffer", name)),
            contents: bytemuck::cast_slice(&instance_data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            model,
            instances,
            instance_buffer,
        }
    }

    pub fn instance_mut(&mut self) -> &mut Instance {
        &mut self.instances[0]
    }

    pub fn set_material(&mut self, ctx: &Context, params: MaterialParams) {
        self.model
            .materials
            .iter_mut()
            .for_each(|material| material.write(&ctx.queue, params));
    }
}

impl BufferWriter for SceneObject {
    /// Upload the current instance transforms.
    fn write_to_buffer(&mut self, ctx: &Context) {
        let instance_data = self
            .instances
            .iter()
            .map(Instance::to_raw)
            .collect::<Vec<InstanceRaw>>();
        ctx.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instance_data));
    }
}

impl<'a, 'pass> From<&'a SceneObject> for Render<'a, 'pass> {
    fn from(object: &'a SceneObject) -> Self {
        Render::Default(Instanced {
            instance: &object.instance_buffer,
            model: &object.model,
            amount: object.instances.len(),
        })
    }
}
