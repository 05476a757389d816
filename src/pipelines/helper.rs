use crate::{
    data_structures::{model::Vertex, texture::Texture},
    lights::helpers::{HelperLines, HelperVertex},
};

/// Unlit line-list pipeline for light helpers. Bind group 0 is the camera.
pub fn mk_helper_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Helper Pipeline Layout"),
        bind_group_layouts: &[camera_bind_group_layout],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Helper Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("helper.wgsl").into()),
    };
    crate::pipelines::basic::mk_render_pipeline(
        device,
        &layout,
        color_format,
        Some(wgpu::BlendState::REPLACE),
        Some(Texture::DEPTH_FORMAT),
        &[HelperVertex::desc()],
        wgpu::PrimitiveTopology::LineList,
        shader,
    )
}

/// A growable vertex buffer holding the current helper lines.
#[derive(Debug)]
pub struct HelperBuffer {
    pub buffer: wgpu::Buffer,
    capacity: usize,
    pub count: u32,
}

impl HelperBuffer {
    const INITIAL_CAPACITY: usize = 512;

    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            buffer: Self::allocate(device, Self::INITIAL_CAPACITY),
            capacity: Self::INITIAL_CAPACITY,
            count: 0,
        }
    }

    fn allocate(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Helper Vertex Buffer"),
            size: (capacity * std::mem::size_of::<HelperVertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload `lines`, reallocating when they outgrow the buffer.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, lines: &HelperLines) {
        let needed = lines.vertices.len();
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            log::debug!("Growing helper buffer to {} vertices", self.capacity);
            self.buffer = Self::allocate(device, self.capacity);
        }
        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&lines.vertices));
        }
        self.count = needed as u32;
    }
}
