use std::sync::Arc;

use anyhow::anyhow;
use cgmath::Deg;
use wgpu::util::DeviceExt;
use winit::{
    dpi::PhysicalSize,
    window::{Fullscreen, Window},
};

use crate::{
    camera::{self, CameraResources, CameraUniform, Projection},
    data_structures::texture,
    gui::Gui,
    lights::{LightRig, uniform::LightUniform},
    pipelines::{
        basic::mk_basic_pipeline, helper::mk_helper_pipeline, light::LightResources,
        shadow::mk_shadow_pipeline,
    },
    settings::Settings,
};

/// Everything a flow constructor needs to create GPU resources.
///
/// Device and queue are reference counted internally so cloning is cheap.
#[derive(Clone, Debug)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub format: wgpu::TextureFormat,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            format: ctx.config.format,
        }
    }
}

/// Objects that keep a CPU copy of GPU data and upload it on demand.
pub trait BufferWriter {
    fn write_to_buffer(&mut self, ctx: &Context);
}

#[derive(Debug)]
pub struct Pipelines {
    pub basic: wgpu::RenderPipeline,
    pub helper: wgpu::RenderPipeline,
    pub shadow: wgpu::RenderPipeline,
}

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: Projection,
    pub light: LightResources,
    pub pipelines: Pipelines,
    pub gui: Gui,
    pub settings: Settings,
    pub clear_colour: wgpu::Color,
    pub tick_duration_millis: u64,
}

impl Context {
    pub async fn new(window: Arc<Window>, settings: &Settings) -> anyhow::Result<Self> {
        let size = surface_size(
            window.inner_size(),
            window.scale_factor(),
            settings.max_pixel_ratio,
        );

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("No graphics adapter is compatible with the surface"))?;
        log::info!("Adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    // WebGL doesn't support all of wgpu's features
                    required_limits: if cfg!(target_arch = "wasm32") {
                        wgpu::Limits::downlevel_webgl2_defaults()
                    } else {
                        wgpu::Limits::default()
                    },
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The shaders output linear colour and rely on an sRGB surface
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow!("The surface reports no texture formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let camera = camera::Camera::looking_at(settings.camera_position, settings.camera_target);
        let projection = Projection::new(
            config.width,
            config.height,
            Deg(settings.fovy_deg),
            settings.znear,
            settings.zfar,
        );
        let mut controller =
            camera::OrbitController::new(1.0, 1.0, settings.damping, settings.zfar);
        // pointer positions arrive in window pixels, not surface pixels
        controller.resize(window.inner_size().height);

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera, &projection);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("camera_bind_group_layout"),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let camera = CameraResources {
            camera,
            controller,
            uniform: camera_uniform,
            buffer: camera_buffer,
            bind_group: camera_bind_group,
            bind_group_layout: camera_bind_group_layout,
        };

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let light = LightResources::new(
            &device,
            LightUniform::from_rig(&LightRig::default(), settings.shadow_map_size),
            settings.shadow_map_size,
        );

        let pipelines = Pipelines {
            basic: mk_basic_pipeline(
                &device,
                config.format,
                &light.bind_group_layout,
                &camera.bind_group_layout,
            ),
            helper: mk_helper_pipeline(&device, config.format, &camera.bind_group_layout),
            shadow: mk_shadow_pipeline(&device, &light.shadow_bind_group_layout),
        };

        let gui = Gui::new(&device, config.format, &window);

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            light,
            pipelines,
            gui,
            settings: settings.clone(),
            clear_colour: settings.clear_colour,
            tick_duration_millis: settings.tick_duration_millis,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Scale factor between logical pixels and the render surface.
    pub fn pixel_ratio(&self) -> f64 {
        pixel_ratio(self.window.scale_factor(), self.settings.max_pixel_ratio)
    }

    /// Reconfigure the surface for a new window size. Zero-sized windows
    /// (minimised) are ignored and `false` is returned.
    pub fn resize(&mut self, physical: PhysicalSize<u32>) -> bool {
        let size = surface_size(
            physical,
            self.window.scale_factor(),
            self.settings.max_pixel_ratio,
        );
        if size.width == 0 || size.height == 0 {
            return false;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.projection.resize(size.width, size.height);
        self.camera.controller.resize(physical.height);
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = texture::Texture::create_depth_texture(
            &self.device,
            [size.width, size.height],
            "depth_texture",
        );
        log::debug!("Resized surface to {}x{}", size.width, size.height);
        true
    }

    /// Switch between borderless fullscreen and windowed mode. On the web this
    /// requests fullscreen for the canvas.
    pub fn toggle_fullscreen(&self) {
        if self.window.fullscreen().is_some() {
            log::info!("Leaving fullscreen");
            self.window.set_fullscreen(None);
        } else {
            log::info!("Entering fullscreen");
            self.window
                .set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }
}

/// Device pixel ratio capped at `max_ratio`.
pub fn pixel_ratio(scale_factor: f64, max_ratio: f64) -> f64 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor.min(max_ratio)
    } else {
        1.0
    }
}

/// Render size for a window of `physical` pixels at `scale_factor` with the
/// pixel ratio capped at `max_ratio`.
pub fn surface_size(
    physical: PhysicalSize<u32>,
    scale_factor: f64,
    max_ratio: f64,
) -> PhysicalSize<u32> {
    let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    };
    let ratio = pixel_ratio(scale_factor, max_ratio);
    let logical = physical.to_logical::<f64>(scale_factor);
    PhysicalSize::new(
        (logical.width * ratio).round() as u32,
        (logical.height * ratio).round() as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_size_keeps_low_density_displays() {
        let size = surface_size(PhysicalSize::new(1600, 1200), 2.0, 2.0);
        assert_eq!(size, PhysicalSize::new(1600, 1200));
        let size = surface_size(PhysicalSize::new(800, 600), 1.0, 2.0);
        assert_eq!(size, PhysicalSize::new(800, 600));
    }

    #[test]
    fn surface_size_caps_high_density_displays() {
        // 800x600 css pixels at 3x
        let size = surface_size(PhysicalSize::new(2400, 1800), 3.0, 2.0);
        assert_eq!(size, PhysicalSize::new(1600, 1200));
    }

    #[test]
    fn zero_sized_windows_stay_zero() {
        let size = surface_size(PhysicalSize::new(0, 0), 2.0, 2.0);
        assert_eq!(size, PhysicalSize::new(0, 0));
    }

    #[test]
    fn broken_scale_factors_fall_back_to_one() {
        assert_eq!(pixel_ratio(0.0, 2.0), 1.0);
        assert_eq!(pixel_ratio(f64::NAN, 2.0), 1.0);
        assert_eq!(pixel_ratio(1.5, 2.0), 1.5);
    }
}
