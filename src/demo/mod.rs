//! The light showcase: a sphere, a box and a ring over a floor, lit by one light
//! of every type, with helpers and a tweak panel.

pub mod input;
pub mod scene;

use std::iter;

use instant::Duration;
use winit::event::{DeviceEvent, WindowEvent};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "integration-tests")]
use crate::flow::ImageTestResult;
use crate::{
    context::{BufferWriter, Context, InitContext},
    demo::{input::ClickTracker, scene::Scene},
    flow::{FlowConstructor, GraphicsFlow, Out},
    lights::{helpers::HelperLines, uniform::LightUniform},
    panel::{PanelState, draw_panel},
    pipelines::helper::HelperBuffer,
    render::{Lines, Render},
};

#[derive(Debug)]
pub struct LightsDemo {
    scene: Scene,
    panel: PanelState,
    helpers: HelperBuffer,
    clicks: ClickTracker,
    elapsed: Duration,
    frames: u64,
    shadow_map_size: u32,
    rig_dirty: bool,
    material_dirty: bool,
}

impl LightsDemo {
    pub fn new(init: &InitContext) -> Self {
        let panel = PanelState::default();
        let scene = Scene::new(&init.device, panel.material);
        let mut helpers = HelperBuffer::new(&init.device);
        helpers.write(&init.device, &init.queue, &HelperLines::from_rig(&panel.rig));
        Self {
            scene,
            panel,
            helpers,
            clicks: ClickTracker::default(),
            elapsed: Duration::ZERO,
            frames: 0,
            shadow_map_size: 1,
            rig_dirty: false,
            material_dirty: false,
        }
    }

    pub fn constructor<S: 'static, E: 'static>() -> FlowConstructor<S, E> {
        Box::new(|init: InitContext| {
            Box::pin(async move {
                let flow: Box<dyn GraphicsFlow<S, E>> = Box::new(LightsDemo::new(&init));
                flow
            })
        })
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    fn light_uniform(&self) -> LightUniform {
        LightUniform::from_rig(&self.panel.rig, self.shadow_map_size)
    }
}

impl<S, E> GraphicsFlow<S, E> for LightsDemo {
    fn on_init(&mut self, ctx: &mut Context, _: &mut S) -> Out<S, E> {
        self.shadow_map_size = ctx.settings.shadow_map_size;
        ctx.light.write(&ctx.queue, self.light_uniform());
        log::info!("Light showcase ready, press \"f\" or double click for fullscreen");
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, _: &mut S, dt: Duration) -> Out<S, E> {
        self.elapsed += dt;
        self.frames += 1;
        let t = self.elapsed.as_secs_f32();

        self.scene.animate(t);
        if self.panel.animate_point_light {
            let current = self.panel.rig.point.position;
            self.panel.rig.point.position = scene::point_light_orbit(t, current);
            self.rig_dirty = true;
        }

        if self.material_dirty {
            let material = self.panel.material;
            self.scene
                .objects_mut()
                .into_iter()
                .for_each(|object| object.set_material(ctx, material));
            self.material_dirty = false;
        }
        self.scene
            .objects_mut()
            .into_iter()
            .for_each(|object| object.write_to_buffer(ctx));

        if !self.rig_dirty {
            return Out::Empty;
        }
        self.rig_dirty = false;
        self.helpers.write(
            &ctx.device,
            &ctx.queue,
            &HelperLines::from_rig(&self.panel.rig),
        );
        let uniform = self.light_uniform();
        Out::Configure(Box::new(move |ctx: &mut Context| {
            ctx.light.write(&ctx.queue, uniform)
        }))
    }

    fn on_tick(&mut self, _: &Context, _: &mut S) -> Out<S, E> {
        log::debug!(
            "{} frames in {:.1}s",
            self.frames,
            self.elapsed.as_secs_f32()
        );
        Out::Empty
    }

    fn on_device_events(&mut self, _: &Context, _: &mut S, _: &DeviceEvent) -> Out<S, E> {
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, _: &mut S, event: &WindowEvent) -> Out<S, E> {
        if input::wants_fullscreen_toggle(event, &mut self.clicks) {
            return Out::Configure(Box::new(|ctx: &mut Context| ctx.toggle_fullscreen()));
        }
        Out::Empty
    }

    fn on_custom_events(&mut self, _: &Context, _: &mut S, event: E) -> Option<E> {
        Some(event)
    }

    fn on_gui(&mut self, gui: &egui::Context, _: &mut S) -> Out<S, E> {
        let response = draw_panel(gui, &mut self.panel);
        self.rig_dirty |= response.rig_changed;
        self.material_dirty |= response.material_changed;
        Out::Empty
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        let lines = Render::Lines(Lines {
            vertex: &self.helpers.buffer,
            count: self.helpers.count,
        });
        Render::Composed(
            self.scene
                .objects()
                .into_iter()
                .map(Render::from)
                .chain(iter::once(lines))
                .collect(),
        )
    }

    #[cfg(feature = "integration-tests")]
    fn render_to_texture(
        &self,
        _: &Context,
        _: &mut S,
        texture: &mut image::RgbaImage,
    ) -> Result<ImageTestResult, anyhow::Error> {
        if self.frames < 3 {
            return Ok(ImageTestResult::Waiting);
        }
        // the top right corner shows the background, the box sits in the middle
        let background = *texture.get_pixel(texture.width() - 1, 0);
        let centre = *texture.get_pixel(texture.width() / 2, texture.height() / 2);
        if centre == background {
            log::error!("Centre pixel {:?} shows the background", centre);
            return Ok(ImageTestResult::Failed);
        }
        Ok(ImageTestResult::Passed)
    }
}

/// Open the light showcase with the default settings.
pub fn run() -> anyhow::Result<()> {
    crate::flow::run::<(), ()>(vec![LightsDemo::constructor()])
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    run().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
