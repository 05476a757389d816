#![allow(dead_code)]

#[cfg(feature = "integration-tests")]
use flow_lights::flow::ImageTestResult;
#[cfg(feature = "integration-tests")]
use flow_lights::{
    context::Context,
    flow::{GraphicsFlow, Out},
    render::Render,
};

/// Counts lifecycle hook invocations across a flow run.
pub(crate) struct State {
    frame_counter: u32,
    init_invocations: u32,
    update_invocations: u32,
    gui_invocations: u32,
    pub dummy_state: String,
}

impl State {
    pub fn new() -> Self {
        Self {
            frame_counter: 0,
            init_invocations: 0,
            update_invocations: 0,
            gui_invocations: 0,
            dummy_state: String::new(),
        }
    }

    pub fn frame(&mut self) {
        self.frame_counter += 1;
    }

    pub fn init(&mut self) {
        self.init_invocations += 1;
    }

    pub fn update(&mut self) {
        self.update_invocations += 1;
    }

    pub fn gui(&mut self) {
        self.gui_invocations += 1;
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn init_invocations(&self) -> u32 {
        self.init_invocations
    }

    pub fn update_invocations(&self) -> u32 {
        self.update_invocations
    }

    pub fn gui_invocations(&self) -> u32 {
        self.gui_invocations
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub(crate) struct FrameCounter(pub(crate) u32);

impl FrameCounter {
    pub(crate) fn frame(&self) -> u32 {
        self.0
    }

    pub(crate) fn progress(&mut self) {
        self.0 += 1;
    }
}

/// A golden image check: set the context up, draw something, then inspect
/// the frame read back from the GPU.
#[cfg(feature = "integration-tests")]
pub(crate) trait ImageFlow {
    fn test_setup(&mut self, ctx: &mut Context);
    fn render_test<'pass>(&self) -> Render<'_, 'pass>;
    fn validate_render_output(
        &self,
        ctx: &Context,
        frames: &FrameCounter,
        texture: &mut image::RgbaImage,
    ) -> Result<ImageTestResult, anyhow::Error>;
}

/// Drives an [`ImageFlow`] and counts the frames it has been updated for.
#[cfg(feature = "integration-tests")]
pub(crate) struct Flow<F: ImageFlow>(pub(crate) F);

#[cfg(feature = "integration-tests")]
impl<F: ImageFlow> GraphicsFlow<FrameCounter, ()> for Flow<F> {
    fn on_init(&mut self, ctx: &mut Context, _: &mut FrameCounter) -> Out<FrameCounter, ()> {
        self.0.test_setup(ctx);
        Out::Empty
    }

    fn on_update(
        &mut self,
        _: &Context,
        frames: &mut FrameCounter,
        _: instant::Duration,
    ) -> Out<FrameCounter, ()> {
        frames.progress();
        Out::Empty
    }

    fn on_tick(&mut self, _: &Context, _: &mut FrameCounter) -> Out<FrameCounter, ()> {
        Out::Empty
    }

    fn on_device_events(
        &mut self,
        _: &Context,
        _: &mut FrameCounter,
        _: &flow_lights::DeviceEvent,
    ) -> Out<FrameCounter, ()> {
        Out::Empty
    }

    fn on_window_events(
        &mut self,
        _: &Context,
        _: &mut FrameCounter,
        _: &flow_lights::WindowEvent,
    ) -> Out<FrameCounter, ()> {
        Out::Empty
    }

    fn on_custom_events(&mut self, _: &Context, _: &mut FrameCounter, event: ()) -> Option<()> {
        Some(event)
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        self.0.render_test()
    }

    fn render_to_texture(
        &self,
        ctx: &Context,
        frames: &mut FrameCounter,
        texture: &mut image::RgbaImage,
    ) -> Result<ImageTestResult, anyhow::Error> {
        self.0.validate_render_output(ctx, frames, texture)
    }
}

/// Every pixel of `texture` must equal `colour`.
#[cfg(feature = "integration-tests")]
pub(crate) fn assert_uniform(texture: &image::RgbaImage, colour: wgpu::Color) {
    let f_to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let desired = image::Rgba([
        f_to_u8(colour.r),
        f_to_u8(colour.g),
        f_to_u8(colour.b),
        f_to_u8(colour.a),
    ]);
    for (x, y, pixel) in texture.enumerate_pixels() {
        assert_eq!(*pixel, desired, "pixel ({x}, {y})");
    }
}

/// Run a single flow built by `$make`, a closure from `InitContext` to an
/// [`ImageFlow`], until its validation passes.
#[macro_export]
macro_rules! golden_image_test {
    ($make:expr) => {{
        use crate::common::test_utils::{Flow, FrameCounter};
        use flow_lights::flow::{FlowConstructor, GraphicsFlow};
        let constructor: FlowConstructor<FrameCounter, ()> = Box::new(|init| {
            Box::pin(async move {
                let g_flow: Box<dyn GraphicsFlow<FrameCounter, ()>> =
                    Box::new(Flow(($make)(init)));
                g_flow
            })
        });

        flow_lights::flow::run(vec![constructor])
            .expect("Failed to run flow for integration test.");
    }};
}
