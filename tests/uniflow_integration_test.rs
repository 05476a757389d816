#[cfg(feature = "integration-tests")]
use flow_lights::{
    context::Context,
    flow::{FlowConstructor, GraphicsFlow, ImageTestResult, Out},
    render::Render,
};

#[cfg(feature = "integration-tests")]
use crate::common::test_utils::State;

#[cfg(feature = "integration-tests")]
mod common;

#[cfg(feature = "integration-tests")]
enum Event {
    Test,
}

#[cfg(feature = "integration-tests")]
struct GraphicsElement;

#[cfg(feature = "integration-tests")]
impl GraphicsFlow<State, Event> for GraphicsElement {
    fn on_init(&mut self, ctx: &mut Context, state: &mut State) -> Out<State, Event> {
        ctx.clear_colour = wgpu::Color::TRANSPARENT;
        assert_eq!(state.frame_counter(), 0);
        assert_eq!(state.init_invocations(), 0);
        assert_eq!(state.update_invocations(), 0);
        assert_eq!(state.gui_invocations(), 0);

        state.init();
        Out::Empty
    }

    fn on_update(
        &mut self,
        _: &Context,
        state: &mut State,
        _: instant::Duration,
    ) -> Out<State, Event> {
        assert_eq!(state.frame_counter(), state.update_invocations());
        assert_eq!(state.init_invocations(), 1);
        state.frame();
        state.update();

        let serve_sencha: Box<dyn FnOnce(&mut State)> = Box::new(|state: &mut State| {
            state.dummy_state.push('🍵');
        });
        let serve_mate: Box<dyn FnOnce(&mut State)> = Box::new(|state: &mut State| {
            state.dummy_state.push('🧉');
        });
        match state.frame_counter() {
            3 => Out::FutEvent(vec![Box::new(async move { Event::Test })]),
            5 => Out::FutFn(vec![
                Box::new(async move { serve_sencha }),
                Box::new(async move { serve_mate }),
            ]),
            x if x > 5 => {
                assert!(state.dummy_state.contains('🧉'));
                assert!(state.dummy_state.contains('🍵'));
                // emojis are 4 bytes wide
                assert_eq!(state.dummy_state.len(), 8, "{}", state.dummy_state);
                Out::Empty
            }
            _ => Out::Empty,
        }
    }

    fn on_tick(&mut self, _: &Context, _: &mut State) -> Out<State, Event> {
        Out::Empty
    }

    fn on_device_events(
        &mut self,
        _: &Context,
        _: &mut State,
        _: &flow_lights::DeviceEvent,
    ) -> Out<State, Event> {
        Out::Empty
    }

    fn on_window_events(
        &mut self,
        _: &Context,
        _: &mut State,
        _: &flow_lights::WindowEvent,
    ) -> Out<State, Event> {
        Out::Empty
    }

    fn on_custom_events(&mut self, _: &Context, state: &mut State, _: Event) -> Option<Event> {
        // the event is sent in frame 3
        assert!(state.frame_counter() >= 3);
        assert!(state.update_invocations() >= 3);
        None
    }

    fn on_gui(&mut self, _: &egui::Context, state: &mut State) -> Out<State, Event> {
        assert_eq!(state.init_invocations(), 1);
        state.gui();
        Out::Empty
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        Render::None
    }

    fn render_to_texture(
        &self,
        _: &Context,
        state: &mut State,
        _: &mut image::RgbaImage,
    ) -> Result<ImageTestResult, anyhow::Error> {
        if state.frame_counter() < 8 {
            return Ok(ImageTestResult::Waiting);
        }
        assert!(state.gui_invocations() >= state.frame_counter() - 1);
        Ok(ImageTestResult::Passed)
    }
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_run_every_lifecycle_hook() {
    let constructor: FlowConstructor<State, Event> =
        Box::new(|_| Box::pin(async move { Box::new(GraphicsElement) as Box<dyn GraphicsFlow<_, _>> }));

    if let Err(e) = flow_lights::flow::run(vec![constructor]) {
        panic!("{}", e);
    }
}
