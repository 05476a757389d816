#[cfg(feature = "integration-tests")]
mod common;

#[cfg(feature = "integration-tests")]
mod lit_box {
    use flow_lights::{
        context::{BufferWriter, Context, InitContext},
        data_structures::{
            geometry, instance::Instance, model::MaterialParams, object::SceneObject,
        },
        flow::ImageTestResult,
        lights::LightRig,
        render::Render,
    };
    use wgpu::Color;

    use crate::common::test_utils::{FrameCounter, ImageFlow};

    pub(crate) struct LitBox {
        pub(crate) object: SceneObject,
    }

    impl LitBox {
        pub(crate) fn new(init: InitContext) -> Self {
            let object = SceneObject::new(
                &init.device,
                "Golden Box",
                &geometry::cuboid(0.75, 0.75, 0.75),
                MaterialParams::default(),
                Instance::new(),
            );
            Self { object }
        }
    }

    impl ImageFlow for LitBox {
        fn test_setup(&mut self, ctx: &mut Context) {
            ctx.clear_colour = Color::BLACK;
            self.object.write_to_buffer(ctx);
        }

        fn render_test<'pass>(&self) -> Render<'_, 'pass> {
            (&self.object).into()
        }

        fn validate_render_output(
            &self,
            _: &Context,
            frames: &FrameCounter,
            texture: &mut image::RgbaImage,
        ) -> Result<ImageTestResult, anyhow::Error> {
            if frames.frame() == 0 {
                return Ok(ImageTestResult::Waiting);
            }
            let corner = *texture.get_pixel(0, 0);
            assert_eq!(corner, image::Rgba([0, 0, 0, 255]), "background");
            let centre = *texture.get_pixel(texture.width() / 2, texture.height() / 2);
            // the default rig always adds white ambient light
            assert!(LightRig::default().ambient.intensity > 0.0);
            assert!(centre.0[..3].iter().any(|c| *c > 0), "unlit box: {centre:?}");
            Ok(ImageTestResult::Passed)
        }
    }
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_light_the_box_in_the_middle() {
    use flow_lights::context::InitContext;

    golden_image_test!(|init: InitContext| lit_box::LitBox::new(init));
}
