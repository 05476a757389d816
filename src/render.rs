//! Render composition and pipeline batching.
//!
//! Flows describe what they want drawn each frame with a [`Render`]. The engine
//! flattens every flow's `Render` into batches per pipeline: lit meshes go
//! through the shadow and the standard pipeline, line lists through the helper
//! pipeline, and custom closures get the main render pass directly.
//!
//! # Key types
//!
//! - [`Render<'a, 'pass>`] is the enum describing render operations
//! - [`Instanced<'a>`] is a model plus its instance buffer
//! - [`Lines<'a>`] is a world-space line list
//!

use crate::{context::Context, data_structures::model::Model};

/// A model drawn `amount` times from an instance buffer.
#[derive(Clone)]
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub model: &'a Model,
    pub amount: usize,
}

/// Unlit coloured line segments, two vertices per segment.
#[derive(Clone)]
pub struct Lines<'a> {
    pub vertex: &'a wgpu::Buffer,
    pub count: u32,
}

pub type CustomRender<'a, 'pass> = Box<dyn 'a + FnOnce(&Context, &mut wgpu::RenderPass<'pass>)>;

/// Specifies how a flow's objects should be rendered.
///
/// - `None` renders nothing
/// - `Default(Instanced)` renders a single lit instanced object
/// - `Defaults(Vec<Instanced>)` renders a batch of lit instanced objects
/// - `Lines(Lines)` renders helper lines on top of the lit scene
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
/// - `Custom(...)` invokes a closure with the main render pass
///
pub enum Render<'a, 'pass>
where
    'pass: 'a,
{
    None,
    Default(Instanced<'a>),
    Defaults(Vec<Instanced<'a>>),
    Lines(Lines<'a>),
    Composed(Vec<Render<'a, 'pass>>),
    Custom(CustomRender<'a, 'pass>),
}

/// Everything the flows asked for this frame, sorted by pipeline.
pub(crate) struct Batches<'a, 'pass> {
    pub basics: Vec<Instanced<'a>>,
    pub lines: Vec<Lines<'a>>,
    pub customs: Vec<CustomRender<'a, 'pass>>,
}

impl<'a, 'pass> Default for Batches<'a, 'pass> {
    fn default() -> Self {
        Self {
            basics: Vec::new(),
            lines: Vec::new(),
            customs: Vec::new(),
        }
    }
}

impl<'a, 'pass> Render<'a, 'pass> {
    pub(crate) fn set_pipelines(self, batches: &mut Batches<'a, 'pass>) {
        match self {
            Render::Default(instanced) => batches.basics.push(instanced),
            Render::Defaults(mut vec) => batches.basics.append(&mut vec),
            Render::Lines(lines) => batches.lines.push(lines),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(batches)),
            Render::Custom(f) => batches.customs.push(f),
            Render::None => (),
        }
    }
}

impl<'a> Batches<'a, '_> {
    /// Drop draws that would bind an empty instance buffer.
    pub(crate) fn retain_drawable(&mut self) {
        self.basics.retain(|instanced| {
            let drawable = instanced.amount > 0 && instanced.instance.size() > 0;
            if !drawable {
                log::warn!("you attempted to render something with zero instances");
            }
            drawable
        });
        self.lines.retain(|lines| lines.count > 0);
    }
}
