//! flow-lights
//!
//! A light-rig showcase built on a small instancing-oriented wgpu engine that
//! runs natively and in the browser (WASM). Six light types light a handful of
//! procedural meshes, line helpers show where each light sits and an egui
//! panel edits everything live.
//!
//! High-level modules
//! - `camera`: perspective camera, damped orbit controller and its uniform
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: procedural geometry, meshes, materials, instances, depth textures
//! - `demo`: the showcase flow and its entry points
//! - `flow`: high level flow control (scenes / update loops)
//! - `gui`: the egui overlay
//! - `lights`: the light rig, its GPU packing and its helpers
//! - `panel`: the tweak panel bound to the light rig
//! - `pipelines`: lit, helper and shadow render pipelines
//! - `render`: render composition for efficient pipeline reuse
//! - `settings`: startup configuration
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod demo;
pub mod flow;
pub mod gui;
pub mod lights;
pub mod panel;
pub mod pipelines;
pub mod render;
pub mod settings;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::dpi::PhysicalPosition;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
