//! Engine data structures: geometry, models, textures and instances.
//!
//! - `geometry` generates the procedural primitives (plane, box, sphere, torus)
//! - `model` contains mesh and material definitions, GPU resources for 3D models
//! - `texture` holds the depth and shadow map textures
//! - `object` is an instanced scene object (model + instance data)
//! - `instance` holds per-instance transformation data

pub mod geometry;
pub mod instance;
pub mod model;
pub mod object;
pub mod texture;
