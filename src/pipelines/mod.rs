//! Render pipelines and the GPU resources they bind.

pub mod basic;
pub mod helper;
pub mod light;
pub mod shadow;
