//! Startup configuration.
//!
//! [`Settings`] collects the scene-wide knobs that are fixed once the window and
//! GPU context exist: camera optics, orbit damping, the pixel-ratio cap and the
//! shadow map resolution. Things that may change at runtime (clear colour, tick
//! speed) are copied into the [`Context`](crate::context::Context) and can be
//! modified from a flow via [`Out::Configure`](crate::flow::Out::Configure).

/// Scene-wide configuration consumed by [`Context::new`](crate::context::Context::new).
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Vertical field of view in degrees.
    pub fovy_deg: f32,
    pub znear: f32,
    pub zfar: f32,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    /// Fraction of the pending orbit delta applied per frame.
    pub damping: f32,
    /// Upper bound for the device pixel ratio used to size the render surface.
    pub max_pixel_ratio: f64,
    /// Edge length of the square directional shadow map in texels.
    pub shadow_map_size: u32,
    pub tick_duration_millis: u64,
    pub clear_colour: wgpu::Color,
    /// Id of the `<canvas>` element the engine renders into on the web.
    pub canvas_id: &'static str,
    pub title: &'static str,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fovy_deg: 75.0,
            znear: 0.1,
            zfar: 100.0,
            camera_position: [1.0, 1.0, 2.0],
            camera_target: [0.0, 0.0, 0.0],
            damping: 0.05,
            max_pixel_ratio: 2.0,
            shadow_map_size: 1024,
            tick_duration_millis: 1000,
            clear_colour: wgpu::Color::BLACK,
            canvas_id: "canvas",
            title: "flow-lights",
        }
    }
}
