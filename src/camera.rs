//! Orbit camera, projection and the camera uniform.
//!
//! The camera is stored in spherical coordinates around a target point so the
//! [`OrbitController`] can rotate and zoom it without accumulating drift.
//! [`CameraResources`] bundles the CPU state with its GPU buffer and bind group.

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use instant::Duration;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Keeps the orbit away from the poles where `look_at` degenerates.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.001;
const MIN_RADIUS: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct Camera {
    pub target: Point3<f32>,
    pub radius: f32,
    /// Rotation around the target's y axis, zero looks down -z.
    pub yaw: Rad<f32>,
    /// Elevation above the target's xz plane.
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Place the camera at `eye` looking at `target`.
    pub fn looking_at<E: Into<Point3<f32>>, T: Into<Point3<f32>>>(eye: E, target: T) -> Self {
        let eye = eye.into();
        let target = target.into();
        let offset = eye - target;
        let radius = offset.magnitude().max(MIN_RADIUS);
        let pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);
        Self {
            target,
            radius,
            yaw: Rad(yaw),
            pitch: Rad(pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)),
        }
    }

    pub fn position(&self) -> Point3<f32> {
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        self.target
            + Vector3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.radius
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position(), self.target, Vector3::unit_y())
    }
}

#[derive(Debug, Clone)]
pub struct Projection {
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Damped orbit controls.
///
/// Input adds to a pending delta. Every [`update`](Self::update) applies
/// `damping` of that delta to the camera and keeps the rest, so the camera
/// glides to a halt after the mouse is released.
#[derive(Debug)]
pub struct OrbitController {
    rotate_speed: f32,
    zoom_speed: f32,
    damping: f32,
    max_radius: f32,
    delta_yaw: f32,
    delta_pitch: f32,
    zoom: f32,
    dragging: bool,
    last_cursor: Option<PhysicalPosition<f64>>,
    viewport_height: f32,
}

impl OrbitController {
    pub fn new(rotate_speed: f32, zoom_speed: f32, damping: f32, max_radius: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            damping: damping.clamp(0.001, 1.0),
            max_radius,
            delta_yaw: 0.0,
            delta_pitch: 0.0,
            zoom: 0.0,
            dragging: false,
            last_cursor: None,
            viewport_height: 1.0,
        }
    }

    pub fn resize(&mut self, height: u32) {
        self.viewport_height = height.max(1) as f32;
    }

    /// Rotate by a cursor movement given in pixels.
    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        // a drag over the full viewport height turns the camera once around
        let scale = 2.0 * std::f32::consts::PI * self.rotate_speed / self.viewport_height;
        self.delta_yaw -= dx as f32 * scale;
        self.delta_pitch += dy as f32 * scale;
    }

    pub fn handle_scroll(&mut self, delta: &MouseScrollDelta) {
        self.zoom += match delta {
            MouseScrollDelta::LineDelta(_, lines) => *lines,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32 / 100.0,
        } * self.zoom_speed;
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(last) = self.last_cursor {
                    if self.dragging {
                        self.handle_mouse(position.x - last.x, position.y - last.y);
                    }
                }
                self.last_cursor = Some(*position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.dragging = false;
                self.last_cursor = None;
            }
            WindowEvent::MouseWheel { delta, .. } => self.handle_scroll(delta),
            _ => (),
        }
    }

    /// Stop reacting to a drag, e.g. when the pointer entered the tweak panel.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    pub fn update(&mut self, camera: &mut Camera, _dt: Duration) {
        camera.yaw.0 += self.delta_yaw * self.damping;
        camera.pitch.0 =
            (camera.pitch.0 + self.delta_pitch * self.damping).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        // zooming in shrinks the radius multiplicatively like a dolly
        camera.radius =
            (camera.radius * (1.0 - self.zoom * self.damping)).clamp(MIN_RADIUS, self.max_radius);

        let keep = 1.0 - self.damping;
        self.delta_yaw *= keep;
        self.delta_pitch *= keep;
        self.zoom *= keep;
    }

    #[cfg(test)]
    fn is_settled(&self) -> bool {
        self.delta_yaw.abs() < 1e-5 && self.delta_pitch.abs() < 1e-5 && self.zoom.abs() < 1e-5
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position().to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: OrbitController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, EuclideanSpace, Vector4};

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "{} != {}", a, b);
    }

    #[test]
    fn looking_at_reproduces_the_eye_position() {
        let camera = Camera::looking_at((1.0, 1.0, 2.0), (0.0, 0.0, 0.0));
        let position = camera.position();
        assert_close(position.x, 1.0);
        assert_close(position.y, 1.0);
        assert_close(position.z, 2.0);
        assert_close(camera.radius, 6.0f32.sqrt());
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let camera = Camera::looking_at((1.0, 1.0, 2.0), (0.0, 0.0, 0.0));
        let projection = Projection::new(800, 600, Deg(75.0), 0.1, 100.0);
        let clip = projection.calc_matrix()
            * camera.calc_matrix()
            * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert_close(ndc.x, 0.0);
        assert_close(ndc.y, 0.0);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn damping_glides_to_a_halt() {
        let mut camera = Camera::looking_at((0.0, 0.0, 3.0), Point3::origin());
        let mut controller = OrbitController::new(1.0, 1.0, 0.05, 100.0);
        controller.resize(600);
        controller.handle_mouse(100.0, 0.0);
        assert!(!controller.is_settled());

        let mut previous = camera.yaw.0;
        let mut steps = Vec::new();
        for _ in 0..400 {
            controller.update(&mut camera, Duration::from_millis(16));
            steps.push((camera.yaw.0 - previous).abs());
            previous = camera.yaw.0;
        }
        assert!(controller.is_settled());
        // each frame moves less than the one before
        assert!(steps.windows(2).all(|w| w[1] <= w[0]));
        // dragging right turns the camera to the left around the target
        assert!(camera.yaw.0 < 0.0);
    }

    #[test]
    fn pitch_never_crosses_the_poles() {
        let mut camera = Camera::looking_at((0.0, 0.0, 3.0), Point3::origin());
        let mut controller = OrbitController::new(1.0, 1.0, 1.0, 100.0);
        controller.handle_mouse(0.0, 1e6);
        controller.update(&mut camera, Duration::from_millis(16));
        assert!(camera.pitch.0 < std::f32::consts::FRAC_PI_2);
        assert!(camera.position().x.is_finite());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::looking_at((0.0, 0.0, 3.0), Point3::origin());
        let mut controller = OrbitController::new(1.0, 1.0, 1.0, 10.0);
        controller.handle_scroll(&MouseScrollDelta::LineDelta(0.0, 50.0));
        controller.update(&mut camera, Duration::from_millis(16));
        assert_close(camera.radius, MIN_RADIUS);

        controller.handle_scroll(&MouseScrollDelta::LineDelta(0.0, -500.0));
        controller.update(&mut camera, Duration::from_millis(16));
        assert_close(camera.radius, 10.0);
    }
}
