//! GPU layout of the light rig.
//!
//! Every field is a `vec4` (or `mat4`) so the struct has the same layout under
//! WGSL's uniform rules and `#[repr(C)]`. Colours are linear, intensity
//! travels in `w` and is zero for hidden lights.

use cgmath::{EuclideanSpace, Matrix4, Vector3, ortho};

use crate::{
    camera::OPENGL_TO_WGPU_MATRIX,
    lights::{Color, DirectionalLight, LightRig},
};

/// Half-size of the orthographic box the directional shadow covers.
pub const SHADOW_EXTENT: f32 = 4.0;
const SHADOW_DISTANCE: f32 = 8.0;
const SHADOW_BIAS: f32 = 0.002;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub ambient: [f32; 4],
    pub hemi_sky: [f32; 4],
    // w unused
    pub hemi_ground: [f32; 4],
    pub dir_color: [f32; 4],
    // xyz towards the light
    pub dir_direction: [f32; 4],
    pub point_color: [f32; 4],
    // w = distance
    pub point_position: [f32; 4],
    // x = decay
    pub point_params: [f32; 4],
    pub spot_color: [f32; 4],
    // w = distance
    pub spot_position: [f32; 4],
    // xyz from the light to its target, w = cos(angle)
    pub spot_direction: [f32; 4],
    // x = cos of the penumbra start, y = decay
    pub spot_params: [f32; 4],
    pub rect_color: [f32; 4],
    pub rect_position: [f32; 4],
    pub rect_half_width: [f32; 4],
    pub rect_half_height: [f32; 4],
    pub shadow_view_proj: [[f32; 4]; 4],
    // x = enabled, y = depth bias, z = texel size
    pub shadow_params: [f32; 4],
}

fn color(color: Color, intensity: f32, visible: bool) -> [f32; 4] {
    let [r, g, b] = color.to_linear();
    let intensity = if visible { intensity.max(0.0) } else { 0.0 };
    [r, g, b, intensity]
}

fn with_w(v: Vector3<f32>, w: f32) -> [f32; 4] {
    v.extend(w).into()
}

impl LightUniform {
    pub fn from_rig(rig: &LightRig, shadow_map_size: u32) -> Self {
        let dir = &rig.directional;
        let point = &rig.point;
        let spot = &rig.spot;
        let rect = &rig.rect_area;
        let (half_width, half_height) = rect.half_axes();
        let shadow_enabled = dir.visible && dir.cast_shadow && dir.intensity > 0.0;

        Self {
            ambient: color(rig.ambient.color, rig.ambient.intensity, rig.ambient.visible),
            hemi_sky: color(
                rig.hemisphere.sky_color,
                rig.hemisphere.intensity,
                rig.hemisphere.visible,
            ),
            hemi_ground: color(rig.hemisphere.ground_color, 0.0, true),
            dir_color: color(dir.color, dir.intensity, dir.visible),
            dir_direction: with_w(dir.direction(), 0.0),
            point_color: color(point.color, point.intensity, point.visible),
            point_position: with_w(point.position.to_vec(), point.distance.max(0.0)),
            point_params: [point.decay.max(0.0), 0.0, 0.0, 0.0],
            spot_color: color(spot.color, spot.intensity, spot.visible),
            spot_position: with_w(spot.position.to_vec(), spot.distance.max(0.0)),
            spot_direction: with_w(spot.direction(), spot.cone_cos()),
            spot_params: [spot.penumbra_cos(), spot.decay.max(0.0), 0.0, 0.0],
            rect_color: color(rect.color, rect.intensity, rect.visible),
            rect_position: with_w(rect.position.to_vec(), 0.0),
            rect_half_width: with_w(half_width, 0.0),
            rect_half_height: with_w(half_height, 0.0),
            shadow_view_proj: shadow_view_proj(dir).into(),
            shadow_params: [
                if shadow_enabled { 1.0 } else { 0.0 },
                SHADOW_BIAS,
                1.0 / shadow_map_size.max(1) as f32,
                0.0,
            ],
        }
    }
}

/// Orthographic view-projection of the directional light, centred on its
/// target and covering the floor.
pub fn shadow_view_proj(light: &DirectionalLight) -> Matrix4<f32> {
    let direction = light.direction();
    let eye = light.target + direction * SHADOW_DISTANCE;
    let up = if direction.y.abs() > 0.999 {
        Vector3::unit_z()
    } else {
        Vector3::unit_y()
    };
    let view = Matrix4::look_at_rh(eye, light.target, up);
    let projection = ortho(
        -SHADOW_EXTENT,
        SHADOW_EXTENT,
        -SHADOW_EXTENT,
        SHADOW_EXTENT,
        0.1,
        SHADOW_DISTANCE * 2.0,
    );
    OPENGL_TO_WGPU_MATRIX * projection * view
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    fn to_shadow_clip(light: &DirectionalLight, point: Point3<f32>) -> Vector3<f32> {
        let clip = shadow_view_proj(light) * point.to_homogeneous();
        clip.truncate() / clip.w
    }

    #[test]
    fn invisible_lights_pack_zero_intensity() {
        let mut rig = LightRig::default();
        rig.point.visible = false;
        rig.ambient.visible = false;
        let uniform = LightUniform::from_rig(&rig, 1024);
        assert_eq!(uniform.point_color[3], 0.0);
        assert_eq!(uniform.ambient[3], 0.0);
        assert_eq!(uniform.spot_color[3], 0.5);
        // colours survive so toggling back restores them
        assert!(uniform.point_color[0] > 0.99);
    }

    #[test]
    fn negative_intensity_is_clamped() {
        let mut rig = LightRig::default();
        rig.spot.intensity = -3.0;
        let uniform = LightUniform::from_rig(&rig, 1024);
        assert_eq!(uniform.spot_color[3], 0.0);
    }

    #[test]
    fn spot_cone_travels_as_cosines() {
        let rig = LightRig::default();
        let uniform = LightUniform::from_rig(&rig, 1024);
        assert_eq!(uniform.spot_direction[3], rig.spot.cone_cos());
        assert_eq!(uniform.spot_params[0], rig.spot.penumbra_cos());
        assert_eq!(uniform.spot_params[1], 1.0);
        assert_eq!(uniform.point_position[3], 10.0);
        assert_eq!(uniform.point_params[0], 2.0);
    }

    #[test]
    fn hard_edged_spot_keeps_distinct_cone_edges() {
        let mut rig = LightRig::default();
        rig.spot.penumbra = 0.0;
        let uniform = LightUniform::from_rig(&rig, 1024);
        assert!(uniform.spot_params[0] > uniform.spot_direction[3]);

        rig.spot.angle = crate::panel::bindings::ANGLE.min;
        for penumbra in [0.0, 0.5, 1.0] {
            rig.spot.penumbra = penumbra;
            let uniform = LightUniform::from_rig(&rig, 1024);
            assert!(uniform.spot_direction[3] < 1.0);
            assert!(uniform.spot_params[0] > uniform.spot_direction[3], "{penumbra}");
        }
    }

    #[test]
    fn shadow_is_only_enabled_when_cast() {
        let mut rig = LightRig::default();
        assert_eq!(LightUniform::from_rig(&rig, 1024).shadow_params[0], 0.0);
        rig.directional.cast_shadow = true;
        let uniform = LightUniform::from_rig(&rig, 512);
        assert_eq!(uniform.shadow_params[0], 1.0);
        assert_eq!(uniform.shadow_params[2], 1.0 / 512.0);
    }

    #[test]
    fn shadow_camera_sees_the_scene() {
        let rig = LightRig::default();
        for point in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(-1.5, 0.0, 0.0),
            Point3::new(2.5, -0.65, 2.5),
            Point3::new(-2.5, -0.65, -2.5),
        ] {
            let ndc = to_shadow_clip(&rig.directional, point);
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "{:?}", ndc);
            assert!(ndc.z > 0.0 && ndc.z < 1.0, "{:?}", ndc);
        }
    }

    #[test]
    fn layout_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<LightUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<LightUniform>(), 17 * 16 + 64);
    }
}
