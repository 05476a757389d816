//! The light rig: one light of each supported type.
//!
//! Lights are plain data. [`uniform`] packs a [`LightRig`] into the layout the
//! shaders read and [`helpers`] turns it into on-screen gizmos. Nothing in here
//! touches the GPU.

pub mod helpers;
pub mod uniform;

use cgmath::{InnerSpace, Point3, Vector3};

/// An sRGB colour as written in hex, e.g. `0xff9000`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub srgb: [u8; 3],
}

impl Color {
    pub const WHITE: Color = Color::from_hex(0xffffff);

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            srgb: [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8],
        }
    }

    pub fn to_hex(self) -> u32 {
        let [r, g, b] = self.srgb;
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }

    /// Decode to linear RGB for shading.
    pub fn to_linear(self) -> [f32; 3] {
        self.srgb.map(|c| {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub cast_shadow: bool,
    pub visible: bool,
}

impl DirectionalLight {
    /// Unit vector from the target towards the light.
    pub fn direction(&self) -> Vector3<f32> {
        let dir = self.position - self.target;
        if dir.magnitude2() < f32::EPSILON {
            Vector3::unit_y()
        } else {
            dir.normalize()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HemisphereLight {
    pub sky_color: Color,
    pub ground_color: Color,
    pub intensity: f32,
    /// Only positions the helper, the light itself comes from every direction.
    pub position: Point3<f32>,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    /// Range of the light, zero means unlimited.
    pub distance: f32,
    pub decay: f32,
    pub position: Point3<f32>,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RectAreaLight {
    pub color: Color,
    pub intensity: f32,
    pub width: f32,
    pub height: f32,
    pub position: Point3<f32>,
    /// The light emits towards this point from its front face only.
    pub target: Point3<f32>,
    pub visible: bool,
}

impl RectAreaLight {
    /// Turn the light's front face towards `target`.
    ///
    /// A target on top of the light has no direction, the previous orientation
    /// is kept in that case.
    pub fn look_at(&mut self, target: Point3<f32>) {
        if (target - self.position).magnitude2() > f32::EPSILON {
            self.target = target;
        }
    }

    /// Move the light without turning it: the target travels along.
    pub fn move_to(&mut self, position: Point3<f32>) {
        self.target += position - self.position;
        self.position = position;
    }

    pub fn normal(&self) -> Vector3<f32> {
        let dir = self.target - self.position;
        if dir.magnitude2() < f32::EPSILON {
            -Vector3::unit_z()
        } else {
            dir.normalize()
        }
    }

    /// Half-extent vectors along the rectangle's width and height.
    ///
    /// `half_width x half_height` points along [`normal`](Self::normal).
    pub fn half_axes(&self) -> (Vector3<f32>, Vector3<f32>) {
        let normal = self.normal();
        let up = if normal.y.abs() > 0.999 {
            Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };
        // right-handed frame looking along the normal
        let right = normal.cross(up).normalize();
        let true_up = right.cross(normal);
        (
            -right * (self.width / 2.0),
            true_up * (self.height / 2.0),
        )
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Smallest gap between the outer and inner cone cosines of a spot light.
const MIN_PENUMBRA_COS: f32 = 1e-4;

#[derive(Clone, Debug, PartialEq)]
pub struct SpotLight {
    pub color: Color,
    pub intensity: f32,
    /// Range of the light, zero means unlimited.
    pub distance: f32,
    /// Half-angle of the cone in radians.
    pub angle: f32,
    /// Fraction of the cone that fades out, 0 gives a hard edge.
    pub penumbra: f32,
    pub decay: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub visible: bool,
}

impl SpotLight {
    /// Unit vector from the light towards its target.
    pub fn direction(&self) -> Vector3<f32> {
        let dir = self.target - self.position;
        if dir.magnitude2() < f32::EPSILON {
            -Vector3::unit_y()
        } else {
            dir.normalize()
        }
    }

    /// Cosine of the outer cone edge.
    pub fn cone_cos(&self) -> f32 {
        self.angle.cos()
    }

    /// Cosine of the angle where the penumbra starts. Always strictly above
    /// [`Self::cone_cos`], so a zero penumbra still leaves two distinct edges.
    pub fn penumbra_cos(&self) -> f32 {
        let inner = (self.angle * (1.0 - self.penumbra.clamp(0.0, 1.0))).cos();
        inner.max(self.cone_cos() + MIN_PENUMBRA_COS)
    }
}

/// Which light helpers are drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct HelperVisibility {
    pub directional: bool,
    pub hemisphere: bool,
    pub point: bool,
    pub rect_area: bool,
    pub spot: bool,
}

impl Default for HelperVisibility {
    fn default() -> Self {
        Self {
            directional: true,
            hemisphere: true,
            point: true,
            rect_area: true,
            spot: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub hemisphere: HemisphereLight,
    pub point: PointLight,
    pub rect_area: RectAreaLight,
    pub spot: SpotLight,
    pub helpers: HelperVisibility,
}

impl Default for LightRig {
    fn default() -> Self {
        let origin = Point3::new(0.0, 0.0, 0.0);
        Self {
            ambient: AmbientLight {
                color: Color::from_hex(0xffffff),
                intensity: 0.5,
                visible: true,
            },
            directional: DirectionalLight {
                color: Color::from_hex(0x00fffc),
                intensity: 0.3,
                position: Point3::new(1.0, 0.25, 0.0),
                target: origin,
                cast_shadow: false,
                visible: true,
            },
            hemisphere: HemisphereLight {
                sky_color: Color::from_hex(0xff0000),
                ground_color: Color::from_hex(0x0000ff),
                intensity: 0.3,
                position: Point3::new(0.0, 1.0, 0.0),
                visible: true,
            },
            point: PointLight {
                color: Color::from_hex(0xff9000),
                intensity: 0.5,
                distance: 10.0,
                decay: 2.0,
                position: Point3::new(1.0, -0.5, 1.0),
                visible: true,
            },
            rect_area: RectAreaLight {
                color: Color::from_hex(0x4e00ff),
                intensity: 2.0,
                width: 1.0,
                height: 1.0,
                position: Point3::new(-1.5, 0.0, 1.5),
                target: origin,
                visible: true,
            },
            spot: SpotLight {
                color: Color::from_hex(0x78ff00),
                intensity: 0.5,
                distance: 10.0,
                angle: std::f32::consts::PI * 0.1,
                penumbra: 0.25,
                decay: 1.0,
                position: Point3::new(0.0, 2.0, 3.0),
                target: Point3::new(-0.75, 0.0, 0.0),
                visible: true,
            },
            helpers: HelperVisibility::default(),
        }
    }
}
