//! Slider ranges and the fixed look-at targets of the tweak panel.

use std::f32::consts::FRAC_PI_2;

use cgmath::Point3;

use crate::demo::scene::{BOX_POSITION, RING_POSITION, SPHERE_POSITION};

/// Inclusive slider range with a step size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp `value` into the range and snap it to the nearest step.
    pub fn apply(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const INTENSITY: Range = Range::new(0.0, 3.0, 0.001);
pub const POSITION: Range = Range::new(-5.0, 5.0, 0.01);
pub const DISTANCE: Range = Range::new(0.0, 20.0, 0.01);
pub const DECAY: Range = Range::new(0.0, 4.0, 0.01);
pub const ANGLE: Range = Range::new(0.001, FRAC_PI_2, 0.001);
pub const PENUMBRA: Range = Range::new(0.0, 1.0, 0.001);
pub const SIZE: Range = Range::new(0.1, 5.0, 0.01);
pub const ROUGHNESS: Range = Range::new(0.0, 1.0, 0.001);
pub const METALNESS: Range = Range::new(0.0, 1.0, 0.001);

/// Points the rect-area light can be turned towards from the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookAtTarget {
    Origin,
    Sphere,
    Box,
    Ring,
}

impl LookAtTarget {
    pub const ALL: [LookAtTarget; 4] = [
        LookAtTarget::Origin,
        LookAtTarget::Sphere,
        LookAtTarget::Box,
        LookAtTarget::Ring,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LookAtTarget::Origin => "origin",
            LookAtTarget::Sphere => "sphere",
            LookAtTarget::Box => "box",
            LookAtTarget::Ring => "ring",
        }
    }

    pub fn point(self) -> Point3<f32> {
        match self {
            LookAtTarget::Origin => Point3::new(0.0, 0.0, 0.0),
            LookAtTarget::Sphere => SPHERE_POSITION,
            LookAtTarget::Box => BOX_POSITION,
            LookAtTarget::Ring => RING_POSITION,
        }
    }
}
