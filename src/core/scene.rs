//! Animatable scene properties for a single switch.
//!
//! The renderer owns geometry and materials. A switch only owns two numbers:
//! the tilt of the housing pivot and the depth of the stem. The host reads
//! them (or the model matrices built from them) whenever it draws a frame.

use super::constants::{HOUSING_SCALE, NEUTRAL_TILT};
use glam::{Mat4, Quat, Vec3};
use std::cell::Cell;
use std::rc::Rc;

/// A numeric scene property that timelines can write to.
///
/// Cloning yields another handle to the same cell; identity is by pointer.
#[derive(Clone, Debug, Default)]
pub struct Property(Rc<Cell<f32>>);

impl Property {
    pub fn new(value: f32) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.0.get()
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.0.set(value);
    }

    #[inline]
    pub fn same_as(&self, other: &Property) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// The two transform targets of one switch, exclusive to it (not `Clone`).
#[derive(Debug)]
pub struct SwitchNodes {
    housing_tilt: Property,
    stem_depth: Property,
}

impl Default for SwitchNodes {
    fn default() -> Self {
        Self::new()
    }
}

impl SwitchNodes {
    pub fn new() -> Self {
        Self {
            housing_tilt: Property::new(NEUTRAL_TILT),
            stem_depth: Property::new(0.0),
        }
    }

    /// Rotation of the housing pivot about X, in radians.
    pub fn housing_tilt(&self) -> &Property {
        &self.housing_tilt
    }

    /// Translation of the stem along its local Z axis.
    pub fn stem_depth(&self) -> &Property {
        &self.stem_depth
    }

    pub fn housing_transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(HOUSING_SCALE),
            Quat::from_rotation_x(self.housing_tilt.get()),
            Vec3::ZERO,
        )
    }

    /// Stem transform relative to the housing group.
    pub fn stem_transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, self.stem_depth.get()))
    }
}
