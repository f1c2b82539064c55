use super::constants::{HIT_BOX_CENTER, HIT_BOX_SIZE};
use glam::{Mat4, Vec3};

/// Invisible cube around the switch that receives pointer events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitBox {
    pub center: Vec3,
    pub half_extent: Vec3,
}

impl Default for HitBox {
    fn default() -> Self {
        Self {
            center: Vec3::from(HIT_BOX_CENTER),
            half_extent: Vec3::splat(HIT_BOX_SIZE * 0.5),
        }
    }
}

impl HitBox {
    /// Ray test in world space, where `model` places the switch in the scene.
    pub fn hit(&self, model: Mat4, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        let inv = model.inverse();
        let o = inv.transform_point3(ray_origin);
        let d = inv.transform_vector3(ray_dir);
        ray_aabb(o, d, self.center - self.half_extent, self.center + self.half_extent)
    }
}

/// Slab test. Returns the entry distance along `ray_dir`, or 0 when the origin is inside.
#[inline]
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = ray_dir.recip();
    let t0 = (min - ray_origin) * inv;
    let t1 = (max - ray_origin) * inv;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();
    if t_far < 0.0 || t_near > t_far || t_near.is_nan() || t_far.is_nan() {
        return None;
    }
    Some(t_near.max(0.0))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEdge {
    Enter,
    Leave,
}

/// Turns per-move hit results into enter/leave transitions.
#[derive(Default, Clone, Copy, Debug)]
pub struct HoverTracker {
    inside: bool,
}

impl HoverTracker {
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn update(&mut self, hit: bool) -> Option<HoverEdge> {
        if hit == self.inside {
            return None;
        }
        self.inside = hit;
        Some(if hit { HoverEdge::Enter } else { HoverEdge::Leave })
    }
}
