use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned collision box attached to a body.
///
/// The box centre sits at `position + offset`. With a feet-anchored body the
/// offset is usually `(0, size.y / 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionShape {
    pub offset: Vec2,
    pub size: Vec2,
}

impl CollisionShape {
    pub fn new(offset: Vec2, size: Vec2) -> Self {
        Self { offset, size }
    }

    /// A box of `size` standing on the body position.
    pub fn feet_anchored(size: Vec2) -> Self {
        Self {
            offset: Vec2::new(0.0, size.y * 0.5),
            size,
        }
    }

    /// Box centre for a body at `position`.
    pub fn center(&self, position: Vec2) -> Vec2 {
        position + self.offset
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Size reduced by `dx` in width and `dy` in height, never below zero.
    pub fn shrunk(&self, dx: f32, dy: f32) -> Vec2 {
        (self.size - Vec2::new(dx, dy)).max(Vec2::ZERO)
    }

    /// World-space bounds (min, max) for a body at `position`.
    pub fn bounds(&self, position: Vec2) -> (Vec2, Vec2) {
        let c = self.center(position);
        let h = self.half_extents();
        (c - h, c + h)
    }
}

impl Default for CollisionShape {
    fn default() -> Self {
        Self::feet_anchored(Vec2::ONE)
    }
}
