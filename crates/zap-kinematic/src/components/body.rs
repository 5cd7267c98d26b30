use glam::Vec2;

use crate::components::shape::CollisionShape;

/// Vertical contact state of a body, as of the last resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalState {
    Airborne,
    Grounded,
}

/// Position and motion accumulators for one kinematic actor.
///
/// `velocity` is this frame's requested displacement, not a physical
/// velocity: callers add to it with [`add_move`](Self::add_move) and the
/// resolver clears it at the end of every pass. `gravity` persists across
/// frames until the body lands or warps.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) gravity: Vec2,
    pub(crate) grounded: bool,
    shape: CollisionShape,
}

impl KinematicBody {
    /// Create a body at `position` with the given collision box.
    pub fn new(position: Vec2, shape: CollisionShape) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            gravity: Vec2::ZERO,
            grounded: false,
            shape,
        }
    }

    /// Accumulate a displacement request for this frame. Additive.
    pub fn add_move(&mut self, v: Vec2) {
        self.velocity += v;
    }

    /// Overwrite the gravity accumulator (jump impulses, cancelling a fall).
    pub fn set_gravity(&mut self, g: Vec2) {
        self.gravity = g;
    }

    /// Teleport to `position`, clearing both accumulators.
    ///
    /// No collision checks: the destination is the caller's responsibility.
    pub fn warp(&mut self, position: Vec2) {
        self.velocity = Vec2::ZERO;
        self.gravity = Vec2::ZERO;
        self.position = position;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn vertical_state(&self) -> VerticalState {
        if self.grounded {
            VerticalState::Grounded
        } else {
            VerticalState::Airborne
        }
    }

    pub fn shape(&self) -> &CollisionShape {
        &self.shape
    }

    pub fn set_shape(&mut self, shape: CollisionShape) {
        self.shape = shape;
    }

    /// Centre of the collision box at the current position.
    pub fn collider_center(&self) -> Vec2 {
        self.shape.center(self.position)
    }
}
