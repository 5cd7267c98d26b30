use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unique identifier for an actor or a piece of scene geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Bit mask of collision layers.
///
/// Geometry belongs to one or more layers; casts only see geometry whose
/// layers intersect the cast mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask containing the single layer `index` (0..32).
    pub const fn layer(index: u32) -> Self {
        LayerMask(1 << (index & 31))
    }

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

/// A discrete motion event produced by one resolution pass.
///
/// Every pass emits exactly one horizontal event (`Idle` or `Move`) and at
/// most one vertical event (`Landed` or `Fall`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionEvent {
    /// No horizontal movement was requested this frame.
    Idle,
    /// Horizontal movement was requested. Carries the velocity before any
    /// wall clamp, so animation sees the intended direction and speed.
    Move(Vec2),
    /// The body is airborne and moving downward.
    Fall,
    /// The ground snap caught the body.
    Landed,
}

impl MotionEvent {
    pub const KIND_IDLE: f32 = 0.0;
    pub const KIND_MOVE: f32 = 1.0;
    pub const KIND_FALL: f32 = 2.0;
    pub const KIND_LANDED: f32 = 3.0;

    /// Whether this event describes horizontal motion.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, MotionEvent::Idle | MotionEvent::Move(_))
    }

    /// Flatten into a fixed-size record for host buffers.
    pub fn to_record(&self) -> EventRecord {
        let (kind, v) = match *self {
            MotionEvent::Idle => (Self::KIND_IDLE, Vec2::ZERO),
            MotionEvent::Move(v) => (Self::KIND_MOVE, v),
            MotionEvent::Fall => (Self::KIND_FALL, Vec2::ZERO),
            MotionEvent::Landed => (Self::KIND_LANDED, Vec2::ZERO),
        };
        EventRecord {
            kind,
            x: v.x,
            y: v.y,
            _pad: 0.0,
        }
    }

    /// Rebuild an event from its record. Unknown kinds yield `None`.
    pub fn from_record(record: &EventRecord) -> Option<Self> {
        match record.kind {
            k if k == Self::KIND_IDLE => Some(MotionEvent::Idle),
            k if k == Self::KIND_MOVE => Some(MotionEvent::Move(Vec2::new(record.x, record.y))),
            k if k == Self::KIND_FALL => Some(MotionEvent::Fall),
            k if k == Self::KIND_LANDED => Some(MotionEvent::Landed),
            _ => None,
        }
    }
}

/// A motion event laid out for a flat f32 buffer (e.g. a SharedArrayBuffer
/// read by the animation layer). `kind` identifies the event, `x/y` carry the
/// `Move` payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EventRecord {
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub _pad: f32,
}

impl EventRecord {
    pub const FLOATS: usize = 4;
}
