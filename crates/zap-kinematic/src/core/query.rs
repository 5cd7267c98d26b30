//! Collision queries: the seam between movement and scene geometry.
//!
//! The resolver never touches geometry directly. It describes a box sweep
//! with [`BoxCast`] and asks a [`CollisionQuery`] for the nearest blocking
//! surface. Tilemaps and rapier scenes both implement the trait.

use glam::Vec2;

use crate::api::types::{EntityId, LayerMask};

/// Directions parallel to an axis closer than this are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Hits closer together than this count as the same contact.
const TIE_EPSILON: f32 = 1e-5;

/// One of the two world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastAxis {
    Horizontal,
    Vertical,
}

impl CastAxis {
    /// The axis `v` points along most strongly. Ties go to horizontal.
    pub fn dominant(v: Vec2) -> Self {
        if v.y.abs() > v.x.abs() {
            CastAxis::Vertical
        } else {
            CastAxis::Horizontal
        }
    }

    pub fn other(self) -> Self {
        match self {
            CastAxis::Horizontal => CastAxis::Vertical,
            CastAxis::Vertical => CastAxis::Horizontal,
        }
    }

    /// Component of `v` along this axis.
    pub fn component(self, v: Vec2) -> f32 {
        match self {
            CastAxis::Horizontal => v.x,
            CastAxis::Vertical => v.y,
        }
    }

    /// Unit vector along this axis.
    pub fn unit(self) -> Vec2 {
        match self {
            CastAxis::Horizontal => Vec2::X,
            CastAxis::Vertical => Vec2::Y,
        }
    }

    /// Build a vector from a value along this axis and one across it.
    pub fn compose(self, along: f32, across: f32) -> Vec2 {
        match self {
            CastAxis::Horizontal => Vec2::new(along, across),
            CastAxis::Vertical => Vec2::new(across, along),
        }
    }
}

/// A box swept along a direction for a bounded distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCast {
    /// Centre of the box at the start of the sweep.
    pub origin: Vec2,
    /// Full width and height of the box.
    pub size: Vec2,
    /// Box rotation in radians. Movement always passes 0.
    pub angle: f32,
    /// Unit sweep direction.
    pub direction: Vec2,
    /// Longest distance to sweep.
    pub max_distance: f32,
    /// Layers the sweep can hit.
    pub mask: LayerMask,
}

impl BoxCast {
    /// An axis-aligned cast against every layer. `direction` is normalized.
    pub fn new(origin: Vec2, size: Vec2, direction: Vec2, max_distance: f32) -> Self {
        Self {
            origin,
            size,
            angle: 0.0,
            direction: direction.normalize_or_zero(),
            max_distance,
            mask: LayerMask::ALL,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_mask(mut self, mask: LayerMask) -> Self {
        self.mask = mask;
        self
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Box centre at the far end of the sweep.
    pub fn end(&self) -> Vec2 {
        self.origin + self.direction * self.max_distance
    }

    /// Bounds (min, max) covering the box over the whole sweep.
    pub fn swept_bounds(&self) -> (Vec2, Vec2) {
        let half = self.half_extents();
        let end = self.end();
        (
            self.origin.min(end) - half,
            self.origin.max(end) + half,
        )
    }
}

/// The nearest blocking surface found by a cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastHit {
    /// Contact point in world space.
    pub point: Vec2,
    /// Distance travelled along the cast direction before contact.
    pub distance: f32,
    /// Surface normal at the contact, pointing back toward the box.
    pub normal: Vec2,
    /// Layers of the geometry that was hit.
    pub layer: LayerMask,
    /// Owner of the geometry, if it belongs to an entity.
    pub entity: Option<EntityId>,
}

impl CastHit {
    /// Coordinate of the hit point on `axis`.
    pub fn axis_value(&self, axis: CastAxis) -> f32 {
        axis.component(self.point)
    }
}

/// Something that can answer box casts against scene geometry.
///
/// Implementations must not mutate during a cast so independent bodies may
/// query the same geometry concurrently.
pub trait CollisionQuery {
    fn cast(&self, cast: &BoxCast) -> Option<CastHit>;
}

impl<Q: CollisionQuery + ?Sized> CollisionQuery for &Q {
    fn cast(&self, cast: &BoxCast) -> Option<CastHit> {
        (**self).cast(cast)
    }
}

impl<Q: CollisionQuery + ?Sized> CollisionQuery for Box<Q> {
    fn cast(&self, cast: &BoxCast) -> Option<CastHit> {
        (**self).cast(cast)
    }
}

// ---------------------------------------------------------------------------
// Swept box vs axis-aligned bounds
// ---------------------------------------------------------------------------

/// Where along a cast a box first meets a target, and across which axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Sweep {
    pub toi: f32,
    pub axis: CastAxis,
}

/// Sweep the cast box against the bounds `min..max`.
///
/// Slab test against the target grown by the box half extents. Resting flush
/// against a face parallel to the sweep is not a hit; starting inside the
/// target hits at distance 0 across the dominant cast axis.
pub(crate) fn sweep_box(cast: &BoxCast, min: Vec2, max: Vec2) -> Option<Sweep> {
    if cast.direction == Vec2::ZERO {
        return None;
    }
    let half = cast.half_extents();
    let grown_min = min - half;
    let grown_max = max + half;

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_axis = CastAxis::dominant(cast.direction);

    for axis in [CastAxis::Horizontal, CastAxis::Vertical] {
        let c = axis.component(cast.origin);
        let d = axis.component(cast.direction);
        let lo = axis.component(grown_min);
        let hi = axis.component(grown_max);

        if d.abs() < PARALLEL_EPSILON {
            if c <= lo || c >= hi {
                return None;
            }
            continue;
        }

        let t1 = (lo - c) / d;
        let t2 = (hi - c) / d;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        if near > t_enter {
            t_enter = near;
            enter_axis = axis;
        }
        t_exit = t_exit.min(far);
    }

    if t_enter > t_exit || t_exit <= 0.0 || t_enter > cast.max_distance {
        return None;
    }

    if t_enter < 0.0 {
        // Already overlapping at the start of the sweep.
        return Some(Sweep {
            toi: 0.0,
            axis: CastAxis::dominant(cast.direction),
        });
    }

    Some(Sweep {
        toi: t_enter.max(0.0),
        axis: enter_axis,
    })
}

/// Collects contacts from many targets and keeps the nearest.
///
/// Targets struck at the same distance across the same axis are merged into
/// one contact whose point sits in the middle of their combined overlap.
pub(crate) struct NearestContact {
    direction: Vec2,
    best: Option<Contact>,
}

#[derive(Debug, Clone, Copy)]
struct Contact {
    toi: f32,
    axis: CastAxis,
    /// Coordinate of the struck face along `axis`.
    face: f32,
    /// Overlap span across `axis`.
    lo: f32,
    hi: f32,
    layer: LayerMask,
    entity: Option<EntityId>,
}

impl NearestContact {
    pub fn new(cast: &BoxCast) -> Self {
        Self {
            direction: cast.direction,
            best: None,
        }
    }

    /// Offer the bounds `min..max` as a candidate target.
    pub fn offer(
        &mut self,
        cast: &BoxCast,
        min: Vec2,
        max: Vec2,
        layer: LayerMask,
        entity: Option<EntityId>,
    ) {
        let sweep = match sweep_box(cast, min, max) {
            Some(s) => s,
            None => return,
        };

        let axis = sweep.axis;
        let across = axis.other();
        let moved = cast.origin + cast.direction * sweep.toi;
        let half = cast.half_extents();
        let heading = axis.component(cast.direction);

        let face = if heading < 0.0 {
            axis.component(max)
        } else {
            axis.component(min)
        };
        let lo = (across.component(moved) - across.component(half)).max(across.component(min));
        let hi = (across.component(moved) + across.component(half)).min(across.component(max));

        let candidate = Contact {
            toi: sweep.toi,
            axis,
            face,
            lo,
            hi,
            layer,
            entity,
        };

        self.best = Some(match self.best {
            None => candidate,
            Some(best) if candidate.toi < best.toi - TIE_EPSILON => candidate,
            Some(best) if (candidate.toi - best.toi).abs() <= TIE_EPSILON && candidate.axis == best.axis => {
                let face = if heading < 0.0 {
                    best.face.max(candidate.face)
                } else {
                    best.face.min(candidate.face)
                };
                Contact {
                    toi: best.toi.min(candidate.toi),
                    axis: best.axis,
                    face,
                    lo: best.lo.min(candidate.lo),
                    hi: best.hi.max(candidate.hi),
                    layer: best.layer.union(candidate.layer),
                    entity: best.entity.or(candidate.entity),
                }
            }
            Some(best) => best,
        });
    }

    pub fn finish(self) -> Option<CastHit> {
        let c = self.best?;
        let heading = c.axis.component(self.direction);
        Some(CastHit {
            point: c.axis.compose(c.face, (c.lo + c.hi) * 0.5),
            distance: c.toi,
            normal: c.axis.unit() * -heading.signum(),
            layer: c.layer,
            entity: c.entity,
        })
    }
}
