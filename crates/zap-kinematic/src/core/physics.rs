use glam::Vec2;
use rapier2d::parry::query::ShapeCastOptions;
use rapier2d::parry::shape::Cuboid;
use rapier2d::prelude::*;

use crate::api::types::{EntityId, LayerMask};
use crate::core::query::{BoxCast, CastHit, CollisionQuery, NearestContact};

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam to nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn point_to_vec2(p: &nalgebra::Point2<f32>) -> Vec2 {
    Vec2::new(p.x, p.y)
}

fn layer_to_group(layer: LayerMask) -> Group {
    Group::from_bits_truncate(layer.0)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Handle to a collider owned by [`SceneColliders`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneCollider(pub(crate) ColliderHandle);

/// Description of a static box collider.
#[derive(Debug, Clone, Copy)]
pub struct BoxColliderDesc {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub rotation: f32,
    pub layer: LayerMask,
    pub entity: Option<EntityId>,
}

impl BoxColliderDesc {
    /// An axis-aligned box on every layer.
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
            rotation: 0.0,
            layer: LayerMask::ALL,
            entity: None,
        }
    }

    /// Box from world-space corners.
    pub fn from_bounds(min: Vec2, max: Vec2) -> Self {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_layer(mut self, layer: LayerMask) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }
}

// ---------------------------------------------------------------------------
// SceneColliders
// ---------------------------------------------------------------------------

/// Static scene geometry backed by Rapier's query pipeline.
///
/// Colliders have no parent body and never simulate; the set exists only to
/// answer box casts. Call [`update`](Self::update) after adding or removing
/// colliders and before casting.
pub struct SceneColliders {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    islands: IslandManager,
    query_pipeline: QueryPipeline,
    dirty: bool,
}

impl SceneColliders {
    pub fn new() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            islands: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
            dirty: false,
        }
    }

    /// Insert a static box. The owning entity, if any, is stored in the
    /// collider's `user_data` for hit lookups.
    pub fn add_box(&mut self, desc: &BoxColliderDesc) -> SceneCollider {
        let user_data = desc.entity.map(|e| e.0 as u128 + 1).unwrap_or(0);
        let collider = ColliderBuilder::cuboid(desc.half_extents.x, desc.half_extents.y)
            .translation(vec2_to_na(desc.center))
            .rotation(desc.rotation)
            .collision_groups(InteractionGroups::new(layer_to_group(desc.layer), Group::ALL))
            .user_data(user_data)
            .build();

        self.dirty = true;
        SceneCollider(self.colliders.insert(collider))
    }

    /// Remove a collider. Returns `false` if it was already gone.
    pub fn remove(&mut self, handle: SceneCollider) -> bool {
        let removed = self
            .colliders
            .remove(handle.0, &mut self.islands, &mut self.bodies, false)
            .is_some();
        self.dirty |= removed;
        removed
    }

    /// Number of colliders in the scene.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Rebuild the acceleration structure after edits.
    pub fn update(&mut self) {
        self.query_pipeline.update(&self.colliders);
        self.dirty = false;
        log::debug!("scene colliders rebuilt: {} colliders", self.colliders.len());
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// World-space bounds of a collider.
    pub fn collider_bounds(&self, handle: SceneCollider) -> Option<(Vec2, Vec2)> {
        let aabb = self.colliders.get(handle.0)?.compute_aabb();
        Some((point_to_vec2(&aabb.mins), point_to_vec2(&aabb.maxs)))
    }

    // -- private helpers --

    fn collider_entity(collider: &Collider) -> Option<EntityId> {
        match collider.user_data {
            0 => None,
            data => Some(EntityId((data - 1) as u32)),
        }
    }
}

impl Default for SceneColliders {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionQuery for SceneColliders {
    fn cast(&self, cast: &BoxCast) -> Option<CastHit> {
        if self.dirty {
            log::warn!("casting against stale scene colliders; call update() after edits");
        }
        if cast.direction == Vec2::ZERO || cast.size.cmple(Vec2::ZERO).any() {
            return None;
        }

        let shape = Cuboid::new(vec2_to_na(cast.half_extents()));
        let shape_pos = nalgebra::Isometry2::new(vec2_to_na(cast.origin), cast.angle);
        let options = ShapeCastOptions {
            max_time_of_impact: cast.max_distance,
            target_distance: 0.0,
            stop_at_penetration: true,
            compute_impact_geometry_on_penetration: true,
        };
        let filter = QueryFilter::default()
            .groups(InteractionGroups::new(Group::ALL, layer_to_group(cast.mask)));

        let (handle, hit) = self.query_pipeline.cast_shape(
            &self.bodies,
            &self.colliders,
            &shape_pos,
            &vec2_to_na(cast.direction),
            &shape,
            options,
            filter,
        )?;
        let collider = self.colliders.get(handle)?;
        let layer = LayerMask(collider.collision_groups().memberships.bits());
        let entity = Self::collider_entity(collider);

        // Axis-aligned colliders report the face-centred contact used by tile
        // geometry; anything else falls back to Rapier's witness point.
        let aabb = collider.compute_aabb();
        let mut nearest = NearestContact::new(cast);
        nearest.offer(cast, point_to_vec2(&aabb.mins), point_to_vec2(&aabb.maxs), layer, entity);
        if collider.rotation().angle() == 0.0 && cast.angle == 0.0 {
            if let Some(contact) = nearest.finish() {
                return Some(CastHit {
                    distance: hit.time_of_impact,
                    ..contact
                });
            }
        }

        let point = collider.position() * hit.witness1;
        let normal = collider.position().rotation * hit.normal1.into_inner();
        Some(CastHit {
            point: point_to_vec2(&point),
            distance: hit.time_of_impact,
            normal: na_to_vec2(&normal),
            layer,
            entity,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
