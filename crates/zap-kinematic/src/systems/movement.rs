//! Movement resolution. Moves a kinematic body through scene geometry.
//!
//! One pass per body per frame, in a fixed order:
//!
//! 1. integrate gravity into the gravity accumulator and the frame velocity
//! 2. resolve the horizontal displacement (walls, walkable steps)
//! 3. resolve the vertical displacement (ground snap, then floor/ceiling)
//! 4. apply the remaining velocity to the position and clear it
//!
//! Horizontal always runs before vertical so stepping onto ledges behaves
//! the same every frame.

use glam::Vec2;

use crate::api::events::MotionPublisher;
use crate::api::types::MotionEvent;
use crate::assets::config::MovementConfig;
use crate::components::body::KinematicBody;
use crate::core::query::{BoxCast, CastAxis, CastHit, CollisionQuery};
use crate::systems::debug::{CastSample, DiagnosticSink};

/// Collaborators for one resolution pass.
///
/// Every collaborator is optional. Without a query the body moves through
/// empty space; without a publisher events go nowhere.
pub struct ResolveContext<'a> {
    dt: f32,
    query: Option<&'a dyn CollisionQuery>,
    publisher: Option<&'a mut dyn MotionPublisher>,
    diagnostics: Option<&'a mut dyn DiagnosticSink>,
}

impl<'a> ResolveContext<'a> {
    /// A pass lasting `dt` seconds with no collaborators attached.
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            query: None,
            publisher: None,
            diagnostics: None,
        }
    }

    pub fn with_query(mut self, query: &'a dyn CollisionQuery) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_publisher(mut self, publisher: &'a mut dyn MotionPublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: &'a mut dyn DiagnosticSink) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    fn cast(&self, cast: &BoxCast) -> Option<CastHit> {
        self.query.and_then(|q| q.cast(cast))
    }

    fn emit(&mut self, event: MotionEvent) {
        if let Some(publisher) = self.publisher.as_mut() {
            publisher.publish(event);
        }
    }

    fn sample(&mut self, axis: CastAxis, point: Vec2) {
        if let Some(diagnostics) = self.diagnostics.as_mut() {
            diagnostics.record(CastSample { axis, point });
        }
    }
}

/// What a single pass produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// `Idle` or `Move`.
    pub horizontal: MotionEvent,
    /// `Landed`, `Fall`, or nothing.
    pub vertical: Option<MotionEvent>,
    pub grounded: bool,
    pub position: Vec2,
}

impl FrameReport {
    /// Events in emission order.
    pub fn events(&self) -> impl Iterator<Item = MotionEvent> {
        std::iter::once(self.horizontal).chain(self.vertical)
    }
}

/// Resolves kinematic bodies against a [`CollisionQuery`].
///
/// Holds only configuration; one resolver can serve any number of bodies.
#[derive(Debug, Clone)]
pub struct MovementResolver {
    config: MovementConfig,
}

impl MovementResolver {
    pub fn new(config: MovementConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid movement config: {:?}", config);
        Self { config }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Run one full pass on `body`.
    pub fn resolve(&self, body: &mut KinematicBody, mut ctx: ResolveContext<'_>) -> FrameReport {
        self.integrate_gravity(body, ctx.dt);

        let horizontal = self.resolve_horizontal(body, &mut ctx);
        let vertical = self.resolve_vertical(body, &mut ctx);

        body.position += body.velocity;
        if let Some(diagnostics) = ctx.diagnostics.as_mut() {
            diagnostics.record_velocity(body.velocity);
        }
        body.velocity = Vec2::ZERO;

        log::trace!(
            "resolved body: pos={:?} grounded={} events={:?}/{:?}",
            body.position,
            body.grounded,
            horizontal,
            vertical
        );

        FrameReport {
            horizontal,
            vertical,
            grounded: body.grounded,
            position: body.position,
        }
    }

    /// Semi-implicit Euler: gravity compounds across frames, the velocity it
    /// feeds is cleared after every pass.
    fn integrate_gravity(&self, body: &mut KinematicBody, dt: f32) {
        body.gravity += self.config.gravity * dt;
        body.velocity += body.gravity * dt;
    }

    fn resolve_horizontal(&self, body: &mut KinematicBody, ctx: &mut ResolveContext<'_>) -> MotionEvent {
        if body.velocity.x == 0.0 {
            ctx.emit(MotionEvent::Idle);
            return MotionEvent::Idle;
        }

        let requested = body.velocity;
        let shape = *body.shape();
        let size = shape.shrunk(0.0, self.config.horizontal_cast_shrink);
        let direction = if requested.x > 0.0 { Vec2::X } else { Vec2::NEG_X };
        let cast = BoxCast::new(shape.center(body.position), size, direction, requested.x.abs())
            .with_mask(self.config.layer_mask);

        if let Some(hit) = ctx.cast(&cast) {
            let diff = hit.point - body.position;
            // Below the step height the hit is walkable terrain, not a wall.
            if same_direction(diff.x, requested.x) && self.config.ignore_horizontal_step_height < diff.y {
                let offset = if requested.x > 0.0 { -size.x * 0.5 } else { size.x * 0.5 };
                body.position.x = hit.point.x + offset;
                body.velocity.x = 0.0;
                ctx.sample(CastAxis::Horizontal, hit.point);
                log::debug!(
                    "wall at x={} stops horizontal move of {}",
                    hit.point.x,
                    requested.x
                );
            }
        }

        let event = MotionEvent::Move(requested);
        ctx.emit(event);
        event
    }

    fn resolve_vertical(&self, body: &mut KinematicBody, ctx: &mut ResolveContext<'_>) -> Option<MotionEvent> {
        let shape = *body.shape();
        let size = shape.shrunk(self.config.vertical_cast_shrink, 0.0);
        let mut event = None;
        let mut snapped = false;
        let mut landed = false;

        if self.in_snap_band(body.velocity.y) {
            let cast = BoxCast::new(
                shape.center(body.position) + self.config.snap_ground_offset_origin,
                (size + self.config.snap_ground_offset_size).max(Vec2::ZERO),
                Vec2::NEG_Y,
                self.config.snap_ground_distance,
            )
            .with_mask(self.config.layer_mask);

            if let Some(hit) = ctx.cast(&cast) {
                body.gravity = Vec2::ZERO;
                body.position.y = hit.point.y;
                body.velocity.y = 0.0;
                snapped = true;
                ctx.sample(CastAxis::Vertical, hit.point);
                ctx.emit(MotionEvent::Landed);
                event = Some(MotionEvent::Landed);
            }
        }

        let vy = body.velocity.y;
        if vy != 0.0 {
            let center = shape.center(body.position);
            let direction = if vy > 0.0 { Vec2::Y } else { Vec2::NEG_Y };
            let cast = BoxCast::new(center, size, direction, vy.abs()).with_mask(self.config.layer_mask);

            if let Some(hit) = ctx.cast(&cast) {
                let diff = hit.point.y - center.y;
                if same_direction(diff, vy) {
                    body.gravity = Vec2::ZERO;
                    // Descending rests the feet on the hit; ascending puts the
                    // top of the box against it.
                    body.position.y = if vy < 0.0 { hit.point.y } else { hit.point.y - size.y };
                    body.velocity.y = 0.0;
                    landed = vy < 0.0;
                    ctx.sample(CastAxis::Vertical, hit.point);
                    if landed {
                        log::debug!("landed on y={} falling at {}", hit.point.y, vy);
                    }
                }
            }
        }

        body.grounded = snapped || landed;

        if !body.grounded && body.velocity.y < 0.0 {
            ctx.emit(MotionEvent::Fall);
            event = Some(MotionEvent::Fall);
        }

        event
    }

    fn in_snap_band(&self, vy: f32) -> bool {
        self.config.snap_ground_check_threshold <= vy && vy <= 0.0
    }
}

/// Strict sign match. A zero offset never counts as blocking.
fn same_direction(offset: f32, velocity: f32) -> bool {
    (offset > 0.0 && velocity > 0.0) || (offset < 0.0 && velocity < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::LayerMask;
    use crate::components::shape::CollisionShape;
    use crate::systems::debug::MotionDiagnostics;
    use std::cell::RefCell;

    const DT: f32 = 1.0 / 60.0;

    /// Infinite floor / ceiling planes and a vertical wall reporting a fixed
    /// contact height. Records every cast it answers.
    #[derive(Default)]
    struct PlaneQuery {
        floor: Option<f32>,
        ceiling: Option<f32>,
        wall: Option<(f32, f32)>,
        casts: RefCell<Vec<BoxCast>>,
    }

    impl PlaneQuery {
        fn hit(point: Vec2, distance: f32, normal: Vec2) -> Option<CastHit> {
            Some(CastHit {
                point,
                distance,
                normal,
                layer: LayerMask::ALL,
                entity: None,
            })
        }
    }

    impl CollisionQuery for PlaneQuery {
        fn cast(&self, cast: &BoxCast) -> Option<CastHit> {
            self.casts.borrow_mut().push(*cast);
            let half = cast.half_extents();
            let d = cast.direction;
            if d.y < 0.0 {
                let floor = self.floor?;
                let gap = cast.origin.y - half.y - floor;
                if gap <= cast.max_distance {
                    return Self::hit(Vec2::new(cast.origin.x, floor), gap.max(0.0), Vec2::Y);
                }
            } else if d.y > 0.0 {
                let ceiling = self.ceiling?;
                let gap = ceiling - (cast.origin.y + half.y);
                if gap <= cast.max_distance {
                    return Self::hit(Vec2::new(cast.origin.x, ceiling), gap.max(0.0), Vec2::NEG_Y);
                }
            } else if d.x != 0.0 {
                let (x, contact_y) = self.wall?;
                let edge = cast.origin.x + half.x * d.x.signum();
                let gap = (x - edge) * d.x.signum();
                if gap >= 0.0 && gap <= cast.max_distance {
                    return Self::hit(Vec2::new(x, contact_y), gap, Vec2::new(-d.x.signum(), 0.0));
                }
            }
            None
        }
    }

    /// Always reports the same hit, regardless of the cast.
    struct FixedHit(CastHit);

    impl CollisionQuery for FixedHit {
        fn cast(&self, _cast: &BoxCast) -> Option<CastHit> {
            Some(self.0)
        }
    }

    fn weightless() -> MovementConfig {
        MovementConfig {
            gravity: Vec2::ZERO,
            snap_ground_check_threshold: -0.1,
            snap_ground_distance: 0.1,
            horizontal_cast_shrink: 0.1,
            vertical_cast_shrink: 0.1,
            ignore_horizontal_step_height: 0.3,
            ..Default::default()
        }
    }

    fn body_at(x: f32, y: f32) -> KinematicBody {
        KinematicBody::new(Vec2::new(x, y), CollisionShape::feet_anchored(Vec2::new(1.0, 2.0)))
    }

    #[test]
    fn zero_horizontal_velocity_emits_single_idle() {
        let resolver = MovementResolver::new(weightless());
        let mut body = body_at(3.0, 0.0);
        let mut events = Vec::new();

        let report = resolver.resolve(&mut body, ResolveContext::new(DT).with_publisher(&mut events));

        assert_eq!(events, vec![MotionEvent::Idle]);
        assert_eq!(report.horizontal, MotionEvent::Idle);
        assert_eq!(report.vertical, None);
        assert_eq!(body.position().x, 3.0);
    }

    #[test]
    fn free_move_without_geometry() {
        let resolver = MovementResolver::new(weightless());
        let mut body = body_at(0.0, 5.0);
        let mut events = Vec::new();
        body.add_move(Vec2::new(1.5, 0.0));
        body.add_move(Vec2::new(0.5, 0.0));

        resolver.resolve(&mut body, ResolveContext::new(DT).with_publisher(&mut events));

        assert_eq!(body.position(), Vec2::new(2.0, 5.0));
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(events, vec![MotionEvent::Move(Vec2::new(2.0, 0.0))]);
    }

    #[test]
    fn wall_above_step_height_clamps_and_reports_requested_velocity() {
        let resolver = MovementResolver::new(weightless());
        // Leading edge at x = 0.5, wall at x = 1.5: one unit away.
        let query = PlaneQuery {
            wall: Some((1.5, 0.5)),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);
        let mut events = Vec::new();
        body.add_move(Vec2::new(2.0, 0.0));

        let report = resolver.resolve(
            &mut body,
            ResolveContext::new(DT).with_query(&query).with_publisher(&mut events),
        );

        assert!((body.position().x - 1.0).abs() < 0.001, "x={}", body.position().x);
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(report.horizontal, MotionEvent::Move(Vec2::new(2.0, 0.0)));
        assert_eq!(events[0], MotionEvent::Move(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn hit_within_step_height_is_walked_over() {
        let resolver = MovementResolver::new(weightless());
        let query = PlaneQuery {
            wall: Some((1.5, 0.1)),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);
        body.add_move(Vec2::new(2.0, 0.0));

        resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));

        assert!((body.position().x - 2.0).abs() < 0.001);
    }

    #[test]
    fn hit_exactly_at_step_height_is_walkable() {
        let resolver = MovementResolver::new(weightless());
        let query = PlaneQuery {
            wall: Some((1.5, 0.3)),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);
        body.add_move(Vec2::new(2.0, 0.0));

        resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));

        assert!((body.position().x - 2.0).abs() < 0.001);
    }

    #[test]
    fn moving_left_clamps_to_right_edge_of_wall() {
        let resolver = MovementResolver::new(weightless());
        let query = PlaneQuery {
            wall: Some((-1.0, 1.0)),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);
        body.add_move(Vec2::new(-3.0, 0.0));

        resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));

        assert!((body.position().x - (-0.5)).abs() < 0.001);
    }

    #[test]
    fn hit_at_zero_offset_never_blocks() {
        let resolver = MovementResolver::new(weightless());
        let query = FixedHit(CastHit {
            point: Vec2::new(0.0, 1.0),
            distance: 0.0,
            normal: Vec2::NEG_X,
            layer: LayerMask::ALL,
            entity: None,
        });
        let mut body = body_at(0.0, 10.0);
        body.add_move(Vec2::new(2.0, 0.0));

        resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));

        assert!((body.position().x - 2.0).abs() < 0.001);
    }

    #[test]
    fn hit_behind_direction_of_travel_never_blocks() {
        let resolver = MovementResolver::new(weightless());
        let query = FixedHit(CastHit {
            point: Vec2::new(-0.5, 1.0),
            distance: 0.0,
            normal: Vec2::X,
            layer: LayerMask::ALL,
            entity: None,
        });
        let mut body = body_at(0.0, 10.0);
        body.add_move(Vec2::new(2.0, 0.0));

        resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));

        assert!((body.position().x - 2.0).abs() < 0.001);
    }

    #[test]
    fn horizontal_cast_uses_height_shrunk_box() {
        let resolver = MovementResolver::new(weightless());
        let query = PlaneQuery::default();
        let mut body = body_at(0.0, 0.0);
        body.add_move(Vec2::new(1.0, 0.0));

        resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));

        let casts = query.casts.borrow();
        let horizontal = casts.iter().find(|c| c.direction == Vec2::X).expect("horizontal cast");
        assert!((horizontal.size.y - 1.9).abs() < 0.001);
        assert!((horizontal.size.x - 1.0).abs() < 0.001);
        assert_eq!(horizontal.origin, Vec2::new(0.0, 1.0));
        assert!((horizontal.max_distance - 1.0).abs() < 0.001);
    }

    #[test]
    fn snap_cast_applies_configured_offsets() {
        let config = MovementConfig {
            snap_ground_offset_origin: Vec2::new(0.2, -0.3),
            snap_ground_offset_size: Vec2::new(0.4, 0.2),
            ..weightless()
        };
        let resolver = MovementResolver::new(config);
        let query = PlaneQuery::default();
        let mut body = body_at(0.0, 0.0);

        resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));

        let casts = query.casts.borrow();
        assert_eq!(casts.len(), 1);
        let snap = casts[0];
        assert_eq!(snap.direction, Vec2::NEG_Y);
        assert!((snap.origin - Vec2::new(0.2, 0.7)).length() < 0.001, "origin={:?}", snap.origin);
        // Width shrunk by 0.1 before the offset is added; height untouched.
        assert!((snap.size - Vec2::new(1.3, 2.2)).length() < 0.001, "size={:?}", snap.size);
        assert!((snap.max_distance - 0.1).abs() < 0.001);
    }

    #[test]
    fn blocking_cast_uses_width_shrunk_box() {
        let resolver = MovementResolver::new(weightless());
        let query = PlaneQuery::default();
        let mut body = body_at(0.0, 0.0);
        body.add_move(Vec2::new(0.0, -1.0));

        resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));

        let casts = query.casts.borrow();
        let vertical = casts.iter().find(|c| c.direction == Vec2::NEG_Y).expect("vertical cast");
        assert!((vertical.size.x - 0.9).abs() < 0.001);
        assert!((vertical.size.y - 2.0).abs() < 0.001);
        assert_eq!(vertical.origin, Vec2::new(0.0, 1.0));
        assert!((vertical.max_distance - 1.0).abs() < 0.001);
    }

    #[test]
    fn every_cast_carries_the_layer_mask() {
        let mask = LayerMask::layer(2).union(LayerMask::layer(5));
        let config = MovementConfig {
            layer_mask: mask,
            snap_ground_check_threshold: -2.0,
            ..weightless()
        };
        let resolver = MovementResolver::new(config);
        let query = PlaneQuery::default();
        let mut body = body_at(0.0, 0.0);
        body.add_move(Vec2::new(1.0, -1.0));

        resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));

        let casts = query.casts.borrow();
        // Horizontal, snap, then blocking.
        assert_eq!(casts.len(), 3);
        assert!(casts.iter().all(|c| c.mask == mask));
    }

    #[test]
    fn snap_catches_nearby_ground() {
        let config = MovementConfig {
            snap_ground_check_threshold: 0.0,
            ..weightless()
        };
        let resolver = MovementResolver::new(config);
        let query = PlaneQuery {
            floor: Some(-0.05),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);
        let mut events = Vec::new();

        let report = resolver.resolve(
            &mut body,
            ResolveContext::new(DT).with_query(&query).with_publisher(&mut events),
        );

        assert!((body.position().y - (-0.05)).abs() < 0.001);
        assert!(body.is_grounded());
        assert!(report.grounded);
        assert_eq!(events, vec![MotionEvent::Idle, MotionEvent::Landed]);
        assert_eq!(body.gravity(), Vec2::ZERO);
    }

    #[test]
    fn fast_fall_lands_through_blocking_check() {
        let config = MovementConfig {
            snap_ground_check_threshold: -0.5,
            ..weightless()
        };
        let resolver = MovementResolver::new(config);
        let query = PlaneQuery {
            floor: Some(-0.2),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);
        let mut events = Vec::new();
        body.set_gravity(Vec2::new(0.0, -5.0));
        body.add_move(Vec2::new(0.0, -10.0));

        let report = resolver.resolve(
            &mut body,
            ResolveContext::new(DT).with_query(&query).with_publisher(&mut events),
        );

        assert!((body.position().y - (-0.2)).abs() < 0.001);
        assert!(body.is_grounded());
        assert_eq!(body.gravity(), Vec2::ZERO);
        assert_eq!(report.vertical, None);
        assert_eq!(events, vec![MotionEvent::Idle]);
        let casts = query.casts.borrow();
        assert_eq!(casts.len(), 1, "only the blocking cast should run");
    }

    #[test]
    fn snap_skipped_outside_band_even_with_ground_in_range() {
        let resolver = MovementResolver::new(weightless());
        let query = PlaneQuery {
            floor: Some(-0.05),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);
        let mut events = Vec::new();
        body.add_move(Vec2::new(0.0, -1.0));

        resolver.resolve(
            &mut body,
            ResolveContext::new(DT).with_query(&query).with_publisher(&mut events),
        );

        assert!(!events.contains(&MotionEvent::Landed));
        assert!((body.position().y - (-0.05)).abs() < 0.001);
        assert!(body.is_grounded());
    }

    #[test]
    fn snap_band_is_inclusive_of_threshold() {
        let resolver = MovementResolver::new(weightless());
        let query = PlaneQuery {
            floor: Some(-0.05),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);
        body.add_move(Vec2::new(0.0, -0.1));

        let report = resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));

        assert_eq!(report.vertical, Some(MotionEvent::Landed));
    }

    #[test]
    fn rising_body_is_not_snapped() {
        let resolver = MovementResolver::new(weightless());
        let query = PlaneQuery {
            floor: Some(-0.05),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);
        body.add_move(Vec2::new(0.0, 0.5));

        let report = resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));

        assert_eq!(report.vertical, None);
        assert!(!body.is_grounded());
        assert!((body.position().y - 0.5).abs() < 0.001);
    }

    #[test]
    fn airborne_body_falls() {
        let config = MovementConfig {
            gravity: Vec2::new(0.0, -30.0),
            ..weightless()
        };
        let resolver = MovementResolver::new(config);
        let mut body = body_at(0.0, 10.0);
        let mut events = Vec::new();

        let report = resolver.resolve(&mut body, ResolveContext::new(DT).with_publisher(&mut events));

        assert_eq!(events, vec![MotionEvent::Idle, MotionEvent::Fall]);
        assert!(!report.grounded);
        assert!((body.gravity().y - (-0.5)).abs() < 0.001);
        assert!((body.position().y - (10.0 - 0.5 / 60.0)).abs() < 0.0001);
    }

    #[test]
    fn gravity_compounds_across_frames() {
        let config = MovementConfig {
            gravity: Vec2::new(0.0, -30.0),
            ..weightless()
        };
        let resolver = MovementResolver::new(config);
        let mut body = body_at(0.0, 10.0);

        resolver.resolve(&mut body, ResolveContext::new(DT));
        resolver.resolve(&mut body, ResolveContext::new(DT));

        assert!((body.gravity().y - (-1.0)).abs() < 0.001);
        let expected = 10.0 - (0.5 + 1.0) / 60.0;
        assert!((body.position().y - expected).abs() < 0.0001);
    }

    #[test]
    fn ceiling_stops_ascent_at_box_top() {
        let resolver = MovementResolver::new(weightless());
        let query = PlaneQuery {
            ceiling: Some(2.5),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);
        body.set_gravity(Vec2::new(0.0, 3.0));
        body.add_move(Vec2::new(0.0, 1.0));

        let report = resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));

        assert!((body.position().y - 0.5).abs() < 0.001);
        assert_eq!(body.gravity(), Vec2::ZERO);
        assert!(!body.is_grounded());
        assert_eq!(report.vertical, None);
    }

    #[test]
    fn standing_body_stays_grounded_under_gravity() {
        let config = MovementConfig {
            gravity: Vec2::new(0.0, -30.0),
            ..weightless()
        };
        let resolver = MovementResolver::new(config);
        let query = PlaneQuery {
            floor: Some(0.0),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);

        for _ in 0..30 {
            let report = resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));
            assert_eq!(report.vertical, Some(MotionEvent::Landed));
        }

        assert!(body.position().y.abs() < 0.001);
        assert!(body.is_grounded());
        assert_eq!(body.gravity(), Vec2::ZERO);
    }

    #[test]
    fn leaving_ground_clears_grounded() {
        let resolver = MovementResolver::new(weightless());
        let query = PlaneQuery {
            floor: Some(0.0),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);
        resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));
        assert!(body.is_grounded());

        body.add_move(Vec2::new(0.0, 1.0));
        resolver.resolve(&mut body, ResolveContext::new(DT).with_query(&query));
        assert!(!body.is_grounded());
    }

    #[test]
    fn landed_and_fall_never_share_a_frame() {
        let config = MovementConfig {
            gravity: Vec2::new(0.0, -30.0),
            ..weightless()
        };
        let resolver = MovementResolver::new(config);
        let query = PlaneQuery {
            floor: Some(0.0),
            ..Default::default()
        };
        let mut body = body_at(0.0, 3.0);

        for frame in 0..240 {
            if frame % 40 == 0 {
                body.set_gravity(Vec2::new(0.0, 8.0));
            }
            body.add_move(Vec2::new(0.05, 0.0));
            let mut events = Vec::new();
            resolver.resolve(
                &mut body,
                ResolveContext::new(DT).with_query(&query).with_publisher(&mut events),
            );
            let landed = events.contains(&MotionEvent::Landed);
            let fell = events.contains(&MotionEvent::Fall);
            assert!(!(landed && fell), "frame {}: {:?}", frame, events);
            assert!(events[0].is_horizontal());
            assert!(events.len() <= 2);
        }
    }

    #[test]
    fn warp_then_idle_frame_stays_put() {
        let resolver = MovementResolver::new(weightless());
        let mut body = body_at(0.0, 0.0);
        body.add_move(Vec2::new(5.0, 5.0));
        body.set_gravity(Vec2::new(0.0, -4.0));

        body.warp(Vec2::new(12.0, -3.0));
        resolver.resolve(&mut body, ResolveContext::new(DT));

        assert_eq!(body.position(), Vec2::new(12.0, -3.0));
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(body.gravity(), Vec2::ZERO);
    }

    #[test]
    fn diagnostics_capture_hits_and_velocity() {
        let resolver = MovementResolver::new(weightless());
        let query = PlaneQuery {
            wall: Some((1.5, 0.5)),
            floor: Some(0.0),
            ..Default::default()
        };
        let mut body = body_at(0.0, 0.0);
        let mut diag = MotionDiagnostics::new();
        body.add_move(Vec2::new(2.0, 0.0));

        resolver.resolve(
            &mut body,
            ResolveContext::new(DT).with_query(&query).with_diagnostics(&mut diag),
        );

        assert_eq!(diag.last_horizontal_hit, Some(Vec2::new(1.5, 0.5)));
        assert!(diag.last_vertical_hit.is_some());
        assert_eq!(diag.last_velocity, Vec2::ZERO);
    }

    #[test]
    fn report_events_in_emission_order() {
        let report = FrameReport {
            horizontal: MotionEvent::Idle,
            vertical: Some(MotionEvent::Fall),
            grounded: false,
            position: Vec2::ZERO,
        };
        let events: Vec<_> = report.events().collect();
        assert_eq!(events, vec![MotionEvent::Idle, MotionEvent::Fall]);
    }
}
