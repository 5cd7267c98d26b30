//! Debug diagnostics: an opt-in record of what the resolver saw last frame.
//!
//! Pass a sink to the resolver to capture cast hits and the applied
//! velocity, then turn them into polylines with [`MotionDiagnostics::debug_lines`]
//! for whatever debug overlay the game draws.

use glam::Vec2;

use crate::components::body::KinematicBody;
use crate::core::query::CastAxis;

/// A blocking contact the resolver acted on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastSample {
    pub axis: CastAxis,
    pub point: Vec2,
}

/// Receives diagnostics from a resolution pass. Never affects movement.
pub trait DiagnosticSink {
    fn record(&mut self, sample: CastSample);
    fn record_velocity(&mut self, velocity: Vec2);
}

/// Colour tag for a debug line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugColor {
    Red,
    Green,
    Blue,
    White,
}

/// A polyline in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugLine {
    pub points: Vec<[f32; 2]>,
    pub color: DebugColor,
}

/// Last-known values from the most recent pass that recorded them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionDiagnostics {
    pub last_velocity: Vec2,
    pub last_horizontal_hit: Option<Vec2>,
    pub last_vertical_hit: Option<Vec2>,
}

impl MotionDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build debug lines for `body`: collider outline (white), last applied
    /// velocity from the pre-move position (red), horizontal hit (green) and
    /// vertical hit (blue) as small crosses.
    pub fn debug_lines(&self, body: &KinematicBody, marker_size: f32) -> Vec<DebugLine> {
        let mut lines = Vec::with_capacity(4);

        let (min, max) = body.shape().bounds(body.position());
        lines.push(DebugLine {
            points: box_outline(min, max),
            color: DebugColor::White,
        });

        if self.last_velocity != Vec2::ZERO {
            let to = body.position();
            let from = to - self.last_velocity;
            lines.push(DebugLine {
                points: vec![[from.x, from.y], [to.x, to.y]],
                color: DebugColor::Red,
            });
        }

        if let Some(p) = self.last_horizontal_hit {
            lines.push(DebugLine {
                points: cross(p, marker_size),
                color: DebugColor::Green,
            });
        }
        if let Some(p) = self.last_vertical_hit {
            lines.push(DebugLine {
                points: cross(p, marker_size),
                color: DebugColor::Blue,
            });
        }

        lines
    }
}

impl DiagnosticSink for MotionDiagnostics {
    fn record(&mut self, sample: CastSample) {
        match sample.axis {
            CastAxis::Horizontal => self.last_horizontal_hit = Some(sample.point),
            CastAxis::Vertical => self.last_vertical_hit = Some(sample.point),
        }
    }

    fn record_velocity(&mut self, velocity: Vec2) {
        self.last_velocity = velocity;
    }
}

/// Closed rectangle outline (4 corners + close).
fn box_outline(min: Vec2, max: Vec2) -> Vec<[f32; 2]> {
    let mut points = Vec::with_capacity(5);
    points.push([min.x, min.y]);
    points.push([max.x, min.y]);
    points.push([max.x, max.y]);
    points.push([min.x, max.y]);
    points.push(points[0]);
    points
}

/// An X marker drawn as one polyline through the centre.
fn cross(p: Vec2, size: f32) -> Vec<[f32; 2]> {
    let h = size * 0.5;
    vec![
        [p.x - h, p.y - h],
        [p.x + h, p.y + h],
        [p.x, p.y],
        [p.x - h, p.y + h],
        [p.x + h, p.y - h],
    ]
}
