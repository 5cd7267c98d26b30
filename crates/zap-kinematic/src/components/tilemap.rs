//! Tile collision field: solid grid geometry for box casts.
//!
//! Tiles are axis-aligned squares on a regular grid. A cast only inspects
//! the tiles under its swept bounds, so large levels cost nothing beyond
//! the neighbourhood of the moving body.

use std::ops::Range;

use glam::Vec2;

use crate::api::types::LayerMask;
use crate::core::query::{BoxCast, CastHit, CollisionQuery, NearestContact};

/// A single solid tile.
/// None in the grid represents empty space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Layers this tile belongs to.
    pub layer: LayerMask,
}

impl Tile {
    pub fn new(layer: LayerMask) -> Self {
        Self { layer }
    }

    /// A tile on every layer.
    pub fn solid() -> Self {
        Self { layer: LayerMask::ALL }
    }
}

/// Grid of solid tiles answering [`CollisionQuery`] casts.
///
/// Tiles are stored in row-major order: index = y * width + x, with row 0 at
/// the bottom.
#[derive(Debug, Clone)]
pub struct TileCollisionField {
    /// Width of the field in tiles.
    pub width: u32,
    /// Height of the field in tiles.
    pub height: u32,
    /// Size of each tile in world units.
    pub tile_size: f32,
    /// Position of the field's bottom-left corner in world space.
    pub origin: Vec2,
    tiles: Vec<Option<Tile>>,
}

impl TileCollisionField {
    /// Create a new empty field.
    pub fn new(width: u32, height: u32, tile_size: f32) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            tile_size,
            origin: Vec2::ZERO,
            tiles: vec![None; count],
        }
    }

    /// Set the world-space origin (bottom-left corner).
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles[self.index(x, y)].as_ref()
    }

    /// Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, tile: Option<Tile>) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.tiles[idx] = tile;
        }
    }

    /// Fill a rectangular region, clipped to the field.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, tile: Option<Tile>) {
        for ty in y..y.saturating_add(h).min(self.height) {
            for tx in x..x.saturating_add(w).min(self.width) {
                self.set(tx, ty, tile);
            }
        }
    }

    pub fn clear(&mut self) {
        self.tiles.fill(None);
    }

    /// World-space bounds of the whole field.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let min = self.origin;
        let max = self.origin
            + Vec2::new(
                self.width as f32 * self.tile_size,
                self.height as f32 * self.tile_size,
            );
        (min, max)
    }

    /// World-space bounds of the tile at (x, y).
    pub fn tile_bounds(&self, x: u32, y: u32) -> (Vec2, Vec2) {
        let min = self.origin + Vec2::new(x as f32, y as f32) * self.tile_size;
        (min, min + Vec2::splat(self.tile_size))
    }

    /// Convert world position to tile grid coordinates.
    pub fn world_to_tile(&self, world_pos: Vec2) -> Option<(u32, u32)> {
        let local = world_pos - self.origin;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let tx = (local.x / self.tile_size) as u32;
        let ty = (local.y / self.tile_size) as u32;
        if tx >= self.width || ty >= self.height {
            return None;
        }
        Some((tx, ty))
    }

    /// Convert tile grid coordinates to world position (center of tile).
    pub fn tile_to_world(&self, x: u32, y: u32) -> Vec2 {
        let half = self.tile_size / 2.0;
        self.origin
            + Vec2::new(
                x as f32 * self.tile_size + half,
                y as f32 * self.tile_size + half,
            )
    }

    /// Count of solid tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    /// Total capacity in tiles.
    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Tile indices along one axis covering the world span `lo..=hi`.
    /// Inclusive of tiles whose edge touches `hi`.
    fn span(&self, lo: f32, hi: f32, count: u32) -> Range<u32> {
        let start = (lo / self.tile_size).floor();
        let end = (hi / self.tile_size).floor() + 1.0;
        let clamp = |v: f32| v.max(0.0).min(count as f32) as u32;
        clamp(start)..clamp(end)
    }
}

impl CollisionQuery for TileCollisionField {
    fn cast(&self, cast: &BoxCast) -> Option<CastHit> {
        if self.tile_size <= 0.0 {
            return None;
        }

        let (min, max) = cast.swept_bounds();
        let local_min = min - self.origin;
        let local_max = max - self.origin;
        let xs = self.span(local_min.x, local_max.x, self.width);
        let ys = self.span(local_min.y, local_max.y, self.height);

        let mut nearest = NearestContact::new(cast);
        for ty in ys {
            for tx in xs.clone() {
                let Some(tile) = self.get(tx, ty) else {
                    continue;
                };
                if !tile.layer.intersects(cast.mask) {
                    continue;
                }
                let (tile_min, tile_max) = self.tile_bounds(tx, ty);
                nearest.offer(cast, tile_min, tile_max, tile.layer, None);
            }
        }
        nearest.finish()
    }
}
