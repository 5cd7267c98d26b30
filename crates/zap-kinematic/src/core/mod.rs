// core/mod.rs
//
// Geometry queries and the scene. `physics` wraps Rapier and is only built
// with the "physics" feature; tile fields work without it.

pub mod query;
pub mod scene;
pub mod time;
#[cfg(feature = "physics")]
pub mod physics;
