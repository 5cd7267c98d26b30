pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::types::{EntityId, LayerMask, MotionEvent, EventRecord};
pub use api::events::{MotionPublisher, MotionBroker, SubscriptionId};
pub use assets::config::{MovementConfig, ConfigError};
pub use components::body::{KinematicBody, VerticalState};
pub use components::entity::Actor;
pub use components::shape::CollisionShape;
pub use components::tilemap::{TileCollisionField, Tile};
pub use crate::core::query::{BoxCast, CastAxis, CastHit, CollisionQuery};
pub use crate::core::scene::Scene;
pub use crate::core::time::{FixedTimestep, FrameClock, FrameSteps};
pub use systems::debug::{CastSample, DiagnosticSink, MotionDiagnostics, DebugLine, DebugColor};
pub use systems::movement::{MovementResolver, ResolveContext, FrameReport};

#[cfg(feature = "physics")]
pub use crate::core::physics::{SceneColliders, SceneCollider, BoxColliderDesc};
