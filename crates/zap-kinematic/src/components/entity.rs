use crate::api::events::MotionBroker;
use crate::api::types::EntityId;
use crate::components::body::KinematicBody;

/// A moving character: a kinematic body plus the broker its motion events go to.
/// Fat struct over ECS purity, same as the rest of the scene.
#[derive(Debug)]
pub struct Actor {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding actors by name.
    pub tag: String,
    /// Inactive actors are skipped by the scene resolver.
    pub active: bool,
    pub body: KinematicBody,
    /// Receives this actor's motion events.
    pub events: MotionBroker,
}

impl Actor {
    pub fn new(id: EntityId, body: KinematicBody) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            body,
            events: MotionBroker::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}
