use crate::api::types::EntityId;
use crate::components::entity::Actor;
use crate::core::query::CollisionQuery;
use crate::systems::movement::{MovementResolver, ResolveContext};

/// Simple actor storage using a flat Vec.
/// Designed for small-to-medium actor counts (hundreds, not millions).
#[derive(Debug)]
pub struct Scene {
    actors: Vec<Actor>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            actors: Vec::with_capacity(64),
        }
    }

    /// Create a scene with a specific actor capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            actors: Vec::with_capacity(capacity),
        }
    }

    pub fn spawn(&mut self, actor: Actor) {
        log::debug!("spawn actor {:?} '{}'", actor.id, actor.tag);
        self.actors.push(actor);
    }

    /// Remove an actor by ID. Returns the removed actor if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Actor> {
        let idx = self.actors.iter().position(|a| a.id == id)?;
        log::debug!("despawn actor {:?}", id);
        Some(self.actors.swap_remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    /// Find the first actor with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.tag == tag)
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn clear(&mut self) {
        self.actors.clear();
    }

    /// Run one resolution pass for every active actor, publishing into each
    /// actor's own broker. Returns how many actors were resolved.
    pub fn resolve_all(
        &mut self,
        resolver: &MovementResolver,
        query: Option<&dyn CollisionQuery>,
        dt: f32,
    ) -> usize {
        let mut resolved = 0;
        for actor in self.actors.iter_mut().filter(|a| a.active) {
            let mut ctx = ResolveContext::new(dt).with_publisher(&mut actor.events);
            if let Some(query) = query {
                ctx = ctx.with_query(query);
            }
            resolver.resolve(&mut actor.body, ctx);
            resolved += 1;
        }
        resolved
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
