//! Component storage
//!
//! One sparse table per capability, indexed by actor slot. Each actor
//! carries at most one component of a given kind, lookup is O(1), and holes
//! are cheap - for a world of a few dozen actors nothing denser is needed.
//!
//! Slots are addressed by index alone; the world clears an actor's slots
//! when it is removed, before the slot can be reused.

use super::actor::Actor;

pub struct ComponentStorage<T> {
    slots: Vec<Option<T>>,
}

impl<T> ComponentStorage<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Attach a component to an actor, replacing any existing one.
    pub fn insert(&mut self, actor: Actor, component: T) {
        let idx = actor.index() as usize;
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, || None);
        }
        self.slots[idx] = Some(component);
    }

    /// Detach and return an actor's component, if it had one.
    pub fn remove(&mut self, actor: Actor) -> Option<T> {
        self.slots
            .get_mut(actor.index() as usize)
            .and_then(|slot| slot.take())
    }

    pub fn get(&self, actor: Actor) -> Option<&T> {
        self.slots
            .get(actor.index() as usize)
            .and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, actor: Actor) -> Option<&mut T> {
        self.slots
            .get_mut(actor.index() as usize)
            .and_then(|slot| slot.as_mut())
    }

    pub fn contains(&self, actor: Actor) -> bool {
        self.get(actor).is_some()
    }

    /// Drop every component.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}
