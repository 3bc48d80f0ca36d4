//! Runtime events
//!
//! The world reports what happened during a tick through these queues
//! instead of calling back into game code mid-iteration. Queues are cleared
//! at the start of the next update, so consumers read them between ticks.

use macroquad::prelude::Vec2;

use super::actor::Actor;
use super::components::ActorKind;

/// A queue for events of a single type, filled during a tick.
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// All queues the world can fill during a tick.
pub struct Events {
    /// Two actors' boxes are in contact. What a contact means - damage,
    /// knockback, pickup - is decided by whoever reads this queue; the
    /// runtime itself applies no response.
    pub collision: EventQueue<CollisionEvent>,

    /// An actor entered the world
    pub spawned: EventQueue<SpawnedEvent>,

    /// An actor was removed at end of tick
    pub despawned: EventQueue<DespawnedEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self {
            collision: EventQueue::new(),
            spawned: EventQueue::new(),
            despawned: EventQueue::new(),
        }
    }

    /// Clear every queue. Runs at the start of each update.
    pub fn clear_all(&mut self) {
        self.collision.clear();
        self.spawned.clear();
        self.despawned.clear();
    }
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

/// Two actors' bounding boxes touched, overlapped, or contained each other.
/// Reported once per unordered pair per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub first: Actor,
    pub second: Actor,
}

#[derive(Debug, Clone, Copy)]
pub struct SpawnedEvent {
    pub actor: Actor,
    pub kind: ActorKind,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy)]
pub struct DespawnedEvent {
    pub actor: Actor,
}
