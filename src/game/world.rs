//! Game world
//!
//! The world owns the live-actor collection and every component storage,
//! and drives one simulation tick at a time: movement, bounding refresh,
//! collision detection, then deferred removals. Drawing is a separate phase
//! that never interleaves with update.
//!
//! Only the world mutates the live-actor list. Everything else requests
//! changes through `spawn` and `despawn`, and removals land at end of tick
//! so no actor's update is skipped or doubled mid-iteration.

use macroquad::prelude::{draw_rectangle, Color, Vec2, GRAY, RED, SKYBLUE, YELLOW};

use crate::config::LevelConfig;
use crate::context::DeviceContext;

use super::actor::{Actor, ActorAllocator};
use super::collision;
use super::component::ComponentStorage;
use super::components::{ActorKind, Bounding, Position, Sprite, Velocity};
use super::event::{DespawnedEvent, Events, SpawnedEvent};
use super::geometry::{Aabb, BoxDims, GeometryError};

/// Where a world is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    /// Constructed but not yet populated
    Uninitialized,
    /// Simulating and drawing
    Enabled,
    /// Torn down; update and draw are no-ops
    Destroyed,
}

/// Error type for world operations
#[derive(Debug)]
pub enum WorldError {
    /// Spawn requested while the world is not running
    NotEnabled,
    /// Bad spawn parameters
    Geometry(GeometryError),
}

impl From<GeometryError> for WorldError {
    fn from(e: GeometryError) -> Self {
        WorldError::Geometry(e)
    }
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::NotEnabled => write!(f, "world is not enabled"),
            WorldError::Geometry(e) => write!(f, "spawn rejected: {}", e),
        }
    }
}

impl std::error::Error for WorldError {}

/// The world: one play session's actors and their components.
///
/// Constructed once in main and passed down by reference - there is no
/// global instance.
pub struct World {
    actors: ActorAllocator,

    /// Live actors in stable spawn order; update iterates this
    live: Vec<Actor>,

    /// Removal requests, applied at end of tick
    despawn_queue: Vec<Actor>,

    lifecycle: Lifecycle,

    /// The player's actor, if this level spawned one
    hero: Option<Actor>,

    pub positions: ComponentStorage<Position>,
    pub velocities: ComponentStorage<Velocity>,
    pub sprites: ComponentStorage<Sprite>,
    pub boundings: ComponentStorage<Bounding>,
    pub kinds: ComponentStorage<ActorKind>,

    /// What happened during the last tick; cleared at the next update
    pub events: Events,
}

impl World {
    pub fn new() -> Self {
        Self {
            actors: ActorAllocator::new(),
            live: Vec::new(),
            despawn_queue: Vec::new(),
            lifecycle: Lifecycle::Uninitialized,
            hero: None,
            positions: ComponentStorage::new(),
            velocities: ComponentStorage::new(),
            sprites: ComponentStorage::new(),
            boundings: ComponentStorage::new(),
            kinds: ComponentStorage::new(),
            events: Events::new(),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Populate the world from a level config and start simulating.
    ///
    /// Valid from any state: a finished level's world is re-initialized for
    /// the next one. All previous actors are released first.
    pub fn initialize(&mut self, level: &LevelConfig) -> Result<(), WorldError> {
        self.reset();
        self.lifecycle = Lifecycle::Enabled;
        for spawn in &level.spawns {
            self.spawn(
                spawn.kind,
                Vec2::new(spawn.position[0], spawn.position[1]),
                Vec2::new(spawn.size[0], spawn.size[1]),
            )?;
        }
        Ok(())
    }

    /// Release every actor and stop simulating. Idempotent; update and draw
    /// become no-ops afterwards.
    pub fn destroy(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        self.reset();
        self.lifecycle = Lifecycle::Destroyed;
    }

    fn reset(&mut self) {
        self.actors.clear();
        self.live.clear();
        self.despawn_queue.clear();
        self.hero = None;
        self.positions.clear();
        self.velocities.clear();
        self.sprites.clear();
        self.boundings.clear();
        self.kinds.clear();
        self.events.clear_all();
    }

    pub fn is_enabled(&self) -> bool {
        self.lifecycle == Lifecycle::Enabled
    }

    // =========================================================================
    // Actor management
    // =========================================================================

    /// Factory: create an actor of the given kind and wire up its component
    /// set. Heroes and enemies get velocity and a collision box; props are
    /// drawn but never collide.
    pub fn spawn(&mut self, kind: ActorKind, position: Vec2, size: Vec2) -> Result<Actor, WorldError> {
        if self.lifecycle != Lifecycle::Enabled {
            return Err(WorldError::NotEnabled);
        }
        let dims = BoxDims::new(size.x, size.y)?;

        let actor = self.actors.allocate();
        self.live.push(actor);
        self.kinds.insert(actor, kind);
        self.positions.insert(actor, Position(position));
        let sprite = Sprite {
            offset: Vec2::ZERO,
            size,
            tint: kind_tint(kind),
            layer: kind_layer(kind),
        };
        self.sprites.insert(actor, sprite);

        match kind {
            ActorKind::Hero | ActorKind::Enemy => {
                self.velocities.insert(actor, Velocity::default());
                self.boundings
                    .insert(actor, Bounding::new(dims, position, sprite.offset));
            }
            ActorKind::Prop => {}
        }

        if kind == ActorKind::Hero {
            self.hero = Some(actor);
        }
        self.events.spawned.send(SpawnedEvent {
            actor,
            kind,
            position,
        });
        Ok(actor)
    }

    /// Request removal. The actor stays live until end of tick; despawning
    /// a dead or already-queued actor is a no-op.
    pub fn despawn(&mut self, actor: Actor) {
        if self.actors.is_alive(actor) && !self.despawn_queue.contains(&actor) {
            self.despawn_queue.push(actor);
        }
    }

    fn flush_despawns(&mut self) {
        if self.despawn_queue.is_empty() {
            return;
        }
        let queue = std::mem::take(&mut self.despawn_queue);
        for actor in queue {
            self.remove_now(actor);
        }
    }

    fn remove_now(&mut self, actor: Actor) {
        if !self.actors.free(actor) {
            return; // already gone
        }
        self.live.retain(|&a| a != actor);
        self.positions.remove(actor);
        self.velocities.remove(actor);
        self.sprites.remove(actor);
        self.boundings.remove(actor);
        self.kinds.remove(actor);
        if self.hero == Some(actor) {
            self.hero = None;
        }
        self.events.despawned.send(DespawnedEvent { actor });
    }

    pub fn is_alive(&self, actor: Actor) -> bool {
        self.actors.is_alive(actor)
    }

    pub fn actor_count(&self) -> u32 {
        self.actors.alive_count()
    }

    pub fn hero(&self) -> Option<Actor> {
        self.hero
    }

    pub fn position_of(&self, actor: Actor) -> Option<Vec2> {
        self.positions.get(actor).map(|p| p.0)
    }

    /// Overwrite an actor's velocity. Actors without a velocity component
    /// (props) are unaffected.
    pub fn set_velocity(&mut self, actor: Actor, velocity: Vec2) {
        if let Some(v) = self.velocities.get_mut(actor) {
            v.0 = velocity;
        }
    }

    /// Actor-level collision query: false for self-collision, dead actors,
    /// and actors without a bounding component.
    pub fn collides(&self, a: Actor, b: Actor) -> bool {
        if !self.actors.is_alive(a) || !self.actors.is_alive(b) {
            return false;
        }
        collision::actors_collide(a, b, &self.boundings)
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// Run one tick. No-op unless the world is enabled and the context is
    /// not paused; otherwise every live actor is updated exactly once, in
    /// spawn order.
    pub fn update(&mut self, ctx: &DeviceContext, dt: f32) {
        if self.lifecycle != Lifecycle::Enabled || ctx.paused {
            return;
        }

        // Whatever the last tick reported is stale by now
        self.events.clear_all();

        // === Movement: integrate velocities ===
        for &actor in &self.live {
            let velocity = match self.velocities.get(actor) {
                Some(v) => v.0,
                None => continue,
            };
            if let Some(position) = self.positions.get_mut(actor) {
                position.0 += velocity * dt;
            }
        }

        // === Bounding refresh: boxes derive from the positions set above ===
        collision::refresh_boxes(&self.live, &self.positions, &self.sprites, &mut self.boundings);

        // === Collision detection: contacts become events, no response here ===
        collision::detect_contacts(&self.live, &self.boundings, &mut self.events.collision);

        // === Deferred removals ===
        self.flush_despawns();
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Draw every live actor back-to-front. No-op unless enabled. With the
    /// context's debug overlay on, bounding boxes are outlined on top.
    pub fn draw(&self, ctx: &DeviceContext) {
        if self.lifecycle != Lifecycle::Enabled {
            return;
        }

        // Stable sort, so spawn order breaks layer ties
        let mut order: Vec<Actor> = self
            .live
            .iter()
            .copied()
            .filter(|&a| self.sprites.contains(a))
            .collect();
        order.sort_by_key(|&a| self.sprites.get(a).map(|s| s.layer).unwrap_or(0));

        for actor in order {
            let sprite = match self.sprites.get(actor) {
                Some(s) => s,
                None => continue,
            };
            let anchor = self.positions.get(actor).map(|p| p.0).unwrap_or(Vec2::ZERO);
            let corner = anchor + sprite.offset - Vec2::new(sprite.size.x * 0.5, sprite.size.y);
            draw_rectangle(corner.x, corner.y, sprite.size.x, sprite.size.y, sprite.tint);
        }

        if ctx.debug_overlay {
            for &actor in &self.live {
                if let Some(bounding) = self.boundings.get(actor) {
                    draw_box_outline(bounding.aabb());
                }
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_tint(kind: ActorKind) -> Color {
    match kind {
        ActorKind::Hero => SKYBLUE,
        ActorKind::Enemy => RED,
        ActorKind::Prop => GRAY,
    }
}

fn kind_layer(kind: ActorKind) -> i32 {
    match kind {
        ActorKind::Prop => 0,
        ActorKind::Enemy => 1,
        ActorKind::Hero => 2,
    }
}

/// Four 1-pixel edges: top, right, bottom, left.
fn draw_box_outline(aabb: &Aabb) {
    let w = aabb.max.x - aabb.min.x;
    let h = aabb.max.y - aabb.min.y;
    draw_rectangle(aabb.min.x, aabb.min.y, w, 1.0, YELLOW);
    draw_rectangle(aabb.max.x, aabb.min.y, 1.0, h, YELLOW);
    draw_rectangle(aabb.min.x, aabb.max.y, w, 1.0, YELLOW);
    draw_rectangle(aabb.min.x, aabb.min.y, 1.0, h, YELLOW);
}
