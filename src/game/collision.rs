//! Collision pass
//!
//! Two phases run inside the world tick, in order: refresh every bounding
//! box from its owner's freshly-integrated position, then test each
//! unordered actor pair once and report contacts as events.
//!
//! A contact is containment in either direction, partial overlap, or edge
//! touching. Actors without a bounding component never collide, and an
//! actor never collides with itself - both are handled here, above the
//! geometry level.

use macroquad::prelude::Vec2;

use super::actor::Actor;
use super::component::ComponentStorage;
use super::components::{Bounding, Position, Sprite};
use super::event::{CollisionEvent, EventQueue};

/// Recompute every live actor's box from its current anchor and sprite
/// offset. Runs after movement so boxes never lag a tick behind.
pub fn refresh_boxes(
    live: &[Actor],
    positions: &ComponentStorage<Position>,
    sprites: &ComponentStorage<Sprite>,
    boundings: &mut ComponentStorage<Bounding>,
) {
    for &actor in live {
        let anchor = positions.get(actor).map(|p| p.0).unwrap_or(Vec2::ZERO);
        let offset = sprites.get(actor).map(|s| s.offset).unwrap_or(Vec2::ZERO);
        if let Some(bounding) = boundings.get_mut(actor) {
            bounding.refresh(anchor, offset);
        }
    }
}

/// Test every unordered pair of live actors once, sending one event per
/// contact. Iteration follows spawn order, so event order is stable.
pub fn detect_contacts(
    live: &[Actor],
    boundings: &ComponentStorage<Bounding>,
    out: &mut EventQueue<CollisionEvent>,
) {
    for (i, &first) in live.iter().enumerate() {
        let a = match boundings.get(first) {
            Some(b) => b,
            None => continue,
        };
        for &second in &live[i + 1..] {
            let b = match boundings.get(second) {
                Some(b) => b,
                None => continue,
            };
            if a.aabb().collides(b.aabb()) {
                out.send(CollisionEvent { first, second });
            }
        }
    }
}

/// Actor-level collision query: false for self-collision and for a missing
/// bounding component on either side, regardless of geometry.
pub fn actors_collide(a: Actor, b: Actor, boundings: &ComponentStorage<Bounding>) -> bool {
    if a == b {
        return false;
    }
    match (boundings.get(a), boundings.get(b)) {
        (Some(box_a), Some(box_b)) => box_a.aabb().collides(box_b.aabb()),
        _ => false,
    }
}
