//! Actor components
//!
//! Plain data attached to actors. Behavior lives in the world's tick, which
//! updates each capability in a fixed order: position before bounding, since
//! the collision box derives from the position.

use macroquad::prelude::{Color, Vec2};
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, BoxDims};

/// World-space anchor of an actor. Characters stand on this point.
#[derive(Debug, Clone, Copy, Default)]
pub struct Position(pub Vec2);

/// Velocity in world units per second.
#[derive(Debug, Clone, Copy, Default)]
pub struct Velocity(pub Vec2);

/// Drawable quad for an actor.
///
/// `offset` shifts both the drawn quad and the collision box relative to
/// the anchor. The quad uses the same bottom-center anchoring as boxes.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub offset: Vec2,
    pub size: Vec2,
    pub tint: Color,
    /// Draw order: lower layers are drawn first (further back)
    pub layer: i32,
}

/// Collision component: fixed box dimensions plus the box derived each tick
/// from the owner's current position.
#[derive(Debug, Clone, Copy)]
pub struct Bounding {
    dims: BoxDims,
    aabb: Aabb,
}

impl Bounding {
    /// Create with the box already computed for the spawn state, so it is
    /// valid before the first tick runs.
    pub fn new(dims: BoxDims, anchor: Vec2, sprite_offset: Vec2) -> Self {
        Self {
            dims,
            aabb: Aabb::from_anchor(anchor, sprite_offset, dims),
        }
    }

    /// Recompute the box from the owner's current frame state. Must run
    /// after the owner's position has been updated for the tick.
    pub fn refresh(&mut self, anchor: Vec2, sprite_offset: Vec2) {
        self.aabb = Aabb::from_anchor(anchor, sprite_offset, self.dims);
    }

    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }
}

/// What an actor is. Decides which components the factory wires up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    /// The player-controlled actor
    Hero,
    /// Hostile actor
    Enemy,
    /// Scenery; drawn but never collides
    Prop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_valid_at_construction() {
        let dims = BoxDims::new(60.0, 150.0).unwrap();
        let bounding = Bounding::new(dims, Vec2::new(40.0, 50.0), Vec2::ZERO);

        assert_eq!(bounding.aabb().min, Vec2::new(10.0, -100.0));
        assert_eq!(bounding.aabb().max, Vec2::new(70.0, 50.0));
    }

    #[test]
    fn test_refresh_tracks_anchor() {
        let dims = BoxDims::new(10.0, 20.0).unwrap();
        let mut bounding = Bounding::new(dims, Vec2::ZERO, Vec2::ZERO);

        bounding.refresh(Vec2::new(100.0, 30.0), Vec2::ZERO);
        assert_eq!(bounding.aabb().min, Vec2::new(95.0, 10.0));
        assert_eq!(bounding.aabb().max, Vec2::new(105.0, 30.0));
    }
}
