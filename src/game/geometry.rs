//! Collision geometry
//!
//! Axis-aligned boxes for coarse collision testing. A box is derived every
//! tick from its owner's current anchor position, so boxes are never stored
//! on their own or persisted.
//!
//! Anchor convention: actors stand on their anchor point. The box hangs
//! horizontal-center, vertical-bottom off the anchor (screen Y grows
//! downward), so an actor at (40, 50) with a 60x150 box occupies
//! [(10, -100), (70, 50)].

use macroquad::prelude::Vec2;

/// Error type for box construction
#[derive(Debug)]
pub enum GeometryError {
    InvalidDimensions { width: f32, height: f32 },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::InvalidDimensions { width, height } => write!(
                f,
                "box dimensions must be positive and finite, got {}x{}",
                width, height
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Fixed width/height of a collision box.
///
/// Validated at construction: a non-positive or non-finite dimension is a
/// content bug and fails immediately rather than producing an inverted box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxDims {
    width: f32,
    height: f32,
}

impl BoxDims {
    pub fn new(width: f32, height: f32) -> Result<Self, GeometryError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(GeometryError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Axis-aligned bounding box in world space.
///
/// Invariant: min <= max componentwise. Holds by construction since
/// `from_anchor` only accepts validated dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Derive the box for an actor standing at `anchor`, shifted by the
    /// sprite offset. Pure function of the current frame state.
    pub fn from_anchor(anchor: Vec2, offset: Vec2, dims: BoxDims) -> Self {
        let base = anchor + offset;
        let min = Vec2::new(base.x - dims.width() * 0.5, base.y - dims.height());
        Self {
            min,
            max: Vec2::new(min.x + dims.width(), min.y + dims.height()),
        }
    }

    /// Check if a point is inside the box. Edges count.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &Aabb) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Overlap test, inclusive: boxes sharing only an edge still intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Collision test: containment in either direction, partial overlap, or
    /// edge contact all count as colliding.
    pub fn collides(&self, other: &Aabb) -> bool {
        self.contains_box(other) || other.contains_box(self) || self.intersects(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(w: f32, h: f32) -> BoxDims {
        BoxDims::new(w, h).unwrap()
    }

    #[test]
    fn test_box_derivation_from_anchor() {
        // Actor at (40, 50) with a 60x150 box
        let aabb = Aabb::from_anchor(Vec2::new(40.0, 50.0), Vec2::ZERO, dims(60.0, 150.0));

        assert_eq!(aabb.min, Vec2::new(10.0, -100.0));
        assert_eq!(aabb.max, Vec2::new(70.0, 50.0));
    }

    #[test]
    fn test_box_derivation_general() {
        let anchor = Vec2::new(-3.5, 12.0);
        let d = dims(8.0, 20.0);
        let aabb = Aabb::from_anchor(anchor, Vec2::ZERO, d);

        assert_eq!(aabb.min.x, anchor.x - d.width() * 0.5);
        assert_eq!(aabb.min.y, anchor.y - d.height());
        assert_eq!(aabb.max, aabb.min + Vec2::new(d.width(), d.height()));
    }

    #[test]
    fn test_sprite_offset_shifts_box() {
        let plain = Aabb::from_anchor(Vec2::new(0.0, 0.0), Vec2::ZERO, dims(10.0, 10.0));
        let shifted = Aabb::from_anchor(Vec2::new(0.0, 0.0), Vec2::new(5.0, -2.0), dims(10.0, 10.0));

        assert_eq!(shifted.min, plain.min + Vec2::new(5.0, -2.0));
        assert_eq!(shifted.max, plain.max + Vec2::new(5.0, -2.0));
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert!(BoxDims::new(0.0, 10.0).is_err());
        assert!(BoxDims::new(10.0, -1.0).is_err());
        assert!(BoxDims::new(f32::NAN, 10.0).is_err());
        assert!(BoxDims::new(10.0, f32::INFINITY).is_err());
        assert!(BoxDims::new(60.0, 150.0).is_ok());
    }

    #[test]
    fn test_contains_is_edge_inclusive() {
        let aabb = Aabb::from_anchor(Vec2::new(0.0, 10.0), Vec2::ZERO, dims(10.0, 10.0));

        assert!(aabb.contains(Vec2::new(0.0, 5.0)));
        assert!(aabb.contains(aabb.min));
        assert!(aabb.contains(aabb.max));
        assert!(!aabb.contains(Vec2::new(5.1, 5.0)));
        assert!(!aabb.contains(Vec2::new(0.0, 10.1)));
    }

    #[test]
    fn test_collides_on_overlap() {
        let a = Aabb::from_anchor(Vec2::new(0.0, 0.0), Vec2::ZERO, dims(10.0, 10.0));
        let b = Aabb::from_anchor(Vec2::new(6.0, 0.0), Vec2::ZERO, dims(10.0, 10.0));

        assert!(a.collides(&b));
        assert!(b.collides(&a));
    }

    #[test]
    fn test_collides_symmetry_when_separate() {
        let a = Aabb::from_anchor(Vec2::new(0.0, 0.0), Vec2::ZERO, dims(10.0, 10.0));
        let b = Aabb::from_anchor(Vec2::new(100.0, 0.0), Vec2::ZERO, dims(10.0, 10.0));

        assert!(!a.collides(&b));
        assert!(!b.collides(&a));
    }

    #[test]
    fn test_edge_touching_counts_as_collision() {
        let a = Aabb::from_anchor(Vec2::new(0.0, 0.0), Vec2::ZERO, dims(10.0, 10.0));
        // Right edge of a is at x = 5; left edge of b is at x = 5
        let b = Aabb::from_anchor(Vec2::new(10.0, 0.0), Vec2::ZERO, dims(10.0, 10.0));

        assert!(a.collides(&b));
        assert!(b.collides(&a));
    }

    #[test]
    fn test_containment_counts_as_collision() {
        let outer = Aabb::from_anchor(Vec2::new(0.0, 0.0), Vec2::ZERO, dims(100.0, 100.0));
        let inner = Aabb::from_anchor(Vec2::new(0.0, -40.0), Vec2::ZERO, dims(10.0, 10.0));

        assert!(outer.contains_box(&inner));
        assert!(!inner.contains_box(&outer));
        assert!(outer.collides(&inner));
        assert!(inner.collides(&outer));
    }
}
