//! Axis-aligned rectangle primitives expressed in world units.

use glam::Vec2;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Horizontal coordinate of the top-left corner.
    pub x: f32,
    /// Vertical coordinate of the top-left corner.
    pub y: f32,
    /// Extent along the horizontal axis.
    pub width: f32,
    /// Extent along the vertical axis.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its corner and extents.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle anchored at `position` with the provided extents.
    #[must_use]
    pub const fn at(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Top-left corner of the rectangle.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height packed into a vector.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Returns a copy of the rectangle moved to `position`.
    #[must_use]
    pub const fn with_position(self, position: Vec2) -> Self {
        Self::new(position.x, position.y, self.width, self.height)
    }

    /// Geometric centre of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Reports whether two rectangles overlap.
    ///
    /// All four half-plane tests are strict, so rectangles that merely share
    /// an edge or a corner do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Builds a hit-box of `hit_size` horizontally centred under a sprite rectangle.
///
/// The box starts `y_offset` units below the sprite's vertical centre, which
/// keeps collisions anchored to the character's feet.
#[must_use]
pub fn foot_hit_box(sprite: &Rect, hit_size: Vec2, y_offset: f32) -> Rect {
    Rect::new(
        sprite.x + sprite.width / 2.0 - hit_size.x / 2.0,
        sprite.y + sprite.height / 2.0 + y_offset,
        hit_size.x,
        hit_size.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let left = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);

        assert!(!left.overlaps(&right));
        assert!(!right.overlaps(&left));
        assert!(!left.overlaps(&below));
    }

    #[test]
    fn partial_overlap_is_detected_symmetrically() {
        let first = Rect::new(0.0, 0.0, 10.0, 10.0);
        let second = Rect::new(9.5, 9.5, 4.0, 4.0);

        assert!(first.overlaps(&second));
        assert!(second.overlaps(&first));
    }

    #[test]
    fn foot_hit_box_is_centred_below_sprite_middle() {
        let sprite = Rect::new(600.0, 400.0, 32.0, 32.0);
        let hit_box = foot_hit_box(&sprite, Vec2::new(10.0, 10.0), 3.0);

        assert_eq!(hit_box, Rect::new(611.0, 419.0, 10.0, 10.0));
    }
}
