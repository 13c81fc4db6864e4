//! Axis-aligned bounding boxes and overlap tests
//!
//! Entities that take part in collision carry a [`BoundingBox`] and expose
//! it through [`Collidable`]. Overlap is strict: boxes that only share an
//! edge do not collide, which is what lets the runner's unicorn stand on a
//! platform without touching it.

use crate::surface::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        BoundingBox {
            x,
            y,
            width,
            height,
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    /// True when the two boxes overlap on both axes.
    pub fn collide(&self, other: &BoundingBox) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// True when the boxes share some horizontal span, ignoring height.
    pub fn overlaps_horizontally(&self, other: &BoundingBox) -> bool {
        self.right > other.left && self.left < other.right
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Anything with a current bounding box.
pub trait Collidable {
    fn bounding_box(&self) -> BoundingBox;
}

impl<T: Collidable + ?Sized> Collidable for &T {
    fn bounding_box(&self) -> BoundingBox {
        (**self).bounding_box()
    }
}

/// Indices of every item in `others` that overlaps `entity`.
pub fn colliding_indices<T: Collidable>(entity: &impl Collidable, others: &[T]) -> Vec<usize> {
    let bounds = entity.bounding_box();
    others
        .iter()
        .enumerate()
        .filter(|(_, other)| bounds.collide(&other.bounding_box()))
        .map(|(index, _)| index)
        .collect()
}
