//! Axis-aligned multi-rectangle collision volumes
//!
//! A hitbox is a fixed list of rectangles stored as offsets from an anchor
//! (the owning entity's top-left corner). Moving the owner only moves the
//! anchor; the rectangle list never changes length after construction.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(w, h),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.min + self.size * 0.5
    }

    /// Edges are inclusive so a point lying exactly on a border counts
    pub fn contains_point(&self, point: DVec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
    }

    /// Strict overlap: rectangles that merely share an edge do not touch
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }

    pub fn translated(&self, by: DVec2) -> Rect {
        Rect {
            min: self.min + by,
            size: self.size,
        }
    }
}

/// A set of offset rectangles anchored to an entity position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    anchor: DVec2,
    rects: Box<[Rect]>,
}

impl Hitbox {
    pub fn new(anchor: DVec2, rects: impl Into<Box<[Rect]>>) -> Self {
        Self {
            anchor,
            rects: rects.into(),
        }
    }

    #[inline]
    pub fn anchor(&self) -> DVec2 {
        self.anchor
    }

    /// Move the anchor; all rectangles follow rigidly
    #[inline]
    pub fn move_to(&mut self, anchor: DVec2) {
        self.anchor = anchor;
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Rectangles in playfield coordinates
    pub fn world_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.rects.iter().map(move |r| r.translated(self.anchor))
    }

    /// Any rectangle of `self` against any rectangle of `other`
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.world_rects()
            .any(|a| other.world_rects().any(|b| a.overlaps(&b)))
    }

    /// Index of the first rectangle containing `point`
    pub fn hit_rect(&self, point: DVec2) -> Option<usize> {
        self.world_rects().position(|r| r.contains_point(point))
    }

    pub fn contains_point(&self, point: DVec2) -> bool {
        self.hit_rect(point).is_some()
    }
}
