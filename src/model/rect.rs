//! Axis-aligned rectangle in integer millimetres.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the right edge X coordinate.
    pub fn x_max(&self) -> i64 {
        self.x + self.width
    }

    /// Get the top edge Y coordinate.
    pub fn y_max(&self) -> i64 {
        self.y + self.height
    }

    pub fn area(&self) -> i64 {
        self.width * self.height
    }

    /// Whether the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Strict interior intersection; rectangles sharing an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x_max()
            && other.x < self.x_max()
            && self.y < other.y_max()
            && other.y < self.y_max()
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x_max() <= self.x_max()
            && other.y_max() <= self.y_max()
    }

    /// Whether the point lies inside or on the border.
    pub fn contains_point(&self, px: i64, py: i64) -> bool {
        px >= self.x && px <= self.x_max() && py >= self.y && py <= self.y_max()
    }
}
