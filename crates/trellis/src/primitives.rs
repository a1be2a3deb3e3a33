use crate::layout::{Position, Spacing};

/// Axis-aligned rectangle defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Rect {
    pub const fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: [f32; 2], size: [f32; 2]) -> Self {
        Self {
            min,
            max: [min[0] + size[0], min[1] + size[1]],
        }
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    pub fn origin(&self) -> Position {
        Position::new(self.min[0], self.min[1])
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.min[0]
            && point.x <= self.max[0]
            && point.y >= self.min[1]
            && point.y <= self.max[1]
    }

    /// Shrink the rectangle by `spacing` on each side
    pub fn inset(&self, spacing: Spacing) -> Rect {
        Rect {
            min: [self.min[0] + spacing.left, self.min[1] + spacing.top],
            max: [self.max[0] - spacing.right, self.max[1] - spacing.bottom],
        }
    }
}
