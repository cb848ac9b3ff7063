use linekit_core::constants::MIN_SHAPE_SIZE;

use super::polygon::{render_edges, Edge};
use super::{Bounds, DrawCommand, Walker};
use crate::model::{Pattern, Point};

/// Equilateral triangle with its base along Y = 0 and apex below it
/// on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHost {
    pub pattern_length: f64,
    pub base: f64,
    pub height: f64,
}

impl TriangleHost {
    pub fn for_pattern(pattern: &Pattern) -> Self {
        let pattern_length = pattern.pattern_length();
        let base = (2.0 * pattern_length + pattern.first_element_length()).max(MIN_SHAPE_SIZE);
        Self {
            pattern_length,
            base,
            height: base * 3f64.sqrt() / 2.0,
        }
    }

    pub fn vertices(&self) -> [Point; 3] {
        [
            Point::new(0.0, 0.0),
            Point::new(self.base, 0.0),
            Point::new(self.base / 2.0, self.height),
        ]
    }

    /// Base, right side, left side.
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices();
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.base, self.height)
    }

    pub(crate) fn render(&self, walker: Walker<'_>) -> Vec<DrawCommand> {
        render_edges(&self.edges(), walker)
    }
}
