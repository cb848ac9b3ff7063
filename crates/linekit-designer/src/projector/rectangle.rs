use linekit_core::constants::MIN_SHAPE_SIZE;

use super::polygon::{render_edges, Edge};
use super::{Bounds, DrawCommand, Walker};
use crate::model::{Pattern, Point};

/// Rectangle with its top-left corner at the origin, walked clockwise
/// from that corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleHost {
    pub pattern_length: f64,
    pub width: f64,
    pub height: f64,
}

impl RectangleHost {
    /// Three repetitions plus a closing element across, two down.
    pub fn for_pattern(pattern: &Pattern) -> Self {
        let pattern_length = pattern.pattern_length();
        let first = pattern.first_element_length();
        Self {
            pattern_length,
            width: (3.0 * pattern_length + first).max(MIN_SHAPE_SIZE),
            height: (2.0 * pattern_length + first).max(MIN_SHAPE_SIZE),
        }
    }

    /// Top, right, bottom, left.
    pub fn edges(&self) -> [Edge; 4] {
        let top_left = Point::new(0.0, 0.0);
        let top_right = Point::new(self.width, 0.0);
        let bottom_right = Point::new(self.width, self.height);
        let bottom_left = Point::new(0.0, self.height);
        [
            Edge::new(top_left, top_right),
            Edge::new(top_right, bottom_right),
            Edge::new(bottom_right, bottom_left),
            Edge::new(bottom_left, top_left),
        ]
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }

    pub(crate) fn render(&self, walker: Walker<'_>) -> Vec<DrawCommand> {
        render_edges(&self.edges(), walker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::ApproximateMeasurer;
    use crate::model::PatternElement;
    use crate::projector::RenderOptions;

    #[test]
    fn test_dimensions() {
        let host = RectangleHost::for_pattern(&Pattern::default());
        // L = 2, first dash = 1
        assert!((host.width - 7.0).abs() < 1e-12);
        assert!((host.height - 5.0).abs() < 1e-12);
        assert_eq!(host.bounds(), Bounds::new(0.0, 0.0, 7.0, 5.0));
    }

    #[test]
    fn test_minimum_size() {
        let pattern =
            Pattern::from_elements([PatternElement::dash(0.05), PatternElement::gap(0.05)])
                .unwrap();
        let host = RectangleHost::for_pattern(&pattern);
        assert_eq!(host.width, 0.8);
        assert_eq!(host.height, 0.8);
    }

    #[test]
    fn test_edges_close_clockwise() {
        let host = RectangleHost::for_pattern(&Pattern::default());
        let edges = host.edges();
        for (i, edge) in edges.iter().enumerate() {
            assert_eq!(edge.end, edges[(i + 1) % 4].start);
        }
        assert_eq!(edges[1].direction(), (0.0, 1.0));
    }

    #[test]
    fn test_every_stroke_stays_on_an_edge() {
        let pattern =
            Pattern::from_elements([PatternElement::dash(0.75), PatternElement::gap(0.3)])
                .unwrap();
        let host = RectangleHost::for_pattern(&pattern);
        let walker = Walker::new(&pattern, &ApproximateMeasurer, RenderOptions::default());
        let commands = host.render(walker);
        assert!(!commands.is_empty());
        for command in commands {
            if let DrawCommand::Stroke { from, to } = command {
                for p in [from, to] {
                    assert!(p.x >= -1e-9 && p.x <= host.width + 1e-9);
                    assert!(p.y >= -1e-9 && p.y <= host.height + 1e-9);
                }
            }
        }
    }
}
