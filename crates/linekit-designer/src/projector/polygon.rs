use linekit_core::constants::MAX_REPETITIONS;

use super::{DrawCommand, Frame, Guide, HostPath, Walker, FIT_EPSILON};
use crate::model::Point;

/// One straight side of a polygon host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Unit direction of travel, `(0, 0)` for a degenerate edge.
    pub fn direction(&self) -> (f64, f64) {
        let len = self.length();
        if len > 0.0 {
            (
                (self.end.x - self.start.x) / len,
                (self.end.y - self.start.y) / len,
            )
        } else {
            (0.0, 0.0)
        }
    }
}

impl HostPath for Edge {
    fn frame_at(&self, distance: f64) -> Frame {
        let len = self.length();
        let ratio = if len > 0.0 { distance / len } else { 0.0 };
        let tangent = self.direction();
        Frame {
            point: self.start.lerp(&self.end, ratio),
            tangent,
            // Left-hand perpendicular of travel, inverted: outward on a
            // clockwise screen-space outline.
            up: (tangent.1, -tangent.0),
        }
    }

    fn stroke(&self, from: f64, to: f64) -> DrawCommand {
        DrawCommand::Stroke {
            from: self.frame_at(from).point,
            to: self.frame_at(to).point,
        }
    }
}

/// Walk every edge independently.
///
/// Each edge restarts the pattern at its own start, lays as many whole
/// repetitions as fit (at most [`MAX_REPETITIONS`]), then closes with the
/// first element. Phase is not carried across corners.
pub(crate) fn render_edges(edges: &[Edge], mut walker: Walker<'_>) -> Vec<DrawCommand> {
    let pattern_length = walker.pattern().pattern_length();
    if pattern_length <= 0.0 || edges.is_empty() {
        return walker.finish();
    }

    for edge in edges {
        let length = edge.length();
        if length <= 0.0 {
            continue;
        }
        if walker.guides_enabled() {
            walker.push(DrawCommand::Guide(Guide::Baseline {
                from: edge.start,
                to: edge.end,
            }));
        }

        let fit = (length / pattern_length + FIT_EPSILON).floor() as usize;
        if fit > MAX_REPETITIONS {
            tracing::debug!("Edge fits {} repetitions, drawing {}", fit, MAX_REPETITIONS);
        }
        let complete = fit.min(MAX_REPETITIONS);
        let mut cursor = 0.0;
        for _ in 0..complete {
            cursor = walker.repetition(edge, cursor, Some(length));
        }
        walker.first_element(edge, cursor, Some(length));
    }

    walker.finish()
}
