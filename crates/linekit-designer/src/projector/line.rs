use linekit_core::constants::{LINE_MIN_HALF_HEIGHT, LINE_REPETITIONS};

use super::{Bounds, DrawCommand, Frame, HostPath, Walker};
use crate::model::{Pattern, Point};

/// Straight host along Y = 0, running right from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineHost {
    pub pattern_length: f64,
    pub repetitions: usize,
}

impl LineHost {
    pub fn for_pattern(pattern: &Pattern) -> Self {
        Self {
            pattern_length: pattern.pattern_length(),
            repetitions: LINE_REPETITIONS,
        }
    }

    pub fn length(&self) -> f64 {
        self.pattern_length * self.repetitions as f64
    }

    /// Full drawn length plus room above and below for the tallest label.
    pub fn bounds(&self, pattern: &Pattern) -> Bounds {
        let tallest = pattern
            .elements()
            .filter_map(|e| e.as_text())
            .map(|t| t.y_offset.abs() + t.scale)
            .fold(0.0, f64::max);
        let half = tallest.max(LINE_MIN_HALF_HEIGHT);
        Bounds::new(0.0, -half, self.length(), half)
    }

    pub(crate) fn render(&self, mut walker: Walker<'_>) -> Vec<DrawCommand> {
        let mut cursor = 0.0;
        for rep in 0..self.repetitions {
            cursor = walker.repetition(self, rep as f64 * self.pattern_length, None);
        }
        walker.first_element(self, cursor, None);
        walker.finish()
    }
}

impl HostPath for LineHost {
    fn frame_at(&self, distance: f64) -> Frame {
        Frame {
            point: Point::new(distance, 0.0),
            tangent: (1.0, 0.0),
            up: (0.0, -1.0),
        }
    }

    fn stroke(&self, from: f64, to: f64) -> DrawCommand {
        DrawCommand::Stroke {
            from: Point::new(from, 0.0),
            to: Point::new(to, 0.0),
        }
    }
}
