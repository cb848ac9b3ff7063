use linekit_core::constants::{
    CIRCLE_PATTERN_COUNT, MAX_REPETITIONS, MIN_CIRCLE_RADIUS, PIXELS_PER_UNIT,
};
use std::f64::consts::{FRAC_PI_2, TAU};

use super::{Bounds, DrawCommand, Frame, Guide, HostPath, Walker, FIT_EPSILON};
use crate::model::{Pattern, Point};

/// Screen gap between the circle top and the min-radius label, in pixels.
const LABEL_GAP_PX: f64 = 15.0;

/// Circle centered on the origin, walked clockwise from the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleHost {
    pub pattern_length: f64,
    /// Radius sized for six pattern lengths, before the minimum applies.
    pub natural_radius: f64,
    pub radius: f64,
}

impl CircleHost {
    pub fn for_pattern(pattern: &Pattern) -> Self {
        let pattern_length = pattern.pattern_length();
        let natural_radius = CIRCLE_PATTERN_COUNT * pattern_length / TAU;
        Self {
            pattern_length,
            natural_radius,
            radius: natural_radius.max(MIN_CIRCLE_RADIUS),
        }
    }

    pub fn min_radius_applied(&self) -> bool {
        self.natural_radius < MIN_CIRCLE_RADIUS
    }

    /// Whole repetitions that fit the circumference, at least one and at
    /// most [`MAX_REPETITIONS`].
    pub fn repetitions(&self) -> usize {
        if self.pattern_length <= 0.0 {
            return CIRCLE_PATTERN_COUNT as usize;
        }
        let fit = ((TAU * self.radius / self.pattern_length + FIT_EPSILON).floor() as usize).max(1);
        if fit > MAX_REPETITIONS {
            tracing::debug!("Circle fits {} repetitions, drawing {}", fit, MAX_REPETITIONS);
        }
        fit.min(MAX_REPETITIONS)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(-self.radius, -self.radius, self.radius, self.radius)
    }

    fn angle_at(&self, distance: f64) -> f64 {
        -FRAC_PI_2 + distance / self.radius
    }

    pub(crate) fn render(&self, mut walker: Walker<'_>) -> Vec<DrawCommand> {
        if walker.guides_enabled() && self.min_radius_applied() {
            let origin = Point::new(0.0, 0.0);
            if self.natural_radius > 0.0 {
                walker.push(DrawCommand::Guide(Guide::Circle {
                    center: origin,
                    radius: self.natural_radius,
                }));
            }
            walker.push(DrawCommand::Guide(Guide::Label {
                at: Point::new(0.0, -self.radius - LABEL_GAP_PX / PIXELS_PER_UNIT),
                text: format!("Min radius: {} units applied", MIN_CIRCLE_RADIUS),
            }));
        }

        let mut cursor = 0.0;
        for _ in 0..self.repetitions() {
            cursor = walker.repetition(self, cursor, None);
        }
        walker.first_element(self, cursor, None);
        walker.finish()
    }
}

impl HostPath for CircleHost {
    fn frame_at(&self, distance: f64) -> Frame {
        let (sin_a, cos_a) = self.angle_at(distance).sin_cos();
        Frame {
            point: Point::new(self.radius * cos_a, self.radius * sin_a),
            tangent: (-sin_a, cos_a),
            up: (cos_a, sin_a),
        }
    }

    fn stroke(&self, from: f64, to: f64) -> DrawCommand {
        DrawCommand::Arc {
            center: Point::new(0.0, 0.0),
            radius: self.radius,
            start_angle: self.angle_at(from),
            end_angle: self.angle_at(to),
        }
    }
}
