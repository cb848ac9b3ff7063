use linekit_core::constants::{
    CAP_HEIGHT_RATIO, FONT_SIZE_FACTOR, UPRIGHT_FLIP_MAX_DEG, UPRIGHT_FLIP_MIN_DEG,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::Frame;
use crate::font_manager::FontFamily;
use crate::measure::TextMeasurer;
use crate::model::{Point, RotationType, TextSpec};

/// A label positioned on the host
///
/// The text box is `box_width` by `box_height` (cap height). Its
/// bottom-left corner sits at `anchor` and the box is rotated by `rotation`
/// radians about that corner (clockwise on screen). A flipped label is
/// drawn upside down from the box's top-right corner, so it reads upright
/// while occupying the same box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPlacement {
    pub content: String,
    pub family: FontFamily,
    /// Font size in drawing units.
    pub font_size: f64,
    pub anchor: Point,
    pub rotation: f64,
    pub flipped: bool,
    pub box_width: f64,
    pub box_height: f64,
}

impl TextPlacement {
    /// Baseline start and rotation the glyphs are actually drawn with.
    pub fn baseline_origin(&self) -> (Point, f64) {
        if self.flipped {
            let (dx, dy) = rotate(self.box_width, -self.box_height, self.rotation);
            (
                Point::new(self.anchor.x + dx, self.anchor.y + dy),
                self.rotation + PI,
            )
        } else {
            (self.anchor, self.rotation)
        }
    }

    /// Box corners: bottom-left, bottom-right, top-right, top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            (0.0, 0.0),
            (self.box_width, 0.0),
            (self.box_width, -self.box_height),
            (0.0, -self.box_height),
        ]
        .map(|(x, y)| {
            let (dx, dy) = rotate(x, y, self.rotation);
            Point::new(self.anchor.x + dx, self.anchor.y + dy)
        })
    }
}

fn rotate(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (sin_a, cos_a) = angle.sin_cos();
    (x * cos_a - y * sin_a, x * sin_a + y * cos_a)
}

/// True when upright text on a tangent at `angle_deg` must be flipped.
///
/// The angle is normalized to `[0, 360)`; the flip range is inclusive at
/// both ends, so exactly vertical tangents (90°, 270°) never flip.
pub fn upright_flip(angle_deg: f64) -> bool {
    let normalized = angle_deg.rem_euclid(360.0);
    (UPRIGHT_FLIP_MIN_DEG..=UPRIGHT_FLIP_MAX_DEG).contains(&normalized)
}

/// Position and orient a label at a host frame.
///
/// The X offset moves along the tangent, the Y offset along the frame's
/// up direction. User angles are counter-clockwise, hence the negation in
/// screen space.
pub fn place_text(spec: &TextSpec, frame: &Frame, measurer: &dyn TextMeasurer) -> TextPlacement {
    let anchor = frame
        .point
        .offset(frame.tangent, spec.x_offset)
        .offset(frame.up, spec.y_offset);

    let tangent_angle = frame.tangent_angle();
    let user_angle = -spec.rotation_angle.to_radians();
    let rotation = match spec.rotation_type {
        RotationType::Absolute => user_angle,
        RotationType::Relative | RotationType::Upright => tangent_angle + user_angle,
    };
    let flipped =
        spec.rotation_type == RotationType::Upright && upright_flip(tangent_angle.to_degrees());

    let font_size = spec.scale * FONT_SIZE_FACTOR;
    TextPlacement {
        content: spec.content.clone(),
        family: FontFamily::for_style(&spec.style),
        font_size,
        anchor,
        rotation,
        flipped,
        box_width: measurer.measure(spec).width,
        box_height: font_size * CAP_HEIGHT_RATIO,
    }
}
