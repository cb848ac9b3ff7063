//! Geometry projection of a pattern onto the preview host shapes.
//!
//! The projector walks the repeating pattern along a host curve and emits
//! [`DrawCommand`]s in drawing units, Y axis pointing down. Adapters (SVG,
//! raster) only apply the view transform and paint.
//!
//! Host curves expose a local [`Frame`] at any distance along them; the
//! walker advances a cursor by dash lengths and asks the host for frames at
//! the cursor. Dots and text never move the cursor.

mod circle;
mod line;
mod polygon;
mod rectangle;
mod text;
mod triangle;

use serde::{Deserialize, Serialize};

use crate::measure::TextMeasurer;
use crate::model::{Pattern, PatternElement, Point, ShapeKind};

pub use circle::CircleHost;
pub use line::LineHost;
pub use polygon::Edge;
pub use rectangle::RectangleHost;
pub use text::{place_text, upright_flip, TextPlacement};
pub use triangle::TriangleHost;

/// Slack added before flooring repetition counts, so a host sized for an
/// exact number of repetitions is not cut short by rounding.
pub(crate) const FIT_EPSILON: f64 = 1e-9;

/// Axis-aligned bounds in drawing units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Construction aid drawn only when text guides are enabled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Guide {
    /// Outline of a text box, bottom-left corner first.
    TextBox { corners: [Point; 4] },
    /// Thin baseline of one host edge.
    Baseline { from: Point, to: Point },
    /// The circle radius the pattern alone would have produced.
    Circle { center: Point, radius: f64 },
    Label { at: Point, text: String },
}

/// One primitive of the rendered preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Straight visible dash.
    Stroke { from: Point, to: Point },
    /// Visible dash along a circle; angles in radians, increasing clockwise.
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    /// Zero-length dot marker.
    Dot { at: Point },
    Text(TextPlacement),
    Guide(Guide),
}

/// Local frame of a host curve at some distance along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub point: Point,
    /// Unit direction of travel.
    pub tangent: (f64, f64),
    /// Unit direction of a positive text Y offset (away from the shape).
    pub up: (f64, f64),
}

impl Frame {
    /// Tangent direction in radians, screen orientation.
    pub fn tangent_angle(&self) -> f64 {
        self.tangent.1.atan2(self.tangent.0)
    }
}

/// A curve the walker can lay pattern elements along.
pub trait HostPath {
    fn frame_at(&self, distance: f64) -> Frame;

    /// Visible dash covering `[from, to]`.
    fn stroke(&self, from: f64, to: f64) -> DrawCommand;
}

/// Per-render switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub show_text_guides: bool,
}

/// Lays pattern elements along host paths and collects draw commands.
pub(crate) struct Walker<'a> {
    pattern: &'a Pattern,
    measurer: &'a dyn TextMeasurer,
    options: RenderOptions,
    commands: Vec<DrawCommand>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(
        pattern: &'a Pattern,
        measurer: &'a dyn TextMeasurer,
        options: RenderOptions,
    ) -> Self {
        Self {
            pattern,
            measurer,
            options,
            commands: Vec::new(),
        }
    }

    pub(crate) fn pattern(&self) -> &'a Pattern {
        self.pattern
    }

    pub(crate) fn guides_enabled(&self) -> bool {
        self.options.show_text_guides
    }

    pub(crate) fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Lay one full repetition starting at `cursor`; returns the new cursor.
    ///
    /// With a `limit`, elements starting at or past it are dropped and
    /// dashes are clipped to it.
    pub(crate) fn repetition(
        &mut self,
        host: &dyn HostPath,
        mut cursor: f64,
        limit: Option<f64>,
    ) -> f64 {
        let pattern = self.pattern;
        for element in pattern.elements() {
            if limit.is_some_and(|end| cursor >= end) {
                break;
            }
            cursor = self.element(host, element, cursor, limit);
        }
        cursor
    }

    /// Lay the pattern's first element at `cursor`, closing off a run.
    pub(crate) fn first_element(
        &mut self,
        host: &dyn HostPath,
        cursor: f64,
        limit: Option<f64>,
    ) -> f64 {
        if limit.is_some_and(|end| cursor >= end) {
            return cursor;
        }
        let pattern = self.pattern;
        match pattern.first() {
            Some(first) => self.element(host, first, cursor, limit),
            None => cursor,
        }
    }

    fn element(
        &mut self,
        host: &dyn HostPath,
        element: &PatternElement,
        cursor: f64,
        limit: Option<f64>,
    ) -> f64 {
        match element {
            PatternElement::Dash { length, visible } => {
                let end = cursor + length;
                if *visible && *length > 0.0 {
                    let clipped = limit.map_or(end, |l| end.min(l));
                    self.commands.push(host.stroke(cursor, clipped));
                }
                end
            }
            PatternElement::Dot => {
                let at = host.frame_at(cursor).point;
                self.commands.push(DrawCommand::Dot { at });
                cursor
            }
            PatternElement::Text(spec) => {
                let frame = host.frame_at(cursor);
                let placement = place_text(spec, &frame, self.measurer);
                if self.options.show_text_guides {
                    self.commands.push(DrawCommand::Guide(Guide::TextBox {
                        corners: placement.corners(),
                    }));
                }
                self.commands.push(DrawCommand::Text(placement));
                cursor
            }
        }
    }

    pub(crate) fn finish(self) -> Vec<DrawCommand> {
        self.commands
    }
}

/// Draw commands for `pattern` laid along `shape`.
///
/// Empty when the pattern has no length to repeat.
pub fn render(
    pattern: &Pattern,
    shape: ShapeKind,
    measurer: &dyn TextMeasurer,
    options: RenderOptions,
) -> Vec<DrawCommand> {
    if pattern.pattern_length() <= 0.0 {
        return Vec::new();
    }
    let walker = Walker::new(pattern, measurer, options);
    let commands = match shape {
        ShapeKind::Line => LineHost::for_pattern(pattern).render(walker),
        ShapeKind::Rectangle => RectangleHost::for_pattern(pattern).render(walker),
        ShapeKind::Circle => CircleHost::for_pattern(pattern).render(walker),
        ShapeKind::Triangle => TriangleHost::for_pattern(pattern).render(walker),
    };
    tracing::debug!("Projected onto {}: {} commands", shape, commands.len());
    commands
}

/// Host-geometry bounds used to fit the preview, or `None` when the
/// pattern has no length.
pub fn shape_bounds(pattern: &Pattern, shape: ShapeKind) -> Option<Bounds> {
    if pattern.pattern_length() <= 0.0 {
        return None;
    }
    Some(match shape {
        ShapeKind::Line => LineHost::for_pattern(pattern).bounds(pattern),
        ShapeKind::Rectangle => RectangleHost::for_pattern(pattern).bounds(),
        ShapeKind::Circle => CircleHost::for_pattern(pattern).bounds(),
        ShapeKind::Triangle => TriangleHost::for_pattern(pattern).bounds(),
    })
}
