use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

mod element;
mod pattern;
mod text;

pub use element::{ElementKind, PatternElement};
pub use pattern::{EditMode, EditOutcome, Pattern, PatternMetadata};
pub use text::{RotationType, TextCase, TextProperty, TextSpec};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point reached by moving `t` along `dir` from here.
    pub fn offset(&self, dir: (f64, f64), t: f64) -> Point {
        Point::new(self.x + dir.0 * t, self.y + dir.1 * t)
    }

    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Stable identity of a pattern element.
///
/// Survives reordering and edits, so UI rows can address elements without
/// tracking indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host curve the preview projects the pattern onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Straight horizontal line
    Line,
    /// Rectangle perimeter
    Rectangle,
    /// Circle circumference
    Circle,
    /// Equilateral triangle perimeter
    Triangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Line,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Triangle,
    ];
}

impl Default for ShapeKind {
    fn default() -> Self {
        Self::Line
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Rectangle => write!(f, "rectangle"),
            Self::Circle => write!(f, "circle"),
            Self::Triangle => write!(f, "triangle"),
        }
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "triangle" => Ok(Self::Triangle),
            _ => Err(format!("Unknown shape: {}", s)),
        }
    }
}
