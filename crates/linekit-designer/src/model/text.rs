use linekit_core::constants::{DEFAULT_TEXT_SCALE, DEFAULT_TEXT_STYLE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an inline text label is rotated relative to the host curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationType {
    /// Fixed angle measured from horizontal
    Absolute,
    /// Angle measured from the local tangent
    Relative,
    /// Like `Relative`, but flipped 180° when it would read upside down
    Upright,
}

impl RotationType {
    /// Single-letter code used in `.lin` text fields.
    pub fn code(self) -> char {
        match self {
            Self::Absolute => 'A',
            Self::Relative => 'R',
            Self::Upright => 'U',
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::Absolute),
            "R" => Some(Self::Relative),
            "U" => Some(Self::Upright),
            _ => None,
        }
    }
}

impl fmt::Display for RotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for RotationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "ABSOLUTE" => Ok(Self::Absolute),
            "R" | "RELATIVE" => Ok(Self::Relative),
            "U" | "UPRIGHT" => Ok(Self::Upright),
            _ => Err(format!("Unknown rotation type: {}", s)),
        }
    }
}

/// Editable field of a text element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextProperty {
    Content,
    Style,
    Scale,
    RotationAngle,
    XOffset,
    YOffset,
}

impl TextProperty {
    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::Content | Self::Style)
    }

    /// Decimal places kept by the stepper buttons.
    pub fn step_precision(self) -> u32 {
        match self {
            Self::RotationAngle => 1,
            _ => 2,
        }
    }
}

impl FromStr for TextProperty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "content" | "text" => Ok(Self::Content),
            "style" => Ok(Self::Style),
            "scale" | "s" => Ok(Self::Scale),
            "angle" | "rotation" | "rotation_angle" => Ok(Self::RotationAngle),
            "x" | "x_offset" => Ok(Self::XOffset),
            "y" | "y_offset" => Ok(Self::YOffset),
            _ => Err(format!("Unknown text property: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCase {
    Upper,
    Lower,
}

/// Inline text label carried by a pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    pub content: String,
    pub style: String,
    /// Text height in drawing units.
    pub scale: f64,
    pub rotation_type: RotationType,
    /// Degrees, counter-clockwise positive.
    pub rotation_angle: f64,
    /// Offset along the host tangent.
    pub x_offset: f64,
    /// Offset perpendicular to the host, positive away from the shape.
    pub y_offset: f64,
}

impl TextSpec {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// The centered label used by the starting pattern.
    pub fn default_label() -> Self {
        Self {
            x_offset: -0.2,
            ..Self::default()
        }
    }

    pub fn numeric(&self, property: TextProperty) -> Option<f64> {
        match property {
            TextProperty::Scale => Some(self.scale),
            TextProperty::RotationAngle => Some(self.rotation_angle),
            TextProperty::XOffset => Some(self.x_offset),
            TextProperty::YOffset => Some(self.y_offset),
            TextProperty::Content | TextProperty::Style => None,
        }
    }

    /// Store a numeric field. Scale never goes below zero.
    pub fn set_numeric(&mut self, property: TextProperty, value: f64) {
        match property {
            TextProperty::Scale => self.scale = value.max(0.0),
            TextProperty::RotationAngle => self.rotation_angle = value,
            TextProperty::XOffset => self.x_offset = value,
            TextProperty::YOffset => self.y_offset = value,
            TextProperty::Content | TextProperty::Style => {}
        }
    }

    pub fn apply_case(&mut self, case: TextCase) {
        self.content = match case {
            TextCase::Upper => self.content.to_uppercase(),
            TextCase::Lower => self.content.to_lowercase(),
        };
    }
}

impl Default for TextSpec {
    fn default() -> Self {
        Self {
            content: "TEXT".to_string(),
            style: DEFAULT_TEXT_STYLE.to_string(),
            scale: DEFAULT_TEXT_SCALE,
            rotation_type: RotationType::Upright,
            rotation_angle: 0.0,
            x_offset: 0.0,
            y_offset: -0.05,
        }
    }
}
