use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::text::TextSpec;

/// Element kind without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Dash,
    Dot,
    Text,
}

impl ElementKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Dash => "dash",
            Self::Dot => "dot",
            Self::Text => "text",
        }
    }

    /// Fresh value for a newly created or retyped element.
    pub fn default_element(self) -> PatternElement {
        match self {
            Self::Dash => PatternElement::dash(0.5),
            Self::Dot => PatternElement::Dot,
            Self::Text => PatternElement::Text(TextSpec::default()),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dash" | "gap" => Ok(Self::Dash),
            "dot" => Ok(Self::Dot),
            "text" => Ok(Self::Text),
            _ => Err(format!("Unknown element type: {}", s)),
        }
    }
}

/// One step of a line-type pattern
///
/// Dashes and gaps share one variant: `visible` is the sign of the value
/// written to the definition line, `length` its magnitude. Dots and text
/// have no length and never move the cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PatternElement {
    Dash { length: f64, visible: bool },
    Dot,
    Text(TextSpec),
}

impl PatternElement {
    /// Visible dash of `length` units.
    pub fn dash(length: f64) -> Self {
        Self::Dash {
            length: length.abs(),
            visible: true,
        }
    }

    /// Invisible dash (gap) of `length` units.
    pub fn gap(length: f64) -> Self {
        Self::Dash {
            length: length.abs(),
            visible: false,
        }
    }

    /// Element for a signed wire value: zero is a dot, the sign of anything
    /// else picks visibility.
    pub fn from_signed(value: f64) -> Self {
        if value == 0.0 {
            Self::Dot
        } else if value > 0.0 {
            Self::dash(value)
        } else {
            Self::gap(value)
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Dash { .. } => ElementKind::Dash,
            Self::Dot => ElementKind::Dot,
            Self::Text(_) => ElementKind::Text,
        }
    }

    /// Signed wire value for dashes and dots, `None` for text.
    pub fn signed_value(&self) -> Option<f64> {
        match self {
            Self::Dash { length, visible } => Some(if *visible { *length } else { -*length }),
            Self::Dot => Some(0.0),
            Self::Text(_) => None,
        }
    }

    /// Distance this element advances the cursor.
    pub fn advance(&self) -> f64 {
        match self {
            Self::Dash { length, .. } => *length,
            Self::Dot | Self::Text(_) => 0.0,
        }
    }

    pub fn as_text(&self) -> Option<&TextSpec> {
        match self {
            Self::Text(spec) => Some(spec),
            _ => None,
        }
    }
}
