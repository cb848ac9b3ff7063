//! `.lin` definition codec
//!
//! Converts between a [`Pattern`](crate::model::Pattern) and the two-line
//! AutoCAD line-type description:
//!
//! ```text
//! *NAME,Description text
//! A,1,-0.5,["TEXT",STANDARD,S=0.1,U=0,X=-0.2,Y=-0.05],-0.5
//! ```
//!
//! Encoding and decoding are pure functions; neither touches preview state.

mod decode;
mod encode;

pub use decode::{decode, split_top_level, Decoded, DecodeWarning};
pub use encode::{encode, encode_element, encode_pattern_line, output};

/// Prefix shared by every encode diagnostic.
pub const DIAGNOSTIC_PREFIX: &str = "; ERROR:";

/// True when `text` is an encode diagnostic rather than a definition.
pub fn is_diagnostic(text: &str) -> bool {
    text.starts_with(DIAGNOSTIC_PREFIX)
}
