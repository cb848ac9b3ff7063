//! Error handling for LineKit
//!
//! Provides error types for every layer of the line-type builder:
//! - Pattern errors (editing operations on the element sequence)
//! - Encode errors (preconditions for producing `.lin` text)
//! - Decode errors (locating a pattern in imported text)
//! - Export errors (writing or copying the generated definition)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::constants::{MAX_ELEMENTS, MAX_NAME_LEN, MIN_ELEMENTS};

/// Pattern editing error type
///
/// Every variant is recoverable: the operation that produced it left the
/// pattern untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern already holds the maximum number of elements
    #[error("Maximum {max} elements allowed")]
    CapacityExceeded {
        /// The element limit.
        max: usize,
    },

    /// Removing would take the pattern below its minimum size
    #[error("Minimum {min} elements required")]
    MinimumSize {
        /// The element minimum.
        min: usize,
    },

    /// No element carries the given identity
    #[error("No element with id {id}")]
    UnknownElement {
        /// The identity that was looked up.
        id: String,
    },

    /// The operation does not apply to the element's kind
    #[error("Cannot {operation} on a {kind} element")]
    TypeMismatch {
        /// The operation that was attempted.
        operation: &'static str,
        /// The kind of the addressed element.
        kind: &'static str,
    },

    /// A positional argument is outside the sequence
    #[error("Index {index} out of range for {len} elements")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The current sequence length.
        len: usize,
    },

    /// Text content holds a character the definition format cannot carry
    #[error("Text cannot contain {character:?}")]
    InvalidTextCharacter {
        /// The first offending character.
        character: char,
    },
}

impl PatternError {
    /// Capacity error using the global element limit.
    pub fn capacity() -> Self {
        Self::CapacityExceeded { max: MAX_ELEMENTS }
    }

    /// Minimum-size error using the global element minimum.
    pub fn minimum() -> Self {
        Self::MinimumSize { min: MIN_ELEMENTS }
    }
}

/// Encode precondition failure
///
/// The `Display` form is the two-line `;` comment block shown in place of
/// the definition text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Fewer than the minimum number of elements
    #[error(
        "; ERROR: Line type requires at least {min} elements (currently {count})\n; Add more elements to generate valid .lin code"
    )]
    TooFewElements {
        /// The current element count.
        count: usize,
        /// The required minimum.
        min: usize,
    },

    /// The line-type name exceeds the format's limit
    #[error(
        "; ERROR: Line type name too long ({len} characters, max {max})\n; Shorten the name to generate valid .lin code"
    )]
    NameTooLong {
        /// The name length in characters.
        len: usize,
        /// The allowed maximum.
        max: usize,
    },
}

impl EncodeError {
    /// Too-few-elements error for a pattern of `count` elements.
    pub fn too_few(count: usize) -> Self {
        Self::TooFewElements {
            count,
            min: MIN_ELEMENTS,
        }
    }

    /// Name-too-long error for a name of `len` characters.
    pub fn name_too_long(len: usize) -> Self {
        Self::NameTooLong {
            len,
            max: MAX_NAME_LEN,
        }
    }
}

/// Decode failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Nothing but whitespace was supplied
    #[error("Please paste some .lin code first")]
    EmptyInput,

    /// No pattern line could be located in the input
    #[error("Could not find line type pattern data")]
    NoPatternLine,

    /// The pattern line holds more elements than a pattern may have
    #[error("Pattern has {count} elements, maximum is {max}")]
    TooManyElements {
        /// Number of elements found.
        count: usize,
        /// The element limit.
        max: usize,
    },
}

/// Export failure
#[derive(Error, Debug)]
pub enum ExportError {
    /// The pattern cannot be encoded in its current state
    #[error("Cannot export invalid line type")]
    Invalid(#[from] EncodeError),

    /// Writing the `.lin` file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The system clipboard rejected the text
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Main error type for LineKit
///
/// Aggregates all error types into a single type for convenient error
/// handling at library boundaries.
#[derive(Error, Debug)]
pub enum Error {
    /// Pattern editing error
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Encode error
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Decode error
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a message.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Result type for LineKit operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_error_display() {
        assert_eq!(
            PatternError::capacity().to_string(),
            "Maximum 12 elements allowed"
        );
        assert_eq!(
            PatternError::minimum().to_string(),
            "Minimum 2 elements required"
        );
        let err = PatternError::TypeMismatch {
            operation: "set dash length",
            kind: "text",
        };
        assert_eq!(err.to_string(), "Cannot set dash length on a text element");
        let err = PatternError::InvalidTextCharacter { character: '"' };
        assert_eq!(err.to_string(), "Text cannot contain '\"'");
    }

    #[test]
    fn test_encode_error_display() {
        assert_eq!(
            EncodeError::too_few(1).to_string(),
            "; ERROR: Line type requires at least 2 elements (currently 1)\n; Add more elements to generate valid .lin code"
        );
        assert_eq!(
            EncodeError::name_too_long(40).to_string(),
            "; ERROR: Line type name too long (40 characters, max 31)\n; Shorten the name to generate valid .lin code"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = PatternError::minimum().into();
        assert!(matches!(err, Error::Pattern(_)));
        assert_eq!(err.to_string(), "Minimum 2 elements required");

        let err: Error = DecodeError::NoPatternLine.into();
        assert!(matches!(err, Error::Decode(_)));

        let export: ExportError = EncodeError::too_few(0).into();
        assert!(matches!(export, ExportError::Invalid(_)));
        let err: Error = export.into();
        assert_eq!(err.to_string(), "Cannot export invalid line type");

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
