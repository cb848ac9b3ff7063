//! # LineKit Core
//!
//! Core error types, constants, and numeric helpers shared by the LineKit
//! crates. Nothing in here knows about patterns or shapes; it only fixes the
//! vocabulary (limits, units, number formatting) the other crates agree on.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{DecodeError, EncodeError, Error, ExportError, PatternError, Result};
pub use units::{format_number, parse_leading_float, parse_live_number, round_to};
