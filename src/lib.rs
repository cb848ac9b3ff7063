//! # LineKit
//!
//! Builds AutoCAD `.lin` line-type patterns and previews them on sample
//! shapes.
//!
//! ## Architecture
//!
//! LineKit is organized as a workspace with multiple crates:
//!
//! 1. **linekit-core** - Error types, constants, numeric helpers
//! 2. **linekit-designer** - Pattern model, `.lin` codec, projection, SVG/PNG preview
//! 3. **linekit-settings** - Preview and export preferences (JSON/TOML)
//! 4. **linekit** - The command-line front end
//!
//! The binary is a thin layer over [`EditorSession`]; everything it does is
//! reachable through the library crates.

use std::io::{IsTerminal, Read};
use std::path::Path;

use anyhow::Context;

pub use linekit_core::{DecodeError, EncodeError, Error, ExportError, PatternError, Result};
pub use linekit_designer as designer;
pub use linekit_designer::{
    DrawCommand, EditorSession, ElementId, Pattern, PatternMetadata, PreviewStyle, ShapeKind,
    Viewport,
};
pub use linekit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so command output on stdout stays clean
/// - RUST_LOG environment variable support (default `info`)
/// - `verbose` of 1 raises the level to `debug`, 2 or more to `trace`
pub fn init_logging(verbose: u8) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let mut env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match verbose {
        0 => {}
        1 => env_filter = env_filter.add_directive(tracing::Level::DEBUG.into()),
        _ => env_filter = env_filter.add_directive(tracing::Level::TRACE.into()),
    }

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose > 0)
        .with_level(true)
        .with_line_number(verbose > 1);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;

    Ok(())
}

/// Where a definition comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read from this file
    File(String),
    /// The argument itself is the definition text
    Literal(String),
    /// Read all of standard input
    Stdin,
    /// Keep the built-in default pattern
    Default,
}

impl InputSource {
    /// Classifies a CLI argument: an existing path is a file, anything else
    /// is literal text. `-` means standard input. Without an argument,
    /// standard input is read unless it is a terminal.
    pub fn classify(arg: Option<&str>, stdin_is_terminal: bool) -> Self {
        match arg {
            Some("-") => Self::Stdin,
            Some(arg) if Path::new(arg).is_file() => Self::File(arg.to_string()),
            Some(arg) => Self::Literal(arg.to_string()),
            None if stdin_is_terminal => Self::Default,
            None => Self::Stdin,
        }
    }

    /// Reads the definition text; `None` for [`InputSource::Default`].
    pub fn read(&self) -> anyhow::Result<Option<String>> {
        match self {
            Self::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {path}"))
                .map(Some),
            Self::Literal(text) => Ok(Some(text.clone())),
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read standard input")?;
                Ok(Some(text))
            }
            Self::Default => Ok(None),
        }
    }
}

/// Builds a session from settings and imports the input, if any.
///
/// Decode warnings are logged and the import continues; a decode failure is
/// an error.
pub fn open_session(config: &Config, input: Option<&str>) -> anyhow::Result<EditorSession> {
    let mut session = config.session();
    let source = InputSource::classify(input, std::io::stdin().is_terminal());
    tracing::debug!("Input source: {:?}", source);
    if let Some(text) = source.read()? {
        let warnings = session.import(&text)?;
        for warning in warnings {
            tracing::warn!("{}", warning);
        }
    }
    Ok(session)
}

/// Puts the session's definition text on the system clipboard.
pub fn copy_to_clipboard(session: &EditorSession) -> std::result::Result<(), ExportError> {
    let text = session.export_text()?;
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ExportError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| ExportError::Clipboard(e.to_string()))?;
    tracing::info!("Copied {} to clipboard", session.metadata.effective_name());
    Ok(())
}
