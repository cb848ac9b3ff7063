//! Import and export operations for the session.

use linekit_core::{DecodeError, EncodeError, ExportError};
use std::path::{Path, PathBuf};

use super::EditorSession;
use crate::codec::{self, DecodeWarning};

impl EditorSession {
    /// Replaces the pattern with a decoded definition.
    ///
    /// Decoding runs on a scratch copy; on failure the session is left
    /// exactly as it was. Metadata is only replaced when the input carried
    /// a header line.
    pub fn import(&mut self, input: &str) -> Result<Vec<DecodeWarning>, DecodeError> {
        let decoded = match codec::decode(input) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!("Import failed: {}", err);
                return Err(err);
            }
        };
        self.pattern = decoded.pattern;
        if let Some(metadata) = decoded.metadata {
            self.metadata = metadata;
        }
        self.is_modified = true;
        tracing::info!(
            "Imported {} elements ({} warnings)",
            self.pattern.len(),
            decoded.warnings.len()
        );
        self.zoom_extents();
        Ok(decoded.warnings)
    }

    /// The definition text, refusing an invalid pattern or name.
    pub fn export_text(&self) -> Result<String, ExportError> {
        codec::encode(&self.pattern, &self.metadata).map_err(|err: EncodeError| {
            tracing::warn!("Export blocked: {}", err);
            ExportError::from(err)
        })
    }

    /// File name the definition is exported under.
    pub fn export_file_name(&self) -> String {
        if self.metadata.name.trim().is_empty() {
            format!("{}.lin", self.default_file_stem)
        } else {
            self.metadata.file_name()
        }
    }

    /// Writes the definition into `dir` and returns the written path.
    pub fn export_lin(&mut self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let text = self.export_text()?;
        let path = dir.as_ref().join(self.export_file_name());
        std::fs::write(&path, format!("{}\n", text))?;
        self.is_modified = false;
        tracing::info!("Exported {}", path.display());
        Ok(path)
    }
}
