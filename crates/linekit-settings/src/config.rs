//! Configuration for LineKit
//!
//! Presentation preferences for the preview and defaults for export.
//! Supports JSON and TOML files; the default file lives in the platform
//! config directory.
//!
//! Configuration is organized into sections:
//! - Preview settings (scale, canvas, grid, zoom, text metrics)
//! - Export settings (default file name)

use linekit_core::constants::{
    DEFAULT_FILE_STEM, EXTENTS_MARGIN_PX, MAX_ZOOM, MIN_ZOOM, PIXELS_PER_UNIT, ZOOM_STEP,
};
use linekit_designer::{EditorSession, MeasureBackend, PreviewStyle, RenderOptions, Viewport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Application directory under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "linekit";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Preview presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Pixels per drawing unit at zoom 1
    pub pixels_per_unit: f64,
    /// Stroke width in pixels
    pub line_weight: f64,
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Draw the unit grid behind the preview
    pub show_grid: bool,
    /// Draw text boxes and edge baselines
    pub show_text_guides: bool,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom in/out factor
    pub zoom_step: f64,
    /// Margin kept around the shape by zoom to extents, in pixels
    pub extents_margin: f64,
    /// Text width source
    pub text_backend: MeasureBackend,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            pixels_per_unit: PIXELS_PER_UNIT,
            line_weight: 1.0,
            canvas_width: 800,
            canvas_height: 400,
            show_grid: true,
            show_text_guides: false,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            extents_margin: EXTENTS_MARGIN_PX,
            text_backend: MeasureBackend::System,
        }
    }
}

impl PreviewSettings {
    /// A viewport with these dimensions, scale and zoom limits.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas_width as f64, self.canvas_height as f64)
            .with_pixels_per_unit(self.pixels_per_unit)
            .with_zoom_limits(self.min_zoom, self.max_zoom, self.zoom_step)
    }

    pub fn style(&self) -> PreviewStyle {
        PreviewStyle {
            line_weight: self.line_weight,
            show_grid: self.show_grid,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_text_guides: self.show_text_guides,
        }
    }

    fn validate(&self) -> SettingsResult<()> {
        if !(self.pixels_per_unit.is_finite() && self.pixels_per_unit > 0.0) {
            return Err(SettingsError::invalid(
                "preview.pixels_per_unit",
                "must be > 0",
            ));
        }
        if !(self.line_weight.is_finite() && self.line_weight > 0.0) {
            return Err(SettingsError::invalid("preview.line_weight", "must be > 0"));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(SettingsError::invalid(
                "preview.canvas",
                "dimensions must be > 0",
            ));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom && self.max_zoom.is_finite()) {
            return Err(SettingsError::invalid(
                "preview.zoom",
                format!(
                    "need 0 < min_zoom <= max_zoom (got {} and {})",
                    self.min_zoom, self.max_zoom
                ),
            ));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            return Err(SettingsError::invalid("preview.zoom_step", "must be > 1"));
        }
        if !(self.extents_margin.is_finite() && self.extents_margin >= 0.0) {
            return Err(SettingsError::invalid(
                "preview.extents_margin",
                "must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Export defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// File stem used when the line type has no name
    pub default_file_stem: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            default_file_stem: DEFAULT_FILE_STEM.to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preview: PreviewSettings,
    pub export: ExportSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_for(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("(none)").to_string(),
        )),
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML, by extension)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML, by extension)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_for(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Loads `path`, or the default config file when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let Ok(path) = default_config_path() else {
                    return Ok(Self::default());
                };
                if path.exists() {
                    Self::load_from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// A fresh editing session configured from these settings, zoomed to
    /// extents.
    pub fn session(&self) -> EditorSession {
        let mut session = EditorSession::with_viewport(self.preview.viewport());
        session.style = self.preview.style();
        session.render_options = self.preview.render_options();
        session.backend = self.preview.text_backend;
        session.extents_margin = self.preview.extents_margin;
        session.default_file_stem = self.export.default_file_stem.trim().to_string();
        session.zoom_extents();
        session
    }

    pub fn validate(&self) -> SettingsResult<()> {
        self.preview.validate()?;
        let stem = self.export.default_file_stem.trim();
        if stem.is_empty() {
            return Err(SettingsError::invalid(
                "export.default_file_stem",
                "must not be empty",
            ));
        }
        if stem.contains(['/', '\\']) {
            return Err(SettingsError::invalid(
                "export.default_file_stem",
                "must not contain path separators",
            ));
        }
        Ok(())
    }
}

/// `<config dir>/linekit/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| SettingsError::ConfigDirectory("no config directory on this platform".into()))
}
