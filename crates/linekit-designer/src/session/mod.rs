//! Editing session for UI and CLI integration.
//! Owns the pattern, its metadata, the preview shape and the view state.
//!
//! This module is split into submodules:
//! - `elements`: Validated pattern edits
//! - `file_io`: Import, `.lin` export and clipboard text

mod elements;
mod file_io;

use image::RgbImage;
use linekit_core::constants::{DEFAULT_FILE_STEM, EXTENTS_MARGIN_PX};

use crate::codec;
use crate::measure::{MeasureBackend, TextMeasurer};
use crate::model::{Pattern, PatternMetadata, ShapeKind};
use crate::projector::{self, Bounds, DrawCommand, RenderOptions};
use crate::renderer::{self, PreviewStyle, RenderError};
use crate::svg_renderer;
use crate::viewport::Viewport;

/// One line-type editing session
#[derive(Debug, Clone)]
pub struct EditorSession {
    pattern: Pattern,
    pub metadata: PatternMetadata,
    shape: ShapeKind,
    pub viewport: Viewport,
    pub render_options: RenderOptions,
    pub style: PreviewStyle,
    pub backend: MeasureBackend,
    /// Screen margin kept by zoom to extents, in pixels.
    pub extents_margin: f64,
    /// File stem used for export when the name is blank.
    pub default_file_stem: String,
    pub is_modified: bool,
}

impl EditorSession {
    /// Creates a session holding the built-in default pattern, zoomed to
    /// extents on the line preview.
    pub fn new() -> Self {
        Self::with_viewport(Viewport::default())
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        let mut session = Self {
            pattern: Pattern::default(),
            metadata: PatternMetadata::default(),
            shape: ShapeKind::default(),
            viewport,
            render_options: RenderOptions::default(),
            style: PreviewStyle::default(),
            backend: MeasureBackend::default(),
            extents_margin: EXTENTS_MARGIN_PX,
            default_file_stem: DEFAULT_FILE_STEM.to_string(),
            is_modified: false,
        };
        session.zoom_extents();
        session
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Switches the preview shape and refits the view.
    pub fn set_shape(&mut self, shape: ShapeKind) {
        if self.shape != shape {
            tracing::debug!("Preview shape {} -> {}", self.shape, shape);
        }
        self.shape = shape;
        self.zoom_extents();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.metadata.name = name.into();
        self.is_modified = true;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.metadata.description = description.into();
        self.is_modified = true;
    }

    pub fn set_show_text_guides(&mut self, show: bool) {
        self.render_options.show_text_guides = show;
    }

    pub fn toggle_text_guides(&mut self) -> bool {
        self.render_options.show_text_guides = !self.render_options.show_text_guides;
        self.render_options.show_text_guides
    }

    pub fn measurer(&self) -> &'static dyn TextMeasurer {
        self.backend.measurer()
    }

    /// Definition text, or the encode diagnostic when the pattern or name
    /// is invalid.
    pub fn output(&self) -> String {
        codec::output(&self.pattern, &self.metadata)
    }

    /// True when the current output is exportable.
    pub fn is_exportable(&self) -> bool {
        !codec::is_diagnostic(&self.output())
    }

    /// Draw commands for the current pattern on the current shape.
    pub fn render(&self) -> Vec<DrawCommand> {
        projector::render(
            &self.pattern,
            self.shape,
            self.measurer(),
            self.render_options,
        )
    }

    pub fn bounds(&self) -> Option<Bounds> {
        projector::shape_bounds(&self.pattern, self.shape)
    }

    /// Fits the current shape into the canvas. No-op for an empty pattern.
    pub fn zoom_extents(&mut self) {
        if let Some(bounds) = self.bounds() {
            self.viewport
                .zoom_extents_with_margin(&bounds, self.extents_margin);
        }
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn render_svg(&self) -> String {
        svg_renderer::render_svg(&self.render(), &self.viewport, &self.style)
    }

    pub fn render_image(&self) -> Result<RgbImage, RenderError> {
        renderer::render_image(&self.render(), &self.viewport, &self.style)
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
