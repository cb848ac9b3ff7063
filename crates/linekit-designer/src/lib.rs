//! # LineKit Designer
//!
//! Pattern model, `.lin` definition codec and preview projection for
//! AutoCAD line types built from dashes, dots and inline text.
//!
//! ## Core Components
//!
//! - **Model**: The ordered element sequence with validated edits
//! - **Codec**: Encoding to and decoding from the `.lin` description format
//! - **Projector**: Walks the repeating pattern along a line, rectangle,
//!   circle or triangle and emits draw commands
//! - **Measure**: Text width and height for centering and placement
//! - **Viewport**: Zoom, pan and zoom-to-extents of the preview canvas
//! - **Renderers**: SVG documents and tiny-skia raster images
//! - **Session**: The single object a UI or CLI drives
//!
//! ## Architecture
//!
//! ```text
//! EditorSession
//!   ├── Pattern ──> codec::encode ──> .lin text
//!   │         └──> projector::render ──> DrawCommand[]
//!   ├── ShapeKind                          │
//!   └── Viewport ────────────> svg_renderer / renderer
//! ```
//!
//! Codec and projector are independent pure functions of the pattern.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use linekit_designer::{EditorSession, ShapeKind};
//!
//! let mut session = EditorSession::new();
//! session.import("*DASHDOT,Dash dot line\nA,1,-0.5,0,-0.5")?;
//! session.set_shape(ShapeKind::Circle);
//! let svg = session.render_svg();
//! ```

pub mod codec;
pub mod font_manager;
pub mod measure;
pub mod model;
pub mod projector;
pub mod renderer;
pub mod session;
pub mod svg_renderer;
pub mod viewport;

pub use codec::{decode, encode, Decoded, DecodeWarning};
pub use measure::{center_offsets, ApproximateMeasurer, FontMeasurer, MeasureBackend, TextMeasurer, TextSize};
pub use model::{
    EditMode, EditOutcome, ElementId, ElementKind, Pattern, PatternElement, PatternMetadata,
    Point, RotationType, ShapeKind, TextCase, TextProperty, TextSpec,
};
pub use projector::{render, shape_bounds, Bounds, DrawCommand, Guide, RenderOptions, TextPlacement};
pub use renderer::{render_image, save_png, PreviewStyle, RenderError};
pub use session::EditorSession;
pub use svg_renderer::render_svg;
pub use viewport::Viewport;
