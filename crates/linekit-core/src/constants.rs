//! Fixed limits and geometry constants for line-type patterns.

/// Fewest elements a pattern may have and still encode.
pub const MIN_ELEMENTS: usize = 2;

/// Most elements a pattern may hold.
pub const MAX_ELEMENTS: usize = 12;

/// Longest line-type name the `.lin` format accepts.
pub const MAX_NAME_LEN: usize = 31;

/// Name used when the metadata name is blank.
pub const DEFAULT_NAME: &str = "MYLINETYPE";

/// Description used when the metadata description is blank.
pub const DEFAULT_DESCRIPTION: &str = "Custom line type description";

/// File stem used when exporting a pattern with a blank name.
pub const DEFAULT_FILE_STEM: &str = "customline";

/// Text style written when a text element has none.
pub const DEFAULT_TEXT_STYLE: &str = "STANDARD";

/// Scale assigned to text whose `S=` field is missing or unreadable.
pub const DEFAULT_TEXT_SCALE: f64 = 0.1;

/// Preview pixels per drawing unit at zoom 1.
pub const PIXELS_PER_UNIT: f64 = 200.0;

/// Rendered font size as a multiple of the text scale.
pub const FONT_SIZE_FACTOR: f64 = 1.4;

/// Cap height as a fraction of the font size.
pub const CAP_HEIGHT_RATIO: f64 = 0.7;

/// Smallest side of a rectangle or triangle host, in units.
pub const MIN_SHAPE_SIZE: f64 = 0.8;

/// Smallest circle host radius, in units.
pub const MIN_CIRCLE_RADIUS: f64 = 0.8;

/// Pattern repetitions drawn along the line host.
pub const LINE_REPETITIONS: usize = 8;

/// Characters text content may not hold: the quote delimits it and line
/// breaks end the pattern line.
pub const FORBIDDEN_TEXT_CHARS: [char; 3] = ['"', '\r', '\n'];

/// Most whole repetitions the preview lays along one host edge or circle.
pub const MAX_REPETITIONS: usize = 2_000;

/// Pattern lengths the circle circumference is sized for.
pub const CIRCLE_PATTERN_COUNT: f64 = 6.0;

/// Lowest tangent angle (degrees, inclusive) at which upright text flips.
pub const UPRIGHT_FLIP_MIN_DEG: f64 = 91.0;

/// Highest tangent angle (degrees, inclusive) at which upright text flips.
pub const UPRIGHT_FLIP_MAX_DEG: f64 = 269.0;

/// Minimum half-height of the line host's bounds, in units.
pub const LINE_MIN_HALF_HEIGHT: f64 = 0.1;

/// Screen margin kept around the shape by zoom extents, in pixels.
pub const EXTENTS_MARGIN_PX: f64 = 40.0;

/// Zoom factor limits.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Multiplicative zoom step.
pub const ZOOM_STEP: f64 = 1.2;

/// Minor grid spacing, in units.
pub const GRID_MINOR: f64 = 0.1;

/// Major grid spacing, in units.
pub const GRID_MAJOR: f64 = 1.0;
