//! View state of the preview canvas.
//!
//! Converts between drawing units (pattern space, Y down) and canvas
//! pixels. One unit spans `pixels_per_unit` pixels at zoom 1; pan is the
//! pixel position of the drawing origin.

use linekit_core::constants::{EXTENTS_MARGIN_PX, MAX_ZOOM, MIN_ZOOM, PIXELS_PER_UNIT, ZOOM_STEP};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Point;
use crate::projector::Bounds;

/// Zoom and pan of the preview canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    pixels_per_unit: f64,
    min_zoom: f64,
    max_zoom: f64,
    zoom_step: f64,
}

impl Viewport {
    /// Creates a viewport with the origin at the canvas center.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: canvas_width / 2.0,
            pan_y: canvas_height / 2.0,
            canvas_width,
            canvas_height,
            pixels_per_unit: PIXELS_PER_UNIT,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
        }
    }

    pub fn with_pixels_per_unit(mut self, pixels_per_unit: f64) -> Self {
        if pixels_per_unit > 0.0 && pixels_per_unit.is_finite() {
            self.pixels_per_unit = pixels_per_unit;
        }
        self
    }

    /// Replaces the zoom range and step; invalid ranges are ignored.
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64, step: f64) -> Self {
        if min_zoom > 0.0 && min_zoom <= max_zoom {
            self.min_zoom = min_zoom;
            self.max_zoom = max_zoom;
            self.zoom = self.zoom.clamp(min_zoom, max_zoom);
        }
        if step > 1.0 {
            self.zoom_step = step;
        }
        self
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }

    /// Pixels per drawing unit at the current zoom.
    pub fn scale(&self) -> f64 {
        self.pixels_per_unit * self.zoom
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the zoom range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * self.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / self.zoom_step);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a delta amount in pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Converts canvas pixels to drawing units.
    ///
    /// ```text
    /// world_x = (pixel_x - pan_x) / (pixels_per_unit * zoom)
    /// world_y = (pixel_y - pan_y) / (pixels_per_unit * zoom)
    /// ```
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        let scale = self.scale();
        Point::new((pixel_x - self.pan_x) / scale, (pixel_y - self.pan_y) / scale)
    }

    /// Converts drawing units to canvas pixels. Both spaces are Y down.
    pub fn world_to_pixel(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        let scale = self.scale();
        (world_x * scale + self.pan_x, world_y * scale + self.pan_y)
    }

    pub fn world_point_to_pixel(&self, point: &Point) -> (f64, f64) {
        self.world_to_pixel(point.x, point.y)
    }

    /// Fits `bounds` into the canvas leaving `margin` pixels on every side.
    ///
    /// Degenerate bounds (zero width or height) fit along the other axis
    /// only; bounds with no extent at all just center.
    pub fn zoom_extents_with_margin(&mut self, bounds: &Bounds, margin: f64) {
        let width_px = bounds.width() * self.pixels_per_unit;
        let height_px = bounds.height() * self.pixels_per_unit;
        let available_w = (self.canvas_width - 2.0 * margin).max(1.0);
        let available_h = (self.canvas_height - 2.0 * margin).max(1.0);

        let fit_x = if width_px > 0.0 {
            available_w / width_px
        } else {
            f64::INFINITY
        };
        let fit_y = if height_px > 0.0 {
            available_h / height_px
        } else {
            f64::INFINITY
        };
        let fit = fit_x.min(fit_y);
        if fit.is_finite() {
            self.zoom = fit.min(self.max_zoom).max(self.min_zoom);
        }

        let center = bounds.center();
        self.pan_x = self.canvas_width / 2.0 - center.x * self.scale();
        self.pan_y = self.canvas_height / 2.0 - center.y * self.scale();
        tracing::debug!("Zoom extents: {}", self);
    }

    /// Fits `bounds` with the default 40 px margin.
    pub fn zoom_extents(&mut self, bounds: &Bounds) {
        self.zoom_extents_with_margin(bounds, EXTENTS_MARGIN_PX);
    }

    /// Centers the view on a drawing-space coordinate.
    pub fn center_on(&mut self, world_x: f64, world_y: f64) {
        self.pan_x = self.canvas_width / 2.0 - world_x * self.scale();
        self.pan_y = self.canvas_height / 2.0 - world_y * self.scale();
    }

    /// Back to zoom 1 with the origin at the canvas center.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = self.canvas_width / 2.0;
        self.pan_y = self.canvas_height / 2.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 400.0)
    }
}
