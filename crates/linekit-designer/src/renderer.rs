//! Raster preview renderer.
//!
//! Paints projector draw commands onto a tiny-skia pixmap and converts it to
//! an [`RgbImage`] for saving as PNG. Text is drawn from rusttype glyph
//! outlines so it rotates with the host; when no system font is available
//! for a label's family the label is skipped.

use image::{Rgb, RgbImage};
use linekit_core::constants::{GRID_MAJOR, GRID_MINOR};
use rusttype::{point as rt_point, OutlineBuilder, Scale};
use std::f64::consts::TAU;
use std::path::Path;
use thiserror::Error;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

use crate::font_manager;
use crate::projector::{DrawCommand, Guide, TextPlacement};
use crate::viewport::Viewport;

/// Grid lines closer than this many pixels are not drawn.
const MIN_GRID_SPACING_PX: f64 = 4.0;
const MAX_GRID_LINES: usize = 2000;
/// Arc flattening resolution, segments per full turn.
const ARC_SEGMENTS_PER_TURN: f64 = 96.0;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Presentation switches shared by the SVG and raster adapters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewStyle {
    /// Stroke width in pixels, independent of zoom.
    pub line_weight: f64,
    pub show_grid: bool,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            line_weight: 1.0,
            show_grid: true,
        }
    }
}

/// One grid line in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GridLine {
    pub vertical: bool,
    pub position: f64,
    pub major: bool,
}

/// Grid lines covering the canvas: minor every 0.1 unit, major every unit.
pub(crate) fn grid_lines(viewport: &Viewport) -> Vec<GridLine> {
    let mut lines = Vec::new();
    let top_left = viewport.pixel_to_world(0.0, 0.0);
    let bottom_right = viewport.pixel_to_world(viewport.canvas_width(), viewport.canvas_height());

    for step in [GRID_MINOR, GRID_MAJOR] {
        if step * viewport.scale() < MIN_GRID_SPACING_PX {
            continue;
        }
        let major = step == GRID_MAJOR;
        for (vertical, from, to) in [
            (true, top_left.x, bottom_right.x),
            (false, top_left.y, bottom_right.y),
        ] {
            let first = (from / step).ceil() as i64;
            let last = (to / step).floor() as i64;
            for i in (first..=last).take(MAX_GRID_LINES) {
                let world = i as f64 * step;
                // Minor lines that coincide with a major line are left to it.
                if !major && (world / GRID_MAJOR - (world / GRID_MAJOR).round()).abs() < 1e-9 {
                    continue;
                }
                let (px, py) = viewport.world_to_pixel(world, world);
                lines.push(GridLine {
                    vertical,
                    position: if vertical { px } else { py },
                    major,
                });
            }
        }
    }
    lines
}

/// Canvas points along an arc, flattened for polyline output.
pub(crate) fn arc_points(
    viewport: &Viewport,
    center: (f64, f64),
    radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> Vec<(f64, f64)> {
    let span = end_angle - start_angle;
    let segments = ((span.abs() / TAU) * ARC_SEGMENTS_PER_TURN).ceil().max(2.0) as usize;
    (0..=segments)
        .map(|i| {
            let angle = start_angle + span * i as f64 / segments as f64;
            viewport.world_to_pixel(
                center.0 + radius * angle.cos(),
                center.1 + radius * angle.sin(),
            )
        })
        .collect()
}

fn ink_color() -> Color {
    Color::from_rgba8(0, 0, 0, 255)
}
fn grid_minor_color() -> Color {
    Color::from_rgba8(238, 238, 238, 255)
}
fn grid_major_color() -> Color {
    Color::from_rgba8(208, 208, 208, 255)
}
fn guide_color() -> Color {
    Color::from_rgba8(52, 152, 219, 255)
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn guide_stroke() -> Stroke {
    Stroke {
        width: 1.0,
        dash: StrokeDash::new(vec![4.0, 3.0], 0.0),
        ..Default::default()
    }
}

/// Render draw commands to an RGB image of the viewport's canvas size.
pub fn render_image(
    commands: &[DrawCommand],
    viewport: &Viewport,
    style: &PreviewStyle,
) -> Result<RgbImage, RenderError> {
    let width = viewport.canvas_width().round().max(0.0) as u32;
    let height = viewport.canvas_height().round().max(0.0) as u32;
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return Err(RenderError::InvalidSize { width, height });
    };
    pixmap.fill(Color::WHITE);

    if style.show_grid {
        paint_grid(&mut pixmap, viewport);
    }

    let ink = paint(ink_color());
    let stroke = Stroke {
        width: style.line_weight as f32,
        ..Default::default()
    };

    for command in commands {
        match command {
            DrawCommand::Stroke { from, to } => {
                let (x1, y1) = viewport.world_point_to_pixel(from);
                let (x2, y2) = viewport.world_point_to_pixel(to);
                let mut pb = PathBuilder::new();
                pb.move_to(x1 as f32, y1 as f32);
                pb.line_to(x2 as f32, y2 as f32);
                if let Some(path) = pb.finish() {
                    pixmap.stroke_path(&path, &ink, &stroke, Transform::identity(), None);
                }
            }
            DrawCommand::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                let points = arc_points(
                    viewport,
                    (center.x, center.y),
                    *radius,
                    *start_angle,
                    *end_angle,
                );
                if let Some(path) = polyline(&points) {
                    pixmap.stroke_path(&path, &ink, &stroke, Transform::identity(), None);
                }
            }
            DrawCommand::Dot { at } => {
                let (x, y) = viewport.world_point_to_pixel(at);
                let r = (style.line_weight / 2.0).max(0.5) as f32;
                if let Some(path) = PathBuilder::from_circle(x as f32, y as f32, r) {
                    pixmap.fill_path(&path, &ink, FillRule::Winding, Transform::identity(), None);
                }
            }
            DrawCommand::Text(placement) => paint_text(&mut pixmap, viewport, placement, &ink),
            DrawCommand::Guide(guide) => paint_guide(&mut pixmap, viewport, guide),
        }
    }

    // Pixmap data is premultiplied RGBA; the background is opaque.
    let data = pixmap.data();
    Ok(RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    }))
}

/// Render and save as PNG (format chosen from the file extension).
pub fn save_png(
    commands: &[DrawCommand],
    viewport: &Viewport,
    style: &PreviewStyle,
    path: &Path,
) -> Result<(), RenderError> {
    let image = render_image(commands, viewport, style)?;
    image.save(path)?;
    tracing::info!("Wrote preview image {}", path.display());
    Ok(())
}

fn polyline(points: &[(f64, f64)]) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    let (first, rest) = points.split_first()?;
    pb.move_to(first.0 as f32, first.1 as f32);
    for (x, y) in rest {
        pb.line_to(*x as f32, *y as f32);
    }
    pb.finish()
}

fn paint_grid(pixmap: &mut Pixmap, viewport: &Viewport) {
    let (w, h) = (viewport.canvas_width() as f32, viewport.canvas_height() as f32);
    let stroke = Stroke {
        width: 1.0,
        ..Default::default()
    };
    for major in [false, true] {
        let mut pb = PathBuilder::new();
        for line in grid_lines(viewport).iter().filter(|l| l.major == major) {
            let p = line.position as f32;
            if line.vertical {
                pb.move_to(p, 0.0);
                pb.line_to(p, h);
            } else {
                pb.move_to(0.0, p);
                pb.line_to(w, p);
            }
        }
        let color = if major {
            grid_major_color()
        } else {
            grid_minor_color()
        };
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
        }
    }
}

fn paint_guide(pixmap: &mut Pixmap, viewport: &Viewport, guide: &Guide) {
    let color = paint(guide_color());
    let stroke = guide_stroke();
    let path = match guide {
        Guide::TextBox { corners } => {
            let mut points: Vec<(f64, f64)> = corners
                .iter()
                .map(|c| viewport.world_point_to_pixel(c))
                .collect();
            points.push(points[0]);
            polyline(&points)
        }
        Guide::Baseline { from, to } => polyline(&[
            viewport.world_point_to_pixel(from),
            viewport.world_point_to_pixel(to),
        ]),
        Guide::Circle { center, radius } => {
            polyline(&arc_points(viewport, (center.x, center.y), *radius, 0.0, TAU))
        }
        Guide::Label { .. } => None,
    };
    if let Some(path) = path {
        pixmap.stroke_path(&path, &color, &stroke, Transform::identity(), None);
    }
}

/// Feeds rusttype glyph outlines into a tiny-skia path, rotated about the
/// baseline origin and placed on the canvas.
struct GlyphPathBuilder {
    pb: PathBuilder,
    origin: (f64, f64),
    sin: f64,
    cos: f64,
}

impl GlyphPathBuilder {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        let (x, y) = (x as f64, y as f64);
        (
            (self.origin.0 + x * self.cos - y * self.sin) as f32,
            (self.origin.1 + x * self.sin + y * self.cos) as f32,
        )
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.pb.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.pb.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.pb.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.pb.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.pb.close();
    }
}

fn paint_text(pixmap: &mut Pixmap, viewport: &Viewport, placement: &TextPlacement, ink: &Paint) {
    let Some(font) = font_manager::font_for(placement.family) else {
        tracing::warn!(
            "No {} font available, skipping label {:?}",
            placement.family,
            placement.content
        );
        return;
    };
    let (origin, rotation) = placement.baseline_origin();
    let (sin, cos) = rotation.sin_cos();
    let mut builder = GlyphPathBuilder {
        pb: PathBuilder::new(),
        origin: viewport.world_point_to_pixel(&origin),
        sin,
        cos,
    };

    let scale = Scale::uniform((placement.font_size * viewport.scale()) as f32);
    for glyph in font.layout(&placement.content, scale, rt_point(0.0, 0.0)) {
        glyph.build_outline(&mut builder);
    }
    if let Some(path) = builder.pb.finish() {
        pixmap.fill_path(&path, ink, FillRule::Winding, Transform::identity(), None);
    }
}
