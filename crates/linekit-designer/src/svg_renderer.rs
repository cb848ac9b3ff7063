//! SVG preview renderer.
//!
//! Writes projector draw commands as a standalone SVG document sized to the
//! viewport's canvas. Strokes become path data, dots filled circles and
//! labels `<text>` elements rotated about their baseline origin.

use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

use crate::projector::{DrawCommand, Guide, TextPlacement};
use crate::renderer::{grid_lines, PreviewStyle};
use crate::viewport::Viewport;

const INK: &str = "#000000";
const GRID_MINOR: &str = "#eeeeee";
const GRID_MAJOR: &str = "#d0d0d0";
const GUIDE: &str = "#3498db";

/// Render grid as SVG path data, minor and major lines separately.
pub fn render_grid(viewport: &Viewport) -> (String, String) {
    let (width, height) = (viewport.canvas_width(), viewport.canvas_height());
    let mut minor = String::new();
    let mut major = String::new();
    for line in grid_lines(viewport) {
        let path = if line.major { &mut major } else { &mut minor };
        let p = line.position;
        if line.vertical {
            path.push_str(&format!("M {} 0 L {} {} ", p, p, height));
        } else {
            path.push_str(&format!("M 0 {} L {} {} ", p, width, p));
        }
    }
    (minor, major)
}

/// Render straight strokes and arcs as one SVG path data string.
pub fn render_strokes(commands: &[DrawCommand], viewport: &Viewport) -> String {
    let mut path = String::new();
    for command in commands {
        match command {
            DrawCommand::Stroke { from, to } => {
                let (x1, y1) = viewport.world_point_to_pixel(from);
                let (x2, y2) = viewport.world_point_to_pixel(to);
                path.push_str(&format!("M {} {} L {} {} ", x1, y1, x2, y2));
            }
            DrawCommand::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                let r = radius * viewport.scale();
                let point = |angle: f64| {
                    viewport.world_to_pixel(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    )
                };
                let (sx, sy) = point(*start_angle);
                path.push_str(&format!("M {} {} ", sx, sy));
                // A full turn cannot be one SVG arc; split at the midpoint.
                let span = end_angle - start_angle;
                let steps = if span.abs() >= TAU - 1e-9 { 2 } else { 1 };
                for step in 1..=steps {
                    let angle = start_angle + span * step as f64 / steps as f64;
                    let (x, y) = point(angle);
                    let large = u8::from((span / steps as f64).abs() > PI);
                    let sweep = u8::from(span >= 0.0);
                    path.push_str(&format!("A {} {} 0 {} {} {} {} ", r, r, large, sweep, x, y));
                }
            }
            _ => {}
        }
    }
    path
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn render_text(placement: &TextPlacement, viewport: &Viewport) -> String {
    let (origin, rotation) = placement.baseline_origin();
    let (x, y) = viewport.world_point_to_pixel(&origin);
    format!(
        "<text x=\"{x}\" y=\"{y}\" font-family=\"{}\" font-size=\"{}\" fill=\"{INK}\" transform=\"rotate({} {x} {y})\">{}</text>",
        placement.family.css_name(),
        placement.font_size * viewport.scale(),
        rotation.to_degrees(),
        escape(&placement.content),
    )
}

fn render_guide(guide: &Guide, viewport: &Viewport) -> String {
    let style = format!("fill=\"none\" stroke=\"{GUIDE}\" stroke-width=\"1\" stroke-dasharray=\"4 3\"");
    match guide {
        Guide::TextBox { corners } => {
            let points: Vec<String> = corners
                .iter()
                .map(|c| {
                    let (x, y) = viewport.world_point_to_pixel(c);
                    format!("{},{}", x, y)
                })
                .collect();
            format!("<polygon points=\"{}\" {style}/>", points.join(" "))
        }
        Guide::Baseline { from, to } => {
            let (x1, y1) = viewport.world_point_to_pixel(from);
            let (x2, y2) = viewport.world_point_to_pixel(to);
            format!("<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" {style}/>")
        }
        Guide::Circle { center, radius } => {
            let (cx, cy) = viewport.world_point_to_pixel(center);
            let r = radius * viewport.scale();
            format!("<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" {style}/>")
        }
        Guide::Label { at, text } => {
            let (x, y) = viewport.world_point_to_pixel(at);
            format!(
                "<text x=\"{x}\" y=\"{y}\" font-family=\"sans-serif\" font-size=\"12\" fill=\"{GUIDE}\" text-anchor=\"middle\">{}</text>",
                escape(text)
            )
        }
    }
}

/// Render a complete SVG document.
pub fn render_svg(commands: &[DrawCommand], viewport: &Viewport, style: &PreviewStyle) -> String {
    let (width, height) = (viewport.canvas_width(), viewport.canvas_height());
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    let _ = writeln!(svg, "<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");

    if style.show_grid {
        let (minor, major) = render_grid(viewport);
        for (data, color) in [(minor, GRID_MINOR), (major, GRID_MAJOR)] {
            if !data.is_empty() {
                let _ = writeln!(
                    svg,
                    "<path d=\"{}\" stroke=\"{color}\" stroke-width=\"1\" fill=\"none\"/>",
                    data.trim_end()
                );
            }
        }
    }

    for command in commands {
        if let DrawCommand::Guide(guide) = command {
            let _ = writeln!(svg, "{}", render_guide(guide, viewport));
        }
    }

    let strokes = render_strokes(commands, viewport);
    if !strokes.is_empty() {
        let _ = writeln!(
            svg,
            "<path d=\"{}\" stroke=\"{INK}\" stroke-width=\"{}\" fill=\"none\"/>",
            strokes.trim_end(),
            style.line_weight
        );
    }

    for command in commands {
        match command {
            DrawCommand::Dot { at } => {
                let (cx, cy) = viewport.world_point_to_pixel(at);
                let _ = writeln!(
                    svg,
                    "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{}\" fill=\"{INK}\"/>",
                    style.line_weight / 2.0
                );
            }
            DrawCommand::Text(placement) => {
                let _ = writeln!(svg, "{}", render_text(placement, viewport));
            }
            _ => {}
        }
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    fn viewport() -> Viewport {
        let mut viewport = Viewport::new(400.0, 200.0);
        viewport.set_pan(0.0, 100.0);
        viewport
    }

    #[test]
    fn test_stroke_path_data() {
        let commands = [DrawCommand::Stroke {
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 0.0),
        }];
        assert_eq!(render_strokes(&commands, &viewport()), "M 0 100 L 200 100 ");
    }

    #[test]
    fn test_full_circle_arc_is_split() {
        let commands = [DrawCommand::Arc {
            center: Point::new(0.0, 0.0),
            radius: 0.5,
            start_angle: 0.0,
            end_angle: TAU,
        }];
        let data = render_strokes(&commands, &viewport());
        assert_eq!(data.matches('A').count(), 2);
    }

    #[test]
    fn test_document_without_grid() {
        let commands = [DrawCommand::Dot {
            at: Point::new(0.5, 0.0),
        }];
        let style = PreviewStyle {
            line_weight: 2.0,
            show_grid: false,
        };
        let svg = render_svg(&commands, &viewport(), &style);
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains("<circle cx=\"100\" cy=\"100\" r=\"1\""));
        assert!(!svg.contains(GRID_MAJOR));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(escape("A<B & \"C\""), "A&lt;B &amp; &quot;C&quot;");
    }
}
