use linekit_designer::measure::ApproximateMeasurer;
use linekit_designer::model::{Pattern, PatternElement, RotationType, ShapeKind, TextSpec};
use linekit_designer::projector::{
    render, shape_bounds, upright_flip, CircleHost, DrawCommand, Guide, RectangleHost,
    RenderOptions, TriangleHost,
};
use linekit_core::constants::MAX_REPETITIONS;
use proptest::prelude::*;

fn count(commands: &[DrawCommand], pred: impl Fn(&DrawCommand) -> bool) -> usize {
    commands.iter().filter(|c| pred(c)).count()
}

fn texts(commands: &[DrawCommand]) -> Vec<&linekit_designer::projector::TextPlacement> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text(t) => Some(t),
            _ => None,
        })
        .collect()
}

#[test]
fn test_line_walks_eight_repetitions_plus_first_element() {
    let pattern = Pattern::default();
    let commands = render(
        &pattern,
        ShapeKind::Line,
        &ApproximateMeasurer,
        RenderOptions::default(),
    );
    assert_eq!(count(&commands, |c| matches!(c, DrawCommand::Stroke { .. })), 9);
    assert_eq!(texts(&commands).len(), 8);

    let last = commands.last().unwrap();
    assert_eq!(
        last,
        &DrawCommand::Stroke {
            from: linekit_designer::Point::new(16.0, 0.0),
            to: linekit_designer::Point::new(17.0, 0.0),
        }
    );
}

#[test]
fn test_circle_emits_arcs() {
    let pattern = Pattern::default();
    let commands = render(
        &pattern,
        ShapeKind::Circle,
        &ApproximateMeasurer,
        RenderOptions::default(),
    );
    assert_eq!(count(&commands, |c| matches!(c, DrawCommand::Arc { .. })), 7);
    assert_eq!(count(&commands, |c| matches!(c, DrawCommand::Stroke { .. })), 0);
}

#[test]
fn test_circle_text_flips_on_lower_half() {
    let mut label = TextSpec::new("UP");
    label.rotation_type = RotationType::Upright;
    let pattern = Pattern::from_elements([
        PatternElement::dash(0.5),
        PatternElement::Text(label),
        PatternElement::gap(0.5),
    ])
    .unwrap();
    let commands = render(
        &pattern,
        ShapeKind::Circle,
        &ApproximateMeasurer,
        RenderOptions::default(),
    );
    let placed = texts(&commands);
    // Some labels sit on the top half, some on the bottom.
    assert!(placed.iter().any(|t| t.flipped));
    assert!(placed.iter().any(|t| !t.flipped));
    for t in placed {
        assert_eq!(t.flipped, t.anchor.y > 1e-9 && t.flipped);
    }
}

#[test]
fn test_zero_length_pattern_renders_nothing() {
    let pattern = Pattern::from_elements([PatternElement::Dot, PatternElement::Dot]).unwrap();
    for shape in ShapeKind::ALL {
        let commands = render(&pattern, shape, &ApproximateMeasurer, RenderOptions::default());
        assert!(commands.is_empty());
        assert!(shape_bounds(&pattern, shape).is_none());
    }
}

#[test]
fn test_guides_only_when_enabled() {
    let pattern = Pattern::default();
    let plain = render(
        &pattern,
        ShapeKind::Rectangle,
        &ApproximateMeasurer,
        RenderOptions::default(),
    );
    assert_eq!(count(&plain, |c| matches!(c, DrawCommand::Guide(_))), 0);

    let guided = render(
        &pattern,
        ShapeKind::Rectangle,
        &ApproximateMeasurer,
        RenderOptions {
            show_text_guides: true,
        },
    );
    let boxes = count(&guided, |c| {
        matches!(c, DrawCommand::Guide(Guide::TextBox { .. }))
    });
    assert_eq!(boxes, texts(&guided).len());
    assert_eq!(
        count(&guided, |c| matches!(c, DrawCommand::Guide(Guide::Baseline { .. }))),
        4
    );
}

#[test]
fn test_minimum_circle_label() {
    let pattern =
        Pattern::from_elements([PatternElement::dash(0.1), PatternElement::gap(0.1)]).unwrap();
    assert!(CircleHost::for_pattern(&pattern).min_radius_applied());
    let commands = render(
        &pattern,
        ShapeKind::Circle,
        &ApproximateMeasurer,
        RenderOptions {
            show_text_guides: true,
        },
    );
    assert!(commands.iter().any(|c| matches!(
        c,
        DrawCommand::Guide(Guide::Label { text, .. }) if text.contains("Min radius")
    )));
}

#[test]
fn test_upright_flip_range() {
    assert!(!upright_flip(90.0));
    assert!(upright_flip(91.0));
    assert!(upright_flip(269.0));
    assert!(!upright_flip(270.0));
}

#[test]
fn test_bounds_per_shape() {
    let pattern = Pattern::default();
    let line = shape_bounds(&pattern, ShapeKind::Line).unwrap();
    assert!((line.width() - 16.0).abs() < 1e-9);

    let circle = shape_bounds(&pattern, ShapeKind::Circle).unwrap();
    assert!((circle.center().x).abs() < 1e-12);

    let triangle = shape_bounds(&pattern, ShapeKind::Triangle).unwrap();
    let host = TriangleHost::for_pattern(&pattern);
    assert_eq!(triangle.max_x, host.base);
    assert_eq!(triangle.max_y, host.height);
}

#[test]
fn test_tiny_pattern_length_is_bounded() {
    let pattern =
        Pattern::from_elements([PatternElement::dash(1e-9), PatternElement::gap(1e-9)]).unwrap();
    let is_mark = |c: &DrawCommand| matches!(c, DrawCommand::Stroke { .. } | DrawCommand::Arc { .. });

    let circle = render(&pattern, ShapeKind::Circle, &ApproximateMeasurer, RenderOptions::default());
    assert_eq!(CircleHost::for_pattern(&pattern).repetitions(), MAX_REPETITIONS);
    assert_eq!(count(&circle, is_mark), MAX_REPETITIONS + 1);

    let rectangle = render(
        &pattern,
        ShapeKind::Rectangle,
        &ApproximateMeasurer,
        RenderOptions::default(),
    );
    assert_eq!(count(&rectangle, is_mark), 4 * (MAX_REPETITIONS + 1));

    let triangle = render(
        &pattern,
        ShapeKind::Triangle,
        &ApproximateMeasurer,
        RenderOptions::default(),
    );
    assert!(!triangle.is_empty());
    assert!(count(&triangle, is_mark) <= 3 * (MAX_REPETITIONS + 1));
}

#[test]
fn test_polygon_corners_add_no_extra_strokes() {
    // 2.75 x 2 host: whole repetitions per edge plus one closing dash
    let pattern =
        Pattern::from_elements([PatternElement::dash(0.5), PatternElement::gap(0.25)]).unwrap();
    let host = RectangleHost::for_pattern(&pattern);
    let commands = render(
        &pattern,
        ShapeKind::Rectangle,
        &ApproximateMeasurer,
        RenderOptions::default(),
    );
    let expected: usize = [host.width, host.height, host.width, host.height]
        .iter()
        .map(|len| (len / 0.75 + 1e-9).floor() as usize + 1)
        .sum();
    assert_eq!(
        count(&commands, |c| matches!(c, DrawCommand::Stroke { .. })),
        expected
    );
}

proptest! {
    #[test]
    fn prop_rectangle_dimensions(dash in 0.001f64..50.0, gap in 0.0f64..50.0) {
        let pattern = Pattern::from_elements([
            PatternElement::dash(dash),
            PatternElement::gap(gap),
        ])
        .unwrap();
        let host = RectangleHost::for_pattern(&pattern);
        let p = dash + gap;
        prop_assert!(host.width.is_finite() && host.width > 0.0);
        prop_assert!(host.height.is_finite() && host.height > 0.0);
        prop_assert!((host.width - (3.0 * p + dash).max(0.8)).abs() < 1e-9);
        prop_assert!((host.height - (2.0 * p + dash).max(0.8)).abs() < 1e-9);
    }

    #[test]
    fn prop_polygon_strokes_stay_on_the_outline(dash in 0.01f64..3.0, gap in 0.01f64..3.0) {
        let pattern = Pattern::from_elements([
            PatternElement::dash(dash),
            PatternElement::gap(gap),
        ])
        .unwrap();
        let host = RectangleHost::for_pattern(&pattern);
        let commands = render(
            &pattern,
            ShapeKind::Rectangle,
            &ApproximateMeasurer,
            RenderOptions::default(),
        );
        for command in commands {
            if let DrawCommand::Stroke { from, to } = command {
                for p in [from, to] {
                    prop_assert!(p.x > -1e-9 && p.x < host.width + 1e-9);
                    prop_assert!(p.y > -1e-9 && p.y < host.height + 1e-9);
                }
            }
        }
    }
}
