use linekit_designer::measure::MeasureBackend;
use linekit_designer::model::ShapeKind;
use linekit_designer::session::EditorSession;
use linekit_designer::svg_renderer::{render_grid, render_strokes};

fn session(shape: ShapeKind) -> EditorSession {
    let mut session = EditorSession::new();
    session.backend = MeasureBackend::Approximate;
    session.set_shape(shape);
    session
}

#[test]
fn test_every_shape_renders_a_document() {
    for shape in ShapeKind::ALL {
        let svg = session(shape).render_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("<path d=\"M"), "{shape} has no strokes");
        assert!(svg.contains(">TEXT</text>"), "{shape} has no labels");
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}

#[test]
fn test_circle_uses_arc_commands() {
    let session = session(ShapeKind::Circle);
    let data = render_strokes(&session.render(), &session.viewport);
    assert!(data.contains(" A "));
    assert!(!data.contains(" L "));
}

#[test]
fn test_grid_toggle() {
    let mut session = session(ShapeKind::Line);
    let (minor, major) = render_grid(&session.viewport);
    assert!(!minor.is_empty() || !major.is_empty());
    assert!(session.render_svg().contains("#d0d0d0"));

    session.style.show_grid = false;
    assert!(!session.render_svg().contains("#d0d0d0"));
}

#[test]
fn test_guides_add_text_boxes() {
    let mut session = session(ShapeKind::Rectangle);
    assert!(!session.render_svg().contains("<polygon"));
    session.set_show_text_guides(true);
    let svg = session.render_svg();
    assert!(svg.contains("<polygon"));
    assert!(svg.contains("stroke-dasharray"));
}

#[test]
fn test_label_text_is_escaped() {
    let mut session = session(ShapeKind::Line);
    session
        .import(r#"A,1,["A&B",STANDARD,S=0.1,U=0,X=0,Y=0],-0.5"#)
        .unwrap();
    let svg = session.render_svg();
    assert!(svg.contains(">A&amp;B</text>"));
}
