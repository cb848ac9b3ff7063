use linekit_core::ExportError;
use linekit_designer::measure::MeasureBackend;
use linekit_designer::model::ShapeKind;
use linekit_designer::session::EditorSession;
use linekit_designer::PreviewStyle;
use tempfile::TempDir;

fn session() -> EditorSession {
    let mut session = EditorSession::new();
    session.backend = MeasureBackend::Approximate;
    session
}

#[test]
fn test_export_writes_named_lin_file() {
    let dir = TempDir::new().unwrap();
    let mut session = session();
    session
        .import("*DASHDOT,Dash dot line\nA,1,-0.5,0,-0.5")
        .unwrap();

    let path = session.export_lin(dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "DASHDOT.lin");
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "*DASHDOT,Dash dot line\nA,1,-0.5,0,-0.5\n");
    assert!(!session.is_modified);
}

#[test]
fn test_export_refuses_invalid_pattern() {
    let dir = TempDir::new().unwrap();
    let mut session = session();
    session.import("A,1").unwrap();

    let err = session.export_lin(dir.path()).unwrap_err();
    assert!(matches!(err, ExportError::Invalid(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_export_into_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let mut session = session();
    let err = session.export_lin(dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, ExportError::Io(_)));
}

#[test]
fn test_png_preview_is_written() {
    let dir = TempDir::new().unwrap();
    let mut session = session();
    session.set_shape(ShapeKind::Triangle);
    session.style = PreviewStyle {
        line_weight: 2.0,
        show_grid: true,
    };
    let path = dir.path().join("preview.png");
    linekit_designer::save_png(&session.render(), &session.viewport, &session.style, &path)
        .unwrap();

    let image = image::open(&path).unwrap();
    assert_eq!(image.width(), 800);
    assert_eq!(image.height(), 400);
}
