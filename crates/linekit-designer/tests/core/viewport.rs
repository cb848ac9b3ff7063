use linekit_designer::model::{Pattern, ShapeKind};
use linekit_designer::projector::{shape_bounds, Bounds};
use linekit_designer::viewport::Viewport;

#[test]
fn test_viewport_creation() {
    let vp = Viewport::new(800.0, 400.0);
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan_x(), 400.0);
    assert_eq!(vp.pan_y(), 200.0);
    assert_eq!(vp.pixels_per_unit(), 200.0);
}

#[test]
fn test_positive_y_goes_down() {
    let vp = Viewport::default();
    let (_, py0) = vp.world_to_pixel(0.0, 0.0);
    let (_, py1) = vp.world_to_pixel(0.0, 1.0);
    assert!(py1 > py0);
}

#[test]
fn test_extents_fit_every_shape_inside_margin() {
    let pattern = Pattern::default();
    for shape in ShapeKind::ALL {
        let bounds = shape_bounds(&pattern, shape).unwrap();
        let mut vp = Viewport::new(800.0, 400.0);
        vp.zoom_extents(&bounds);

        let (x1, y1) = vp.world_to_pixel(bounds.min_x, bounds.min_y);
        let (x2, y2) = vp.world_to_pixel(bounds.max_x, bounds.max_y);
        assert!(x1 >= 40.0 - 1e-6 && x2 <= 760.0 + 1e-6, "{shape}: {x1}..{x2}");
        assert!(y1 >= 40.0 - 1e-6 && y2 <= 360.0 + 1e-6, "{shape}: {y1}..{y2}");
        assert!(((x1 + x2) / 2.0 - 400.0).abs() < 1e-6);
        assert!(((y1 + y2) / 2.0 - 200.0).abs() < 1e-6);
    }
}

#[test]
fn test_extents_respect_custom_pixels_per_unit() {
    let mut vp = Viewport::new(800.0, 400.0).with_pixels_per_unit(100.0);
    vp.zoom_extents(&Bounds::new(0.0, 0.0, 2.0, 1.0));
    // 200 x 100 px at zoom 1; limited by height: 320 / 100
    assert!((vp.zoom() - 3.2).abs() < 1e-12);
}

#[test]
fn test_display() {
    let vp = Viewport::new(800.0, 400.0);
    assert_eq!(vp.to_string(), "Zoom: 1.00x | Pan: (400.0, 200.0)");
}
