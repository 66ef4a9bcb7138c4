use dotplot_wasm::domain::dotplot::{ViewBox, invert, screen_to_data, view_box_transform};
use dotplot_wasm::infrastructure::RecordingSurface;
use kurbo::Point;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

#[test]
fn plot_corners_map_to_view_corners() {
    let vb = ViewBox::new(100.0, 200.0, 1000.0, 500.0);
    let t = view_box_transform(&vb, 740.0, 370.0, Point::new(60.0, 0.0)).unwrap();
    let inverse = invert(t).unwrap();

    let top_left = inverse * Point::new(60.0, 0.0);
    assert!((top_left.x - 100.0).abs() < 1e-9);
    assert!((top_left.y - 200.0).abs() < 1e-9);
    let bottom_right = inverse * Point::new(800.0, 370.0);
    assert!((bottom_right.x - 1100.0).abs() < 1e-9);
    assert!((bottom_right.y - 700.0).abs() < 1e-9);
}

#[test]
fn surface_without_scene_maps_nothing() {
    let surface = RecordingSurface::beside_axis(60.0);
    assert_eq!(screen_to_data(Point::new(10.0, 10.0), &surface), None);
}

#[quickcheck]
fn screen_to_data_inverts_the_view_transform(
    view: (i16, i16, u16, u16),
    point: (u16, u16),
) -> TestResult {
    let (x, y, w, h) = view;
    if w == 0 || h == 0 {
        return TestResult::discard();
    }
    let vb = ViewBox::new(x as f64, y as f64, w as f64 / 3.0, h as f64 / 7.0);
    let Some(t) = view_box_transform(&vb, 740.0, 740.0, Point::new(60.0, 0.0)) else {
        return TestResult::failed();
    };
    let data = Point::new(
        vb.x + vb.width * (point.0 as f64 / 65535.0),
        vb.y + vb.height * (point.1 as f64 / 65535.0),
    );
    let back = invert(t).unwrap() * (t * data);
    let magnitude = x.unsigned_abs().max(y.unsigned_abs()) as f64;
    let tolerance = 1e-9 * vb.width.max(vb.height).max(magnitude).max(1.0);
    TestResult::from_bool((back.x - data.x).abs() < tolerance && (back.y - data.y).abs() < tolerance)
}
