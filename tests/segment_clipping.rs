use dotplot_wasm::domain::clipping::{
    Regime, SamplingConfig, clip_segment, is_trivially_outside, plan_segments,
};
use dotplot_wasm::domain::dotplot::{Direction, Segment, ViewBox};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn view() -> ViewBox {
    ViewBox::new(0.0, 0.0, 40.0, 100.0)
}

fn contains(view: &ViewBox, s: &Segment) -> bool {
    let eps = 1e-9;
    [s.x1, s.x2].iter().all(|x| *x >= view.x_min() - eps && *x <= view.x_max() + eps)
        && [s.y1, s.y2].iter().all(|y| *y >= view.y_min() - eps && *y <= view.y_max() + eps)
}

#[test]
fn forward_segment_leaving_right_edge_is_cut() {
    let s = Segment::new(10.0, 10.0, 50.0, 90.0, Direction::Forward, 1);
    let c = clip_segment(&s, &view()).unwrap();
    assert_eq!((c.x1, c.y1, c.x2, c.y2), (10.0, 10.0, 40.0, 70.0));
    assert_eq!(c.direction, Direction::Forward);
}

#[test]
fn inside_segment_is_unchanged() {
    let s = Segment::new(5.0, 20.0, 35.0, 80.0, Direction::Forward, 4);
    assert_eq!(clip_segment(&s, &view()), Some(s));
}

#[test]
fn segment_left_of_view_is_rejected() {
    let s = Segment::new(-30.0, 10.0, -5.0, 60.0, Direction::Forward, 2);
    assert!(is_trivially_outside(&s, &view()));
    assert_eq!(clip_segment(&s, &view()), None);
}

#[test]
fn forward_segment_entering_from_below_left() {
    let s = Segment::new(-10.0, -20.0, 20.0, 40.0, Direction::Forward, 1);
    let c = clip_segment(&s, &view()).unwrap();
    assert_eq!((c.x1, c.y1, c.x2, c.y2), (0.0, 0.0, 20.0, 40.0));
}

#[test]
fn point_and_edge_touching_segments() {
    let point = Segment::new(10.0, 10.0, 10.0, 10.0, Direction::Forward, 1);
    assert_eq!(clip_segment(&point, &view()), None);

    let from_origin = Segment::new(0.0, 0.0, 20.0, 50.0, Direction::Forward, 2);
    assert_eq!(clip_segment(&from_origin, &view()), Some(from_origin));
}

#[test]
fn horizontal_segment_is_clamped() {
    let s = Segment::new(-10.0, 30.0, 60.0, 30.0, Direction::Forward, 1);
    let c = clip_segment(&s, &view()).unwrap();
    assert_eq!((c.x1, c.y1, c.x2, c.y2), (0.0, 30.0, 40.0, 30.0));
}

#[test]
fn overview_decimates_by_factor_and_keeps_first_id() {
    let segments: Vec<Segment> = (1..=10)
        .map(|id| Segment::new(0.0, 0.0, id as f64, id as f64, Direction::Forward, id))
        .collect();
    let default = ViewBox::new(0.0, 0.0, 10.0, 10.0);
    let config = SamplingConfig::default().with_factor(4);
    let plan = plan_segments(&segments, &default, &default, &config);
    assert_eq!(plan.regime, Regime::Overview);
    let ids: Vec<u32> = plan.visible.iter().map(|s| s.id).collect();
    assert_eq!(ids, [1, 4, 8]);
    assert_eq!(plan.hits.len(), 3);
    assert!(plan.hits.iter().all(|h| h.width == config.overview_hit_width));
}

#[test]
fn overview_hit_regions_stop_at_id_limit() {
    let segments = vec![
        Segment::new(0.0, 0.0, 5.0, 5.0, Direction::Forward, 1),
        Segment::new(0.0, 0.0, 10.0, 10.0, Direction::Forward, 2000),
    ];
    let default = ViewBox::new(0.0, 0.0, 10.0, 10.0);
    let plan = plan_segments(&segments, &default, &default, &SamplingConfig::default());
    assert_eq!(plan.visible.len(), 2);
    assert_eq!(plan.hits.iter().map(|h| h.segment_id).collect::<Vec<_>>(), [1]);
}

#[test]
fn zoomed_hit_width_scales_with_zoom() {
    let segments = vec![Segment::new(0.0, 0.0, 10.0, 10.0, Direction::Forward, 1)];
    let default = ViewBox::new(0.0, 0.0, 100.0, 100.0);
    let zoomed = ViewBox::new(0.0, 0.0, 50.0, 50.0);
    let plan = plan_segments(&segments, &zoomed, &default, &SamplingConfig::default());
    assert_eq!(plan.regime, Regime::Zoomed);
    assert_eq!(plan.hits[0].width, 1000.0 * 0.5 + 200.0);
    assert_eq!((plan.hits[0].x1, plan.hits[0].y1), (-2.0, -2.0));
    assert_eq!((plan.hits[0].x2, plan.hits[0].y2), (12.0, 12.0));
}

#[quickcheck]
fn clipped_forward_segment_stays_in_view(x1: i16, y1: i16, x2: i16, y2: i16) -> TestResult {
    let (x1, y1, x2, y2) = (x1 as f64 / 100.0, y1 as f64 / 100.0, x2 as f64 / 100.0, y2 as f64 / 100.0);
    let (lo, hi) = if y1 <= y2 { ((x1, y1), (x2, y2)) } else { ((x2, y2), (x1, y1)) };
    if hi.0 <= lo.0 || hi.1 <= lo.1 {
        return TestResult::discard();
    }
    let s = Segment::new(lo.0, lo.1, hi.0, hi.1, Direction::Forward, 1);
    match clip_segment(&s, &view()) {
        Some(c) => TestResult::from_bool(contains(&view(), &c) && c.x1 <= c.x2 && c.y1 <= c.y2),
        None => TestResult::passed(),
    }
}

#[quickcheck]
fn trivially_outside_is_always_excluded(x1: i16, y1: i16, x2: i16, y2: i16) -> TestResult {
    let s = Segment::new(x1 as f64, y1 as f64, x2 as f64, y2 as f64, Direction::Reverse, 1);
    if !is_trivially_outside(&s, &view()) {
        return TestResult::discard();
    }
    TestResult::from_bool(clip_segment(&s, &view()).is_none())
}

#[quickcheck]
fn inside_segments_survive_unchanged(x1: u8, y1: u8, x2: u8, y2: u8) -> TestResult {
    let s = Segment::new(
        (x1 % 41) as f64,
        (y1 % 101) as f64,
        (x2 % 41) as f64,
        (y2 % 101) as f64,
        Direction::Forward,
        1,
    );
    if s.is_point() {
        return TestResult::discard();
    }
    TestResult::from_bool(clip_segment(&s, &view()) == Some(s))
}
