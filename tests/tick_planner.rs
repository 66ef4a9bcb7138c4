use dotplot_wasm::domain::axis::{
    NumberFormat, TickOptions, axis_ticks, compute_ticks, format_tick_label,
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

/// Range from a mantissa and a decimal exponent in [-6, 9].
fn range_of(mantissa: u32, exponent: i8) -> f64 {
    (mantissa % 100_000 + 1) as f64 * 10f64.powi((exponent as i32).rem_euclid(16) - 6)
}

fn mantissa(step: f64) -> f64 {
    let magnitude = 10f64.powf((step.log10() + 1e-9).floor());
    step / magnitude
}

#[test]
fn range_950_gives_step_100_in_10_sections() {
    let plan = compute_ticks(950.0, &TickOptions::default()).unwrap();
    assert_eq!(plan.step, 100.0);
    assert_eq!(plan.section_count, 10);
}

#[test]
fn zero_range_is_an_error_not_a_loop() {
    assert!(compute_ticks(0.0, &TickOptions::default()).is_err());
}

#[test]
fn ticks_stop_before_axis_end() {
    let ticks = axis_ticks(0.0, 1000.0, 740.0, &NumberFormat::plain()).unwrap();
    let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, [200.0, 400.0, 600.0, 800.0]);
    assert!(ticks.iter().all(|t| t.pixel_offset < 740.0));
}

#[test]
fn ticks_follow_the_view_origin() {
    let ticks = axis_ticks(1000.0, 500.0, 740.0, &NumberFormat::plain()).unwrap();
    assert_eq!(ticks.first().map(|t| t.value), Some(1100.0));
    assert_eq!(ticks.first().map(|t| t.label.as_str()), Some("1,100"));
    let first = ticks[0].pixel_offset;
    assert!((first - 148.0).abs() < 1e-9, "offset {}", first);
}

#[test]
fn labels_keep_only_the_step_magnitude() {
    let plain = NumberFormat::plain();
    assert_eq!(format_tick_label(12_345.0, 1000.0, &plain), "12,000");
    assert_eq!(format_tick_label(0.26, 0.1, &plain), "0.3");
    assert_eq!(format_tick_label(1_500_000.0, 500_000.0, &NumberFormat::default()), "1\u{202F}500\u{202F}000");
}

#[quickcheck]
fn default_options_give_6_to_11_sections(m: u32, e: i8) -> bool {
    let plan = compute_ticks(range_of(m, e), &TickOptions::default()).unwrap();
    (6..=11).contains(&plan.section_count)
}

#[quickcheck]
fn step_mantissa_is_nice(m: u32, e: i8) -> TestResult {
    let plan = compute_ticks(range_of(m, e), &TickOptions::default()).unwrap();
    let found = mantissa(plan.step);
    let nice = [1.0, 2.0, 2.5, 5.0, 10.0].iter().any(|n| (found - n).abs() < 1e-6 * n);
    if nice { TestResult::passed() } else { TestResult::error(format!("step {}", plan.step)) }
}

#[quickcheck]
fn doubling_range_never_shrinks_step(m: u32, e: i8) -> bool {
    let range = range_of(m, e);
    let options = TickOptions::default();
    let single = compute_ticks(range, &options).unwrap().step;
    let double = compute_ticks(range * 2.0, &options).unwrap().step;
    double >= single * (1.0 - 1e-12)
}

#[quickcheck]
fn sections_cover_the_range(m: u32, e: i8) -> bool {
    let range = range_of(m, e);
    let plan = compute_ticks(range, &TickOptions::for_axis(200.0)).unwrap();
    plan.step * plan.section_count as f64 >= range * (1.0 - 1e-12)
}
