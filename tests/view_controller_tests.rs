use gpui_timeline::camera::{Camera, CameraState};
use gpui_timeline::data_types::{DateSpec, GroupingMode, Record, TimelineConfig, Viewport};
use gpui_timeline::engine::TimelineEngine;
use gpui_timeline::layout::StableLayout;
use gpui_timeline::text::TextMeasure;
use gpui_timeline::view_controller::ViewController;
use std::sync::Arc;

struct FixedMeasure(f64);

impl TextMeasure for FixedMeasure {
    fn measure(&self, _text: &str, _font_size: f64) -> f64 {
        self.0
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn camera_over(extent: (i32, i32), viewport: Viewport, content_height: f64) -> Camera {
    let mut camera = Camera::new(&TimelineConfig::default(), viewport);
    camera.set_extent(Some(extent), content_height);
    camera
}

#[test]
fn test_zoom_to_badge_fills_plot_width() {
    let camera = camera_over((100, 900), Viewport::new(750.0, 400.0), 58.0);
    let target = ViewController::zoom_to_range_target(&camera, 100, 105);

    // pad = max(0.15 * 5, 20) = 20
    let left = camera.year_to_x_at(&target, 80.0);
    let right = camera.year_to_x_at(&target, 125.0);
    assert!(close(left, camera.left_margin()), "left edge at {left}");
    assert!(close(right, 750.0), "right edge at {right}");
    assert!(close(target.scale, 600.0 / 450.0));
}

#[test]
fn test_zoom_to_wide_range_uses_proportional_padding() {
    let camera = camera_over((0, 2000), Viewport::new(1150.0, 400.0), 58.0);
    let target = ViewController::zoom_to_range_target(&camera, 200, 600);
    // pad = 0.15 * 400 = 60
    assert!(close(camera.year_to_x_at(&target, 140.0), 150.0));
    assert!(close(camera.year_to_x_at(&target, 660.0), 1150.0));
}

#[test]
fn test_zoom_to_range_clamps_and_centers() {
    let camera = camera_over((0, 100_000), Viewport::new(1150.0, 400.0), 58.0);
    // Needs a scale below the minimum: centered at the minimum scale instead.
    let target = ViewController::zoom_to_range_target(&camera, 0, 100_000);
    assert_eq!(target.scale, camera.min_scale());
    let center = camera.left_margin() + camera.plot_width() / 2.0;
    assert!(close(camera.year_to_x_at(&target, 50_000.0), center));
}

#[test]
fn test_fit_frames_the_extent() {
    let camera = camera_over((-500, 1500), Viewport::new(1150.0, 400.0), 2000.0);
    let target = ViewController::fit_target(&camera, None);
    assert!(close(camera.year_to_x_at(&target, -500.0), camera.left_margin()));
    assert!(close(camera.year_to_x_at(&target, 1500.0), 1150.0));
    assert_eq!(target.offset_y, 0.0);
}

#[test]
fn test_fit_centers_on_the_focus_row_when_content_is_tall() {
    let camera = camera_over((-500, 1500), Viewport::new(1150.0, 400.0), 2000.0);
    let target = ViewController::fit_target(&camera, Some(1000.0));
    assert_eq!(target.offset_y, 200.0 - 1000.0);

    let short = camera_over((-500, 1500), Viewport::new(1150.0, 400.0), 300.0);
    let target = ViewController::fit_target(&short, Some(250.0));
    assert_eq!(target.offset_y, 0.0);
}

#[test]
fn test_zoom_steps_cancel_out() {
    let mut camera = camera_over((-500, 1500), Viewport::new(1150.0, 400.0), 2000.0);
    camera.jump_to(CameraState {
        offset_x: -1234.0,
        offset_y: -50.0,
        scale: 0.8,
    });
    let before = camera.target();
    camera.set_target(ViewController::zoom_step_target(&camera, 1.5));
    assert!(close(camera.target().scale, 1.2));
    camera.set_target(ViewController::zoom_step_target(&camera, 1.0 / 1.5));
    let after = camera.target();
    assert!(close(after.scale, before.scale));
    assert!(close(after.offset_x, before.offset_x));
    assert_eq!(after.offset_y, before.offset_y);
}

#[test]
fn test_separating_scale_only_considers_row_neighbors() {
    let config = TimelineConfig::default();
    let measure = FixedMeasure(40.0);
    let records = vec![
        Record::event("a", "a", DateSpec::ce(1000)).with_groups("Valois", ""),
        Record::event("b", "b", DateSpec::ce(1020)).with_groups("Valois", ""),
        Record::event("c", "c", DateSpec::ce(1100)).with_groups("Valois", ""),
    ];
    let layout = StableLayout::compute(&records, GroupingMode::Dynasty, &measure, &config);
    assert_eq!(layout.total_rows(), 1);

    // label width 14 + 40 + 6 = 60, plus 12 padding over a 20 year gap
    let entry = layout.entry_index_for_id(&"b".into()).unwrap();
    let needed = ViewController::separating_scale(&layout, &records, entry, &config).unwrap();
    assert!(close(needed, 72.0 / 200.0));
}

#[test]
fn test_scroll_to_entry_keeps_zoom_when_nothing_collides() {
    let config = TimelineConfig::default();
    let mut engine = TimelineEngine::new(config, Viewport::new(1150.0, 400.0))
        .with_text_measure(Arc::new(FixedMeasure(40.0)));
    engine.set_records(vec![
        Record::event("a", "a", DateSpec::ce(1000)).with_groups("Valois", ""),
        Record::event("b", "b", DateSpec::ce(1400)).with_groups("Valois", ""),
    ]);
    let before = engine.camera().target().scale;
    assert!(engine.scroll_to_entry(&"b".into()));
    let target = engine.camera().target();
    assert_eq!(target.scale, before);
    let center = engine.camera().left_margin() + engine.camera().plot_width() / 2.0;
    assert!(close(engine.camera().year_to_x_at(&target, 1400.0), center));
}

#[test]
fn test_scroll_to_entry_zooms_in_just_enough() {
    let config = TimelineConfig::default();
    let mut engine = TimelineEngine::new(config, Viewport::new(1150.0, 400.0))
        .with_text_measure(Arc::new(FixedMeasure(40.0)));
    let mut records = vec![
        Record::event("a", "a", DateSpec::ce(1000)).with_groups("Valois", ""),
        Record::event("b", "b", DateSpec::ce(1020)).with_groups("Valois", ""),
    ];
    // Widen the extent so the fitted scale is far too small for a 20 year gap.
    records.push(Record::event("z", "z", DateSpec::ce(1900)).with_groups("Bourbon", ""));
    engine.set_records(records);
    assert!(engine.camera().target().scale < 0.36);

    assert!(engine.scroll_to_entry(&"b".into()));
    assert!(close(engine.camera().target().scale, 0.36));
    assert!(!engine.scroll_to_entry(&"missing".into()));
}
