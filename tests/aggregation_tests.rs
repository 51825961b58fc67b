use gpui_timeline::camera::{Camera, CameraState};
use gpui_timeline::data_types::{DateSpec, GroupingMode, Record, TimelineConfig, Viewport};
use gpui_timeline::frame::Frame;
use gpui_timeline::layout::StableLayout;
use gpui_timeline::text::TextMeasure;
use gpui_timeline::view_controller::ViewController;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Every label measures the same.
struct FixedMeasure(f64);

impl TextMeasure for FixedMeasure {
    fn measure(&self, _text: &str, _font_size: f64) -> f64 {
        self.0
    }
}

fn scenario_config() -> TimelineConfig {
    TimelineConfig {
        glyph_inset: 0.0,
        label_padding: 0.0,
        layout_reference_scale: 5.0,
        ..TimelineConfig::default()
    }
}

fn event(id: &str, year: i32) -> Record {
    Record::event(id, id, DateSpec::from_ordering_year(year))
        .with_groups("Capétiens", "Moyen Âge")
}

fn fitted_camera(layout: &StableLayout, config: &TimelineConfig, viewport: Viewport) -> Camera {
    let mut camera = Camera::new(config, viewport);
    camera.set_extent(Some(layout.year_range), layout.content_height);
    camera.jump_to(ViewController::fit_target(&camera, None));
    camera
}

#[test]
fn test_colliding_pair_folds_into_badge() {
    let config = scenario_config();
    let measure = FixedMeasure(40.0);
    let records = vec![event("a", 100), event("b", 105), event("c", 900)];
    let layout = StableLayout::compute(&records, GroupingMode::Dynasty, &measure, &config);
    assert_eq!(layout.total_rows(), 1, "all three records share one row");

    let camera = fitted_camera(&layout, &config, Viewport::new(750.0, 400.0));
    let ppy = camera.px_per_year(&camera.current());
    assert!(5.0 * ppy < 5.0, "five years must map to less than five pixels");

    let frame = Frame::build(&layout, &records, &camera, None, &measure, &config);
    let mut visible: Vec<usize> = frame
        .visibility
        .visible
        .iter()
        .map(|&i| frame.projected[i].record)
        .collect();
    visible.sort();
    assert_eq!(visible, vec![0, 2]);

    let badges = frame.badges();
    assert_eq!(badges.len(), 1);
    assert_eq!(frame.visibility.hidden_count(), 1);
    assert_eq!(badges[0].count, 1);
    assert_eq!(badges[0].year_min, 100);
    assert_eq!(badges[0].year_max, 105);
    assert_eq!(badges[0].label(), "+1");
    assert_eq!(frame.projected[badges[0].members[0]].record, 1);
}

#[test]
fn test_badge_sits_after_its_anchor() {
    let config = scenario_config();
    let measure = FixedMeasure(40.0);
    let records = vec![event("a", 100), event("b", 105), event("c", 900)];
    let layout = StableLayout::compute(&records, GroupingMode::Dynasty, &measure, &config);
    let camera = fitted_camera(&layout, &config, Viewport::new(750.0, 400.0));
    let frame = Frame::build(&layout, &records, &camera, None, &measure, &config);

    let anchor = frame.projected_for_record(0).unwrap();
    let badge = &frame.badges()[0];
    assert!((badge.rect.x - (anchor.rect.right() + config.badge_margin)).abs() < 1e-9);
    assert_eq!(badge.rect.y, anchor.rect.y);
    assert!(badge.rect.width > 0.0);
}

#[test]
fn test_selected_record_is_never_culled() {
    let config = scenario_config();
    let measure = FixedMeasure(40.0);
    let records = vec![event("a", 100), event("b", 105), event("c", 900)];
    let layout = StableLayout::compute(&records, GroupingMode::Dynasty, &measure, &config);
    let camera = fitted_camera(&layout, &config, Viewport::new(750.0, 400.0));

    let frame = Frame::build(&layout, &records, &camera, Some(1), &measure, &config);
    assert!(frame.is_visible(1));
    assert!(frame.badges().is_empty());
    assert_eq!(frame.visibility.visible.len(), 3);
}

#[test]
fn test_selected_record_is_painted_last() {
    let config = scenario_config();
    let measure = FixedMeasure(40.0);
    let records = vec![event("a", 100), event("b", 105), event("c", 900)];
    let layout = StableLayout::compute(&records, GroupingMode::Dynasty, &measure, &config);
    let camera = fitted_camera(&layout, &config, Viewport::new(750.0, 400.0));

    let frame = Frame::build(&layout, &records, &camera, None, &measure, &config);
    let order: Vec<usize> = frame
        .paint_order
        .iter()
        .map(|&i| frame.projected[i].record)
        .collect();
    // Later starts first so earlier records end up on top.
    assert_eq!(order, vec![2, 0]);

    let frame = Frame::build(&layout, &records, &camera, Some(2), &measure, &config);
    let order: Vec<usize> = frame
        .paint_order
        .iter()
        .map(|&i| frame.projected[i].record)
        .collect();
    assert_eq!(order, vec![0, 2]);
}

#[test]
fn test_every_record_accounted_for_exactly_once() {
    let config = TimelineConfig::default();
    let measure = FixedMeasure(60.0);
    let mut rng = StdRng::seed_from_u64(42);
    let groups = ["Mérovingiens", "Carolingiens", "Capétiens", "Valois", "Bourbon"];
    let records: Vec<Record> = (0..400)
        .map(|i| {
            let year = rng.random_range(-300..1800);
            let group = groups[rng.random_range(0..groups.len())];
            let date = DateSpec::from_ordering_year(year);
            Record::event(format!("r{i}"), format!("Record {i}"), date).with_groups(group, "")
        })
        .collect();
    let layout = StableLayout::compute(&records, GroupingMode::Dynasty, &measure, &config);

    for (scale, selected) in [(0.0, None), (0.3, Some(17)), (1.0, Some(250)), (5.0, None)] {
        let mut camera = Camera::new(&config, Viewport::new(1200.0, 700.0));
        camera.set_extent(Some(layout.year_range), layout.content_height);
        camera.jump_to(CameraState {
            offset_x: -120.0,
            offset_y: 0.0,
            scale,
        });
        let frame = Frame::build(&layout, &records, &camera, selected, &measure, &config);

        let mut per_row: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
        for p in &frame.projected {
            per_row.entry((p.group, p.row)).or_default().0 += 1;
        }
        for &i in &frame.visibility.visible {
            let p = &frame.projected[i];
            per_row.get_mut(&(p.group, p.row)).unwrap().1 += 1;
        }
        for badge in frame.badges() {
            assert_eq!(badge.count, badge.members.len());
            per_row.get_mut(&(badge.group, badge.row)).unwrap().1 += badge.count;
        }
        for (row, (total, accounted)) in per_row {
            assert_eq!(total, accounted, "row {row:?} at scale {scale}");
        }

        let mut seen: Vec<usize> = frame
            .visibility
            .visible
            .iter()
            .chain(frame.badges().iter().flat_map(|b| b.members.iter()))
            .map(|&i| frame.projected[i].record)
            .collect();
        seen.sort();
        assert_eq!(seen, (0..records.len()).collect::<Vec<_>>());

        if let Some(sel) = selected {
            assert!(frame.is_visible(sel), "selected record culled at scale {scale}");
        }
    }
}
