use gpui_timeline::data_types::{
    DateSpec, GroupingMode, Record, TimelineConfig, Viewport, UNCLASSIFIED_GROUP,
};
use gpui_timeline::engine::TimelineEngine;
use gpui_timeline::layout::{label_width, occupied_years, StableLayout};
use gpui_timeline::text::EstimatedTextMeasure;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DYNASTIES: [&str; 6] = [
    "Mérovingiens",
    "Carolingiens",
    "Capétiens",
    "Valois",
    "Bourbon",
    "République",
];

fn random_records(seed: u64, count: usize) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let start = rng.random_range(-200..1950);
            let title = format!("Entry {i} {}", "x".repeat(rng.random_range(0..30)));
            let dynasty = DYNASTIES[rng.random_range(0..DYNASTIES.len())];
            let era = if start < 476 { "Antiquité" } else { "Moyen Âge" };
            let record = if rng.random_bool(0.3) {
                let end = start + rng.random_range(1..120);
                Record::period(
                    format!("r{i}"),
                    title,
                    DateSpec::from_ordering_year(start),
                    DateSpec::from_ordering_year(end),
                )
            } else {
                Record::event(format!("r{i}"), title, DateSpec::from_ordering_year(start))
            };
            record.with_groups(dynasty, era)
        })
        .collect()
}

#[test]
fn test_rows_never_overlap_at_reference_scale() {
    let config = TimelineConfig::default();
    let measure = EstimatedTextMeasure::default();
    let records = random_records(3, 1500);
    let layout = StableLayout::compute(&records, GroupingMode::Dynasty, &measure, &config);
    let ppy = config.px_per_year_at(config.layout_reference_scale);

    for group in &layout.groups {
        for row in &group.rows {
            for pair in row.windows(2) {
                let (a, b) = (&layout.entries[pair[0]], &layout.entries[pair[1]]);
                let (ra, rb) = (&records[a.record], &records[b.record]);
                let (_, a_end) = occupied_years(ra, label_width(ra, &measure, &config) / ppy);
                let (b_start, _) = occupied_years(rb, label_width(rb, &measure, &config) / ppy);
                let gap_px = (b_start - a_end) * ppy;
                assert!(
                    gap_px >= config.layout_gap_px - 1e-9,
                    "{} and {} are only {gap_px}px apart",
                    ra.id,
                    rb.id
                );
            }
        }
    }
}

#[test]
fn test_layout_is_deterministic() {
    let config = TimelineConfig::default();
    let measure = EstimatedTextMeasure::default();
    let records = random_records(9, 800);
    let a = StableLayout::compute(&records, GroupingMode::Era, &measure, &config);
    let b = StableLayout::compute(&records, GroupingMode::Era, &measure, &config);
    assert_eq!(a.entries, b.entries);
    assert_eq!(a.groups, b.groups);
}

#[test]
fn test_rows_survive_zoom_and_pan() {
    let mut engine = TimelineEngine::new(TimelineConfig::default(), Viewport::new(1280.0, 720.0));
    engine.set_records(random_records(5, 500));
    let rows: Vec<(usize, usize)> = engine
        .layout()
        .entries
        .iter()
        .map(|e| (e.group, e.row))
        .collect();

    engine.zoom_in();
    engine.zoom_in();
    engine.wheel(640.0, 120.0, -300.0, Default::default());
    engine.resize(Viewport::new(900.0, 500.0));
    let frame = engine.frame();
    for p in &frame.projected {
        assert_eq!((p.group, p.row), rows[p.entry]);
    }
}

#[test]
fn test_groups_ordered_by_earliest_record() {
    let config = TimelineConfig::default();
    let measure = EstimatedTextMeasure::default();
    let records = vec![
        Record::event("v", "Valois", DateSpec::ce(1400)).with_groups("Valois", ""),
        Record::event("m", "Clovis", DateSpec::ce(481)).with_groups("Mérovingiens", ""),
        Record::event("g", "Alésia", DateSpec::bce(52)).with_groups("Gaulois", ""),
        Record::event("m2", "Dagobert", DateSpec::ce(629)).with_groups("Mérovingiens", ""),
    ];
    let layout = StableLayout::compute(&records, GroupingMode::Dynasty, &measure, &config);
    let keys: Vec<&str> = layout.groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["Gaulois", "Mérovingiens", "Valois"]);
    assert_eq!(layout.groups[0].min_year, -52);

    // Bands stack below the axis.
    assert_eq!(layout.groups[0].y_offset, config.axis_height);
    assert_eq!(
        layout.groups[1].y_offset,
        config.axis_height + layout.groups[0].height
    );
    assert_eq!(layout.year_range, (-52, 1400));
}

#[test]
fn test_equal_years_keep_input_order() {
    let config = TimelineConfig::default();
    let measure = EstimatedTextMeasure::default();
    let records: Vec<Record> = (0..4)
        .map(|i| {
            Record::event(format!("t{i}"), "Traité", DateSpec::ce(1648)).with_groups("Bourbon", "")
        })
        .collect();
    let layout = StableLayout::compute(&records, GroupingMode::Dynasty, &measure, &config);
    let group = &layout.groups[0];
    let order: Vec<usize> = group.entries.iter().map(|&e| layout.entries[e].record).collect();
    assert_eq!(order, vec![0, 1, 2, 3]);
    // Same start year: each needs its own row, assigned in input order.
    let rows: Vec<usize> = order
        .iter()
        .map(|&r| layout.entry_for_record(r).unwrap().row)
        .collect();
    assert_eq!(rows, vec![0, 1, 2, 3]);
}

#[test]
fn test_missing_group_key_falls_back() {
    let config = TimelineConfig::default();
    let measure = EstimatedTextMeasure::default();
    let records = vec![Record::event("x", "Sans dynastie", DateSpec::ce(900))];
    let layout = StableLayout::compute(&records, GroupingMode::Dynasty, &measure, &config);
    assert_eq!(layout.groups[0].key, UNCLASSIFIED_GROUP);
}

#[test]
fn test_empty_record_set() {
    let config = TimelineConfig::default();
    let layout = StableLayout::compute(
        &[],
        GroupingMode::Dynasty,
        &EstimatedTextMeasure::default(),
        &config,
    );
    assert!(layout.is_empty());
    assert_eq!(layout.year_range, (0, 100));
    assert_eq!(layout.content_height, config.axis_height);
}

#[test]
fn test_grouping_mode_switch_relayouts() {
    let mut engine = TimelineEngine::new(TimelineConfig::default(), Viewport::new(1280.0, 720.0));
    engine.set_records(random_records(21, 200));
    let by_dynasty = engine.layout().groups.len();
    engine.set_grouping_mode(GroupingMode::Era);
    assert_eq!(engine.layout().mode, GroupingMode::Era);
    assert_eq!(engine.layout().groups.len(), 2);
    assert!(by_dynasty > 2);
}
