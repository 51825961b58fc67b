use gpui::TestAppContext;
use gpui_timeline::data_types::{DateSpec, GroupingMode, Record, TimelineConfig, Viewport};
use gpui_timeline::{TimelineEngine, TimelineView};

fn records() -> Vec<Record> {
    vec![
        Record::event("a", "Alésia", DateSpec::bce(52)).with_groups("Gaulois", "Antiquité"),
        Record::event("b", "Baptême de Clovis", DateSpec::ce(496))
            .with_groups("Mérovingiens", "Moyen Âge"),
        Record::event("c", "Poitiers", DateSpec::ce(732)).with_groups("Carolingiens", "Moyen Âge"),
    ]
}

fn new_engine() -> TimelineEngine {
    TimelineEngine::new(TimelineConfig::default(), Viewport::new(1000.0, 600.0))
}

#[gpui::test]
fn test_timeline_view_holds_engine(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| TimelineView::new(new_engine(), cx));

    window
        .update(cx, |view, _window, cx| {
            assert!(view.engine().records().is_empty());
            view.set_records(records(), cx);
            assert_eq!(view.engine().records().len(), 3);
            assert_eq!(view.engine().layout().groups.len(), 3);
        })
        .unwrap();
}

#[gpui::test]
fn test_timeline_view_grouping_and_selection(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| {
        let mut engine = new_engine();
        engine.set_records(records());
        TimelineView::new(engine, cx)
    });

    window
        .update(cx, |view, _window, cx| {
            view.set_grouping_mode(GroupingMode::Era, cx);
            assert_eq!(view.engine().layout().groups.len(), 2);

            view.set_selected(Some(&"b".into()), cx);
            assert_eq!(view.engine().selected().map(|r| r.id.as_str()), Some("b"));
            view.set_selected(None, cx);
            assert!(view.engine().selected().is_none());
        })
        .unwrap();
}

#[gpui::test]
fn test_timeline_view_zoom_commands(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| {
        let mut engine = new_engine();
        engine.set_records(records());
        TimelineView::new(engine, cx)
    });

    window
        .update(cx, |view, window, cx| {
            let fitted = view.engine().camera().target().scale;
            view.zoom_in(window, cx);
            assert!(view.engine().camera().target().scale > fitted);

            assert!(view.scroll_to_entry(&"c".into(), window, cx));
            assert!(!view.scroll_to_entry(&"missing".into(), window, cx));

            view.fit(window, cx);
            let camera = view.engine().camera();
            assert_eq!(camera.target().scale, camera.min_scale());
        })
        .unwrap();
}
