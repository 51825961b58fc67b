#[cfg(test)]
mod tests {
    use gpui_timeline::data_types::{
        records_from_json, DateSpec, Record, TimelineConfig, Viewport,
    };
    use gpui_timeline::engine::TimelineEngine;
    use gpui_timeline::interaction::WheelModifiers;
    use gpui_timeline::utils::date_formatter::format_date;
    use std::time::Instant;

    fn sample() -> Vec<Record> {
        vec![
            Record::event("a", "Alésia", DateSpec::bce(52)).with_groups("Gaulois", "Antiquité"),
            Record::event("b", "Poitiers", DateSpec::ce(732)).with_groups("Carolingiens", ""),
            Record::period("c", "Guerre de Cent Ans", DateSpec::ce(1337), DateSpec::ce(1453))
                .with_groups("Valois", ""),
        ]
    }

    fn engine() -> TimelineEngine {
        let mut engine =
            TimelineEngine::new(TimelineConfig::default(), Viewport::new(1000.0, 600.0));
        engine.set_records(sample());
        engine
    }

    #[test]
    fn test_non_finite_input_is_ignored() {
        let mut engine = engine();
        let before = engine.camera().target();

        engine.wheel(f64::NAN, 0.0, 10.0, WheelModifiers::default());
        engine.wheel(500.0, f64::INFINITY, 0.0, WheelModifiers::default());
        engine.wheel(500.0, 0.0, f64::NAN, WheelModifiers { zoom: true, shift: false });
        engine.pointer_move(f64::NAN, 10.0, Instant::now());
        engine.pointer_down(f64::INFINITY, 10.0);
        engine.resize(Viewport::new(f64::NAN, 600.0));

        assert_eq!(engine.camera().target(), before);
        assert_eq!(engine.camera().viewport(), Viewport::new(1000.0, 600.0));
        assert!(!engine.interaction().is_dragging());
    }

    #[test]
    fn test_empty_timeline_operations() {
        let mut engine =
            TimelineEngine::new(TimelineConfig::default(), Viewport::new(800.0, 500.0));
        engine.zoom_in();
        engine.zoom_out();
        engine.fit();
        engine.pointer_down(400.0, 300.0);
        engine.pointer_move(420.0, 310.0, Instant::now());
        engine.pointer_up(420.0, 310.0);
        engine.wheel(400.0, 0.0, 50.0, WheelModifiers::default());

        assert!(!engine.scroll_to_entry(&"anything".into()));
        assert!(engine.selected().is_none());
        assert!(engine.frame().projected.is_empty());
        assert!(engine.frame().badges().is_empty());
        assert!(!engine.paint().is_empty());
        assert!(engine.camera().target().scale.is_finite());
    }

    #[test]
    fn test_degenerate_viewport() {
        let mut engine = engine();
        engine.resize(Viewport::new(0.0, 0.0));
        let state = engine.camera().target();
        assert!(state.scale.is_finite() && state.scale > 0.0);
        assert!(state.offset_y.is_finite());
        engine.paint();

        engine.resize(Viewport::new(1000.0, 600.0));
        engine.fit();
        assert!(engine.camera().target().scale.is_finite());
    }

    #[test]
    fn test_huge_extent_stays_finite() {
        let mut engine = engine();
        let mut records = sample();
        records.push(Record::event("deep", "Lascaux", DateSpec::bce(17_000)));
        engine.set_records(records);
        let state = engine.camera().target();
        assert!(state.scale > 0.0 && state.scale.is_finite());
        assert!(engine.camera().year_to_x(-17_000.0).is_finite());

        // Huge wheel deltas clamp instead of overflowing.
        engine.wheel(500.0, 0.0, 1e6, WheelModifiers { zoom: true, shift: false });
        assert_eq!(engine.camera().target().scale, engine.config().max_scale);
        engine.wheel(500.0, 0.0, -1e6, WheelModifiers { zoom: true, shift: false });
        assert_eq!(engine.camera().target().scale, engine.camera().min_scale());
    }

    #[test]
    fn test_extreme_years_project_and_paint() {
        let records = records_from_json(
            r#"[
              { "id": "deep", "title": "Deep",
                "date_start": { "year": -2147483648, "era": "BCE" } },
              { "id": "far", "type": "period", "title": "Far",
                "date_start": { "year": 2147483647, "era": "BCE" },
                "date_end": { "year": 2147483647 } },
              { "id": "poitiers", "date_start": { "year": 732 }, "title": "Poitiers" }
            ]"#,
        )
        .unwrap();
        assert_eq!(records[0].ordering_year(), -i32::MAX);
        assert_eq!(format_date(&records[0].date_start), "2147483647 BCE");

        let mut engine =
            TimelineEngine::new(TimelineConfig::default(), Viewport::new(1000.0, 600.0));
        engine.set_records(records);
        for p in &engine.frame().projected {
            assert!(p.rect.x.is_finite() && p.rect.width.is_finite());
        }
        let scene = engine.paint();
        assert!(scene.texts().any(|t| t == "Deep (2147483647 BCE)"));
        assert!(scene.commands.len() < 2_000);

        assert!(engine.scroll_to_entry(&"deep".into()));
        engine.paint();
        engine.fit();
        engine.paint();
    }

    #[test]
    fn test_load_fit_follows_resize_until_camera_moves() {
        let mut engine = engine();
        engine.resize(Viewport::new(700.0, 400.0));
        let camera = engine.camera();
        assert_eq!(camera.target().scale, camera.min_scale());
        assert_eq!(camera.current(), camera.target());
        assert!((camera.year_to_x(camera.max_year()) - 700.0).abs() < 1e-6);

        engine.resize(Viewport::new(1400.0, 800.0));
        let camera = engine.camera();
        assert!((camera.year_to_x(camera.max_year()) - 1400.0).abs() < 1e-6);

        engine.zoom_in();
        let zoomed = engine.camera().target().scale;
        engine.resize(Viewport::new(900.0, 800.0));
        assert_eq!(engine.camera().target().scale, zoomed);
    }

    #[test]
    fn test_pointer_up_without_down_does_nothing() {
        let mut engine = engine();
        let rect = engine.frame().projected_for_record(1).unwrap().rect;
        engine.pointer_up(rect.center_x(), rect.center_y());
        assert!(engine.selected().is_none());
    }

    #[test]
    fn test_selection_survives_reload_only_if_record_does() {
        let mut engine = engine();
        engine.set_selected(Some(&"b".into()));

        let mut reordered = sample();
        reordered.reverse();
        engine.set_records(reordered);
        assert_eq!(engine.selected().map(|r| r.id.as_str()), Some("b"));
        assert_eq!(engine.selected_index(), Some(1));

        engine.set_records(vec![sample().remove(0)]);
        assert!(engine.selected().is_none());
    }

    #[test]
    fn test_unknown_selection_clears() {
        let mut engine = engine();
        engine.set_selected(Some(&"a".into()));
        engine.set_selected(Some(&"nope".into()));
        assert!(engine.selected().is_none());
    }
}
