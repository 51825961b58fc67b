pub mod actions;
pub mod input;
pub mod renderer;

use crate::data_types::{GroupingMode, Record, RecordId};
use crate::engine::TimelineEngine;
use gpui::prelude::*;
use gpui::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

pub use actions::{init, FitView, ZoomIn, ZoomOut, KEY_CONTEXT};

use self::renderer::{viewport_of, ImageMap, TimelineRenderer, TooltipOverlay};

/// Notifications for the surrounding UI.
#[derive(Clone, Debug, PartialEq)]
pub enum TimelineEvent {
    /// The user clicked a record (or empty space, `None`).
    SelectionChanged(Option<RecordId>),
    /// A paint finished.
    DrawCompleted,
}

pub struct TimelineView {
    engine: TimelineEngine,
    renderer: TimelineRenderer,
    bounds: Rc<RefCell<Bounds<Pixels>>>,
    images: ImageMap,
    pending_events: Rc<RefCell<Vec<TimelineEvent>>>,
    frame_requested: bool,
    focus_handle: FocusHandle,
}

impl EventEmitter<TimelineEvent> for TimelineView {}

impl Focusable for TimelineView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl TimelineView {
    pub fn new(mut engine: TimelineEngine, cx: &mut Context<Self>) -> Self {
        let pending_events = Rc::new(RefCell::new(Vec::new()));
        {
            let events = pending_events.clone();
            engine.on_selection_changed(move |record: Option<&Record>| {
                events
                    .borrow_mut()
                    .push(TimelineEvent::SelectionChanged(record.map(|r| r.id.clone())));
            });
            let events = pending_events.clone();
            engine.on_draw_completed(move || {
                events.borrow_mut().push(TimelineEvent::DrawCompleted);
            });
        }

        let bounds = Rc::new(RefCell::new(Bounds::default()));
        let images: ImageMap = Rc::new(RefCell::new(HashMap::new()));
        Self {
            engine,
            renderer: TimelineRenderer::new(bounds.clone(), images.clone()),
            bounds,
            images,
            pending_events,
            frame_requested: false,
            focus_handle: cx.focus_handle(),
        }
    }

    pub fn engine(&self) -> &TimelineEngine {
        &self.engine
    }

    pub fn set_records(&mut self, records: Vec<Record>, cx: &mut Context<Self>) {
        self.engine.set_records(records);
        cx.notify();
    }

    pub fn set_grouping_mode(&mut self, mode: GroupingMode, cx: &mut Context<Self>) {
        self.engine.set_grouping_mode(mode);
        cx.notify();
    }

    pub fn set_selected(&mut self, id: Option<&RecordId>, cx: &mut Context<Self>) {
        self.engine.set_selected(id);
        cx.notify();
    }

    pub fn zoom_in(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.engine.zoom_in();
        self.pump(window, cx);
    }

    pub fn zoom_out(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.engine.zoom_out();
        self.pump(window, cx);
    }

    pub fn fit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.engine.fit();
        self.pump(window, cx);
    }

    pub fn scroll_to_entry(
        &mut self,
        id: &RecordId,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> bool {
        let found = self.engine.scroll_to_entry(id);
        self.pump(window, cx);
        found
    }

    /// Hands over a decoded image for a record.
    pub fn set_image(&mut self, id: RecordId, image: Arc<RenderImage>, cx: &mut Context<Self>) {
        self.engine.image_loaded(&id);
        self.images.borrow_mut().insert(id, image);
        cx.notify();
    }

    pub fn image_failed(&mut self, id: &RecordId, cx: &mut Context<Self>) {
        self.engine.image_failed(id);
        self.images.borrow_mut().remove(id);
        cx.notify();
    }

    /// Ticks the engine and keeps frames coming while it has work pending.
    ///
    /// A pending tooltip deadline is polled once per frame until it fires.
    pub(crate) fn pump(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let outcome = self.engine.tick(Instant::now());
        if outcome.repaint {
            cx.notify();
        }
        self.flush_events(cx);
        if (outcome.next_frame || outcome.next_deadline.is_some()) && !self.frame_requested {
            self.frame_requested = true;
            cx.on_next_frame(window, |this, window, cx| {
                this.frame_requested = false;
                this.pump(window, cx);
            });
        }
    }

    fn flush_events(&mut self, cx: &mut Context<Self>) {
        let events: Vec<TimelineEvent> = self.pending_events.borrow_mut().drain(..).collect();
        for event in events {
            cx.emit(event);
        }
    }
}

impl Render for TimelineView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let bounds = *self.bounds.borrow();
        if bounds.size.width > px(0.0) && bounds.size.height > px(0.0) {
            self.engine.resize(viewport_of(&bounds));
        }

        let scene = self.engine.paint();
        let theme = self.engine.theme().get();
        let tooltip = self.engine.tooltip().map(|t| TooltipOverlay {
            title: t.record.title.clone(),
            dates: t.dates,
            description: t.record.description.clone(),
            position: t.position,
        });

        if !self.pending_events.borrow().is_empty() && !self.frame_requested {
            self.frame_requested = true;
            cx.on_next_frame(window, |this, window, cx| {
                this.frame_requested = false;
                this.pump(window, cx);
            });
        }

        self.renderer
            .render(scene, tooltip, &theme)
            .id(("timeline-view", cx.entity_id()))
            .key_context(KEY_CONTEXT)
            .track_focus(&self.focus_handle)
            .cursor(CursorStyle::Arrow)
            .on_mouse_down(MouseButton::Left, cx.listener(Self::handle_mouse_down))
            .on_mouse_move(cx.listener(Self::handle_mouse_move))
            .on_mouse_up(MouseButton::Left, cx.listener(Self::handle_mouse_up))
            .on_mouse_up_out(MouseButton::Left, cx.listener(Self::handle_mouse_up))
            .on_scroll_wheel(cx.listener(Self::handle_scroll_wheel))
            .on_hover(cx.listener(Self::handle_hover))
            .on_action(cx.listener(Self::handle_zoom_in))
            .on_action(cx.listener(Self::handle_zoom_out))
            .on_action(cx.listener(Self::handle_fit_view))
    }
}
