//! Headless timeline engine.
//!
//! [`TimelineEngine`] owns every piece of persistent state (records, stable
//! layout, camera, selection, scheduled tasks) and exposes the operations a
//! host UI needs. It never touches a window: hosts forward input, pump
//! [`TimelineEngine::tick`] and replay the [`Scene`] returned by
//! [`TimelineEngine::paint`].

use crate::camera::{Camera, CameraState};
use crate::data_types::{GroupingMode, Record, RecordId, TimelineConfig, Viewport};
use crate::frame::Frame;
use crate::image_cache::ImageCache;
use crate::interaction::{
    InputContext, InteractionController, InteractionOutcome, SelectionChange, TooltipTask,
    WheelModifiers,
};
use crate::layout::StableLayout;
use crate::rendering::{PaintContext, Renderer, Scene};
use crate::scheduler::Scheduler;
use crate::text::{EstimatedTextMeasure, TextMeasure};
use crate::theme::ThemeCache;
use crate::utils::date_formatter::format_record_dates;
use crate::view_controller::ViewController;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

pub type SelectionCallback = Box<dyn FnMut(Option<&Record>)>;
pub type DrawCallback = Box<dyn FnMut()>;

/// What the host should do after a [`TimelineEngine::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Something changed since the last paint.
    pub repaint: bool,
    /// The camera is still animating; tick again on the next display frame.
    pub next_frame: bool,
    /// Earliest scheduled task, if any.
    pub next_deadline: Option<Instant>,
}

impl TickOutcome {
    pub fn is_idle(&self) -> bool {
        !self.repaint && !self.next_frame && self.next_deadline.is_none()
    }
}

/// Content of the hover tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent<'a> {
    pub record: &'a Record,
    pub dates: String,
    pub position: (f64, f64),
}

pub struct TimelineEngine {
    config: TimelineConfig,
    records: Vec<Record>,
    mode: GroupingMode,
    layout: StableLayout,
    camera: Camera,
    interaction: InteractionController,
    scheduler: Scheduler<TooltipTask>,
    selected: Option<usize>,
    theme: Arc<ThemeCache>,
    images: Arc<ImageCache>,
    measure: Arc<dyn TextMeasure>,
    frame: Option<Frame>,
    frame_dirty: bool,
    needs_paint: bool,
    painted_image_generation: u64,
    /// Fit applied by the last load, while the camera still sits on it.
    load_fit: Option<CameraState>,
    on_selection_changed: Option<SelectionCallback>,
    on_draw_completed: Option<DrawCallback>,
}

impl TimelineEngine {
    pub fn new(config: TimelineConfig, viewport: Viewport) -> Self {
        let measure: Arc<dyn TextMeasure> = Arc::new(EstimatedTextMeasure::default());
        let mode = GroupingMode::default();
        let layout = StableLayout::compute(&[], mode, measure.as_ref(), &config);
        let mut camera = Camera::new(&config, viewport);
        camera.set_extent(None, layout.content_height);
        Self {
            config,
            records: Vec::new(),
            mode,
            layout,
            camera,
            interaction: InteractionController::new(),
            scheduler: Scheduler::new(),
            selected: None,
            theme: Arc::new(ThemeCache::default()),
            images: Arc::new(ImageCache::new()),
            measure,
            frame: None,
            frame_dirty: true,
            needs_paint: true,
            painted_image_generation: 0,
            load_fit: None,
            on_selection_changed: None,
            on_draw_completed: None,
        }
    }

    /// Replaces the text measurer. The layout is recomputed with it.
    pub fn with_text_measure(mut self, measure: Arc<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self.relayout();
        self
    }

    pub fn with_theme(mut self, theme: Arc<ThemeCache>) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_image_cache(mut self, images: Arc<ImageCache>) -> Self {
        self.images = images;
        self
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn grouping_mode(&self) -> GroupingMode {
        self.mode
    }

    pub fn layout(&self) -> &StableLayout {
        &self.layout
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn theme(&self) -> &Arc<ThemeCache> {
        &self.theme
    }

    pub fn images(&self) -> &Arc<ImageCache> {
        &self.images
    }

    pub fn selected(&self) -> Option<&Record> {
        self.selected.map(|i| &self.records[i])
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn on_selection_changed(&mut self, callback: impl FnMut(Option<&Record>) + 'static) {
        self.on_selection_changed = Some(Box::new(callback));
    }

    pub fn on_draw_completed(&mut self, callback: impl FnMut() + 'static) {
        self.on_draw_completed = Some(Box::new(callback));
    }

    /// Replaces the record set, keeping the selection when its record survives.
    ///
    /// The camera is refit when the year extent changes. Until the user moves
    /// it, that fit follows later resizes, so a host that loads before its
    /// first layout still ends up fitted to the real viewport.
    pub fn set_records(&mut self, records: Vec<Record>) {
        let selected_id = self.selected().map(|r| r.id.clone());
        let previous_range = (!self.records.is_empty()).then_some(self.layout.year_range);
        self.records = records;
        self.selected = selected_id.and_then(|id| self.records.iter().position(|r| r.id == id));
        let with_images: HashSet<&RecordId> = self
            .records
            .iter()
            .filter(|r| r.image_url.is_some())
            .map(|r| &r.id)
            .collect();
        self.images.retain(|id| with_images.contains(id));
        for id in with_images {
            self.images.mark_pending(id);
        }
        self.interaction.reset(&mut self.scheduler);
        self.relayout();

        let range = (!self.records.is_empty()).then_some(self.layout.year_range);
        if range != previous_range {
            let target = ViewController::fit_target(&self.camera, self.selected_focus_y());
            self.camera.jump_to(target);
            self.load_fit = Some(self.camera.target());
        }
    }

    pub fn set_grouping_mode(&mut self, mode: GroupingMode) {
        if mode == self.mode {
            return;
        }
        tracing::info!(?mode, "grouping mode changed");
        self.mode = mode;
        self.interaction.reset(&mut self.scheduler);
        self.relayout();
    }

    /// Host-driven selection. Does not fire the selection callback.
    pub fn set_selected(&mut self, id: Option<&RecordId>) {
        let selected = id.and_then(|id| self.records.iter().position(|r| &r.id == id));
        if selected != self.selected {
            self.selected = selected;
            self.invalidate_frame();
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if !(viewport.width.is_finite() && viewport.height.is_finite()) {
            tracing::warn!(?viewport, "ignoring non-finite viewport");
            return;
        }
        if viewport == self.camera.viewport() {
            return;
        }
        let untouched = !self.interaction.is_dragging()
            && self.camera.current() == self.camera.target()
            && self.load_fit == Some(self.camera.target());
        self.camera.set_viewport(viewport);
        if untouched {
            let target = ViewController::fit_target(&self.camera, self.selected_focus_y());
            self.camera.jump_to(target);
            self.load_fit = Some(self.camera.target());
            tracing::debug!(?viewport, "refit after resize");
        } else {
            self.load_fit = None;
        }
        self.invalidate_frame();
    }

    pub fn zoom_in(&mut self) {
        let target = ViewController::zoom_step_target(&self.camera, self.config.zoom_step);
        self.retarget(target);
    }

    pub fn zoom_out(&mut self) {
        let target = ViewController::zoom_step_target(&self.camera, 1.0 / self.config.zoom_step);
        self.retarget(target);
    }

    /// Frames the whole data extent.
    pub fn fit(&mut self) {
        let target = ViewController::fit_target(&self.camera, self.selected_focus_y());
        self.retarget(target);
    }

    /// Centers a record, zooming in only as far as needed to separate it from
    /// its row neighbors. Returns false for unknown ids.
    pub fn scroll_to_entry(&mut self, id: &RecordId) -> bool {
        let Some(entry) = self.layout.entry_index_for_id(id) else {
            tracing::debug!(%id, "scroll target not in the current record set");
            return false;
        };
        let target = ViewController::scroll_to_entry_target(
            &self.camera,
            &self.layout,
            &self.records,
            entry,
            &self.config,
        );
        self.retarget(target);
        true
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.ensure_frame();
        let outcome = self.interaction.pointer_down(
            InputContext {
                camera: &mut self.camera,
                frame: self.frame.as_ref(),
                scheduler: &mut self.scheduler,
                config: &self.config,
                now: Instant::now(),
            },
            x,
            y,
        );
        self.apply(outcome);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, now: Instant) {
        self.ensure_frame();
        let outcome = self.interaction.pointer_move(
            InputContext {
                camera: &mut self.camera,
                frame: self.frame.as_ref(),
                scheduler: &mut self.scheduler,
                config: &self.config,
                now,
            },
            x,
            y,
        );
        self.apply(outcome);
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.ensure_frame();
        let outcome = self.interaction.pointer_up(
            InputContext {
                camera: &mut self.camera,
                frame: self.frame.as_ref(),
                scheduler: &mut self.scheduler,
                config: &self.config,
                now: Instant::now(),
            },
            x,
            y,
        );
        self.apply(outcome);
    }

    pub fn pointer_leave(&mut self) {
        let outcome = self.interaction.pointer_leave(&mut self.scheduler);
        self.apply(outcome);
    }

    pub fn wheel(&mut self, pointer_x: f64, dx: f64, dy: f64, modifiers: WheelModifiers) {
        let outcome = self.interaction.wheel(
            InputContext {
                camera: &mut self.camera,
                frame: self.frame.as_ref(),
                scheduler: &mut self.scheduler,
                config: &self.config,
                now: Instant::now(),
            },
            pointer_x,
            dx,
            dy,
            modifiers,
        );
        self.apply(outcome);
    }

    /// Advances the camera animation by one frame and fires due tasks.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let mut repaint = self.needs_paint;
        if self.camera.tick() {
            self.interaction.camera_changed(&mut self.scheduler);
            repaint = true;
        }
        for task in self.scheduler.take_due(now) {
            repaint |= self.interaction.reveal_tooltip(task);
        }
        repaint |= self.images.generation() != self.painted_image_generation;
        self.needs_paint = repaint;

        TickOutcome {
            repaint,
            next_frame: self.camera.is_animating(),
            next_deadline: self.scheduler.next_deadline(),
        }
    }

    /// The frame hit-testing and painting work from, rebuilt if stale.
    pub fn frame(&mut self) -> &Frame {
        self.ensure_frame()
    }

    pub fn paint(&mut self) -> Scene {
        self.ensure_frame();
        let theme = self.theme.get();
        let scene = match self.frame.as_ref() {
            Some(frame) => Renderer::paint(&PaintContext {
                records: &self.records,
                layout: &self.layout,
                camera: &self.camera,
                frame,
                theme: &theme,
                images: &self.images,
                measure: self.measure.as_ref(),
                config: &self.config,
            }),
            None => Scene::default(),
        };
        self.painted_image_generation = self.images.generation();
        self.needs_paint = false;
        if let Some(callback) = self.on_draw_completed.as_mut() {
            callback();
        }
        scene
    }

    pub fn tooltip(&self) -> Option<TooltipContent<'_>> {
        let tooltip = self.interaction.tooltip()?;
        let record = self.records.get(tooltip.record)?;
        let offset = self.config.tooltip.offset_px;
        Some(TooltipContent {
            record,
            dates: format_record_dates(record),
            position: (tooltip.position.0 + offset, tooltip.position.1 + offset),
        })
    }

    /// Records the arrival of an image decoded by the host.
    pub fn image_loaded(&mut self, id: &RecordId) {
        self.images.mark_ready(id);
    }

    pub fn image_failed(&mut self, id: &RecordId) {
        tracing::debug!(%id, "image load failed, keeping dot glyph");
        self.images.mark_failed(id);
    }

    fn relayout(&mut self) {
        self.layout = StableLayout::compute(
            &self.records,
            self.mode,
            self.measure.as_ref(),
            &self.config,
        );
        let range = (!self.layout.is_empty()).then_some(self.layout.year_range);
        self.camera.set_extent(range, self.layout.content_height);
        self.invalidate_frame();
    }

    fn retarget(&mut self, target: CameraState) {
        self.camera.set_target(target);
        if self.interaction.camera_changed(&mut self.scheduler) || self.camera.is_animating() {
            self.needs_paint = true;
        }
    }

    fn invalidate_frame(&mut self) {
        self.frame_dirty = true;
        self.needs_paint = true;
    }

    fn selected_focus_y(&self) -> Option<f64> {
        let entry = self.layout.entry_for_record(self.selected?)?;
        let top = self.layout.row_top(entry.group, entry.row, &self.config);
        Some(top + self.config.row_height / 2.0)
    }

    fn ensure_frame(&mut self) -> &Frame {
        let stale = match &self.frame {
            Some(frame) => self.frame_dirty || frame.camera != self.camera.current(),
            None => true,
        };
        if stale {
            self.frame = None;
            self.frame_dirty = false;
        }
        let (layout, records, camera, measure, config) = (
            &self.layout,
            &self.records,
            &self.camera,
            &self.measure,
            &self.config,
        );
        let selected = self.selected;
        self.frame.get_or_insert_with(|| {
            Frame::build(layout, records, camera, selected, measure.as_ref(), config)
        })
    }

    fn apply(&mut self, outcome: InteractionOutcome) {
        if outcome.repaint {
            self.needs_paint = true;
        }
        let Some(change) = outcome.selection else {
            return;
        };
        let selected = match change {
            SelectionChange::Select(record) => Some(record),
            SelectionChange::Clear => None,
        };
        if selected == self.selected {
            return;
        }
        self.selected = selected;
        self.invalidate_frame();
        tracing::debug!(
            id = self.selected().map(|r| r.id.as_str()).unwrap_or("<none>"),
            "selection changed"
        );
        if let Some(callback) = self.on_selection_changed.as_mut() {
            callback(self.selected.map(|i| &self.records[i]));
        }
    }
}

impl std::fmt::Debug for TimelineEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineEngine")
            .field("records", &self.records.len())
            .field("mode", &self.mode)
            .field("camera", &self.camera.current())
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}
