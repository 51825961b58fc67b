//! Pointer and wheel handling.
//!
//! The controller turns raw input into camera mutations, selection changes and
//! tooltip scheduling. Hit-testing always runs against the last painted
//! [`Frame`], never against a half-updated one.

use crate::camera::Camera;
use crate::data_types::{Rect, TimelineConfig};
use crate::frame::Frame;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::view_controller::ViewController;
use std::time::Instant;

/// What the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    /// Index into the frame's badge list.
    Badge(usize),
    /// Record index.
    Record(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WheelModifiers {
    /// Ctrl or Cmd: wheel zooms instead of panning.
    pub zoom: bool,
    pub shift: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Select(usize),
    Clear,
}

/// Deferred tooltip reveal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipTask {
    pub record: usize,
    pub position: (f64, f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tooltip {
    pub record: usize,
    pub position: (f64, f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragState {
    origin: (f64, f64),
    last: (f64, f64),
    has_dragged: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionOutcome {
    pub repaint: bool,
    pub selection: Option<SelectionChange>,
    /// Set when a badge click retargeted the camera.
    pub zoomed_to: Option<(i32, i32)>,
}

impl InteractionOutcome {
    fn repaint() -> Self {
        Self {
            repaint: true,
            ..Self::default()
        }
    }
}

/// Mutable state an input event may touch.
pub struct InputContext<'a> {
    pub camera: &'a mut Camera,
    pub frame: Option<&'a Frame>,
    pub scheduler: &'a mut Scheduler<TooltipTask>,
    pub config: &'a TimelineConfig,
    pub now: Instant,
}

#[derive(Debug, Default)]
pub struct InteractionController {
    drag: Option<DragState>,
    hover: Option<Hit>,
    pending_tooltip: Option<TaskHandle>,
    tooltip: Option<Tooltip>,
}

/// Plot area in screen space: right of the label column, below the axis.
pub fn plot_area(camera: &Camera, config: &TimelineConfig) -> Rect {
    let vp = camera.viewport();
    Rect::new(
        camera.left_margin(),
        config.axis_height,
        camera.plot_width(),
        (vp.height - config.axis_height).max(0.0),
    )
}

/// Badges first, then visible records from topmost to bottommost.
pub fn hit_test(frame: &Frame, x: f64, y: f64) -> Option<Hit> {
    if let Some(i) = frame
        .badges()
        .iter()
        .position(|b| !b.rect.is_empty() && b.rect.contains(x, y))
    {
        return Some(Hit::Badge(i));
    }
    frame
        .paint_order
        .iter()
        .rev()
        .map(|&i| &frame.projected[i])
        .find(|p| p.rect.contains(x, y))
        .map(|p| Hit::Record(p.record))
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn has_dragged(&self) -> bool {
        self.drag.is_some_and(|d| d.has_dragged)
    }

    pub fn hover(&self) -> Option<Hit> {
        self.hover
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        self.tooltip
    }

    pub fn tooltip_pending(&self) -> bool {
        self.pending_tooltip.is_some()
    }

    pub fn pointer_down(&mut self, cx: InputContext<'_>, x: f64, y: f64) -> InteractionOutcome {
        if !(x.is_finite() && y.is_finite()) {
            return InteractionOutcome::default();
        }
        let hid = self.dismiss_tooltip(cx.scheduler);
        cx.camera.begin_drag();
        self.drag = Some(DragState {
            origin: (x, y),
            last: (x, y),
            has_dragged: false,
        });
        InteractionOutcome {
            repaint: hid,
            ..InteractionOutcome::default()
        }
    }

    pub fn pointer_move(&mut self, cx: InputContext<'_>, x: f64, y: f64) -> InteractionOutcome {
        if !(x.is_finite() && y.is_finite()) {
            tracing::debug!(x, y, "ignoring non-finite pointer position");
            return InteractionOutcome::default();
        }

        if let Some(drag) = self.drag.as_mut() {
            let (dx, dy) = (x - drag.last.0, y - drag.last.1);
            drag.last = (x, y);
            let (ox, oy) = (x - drag.origin.0, y - drag.origin.1);
            if !drag.has_dragged && (ox * ox + oy * oy).sqrt() > cx.config.drag_threshold_px {
                drag.has_dragged = true;
                tracing::trace!("drag started");
            }
            cx.camera.drag_by(dx, dy);
            self.dismiss_tooltip(cx.scheduler);
            return InteractionOutcome::repaint();
        }

        let plot = plot_area(cx.camera, cx.config);
        let hit = match cx.frame {
            Some(frame) if plot.contains(x, y) => hit_test(frame, x, y),
            _ => None,
        };
        let hover_changed = hit != self.hover;
        self.hover = hit;

        // Any movement restarts the reveal delay.
        if let Some(handle) = self.pending_tooltip.take() {
            cx.scheduler.cancel(handle);
        }
        let mut repaint = hover_changed;
        match hit {
            Some(Hit::Record(record)) if cx.config.tooltip.enabled => {
                if let Some(tooltip) = self.tooltip.as_mut().filter(|t| t.record == record) {
                    tooltip.position = (x, y);
                    repaint = true;
                } else {
                    repaint |= self.tooltip.take().is_some();
                    let due = cx.now + cx.config.tooltip.delay;
                    self.pending_tooltip = Some(cx.scheduler.schedule(
                        due,
                        TooltipTask {
                            record,
                            position: (x, y),
                        },
                    ));
                }
            }
            _ => repaint |= self.tooltip.take().is_some(),
        }
        InteractionOutcome {
            repaint,
            ..InteractionOutcome::default()
        }
    }

    pub fn pointer_up(&mut self, cx: InputContext<'_>, x: f64, y: f64) -> InteractionOutcome {
        let Some(drag) = self.drag.take() else {
            return InteractionOutcome::default();
        };
        if drag.has_dragged {
            return InteractionOutcome::repaint();
        }
        let (x, y) = if x.is_finite() && y.is_finite() {
            (x, y)
        } else {
            drag.last
        };
        // Badges and records only live inside the plot area.
        let plot = plot_area(cx.camera, cx.config);
        let hit = match cx.frame {
            Some(frame) if plot.contains(x, y) => hit_test(frame, x, y).map(|h| (frame, h)),
            _ => None,
        };

        match hit {
            Some((frame, Hit::Badge(i))) => {
                let badge = &frame.badges()[i];
                let target =
                    ViewController::zoom_to_range_target(cx.camera, badge.year_min, badge.year_max);
                tracing::debug!(
                    count = badge.count,
                    year_min = badge.year_min,
                    year_max = badge.year_max,
                    "zooming to badge"
                );
                cx.camera.set_target(target);
                InteractionOutcome {
                    repaint: true,
                    selection: None,
                    zoomed_to: Some((badge.year_min, badge.year_max)),
                }
            }
            Some((_, Hit::Record(record))) => InteractionOutcome {
                repaint: true,
                selection: Some(SelectionChange::Select(record)),
                zoomed_to: None,
            },
            None => InteractionOutcome {
                repaint: true,
                selection: Some(SelectionChange::Clear),
                zoomed_to: None,
            },
        }
    }

    /// Wheel deltas are content movements in pixels: positive `dy` moves the
    /// content down, or zooms in when the zoom modifier is held.
    pub fn wheel(
        &mut self,
        cx: InputContext<'_>,
        pointer_x: f64,
        dx: f64,
        dy: f64,
        modifiers: WheelModifiers,
    ) -> InteractionOutcome {
        if !(dx.is_finite() && dy.is_finite() && pointer_x.is_finite()) {
            tracing::debug!(dx, dy, "ignoring non-finite wheel delta");
            return InteractionOutcome::default();
        }
        if modifiers.zoom {
            let factor = ViewController::wheel_zoom_factor(dy, cx.config.wheel_zoom_sensitivity);
            cx.camera.zoom_at(pointer_x, factor);
        } else if modifiers.shift || dx.abs() > dy.abs() {
            let delta = if dx.abs() > dy.abs() { dx } else { dy };
            cx.camera.pan_by(delta, 0.0);
        } else {
            cx.camera.pan_by(0.0, dy);
        }
        self.camera_changed(cx.scheduler);
        InteractionOutcome::repaint()
    }

    pub fn pointer_leave(&mut self, scheduler: &mut Scheduler<TooltipTask>) -> InteractionOutcome {
        let had_hover = self.hover.take().is_some();
        let hid = self.dismiss_tooltip(scheduler);
        InteractionOutcome {
            repaint: had_hover || hid,
            ..InteractionOutcome::default()
        }
    }

    /// Any programmatic camera change invalidates a pending or shown tooltip.
    pub fn camera_changed(&mut self, scheduler: &mut Scheduler<TooltipTask>) -> bool {
        self.dismiss_tooltip(scheduler)
    }

    /// Called when a reveal task fires. Stale tasks for a record the pointer
    /// already left are dropped.
    pub fn reveal_tooltip(&mut self, task: TooltipTask) -> bool {
        self.pending_tooltip = None;
        if self.hover != Some(Hit::Record(task.record)) {
            return false;
        }
        self.tooltip = Some(Tooltip {
            record: task.record,
            position: task.position,
        });
        true
    }

    /// Drops hover and tooltip state, e.g. when the record set changes.
    pub fn reset(&mut self, scheduler: &mut Scheduler<TooltipTask>) {
        self.dismiss_tooltip(scheduler);
        self.hover = None;
        self.drag = None;
    }

    fn dismiss_tooltip(&mut self, scheduler: &mut Scheduler<TooltipTask>) -> bool {
        if let Some(handle) = self.pending_tooltip.take() {
            scheduler.cancel(handle);
        }
        self.tooltip.take().is_some()
    }
}
