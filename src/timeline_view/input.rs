use super::TimelineView;
use crate::interaction::WheelModifiers;
use crate::utils::PixelsExt;
use gpui::*;
use std::time::Instant;

impl TimelineView {
    /// Pointer position relative to the canvas.
    fn local(&self, position: Point<Pixels>) -> (f64, f64) {
        let origin = self.bounds.borrow().origin;
        ((position.x - origin.x).as_f64(), (position.y - origin.y).as_f64())
    }

    pub(super) fn handle_mouse_down(
        &mut self,
        event: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        window.focus(&self.focus_handle);
        let (x, y) = self.local(event.position);
        self.engine.pointer_down(x, y);
        self.pump(window, cx);
    }

    pub(super) fn handle_mouse_move(
        &mut self,
        event: &MouseMoveEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let (x, y) = self.local(event.position);
        self.engine.pointer_move(x, y, Instant::now());
        self.pump(window, cx);
    }

    pub(super) fn handle_mouse_up(
        &mut self,
        event: &MouseUpEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let (x, y) = self.local(event.position);
        self.engine.pointer_up(x, y);
        self.pump(window, cx);
    }

    pub(super) fn handle_hover(
        &mut self,
        hovered: &bool,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !*hovered {
            self.engine.pointer_leave();
            self.pump(window, cx);
        }
    }

    pub(super) fn handle_scroll_wheel(
        &mut self,
        event: &ScrollWheelEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let line = self.engine.config().wheel_line_px as f32;
        let (dx, dy) = match event.delta {
            ScrollDelta::Pixels(p) => (p.x.as_f64(), p.y.as_f64()),
            ScrollDelta::Lines(p) => ((p.x * line) as f64, (p.y * line) as f64),
        };
        let modifiers = WheelModifiers {
            zoom: event.modifiers.control || event.modifiers.platform,
            shift: event.modifiers.shift,
        };
        let (x, _) = self.local(event.position);
        self.engine.wheel(x, dx, dy, modifiers);
        self.pump(window, cx);
    }
}
