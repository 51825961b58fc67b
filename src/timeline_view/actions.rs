use super::TimelineView;
use gpui::*;

actions!(gpui_timeline, [ZoomIn, ZoomOut, FitView]);

/// Key context the default bindings are scoped to.
pub const KEY_CONTEXT: &str = "Timeline";

/// Registers the default key bindings.
pub fn init(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("=", ZoomIn, Some(KEY_CONTEXT)),
        KeyBinding::new("+", ZoomIn, Some(KEY_CONTEXT)),
        KeyBinding::new("-", ZoomOut, Some(KEY_CONTEXT)),
        KeyBinding::new("0", FitView, Some(KEY_CONTEXT)),
    ]);
}

impl TimelineView {
    pub(super) fn handle_zoom_in(
        &mut self,
        _: &ZoomIn,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.engine.zoom_in();
        self.pump(window, cx);
    }

    pub(super) fn handle_zoom_out(
        &mut self,
        _: &ZoomOut,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.engine.zoom_out();
        self.pump(window, cx);
    }

    pub(super) fn handle_fit_view(
        &mut self,
        _: &FitView,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.engine.fit();
        self.pump(window, cx);
    }
}
