use crate::data_types::{Rect, RecordId};
use crate::rendering::{DrawCommand, Scene};
use crate::theme::TimelineTheme;
use crate::utils::PixelsExt;
use gpui::prelude::*;
use gpui::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Decoded images handed over by the host, keyed by record.
pub type ImageMap = Rc<RefCell<HashMap<RecordId, Arc<RenderImage>>>>;

/// Tooltip shown over the canvas.
#[derive(Clone, Debug)]
pub struct TooltipOverlay {
    pub title: String,
    pub dates: String,
    pub description: String,
    pub position: (f64, f64),
}

/// Replays engine scenes onto the window.
pub struct TimelineRenderer {
    pub bounds: Rc<RefCell<Bounds<Pixels>>>,
    pub images: ImageMap,
}

impl TimelineRenderer {
    pub fn new(bounds: Rc<RefCell<Bounds<Pixels>>>, images: ImageMap) -> Self {
        Self { bounds, images }
    }

    pub fn render(
        &self,
        scene: Scene,
        tooltip: Option<TooltipOverlay>,
        theme: &TimelineTheme,
    ) -> Div {
        let bounds_rc = self.bounds.clone();
        let images = self.images.clone();

        let overlay = tooltip.map(|t| {
            div()
                .absolute()
                .left(px(t.position.0 as f32))
                .top(px(t.position.1 as f32))
                .max_w(px(320.0))
                .p_2()
                .rounded_md()
                .bg(theme.tooltip_background)
                .text_color(theme.tooltip_text)
                .text_xs()
                .flex()
                .flex_col()
                .gap_1()
                .child(div().font_weight(FontWeight::BOLD).child(t.title))
                .child(div().opacity(0.8).child(t.dates))
                .children((!t.description.is_empty()).then(|| div().child(t.description)))
        });

        div()
            .size_full()
            .relative()
            .bg(theme.background)
            .child(
                canvas(
                    |_, _, _| {},
                    move |bounds, (), window, cx| {
                        let changed = {
                            let mut stored = bounds_rc.borrow_mut();
                            let changed = *stored != bounds;
                            *stored = bounds;
                            changed
                        };
                        window.with_content_mask(Some(ContentMask { bounds }), |window| {
                            paint_scene(&scene, bounds.origin, &images.borrow(), window, cx);
                        });
                        if changed {
                            // Layout size moved; render again at the new viewport.
                            window.refresh();
                        }
                    },
                )
                .size_full()
                .absolute(),
            )
            .children(overlay)
    }
}

fn to_bounds(origin: Point<Pixels>, rect: &Rect) -> Bounds<Pixels> {
    Bounds::new(
        origin + point(px(rect.x as f32), px(rect.y as f32)),
        size(px(rect.width as f32), px(rect.height as f32)),
    )
}

fn to_point(origin: Point<Pixels>, (x, y): (f64, f64)) -> Point<Pixels> {
    origin + point(px(x as f32), px(y as f32))
}

/// Paints every command of `scene` in order, offset by `origin`.
pub fn paint_scene(
    scene: &Scene,
    origin: Point<Pixels>,
    images: &HashMap<RecordId, Arc<RenderImage>>,
    window: &mut Window,
    cx: &mut App,
) {
    for command in &scene.commands {
        let clip = match command {
            DrawCommand::FillRect { clip, .. }
            | DrawCommand::StrokeRect { clip, .. }
            | DrawCommand::Line { clip, .. }
            | DrawCommand::Circle { clip, .. }
            | DrawCommand::Text { clip, .. }
            | DrawCommand::Image { clip, .. } => *clip,
        };
        match clip {
            Some(clip) => {
                let mask = ContentMask {
                    bounds: to_bounds(origin, &clip),
                };
                window.with_content_mask(Some(mask), |window| {
                    paint_command(command, origin, images, window, cx)
                });
            }
            None => paint_command(command, origin, images, window, cx),
        }
    }
}

fn paint_command(
    command: &DrawCommand,
    origin: Point<Pixels>,
    images: &HashMap<RecordId, Arc<RenderImage>>,
    window: &mut Window,
    cx: &mut App,
) {
    match command {
        DrawCommand::FillRect {
            rect,
            color,
            corner_radius,
            ..
        } => {
            if rect.is_empty() {
                return;
            }
            let quad = fill(to_bounds(origin, rect), *color);
            if *corner_radius > 0.0 {
                window.paint_quad(quad.corner_radii(Corners::all(px(*corner_radius as f32))));
            } else {
                window.paint_quad(quad);
            }
        }
        DrawCommand::StrokeRect {
            rect, color, width, ..
        } => {
            if rect.is_empty() {
                return;
            }
            window.paint_quad(
                outline(to_bounds(origin, rect), *color, BorderStyle::Solid)
                    .border_widths(Edges::all(px(*width as f32))),
            );
        }
        DrawCommand::Line {
            from,
            to,
            width,
            color,
            ..
        } => {
            let mut builder = PathBuilder::stroke(px(*width as f32));
            builder.move_to(to_point(origin, *from));
            builder.line_to(to_point(origin, *to));
            if let Ok(path) = builder.build() {
                window.paint_path(path, *color);
            }
        }
        DrawCommand::Circle {
            center,
            radius,
            color,
            ..
        } => {
            let r = *radius;
            let rect = Rect::new(center.0 - r, center.1 - r, r * 2.0, r * 2.0);
            window.paint_quad(
                fill(to_bounds(origin, &rect), *color).corner_radii(Corners::all(px(r as f32))),
            );
        }
        DrawCommand::Text {
            text,
            origin: text_origin,
            font_size,
            color,
            ..
        } => {
            if text.is_empty() {
                return;
            }
            let font_size = px(*font_size as f32);
            let run = TextRun {
                len: text.len(),
                font: TextStyle::default().font(),
                color: *color,
                background_color: None,
                underline: None,
                strikethrough: None,
            };
            if let Ok(lines) =
                window
                    .text_system()
                    .shape_text(text.clone().into(), font_size, &[run], None, None)
            {
                let mut at = to_point(origin, *text_origin);
                for line in lines {
                    let _ = line.paint(at, font_size, TextAlign::Left, None, window, cx);
                    at.y += font_size;
                }
            }
        }
        DrawCommand::Image { record, rect, .. } => {
            let Some(image) = images.get(record) else {
                return;
            };
            let bounds = to_bounds(origin, rect);
            let radius = px((rect.width.min(rect.height) / 2.0) as f32);
            if let Err(err) =
                window.paint_image(bounds, Corners::all(radius), image.clone(), 0, false)
            {
                tracing::warn!(%record, "failed to paint image: {err}");
            }
        }
    }
}

/// Size of the canvas in engine units.
pub fn viewport_of(bounds: &Bounds<Pixels>) -> crate::data_types::Viewport {
    crate::data_types::Viewport::new(bounds.size.width.as_f64(), bounds.size.height.as_f64())
}
