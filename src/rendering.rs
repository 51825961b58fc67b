// Paint step for the timeline.
//
// The renderer never talks to a window: it emits a `Scene`, an ordered list
// of draw commands that a host replays (see `timeline_view::renderer`).

use crate::axis_renderer::AxisRenderer;
use crate::camera::Camera;
use crate::data_types::{Record, RecordId, RecordKind, Rect, TimelineConfig};
use crate::frame::Frame;
use crate::image_cache::ImageCache;
use crate::layout::StableLayout;
use crate::text::{ellipsize, TextMeasure};
use crate::theme::TimelineTheme;
use crate::utils::date_formatter::record_label;
use gpui::Hsla;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Hsla,
        corner_radius: f64,
        clip: Option<Rect>,
    },
    StrokeRect {
        rect: Rect,
        color: Hsla,
        width: f64,
        clip: Option<Rect>,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Hsla,
        clip: Option<Rect>,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        color: Hsla,
        clip: Option<Rect>,
    },
    /// `origin` is the top-left of the text line.
    Text {
        text: String,
        origin: (f64, f64),
        font_size: f64,
        color: Hsla,
        clip: Option<Rect>,
    },
    Image {
        record: RecordId,
        rect: Rect,
        clip: Option<Rect>,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn fill(&mut self, rect: Rect, color: Hsla, clip: Option<Rect>) {
        self.push(DrawCommand::FillRect {
            rect,
            color,
            corner_radius: 0.0,
            clip,
        });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Texts in paint order, mostly useful for inspection.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Inputs of one paint.
pub struct PaintContext<'a> {
    pub records: &'a [Record],
    pub layout: &'a StableLayout,
    pub camera: &'a Camera,
    pub frame: &'a Frame,
    pub theme: &'a TimelineTheme,
    pub images: &'a ImageCache,
    pub measure: &'a dyn TextMeasure,
    pub config: &'a TimelineConfig,
}

pub struct Renderer;

impl Renderer {
    pub fn paint(cx: &PaintContext<'_>) -> Scene {
        let mut scene = Scene::default();
        let vp = cx.camera.viewport();
        let config = cx.config;
        let below_axis = Rect::new(
            0.0,
            config.axis_height,
            vp.width,
            (vp.height - config.axis_height).max(0.0),
        );
        let plot = Rect::new(
            cx.camera.left_margin(),
            config.axis_height,
            cx.camera.plot_width(),
            below_axis.height,
        );

        scene.fill(Rect::new(0.0, 0.0, vp.width, vp.height), cx.theme.background, None);
        Self::paint_bands(&mut scene, cx, below_axis);
        Self::paint_group_labels(&mut scene, cx, below_axis);

        let ticks = AxisRenderer::ticks(cx.camera, cx.measure, config);
        AxisRenderer::paint_grid(&mut scene, &ticks, cx.camera, cx.theme, config);
        Self::paint_group_separators(&mut scene, cx, below_axis);

        for &idx in &cx.frame.paint_order {
            Self::paint_record(&mut scene, cx, idx, plot);
        }

        AxisRenderer::paint(&mut scene, &ticks, cx.camera, cx.theme, config);
        Self::paint_scroll_indicator(&mut scene, cx);
        Self::paint_badges(&mut scene, cx, plot);
        scene
    }

    fn band_top(cx: &PaintContext<'_>, group: usize) -> f64 {
        cx.layout.groups[group].y_offset + cx.frame.camera.offset_y + cx.camera.vertical_inset()
    }

    fn paint_bands(scene: &mut Scene, cx: &PaintContext<'_>, area: Rect) {
        for (i, group) in cx.layout.groups.iter().enumerate() {
            let band = Rect::new(0.0, Self::band_top(cx, i), area.width, group.height);
            if !band.intersects(&area) {
                continue;
            }
            let color = if i % 2 == 0 {
                cx.theme.background
            } else {
                cx.theme.alt_background
            };
            scene.fill(band, color, Some(area));
        }
    }

    fn paint_group_labels(scene: &mut Scene, cx: &PaintContext<'_>, area: Rect) {
        let config = cx.config;
        let column = Rect::new(0.0, area.y, cx.camera.left_margin(), area.height);
        scene.fill(column, cx.theme.label_column, None);

        const ACCENT_WIDTH: f64 = 3.0;
        const INSET: f64 = 10.0;
        let max_width = column.width - INSET * 2.0;
        for (i, group) in cx.layout.groups.iter().enumerate() {
            let top = Self::band_top(cx, i);
            let band = Rect::new(0.0, top, column.width, group.height);
            if !band.intersects(&column) {
                continue;
            }
            scene.fill(
                Rect::new(0.0, top, ACCENT_WIDTH, group.height),
                cx.theme.group_accent(&group.key),
                Some(column),
            );
            let Some(text) =
                ellipsize(cx.measure, &group.key, config.group_label_font_size, max_width)
            else {
                continue;
            };
            let text_y = top + (config.row_height - config.group_label_font_size) / 2.0;
            scene.push(DrawCommand::Text {
                text,
                origin: (INSET, text_y),
                font_size: config.group_label_font_size,
                color: cx.theme.text_secondary,
                clip: Some(column),
            });
        }
    }

    fn paint_group_separators(scene: &mut Scene, cx: &PaintContext<'_>, area: Rect) {
        for (i, group) in cx.layout.groups.iter().enumerate() {
            let y = Self::band_top(cx, i) + group.height;
            if y < area.y || y > area.bottom() {
                continue;
            }
            scene.push(DrawCommand::Line {
                from: (0.0, y),
                to: (area.width, y),
                width: 1.0,
                color: cx.theme.grid_line,
                clip: Some(area),
            });
        }
    }

    fn paint_record(scene: &mut Scene, cx: &PaintContext<'_>, idx: usize, plot: Rect) {
        let p = &cx.frame.projected[idx];
        if !p.rect.intersects(&plot) {
            return;
        }
        let record = &cx.records[p.record];
        let config = cx.config;
        let selected = cx.frame.selected == Some(p.record);
        let color = cx.theme.importance_color(record.importance.tier());

        if record.kind() == RecordKind::Period {
            let years = p.end_year as f64 - p.start_year as f64;
            let span = years * cx.camera.px_per_year(&cx.frame.camera);
            let bar = Rect::new(p.rect.x, p.rect.y, span.max(2.0), p.rect.height);
            scene.push(DrawCommand::FillRect {
                rect: bar,
                color: color.alpha(0.3),
                corner_radius: 3.0,
                clip: Some(plot),
            });
        }

        let glyph_center = (p.rect.x + config.glyph_inset / 2.0, p.rect.center_y());
        let image_ready = record.image_url.is_some() && cx.images.is_ready(&record.id);
        if image_ready {
            let side = (p.rect.height - 2.0).min(config.glyph_inset - 2.0).max(1.0);
            scene.push(DrawCommand::Image {
                record: record.id.clone(),
                rect: Rect::new(
                    glyph_center.0 - side / 2.0,
                    glyph_center.1 - side / 2.0,
                    side,
                    side,
                ),
                clip: Some(plot),
            });
        } else {
            scene.push(DrawCommand::Circle {
                center: glyph_center,
                radius: 4.0,
                color,
                clip: Some(plot),
            });
        }

        let text_color = if selected || record.importance.tier() >= 4 {
            cx.theme.text_primary
        } else {
            cx.theme.text_secondary
        };
        scene.push(DrawCommand::Text {
            text: record_label(record),
            origin: (
                p.rect.x + config.glyph_inset,
                p.rect.y + (p.rect.height - config.label_font_size) / 2.0,
            ),
            font_size: config.label_font_size,
            color: text_color,
            clip: Some(plot),
        });

        if selected {
            scene.push(DrawCommand::StrokeRect {
                rect: p.rect,
                color: cx.theme.selection,
                width: 2.0,
                clip: Some(plot),
            });
        }
    }

    fn paint_scroll_indicator(scene: &mut Scene, cx: &PaintContext<'_>) {
        let vp = cx.camera.viewport();
        let content = cx.camera.content_height();
        if content <= vp.height {
            return;
        }
        let config = cx.config;
        let track_height = (vp.height - config.axis_height).max(0.0);
        let thumb_height =
            (track_height * vp.height / content).clamp(20.0_f64.min(track_height), track_height);
        let range = content - vp.height;
        let progress = (-cx.frame.camera.offset_y / range).clamp(0.0, 1.0);
        let thumb = Rect::new(
            vp.width - config.scroll_indicator_width - 2.0,
            config.axis_height + (track_height - thumb_height) * progress,
            config.scroll_indicator_width,
            thumb_height,
        );
        scene.push(DrawCommand::FillRect {
            rect: thumb,
            color: cx.theme.scroll_indicator,
            corner_radius: config.scroll_indicator_width / 2.0,
            clip: None,
        });
    }

    fn paint_badges(scene: &mut Scene, cx: &PaintContext<'_>, plot: Rect) {
        let config = cx.config;
        for badge in cx.frame.badges() {
            if badge.rect.is_empty() || !badge.rect.intersects(&plot) {
                continue;
            }
            scene.push(DrawCommand::FillRect {
                rect: badge.rect,
                color: cx.theme.badge_background,
                corner_radius: badge.rect.height / 2.0,
                clip: Some(plot),
            });
            scene.push(DrawCommand::Text {
                text: badge.label(),
                origin: (
                    badge.rect.x + config.badge_padding,
                    badge.rect.y + (badge.rect.height - config.badge_font_size) / 2.0,
                ),
                font_size: config.badge_font_size,
                color: cx.theme.badge_text,
                clip: Some(plot),
            });
        }
    }
}
