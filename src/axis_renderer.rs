use crate::camera::Camera;
use crate::data_types::{Rect, TimelineConfig};
use crate::rendering::{DrawCommand, Scene};
use crate::text::TextMeasure;
use crate::theme::TimelineTheme;
use crate::utils::date_formatter::format_axis_year;

/// Candidate tick intervals in years, densest first.
pub const TICK_INTERVALS: [i64; 5] = [5, 10, 20, 50, 100];

/// Gap kept between two consecutive axis labels.
const LABEL_SPACING: f64 = 8.0;
const TICK_LENGTH: f64 = 6.0;
/// Upper bound on ticks per frame; extents of millions of years widen the interval.
pub const MAX_TICKS: i64 = 200;

#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub year: i64,
    pub x: f64,
    /// Label and its left edge; `None` when it would overlap its neighbor.
    pub label: Option<(String, f64)>,
}

pub struct AxisRenderer;

impl AxisRenderer {
    /// Picks the densest interval whose ticks are at least `min_spacing` apart.
    pub fn tick_interval(px_per_year: f64, min_spacing: f64) -> i64 {
        TICK_INTERVALS
            .iter()
            .copied()
            .find(|&i| i as f64 * px_per_year >= min_spacing)
            .unwrap_or(TICK_INTERVALS[TICK_INTERVALS.len() - 1])
    }

    /// Widens `interval` tenfold until the visible span holds at most
    /// [`MAX_TICKS`] ticks.
    pub fn bounded_interval(interval: i64, first_year: i64, last_year: i64) -> i64 {
        let span = last_year.saturating_sub(first_year).max(0);
        let mut interval = interval.max(1);
        while span / interval > MAX_TICKS {
            match interval.checked_mul(10) {
                Some(wider) => interval = wider,
                None => break,
            }
        }
        interval
    }

    pub fn ticks(
        camera: &Camera,
        measure: &dyn TextMeasure,
        config: &TimelineConfig,
    ) -> Vec<AxisTick> {
        let state = camera.current();
        let ppy = camera.px_per_year(&state);
        if !(ppy.is_finite() && ppy > 0.0) {
            return vec![];
        }
        let plot_left = camera.left_margin();
        let plot_right = camera.viewport().width;
        let first_year = camera.x_to_year(plot_left).ceil() as i64;
        let last_year = camera.x_to_year(plot_right).floor() as i64;
        let interval = Self::bounded_interval(
            Self::tick_interval(ppy, config.min_tick_spacing_px),
            first_year,
            last_year,
        );
        let first = first_year.div_euclid(interval) * interval
            + if first_year.rem_euclid(interval) == 0 { 0 } else { interval };

        let mut ticks = Vec::new();
        let mut last_label_right = f64::NEG_INFINITY;
        let mut year = first;
        while year <= last_year {
            let x = camera.year_to_x(year as f64);
            let text = format_axis_year(year);
            let width = measure.measure(&text, config.axis_font_size);
            let left = (x - width / 2.0).clamp(plot_left, (plot_right - width).max(plot_left));
            let label = if left >= last_label_right + LABEL_SPACING {
                last_label_right = left + width;
                Some((text, left))
            } else {
                None
            };
            ticks.push(AxisTick { year, x, label });
            year += interval;
        }
        ticks
    }

    /// Faint vertical lines through the plot area at each tick.
    pub fn paint_grid(
        scene: &mut Scene,
        ticks: &[AxisTick],
        camera: &Camera,
        theme: &TimelineTheme,
        config: &TimelineConfig,
    ) {
        let vp = camera.viewport();
        let plot = Rect::new(
            camera.left_margin(),
            config.axis_height,
            camera.plot_width(),
            (vp.height - config.axis_height).max(0.0),
        );
        for tick in ticks {
            scene.push(DrawCommand::Line {
                from: (tick.x, plot.y),
                to: (tick.x, plot.bottom()),
                width: 1.0,
                color: theme.grid_line,
                clip: Some(plot),
            });
        }
    }

    pub fn paint(
        scene: &mut Scene,
        ticks: &[AxisTick],
        camera: &Camera,
        theme: &TimelineTheme,
        config: &TimelineConfig,
    ) {
        let vp = camera.viewport();
        let strip = Rect::new(0.0, 0.0, vp.width, config.axis_height);
        let clip = Rect::new(camera.left_margin(), 0.0, camera.plot_width(), config.axis_height);
        scene.fill(strip, theme.axis_background, None);
        scene.push(DrawCommand::Line {
            from: (0.0, config.axis_height),
            to: (vp.width, config.axis_height),
            width: 1.0,
            color: theme.axis_line,
            clip: None,
        });

        let text_y = (config.axis_height - TICK_LENGTH - config.axis_font_size) / 2.0;
        for tick in ticks {
            scene.push(DrawCommand::Line {
                from: (tick.x, config.axis_height - TICK_LENGTH),
                to: (tick.x, config.axis_height),
                width: 1.0,
                color: theme.axis_line,
                clip: Some(clip),
            });
            if let Some((text, left)) = &tick.label {
                scene.push(DrawCommand::Text {
                    text: text.clone(),
                    origin: (*left, text_y),
                    font_size: config.axis_font_size,
                    color: theme.text_muted,
                    clip: Some(clip),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_follows_density() {
        assert_eq!(AxisRenderer::tick_interval(20.0, 60.0), 5);
        assert_eq!(AxisRenderer::tick_interval(6.0, 60.0), 10);
        assert_eq!(AxisRenderer::tick_interval(3.0, 60.0), 20);
        assert_eq!(AxisRenderer::tick_interval(1.2, 60.0), 50);
        assert_eq!(AxisRenderer::tick_interval(0.1, 60.0), 100);
    }

    #[test]
    fn interval_widens_only_for_huge_spans() {
        assert_eq!(AxisRenderer::bounded_interval(100, -500, 2000), 100);
        assert_eq!(AxisRenderer::bounded_interval(100, 0, 1_000_000), 10_000);
        let widest = AxisRenderer::bounded_interval(100, i32::MIN as i64, i32::MAX as i64);
        assert!((i32::MAX as i64 - i32::MIN as i64) / widest <= MAX_TICKS);
    }
}
