use crate::camera::{Camera, CameraState};
use crate::data_types::{Record, RecordKind, TimelineConfig};
use crate::layout::StableLayout;

/// Minimum padding, in years, around a badge's range when zooming to it.
pub const BADGE_MIN_PAD_YEARS: f64 = 20.0;
/// Share of a badge's range added on each side when zooming to it.
pub const BADGE_PAD_RATIO: f64 = 0.15;

/// ViewController computes camera targets for navigation (fit, zoom steps,
/// badge zoom, scroll-to-record) independently of the GPUI infrastructure to
/// facilitate testing. Every function is pure: it reads the camera and returns
/// the state to hand to [`Camera::set_target`].
pub struct ViewController;

impl ViewController {
    /// Frames the whole year extent.
    ///
    /// Content shorter than the viewport stays centered through the camera's
    /// vertical inset; taller content is centered on `focus_y` (content-space
    /// y of the selected row) when given, otherwise scrolled to the top.
    pub fn fit_target(camera: &Camera, focus_y: Option<f64>) -> CameraState {
        let vp = camera.viewport();
        let offset_y = match focus_y {
            Some(y) if camera.content_height() > vp.height => vp.height / 2.0 - y,
            _ => 0.0,
        };
        camera.clamp_state(CameraState {
            offset_x: 0.0,
            offset_y,
            scale: camera.min_scale(),
        })
    }

    /// Target for a zoom step around the plot center, keeping the year there fixed.
    pub fn zoom_step_target(camera: &Camera, factor: f64) -> CameraState {
        let target = camera.target();
        if !factor.is_finite() || factor <= 0.0 {
            return target;
        }
        let pivot = camera.left_margin() + camera.plot_width() / 2.0;
        let year = camera.x_to_year_at(&target, pivot);
        let scale = (target.scale * factor).clamp(camera.min_scale(), camera.max_scale());
        CameraState {
            offset_x: camera.offset_for(year, pivot, scale),
            offset_y: target.offset_y,
            scale,
        }
    }

    /// Years added on each side of `[year_min, year_max]` when zooming to it.
    pub fn badge_padding(year_min: i32, year_max: i32) -> f64 {
        let range = (year_max as f64 - year_min as f64).abs();
        (range * BADGE_PAD_RATIO).max(BADGE_MIN_PAD_YEARS)
    }

    /// Fits `[year_min - pad, year_max + pad]` exactly into the plot width.
    ///
    /// When the needed scale falls outside the allowed range, the clamped
    /// scale is used and the range is centered instead.
    pub fn zoom_to_range_target(camera: &Camera, year_min: i32, year_max: i32) -> CameraState {
        let (a, b) = (year_min.min(year_max) as f64, year_min.max(year_max) as f64);
        let pad = Self::badge_padding(year_min, year_max);
        let lo = a - pad;
        let hi = b + pad;
        let base_ppy = camera.px_per_year(&CameraState {
            scale: 1.0,
            ..CameraState::default()
        });
        let wanted = camera.plot_width() / ((hi - lo) * base_ppy);
        let scale = wanted.clamp(camera.min_scale(), camera.max_scale());
        let offset_x = if (scale - wanted).abs() <= f64::EPSILON * wanted.abs().max(1.0) {
            camera.offset_for(lo, camera.left_margin(), wanted)
        } else {
            let center = camera.left_margin() + camera.plot_width() / 2.0;
            camera.offset_for((lo + hi) / 2.0, center, scale)
        };
        CameraState {
            offset_x,
            offset_y: camera.target().offset_y,
            scale,
        }
    }

    /// Scale at which `entry` no longer collides with its same-row neighbors.
    ///
    /// For each adjacent pair the left record's label (plus padding) must fit
    /// in the year gap between the two starts. Pairs starting the same year
    /// can never be separated and are skipped.
    pub fn separating_scale(
        layout: &StableLayout,
        records: &[Record],
        entry: usize,
        config: &TimelineConfig,
    ) -> Option<f64> {
        let row = layout.row_of(entry);
        let pos = row.iter().position(|&e| e == entry)?;
        let year = |e: usize| records[layout.entries[e].record].ordering_year();
        let mut pairs = Vec::with_capacity(2);
        if pos > 0 {
            pairs.push((row[pos - 1], entry));
        }
        if pos + 1 < row.len() {
            pairs.push((entry, row[pos + 1]));
        }

        pairs
            .into_iter()
            .filter_map(|(left, right)| {
                let gap = year(right) as f64 - year(left) as f64;
                if gap <= 0.0 {
                    return None;
                }
                let width = layout.entries[left].label_width + config.scroll_to_padding_px;
                Some(width / (gap * config.px_per_year))
            })
            .reduce(f64::max)
    }

    /// Centers the record on screen, raising the zoom only when its row
    /// neighbors would otherwise overlap it at the current scale.
    pub fn scroll_to_entry_target(
        camera: &Camera,
        layout: &StableLayout,
        records: &[Record],
        entry: usize,
        config: &TimelineConfig,
    ) -> CameraState {
        let e = &layout.entries[entry];
        let record = &records[e.record];
        let current = camera.target();

        let scale = match Self::separating_scale(layout, records, entry, config) {
            Some(needed) if needed > current.scale => needed.min(camera.max_scale()),
            _ => current.scale,
        };
        let scale = scale.clamp(camera.min_scale(), camera.max_scale());

        let center_year = match record.kind() {
            RecordKind::Period => {
                (record.ordering_year() as f64 + record.end_ordering_year() as f64) / 2.0
            }
            RecordKind::Event => record.ordering_year() as f64,
        };
        let center_x = camera.left_margin() + camera.plot_width() / 2.0;
        let row_center = layout.row_top(e.group, e.row, config) + config.row_height / 2.0;

        camera.clamp_state(CameraState {
            offset_x: camera.offset_for(center_year, center_x, scale),
            offset_y: camera.viewport().height / 2.0 - row_center,
            scale,
        })
    }

    /// Wheel zoom factor for a vertical delta; positive deltas zoom in.
    pub fn wheel_zoom_factor(delta_y: f64, sensitivity: f64) -> f64 {
        const MAX_EXPONENT: f64 = 20.0;
        (delta_y * sensitivity).clamp(-MAX_EXPONENT, MAX_EXPONENT).exp()
    }
}
