use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Fraction of the remaining distance covered on each frame.
    pub factor: f64,
    /// Offsets closer than this (pixels) to the target count as settled.
    pub settle_px: f64,
    pub settle_scale: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            factor: 0.25,
            settle_px: 0.5,
            settle_scale: 1e-4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub enabled: bool,
    pub delay: Duration,
    /// Distance between the pointer and the tooltip's top-left corner.
    pub offset_px: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay: Duration::from_millis(400),
            offset_px: 14.0,
        }
    }
}

/// Every tunable of the timeline engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub row_height: f64,
    /// Vertical inset of a record bar inside its row.
    pub row_padding: f64,
    pub axis_height: f64,
    /// Width of the fixed group-label column on the left.
    pub label_column_width: f64,
    /// Pixels per year at scale 1.
    pub px_per_year: f64,
    pub max_scale: f64,
    /// Scale at which label widths are converted to years for row packing.
    pub layout_reference_scale: f64,
    /// Horizontal gap kept between packed records at the reference scale.
    pub layout_gap_px: f64,
    /// Minimum gap between two visible records in the same row.
    pub collision_gap_px: f64,
    pub label_font_size: f64,
    pub group_label_font_size: f64,
    pub axis_font_size: f64,
    /// Leading room reserved for the dot or image glyph.
    pub glyph_inset: f64,
    pub label_padding: f64,
    pub badge_font_size: f64,
    pub badge_padding: f64,
    pub badge_margin: f64,
    pub zoom_step: f64,
    pub wheel_zoom_sensitivity: f64,
    /// Pixels per line for line-based wheel deltas.
    pub wheel_line_px: f64,
    pub drag_threshold_px: f64,
    /// Extra spacing wanted between neighbors when navigating to a record.
    pub scroll_to_padding_px: f64,
    pub min_tick_spacing_px: f64,
    pub scroll_indicator_width: f64,
    pub animation: AnimationConfig,
    pub tooltip: TooltipConfig,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            row_height: 26.0,
            row_padding: 3.0,
            axis_height: 32.0,
            label_column_width: 150.0,
            px_per_year: 10.0,
            max_scale: 5.0,
            layout_reference_scale: 1.0,
            layout_gap_px: 8.0,
            collision_gap_px: 6.0,
            label_font_size: 12.0,
            group_label_font_size: 12.0,
            axis_font_size: 11.0,
            glyph_inset: 14.0,
            label_padding: 6.0,
            badge_font_size: 11.0,
            badge_padding: 5.0,
            badge_margin: 3.0,
            zoom_step: 1.5,
            wheel_zoom_sensitivity: 0.002,
            wheel_line_px: 20.0,
            drag_threshold_px: 5.0,
            scroll_to_padding_px: 12.0,
            min_tick_spacing_px: 60.0,
            scroll_indicator_width: 6.0,
            animation: AnimationConfig::default(),
            tooltip: TooltipConfig::default(),
        }
    }
}

impl TimelineConfig {
    /// Parses a partial JSON override; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("invalid timeline configuration")
    }

    /// Pixels per year at the given camera scale.
    pub fn px_per_year_at(&self, scale: f64) -> f64 {
        scale * self.px_per_year
    }
}
