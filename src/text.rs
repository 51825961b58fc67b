//! Label measurement.
//!
//! Layout, projection, badge sizing and label truncation all go through the
//! same [`TextMeasure`] so that widths agree between packing and painting.

pub trait TextMeasure: Send + Sync {
    /// Width in pixels of `text` rendered at `font_size`.
    fn measure(&self, text: &str, font_size: f64) -> f64;
}

/// Width estimate from an average glyph advance.
#[derive(Clone, Debug)]
pub struct EstimatedTextMeasure {
    /// Average advance as a fraction of the font size.
    pub glyph_ratio: f64,
}

impl Default for EstimatedTextMeasure {
    fn default() -> Self {
        Self { glyph_ratio: 0.58 }
    }
}

impl TextMeasure for EstimatedTextMeasure {
    fn measure(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.glyph_ratio
    }
}

/// Truncates `text` with a trailing ellipsis so that it fits `max_width`.
///
/// Returns `None` when not even the ellipsis fits.
pub fn ellipsize(
    measure: &dyn TextMeasure,
    text: &str,
    font_size: f64,
    max_width: f64,
) -> Option<String> {
    if measure.measure(text, font_size) <= max_width {
        return Some(text.to_string());
    }
    const ELLIPSIS: char = '…';
    let chars: Vec<char> = text.chars().collect();
    // Binary search on the number of kept characters.
    let (mut lo, mut hi) = (0usize, chars.len());
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        let candidate: String = chars[..mid].iter().chain(std::iter::once(&ELLIPSIS)).collect();
        if measure.measure(&candidate, font_size) <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    let kept: String = chars[..lo].iter().collect();
    let result = format!("{}{}", kept.trim_end(), ELLIPSIS);
    if measure.measure(&result, font_size) <= max_width {
        Some(result)
    } else {
        None
    }
}
