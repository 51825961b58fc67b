//! Pan/zoom camera with an animated target.
//!
//! The camera keeps two snapshots: `current`, which is what gets painted, and
//! `target`, where it is heading. Mutations only touch the target (drags write
//! both). [`Camera::tick`] is pumped once per display frame by the host and
//! moves `current` toward `target` with exponential smoothing until the
//! remaining distance falls under the settle thresholds.
//!
//! Year to pixel mapping, for a state `s`:
//!
//! ```text
//! x = (year - min_year) * s.scale * px_per_year + s.offset_x + left_margin
//! ```

use crate::data_types::{AnimationConfig, TimelineConfig, Viewport};
use crate::layout::EMPTY_YEAR_RANGE;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraPhase {
    /// `current == target`; no frames are needed.
    Settled,
    /// `current` is converging toward `target`.
    Animating,
}

#[derive(Clone, Debug)]
pub struct Camera {
    current: CameraState,
    target: CameraState,
    phase: CameraPhase,
    min_year: f64,
    max_year: f64,
    content_height: f64,
    viewport: Viewport,
    px_per_year: f64,
    left_margin: f64,
    max_scale: f64,
    animation: AnimationConfig,
}

impl Camera {
    pub fn new(config: &TimelineConfig, viewport: Viewport) -> Self {
        let mut camera = Self {
            current: CameraState::default(),
            target: CameraState::default(),
            phase: CameraPhase::Settled,
            min_year: EMPTY_YEAR_RANGE.0 as f64,
            max_year: EMPTY_YEAR_RANGE.1 as f64,
            content_height: config.axis_height,
            viewport,
            px_per_year: config.px_per_year,
            left_margin: config.label_column_width,
            max_scale: config.max_scale,
            animation: config.animation.clone(),
        };
        camera.current = camera.clamp_state(camera.current);
        camera.target = camera.current;
        camera
    }

    pub fn current(&self) -> CameraState {
        self.current
    }

    pub fn target(&self) -> CameraState {
        self.target
    }

    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == CameraPhase::Animating
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn left_margin(&self) -> f64 {
        self.left_margin
    }

    pub fn min_year(&self) -> f64 {
        self.min_year
    }

    pub fn max_year(&self) -> f64 {
        self.max_year
    }

    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Width of the plot area to the right of the label column.
    pub fn plot_width(&self) -> f64 {
        (self.viewport.width - self.left_margin).max(1.0)
    }

    pub fn px_per_year(&self, state: &CameraState) -> f64 {
        state.scale * self.px_per_year
    }

    /// Scale at which the whole year extent fits the plot width.
    pub fn min_scale(&self) -> f64 {
        let span = (self.max_year - self.min_year).max(1.0);
        let fit = self.plot_width() / (span * self.px_per_year);
        if fit.is_finite() && fit > 0.0 {
            fit.min(self.max_scale)
        } else {
            self.max_scale
        }
    }

    /// Downward shift that centers content shorter than the viewport.
    pub fn vertical_inset(&self) -> f64 {
        ((self.viewport.height - self.content_height) / 2.0).max(0.0)
    }

    /// Allowed range for `offset_y`.
    pub fn offset_y_bounds(&self) -> (f64, f64) {
        ((self.viewport.height - self.content_height).min(0.0), 0.0)
    }

    /// Updates the data extent. An empty extent falls back to `[0, 100]`.
    pub fn set_extent(&mut self, year_range: Option<(i32, i32)>, content_height: f64) {
        let (lo, hi) = year_range.unwrap_or(EMPTY_YEAR_RANGE);
        self.min_year = lo as f64;
        self.max_year = hi as f64;
        self.content_height = content_height;
        self.reclamp();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.reclamp();
    }

    fn reclamp(&mut self) {
        self.current = self.clamp_state(self.current);
        self.target = self.clamp_state(self.target);
        self.phase = if self.target == self.current {
            CameraPhase::Settled
        } else {
            CameraPhase::Animating
        };
    }

    pub fn year_to_x(&self, year: f64) -> f64 {
        self.year_to_x_at(&self.current, year)
    }

    pub fn x_to_year(&self, x: f64) -> f64 {
        self.x_to_year_at(&self.current, x)
    }

    pub fn year_to_x_at(&self, state: &CameraState, year: f64) -> f64 {
        (year - self.min_year) * self.px_per_year(state) + state.offset_x + self.left_margin
    }

    pub fn x_to_year_at(&self, state: &CameraState, x: f64) -> f64 {
        (x - self.left_margin - state.offset_x) / self.px_per_year(state) + self.min_year
    }

    /// Offset that puts `year` at pixel `x` for the given scale.
    pub fn offset_for(&self, year: f64, x: f64, scale: f64) -> f64 {
        x - self.left_margin - (year - self.min_year) * scale * self.px_per_year
    }

    pub fn clamp_state(&self, state: CameraState) -> CameraState {
        let scale = if state.scale.is_finite() {
            state.scale.clamp(self.min_scale(), self.max_scale)
        } else {
            self.min_scale()
        };
        let (lo, hi) = self.offset_y_bounds();
        let offset_y = if state.offset_y.is_finite() {
            state.offset_y.clamp(lo, hi)
        } else {
            hi
        };
        let offset_x = if state.offset_x.is_finite() {
            state.offset_x
        } else {
            0.0
        };
        CameraState {
            offset_x,
            offset_y,
            scale,
        }
    }

    /// Sets a new animation target.
    pub fn set_target(&mut self, target: CameraState) {
        self.target = self.clamp_state(target);
        if self.target == self.current {
            self.phase = CameraPhase::Settled;
        } else if self.phase != CameraPhase::Animating {
            tracing::trace!(goal = ?self.target, "camera animating");
            self.phase = CameraPhase::Animating;
        }
    }

    /// Moves both snapshots at once, skipping the animation.
    pub fn jump_to(&mut self, state: CameraState) {
        self.target = self.clamp_state(state);
        self.current = self.target;
        self.phase = CameraPhase::Settled;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let mut t = self.target;
        t.offset_x += dx;
        t.offset_y += dy;
        self.set_target(t);
    }

    /// Multiplies the target scale by `factor`, keeping the year under
    /// `pointer_x` in place.
    pub fn zoom_at(&mut self, pointer_x: f64, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old = self.target;
        let year = self.x_to_year_at(&old, pointer_x);
        let scale = (old.scale * factor).clamp(self.min_scale(), self.max_scale);
        self.set_target(CameraState {
            offset_x: self.offset_for(year, pointer_x, scale),
            offset_y: old.offset_y,
            scale,
        });
    }

    /// Stops any animation where it is so a drag starts from what is on screen.
    pub fn begin_drag(&mut self) {
        self.target = self.current;
        self.phase = CameraPhase::Settled;
    }

    /// Drag translation: current and target move together.
    pub fn drag_by(&mut self, dx: f64, dy: f64) {
        let mut t = self.target;
        t.offset_x += dx;
        t.offset_y += dy;
        self.jump_to(t);
    }

    /// Advances the animation by one frame. Returns true if `current` moved.
    pub fn tick(&mut self) -> bool {
        if self.phase == CameraPhase::Settled {
            return false;
        }
        let f = self.animation.factor.clamp(f64::EPSILON, 1.0);
        let c = &mut self.current;
        let t = &self.target;
        c.offset_x += (t.offset_x - c.offset_x) * f;
        c.offset_y += (t.offset_y - c.offset_y) * f;
        c.scale += (t.scale - c.scale) * f;

        let settled = (t.offset_x - c.offset_x).abs() < self.animation.settle_px
            && (t.offset_y - c.offset_y).abs() < self.animation.settle_px
            && (t.scale - c.scale).abs() < self.animation.settle_scale;
        if settled {
            self.current = self.target;
            self.phase = CameraPhase::Settled;
            tracing::trace!("camera settled");
        }
        true
    }
}
