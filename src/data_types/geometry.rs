//! Per-frame geometry in viewport pixel space.

/// Axis-aligned rectangle, origin at the top-left, in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Pixel rectangle of one layout entry at the current camera.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedRecord {
    /// Index into the layout entries.
    pub entry: usize,
    /// Index into the engine's record list.
    pub record: usize,
    pub group: usize,
    pub row: usize,
    pub rect: Rect,
    /// Width of the measured label alone, independent of any period span.
    pub label_width: f64,
    pub start_year: i32,
    pub end_year: i32,
}

/// Summary marker for a run of records hidden at the current zoom.
#[derive(Clone, Debug, PartialEq)]
pub struct Badge {
    pub group: usize,
    pub row: usize,
    /// Number of hidden records folded into this badge.
    pub count: usize,
    pub year_min: i32,
    pub year_max: i32,
    /// Indices into the projected record list of the hidden records.
    pub members: Vec<usize>,
    pub rect: Rect,
}

impl Badge {
    pub fn label(&self) -> String {
        format!("+{}", self.count)
    }
}
