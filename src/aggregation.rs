//! Visibility culling and badge aggregation.
//!
//! Within a row, records are walked left to right. A record is drawn when it
//! starts at least `collision_gap_px` after the right edge of the last drawn
//! record; otherwise it joins a pending hidden run. Each run is folded into a
//! single [`Badge`] anchored after the drawn record it collided with. Every
//! projected record ends up either drawn or inside exactly one badge.

use crate::data_types::{Badge, ProjectedRecord, Rect, TimelineConfig};
use crate::text::TextMeasure;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Visibility {
    /// Indices into the projected list, grouped by row and left to right.
    pub visible: Vec<usize>,
    pub badges: Vec<Badge>,
}

impl Visibility {
    pub fn hidden_count(&self) -> usize {
        self.badges.iter().map(|b| b.count).sum()
    }
}

/// Splits `projected` into drawn records and badges.
///
/// `selected` is a record index; that record is always drawn, even inside a
/// colliding run.
pub fn cull(
    projected: &[ProjectedRecord],
    selected: Option<usize>,
    measure: &dyn TextMeasure,
    config: &TimelineConfig,
) -> Visibility {
    let mut rows: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();
    for (idx, p) in projected.iter().enumerate() {
        rows.entry((p.group, p.row)).or_default().push(idx);
    }

    let mut out = Visibility::default();
    for members in rows.values_mut() {
        members.sort_by(|&a, &b| {
            projected[a]
                .rect
                .x
                .total_cmp(&projected[b].rect.x)
                .then(projected[a].entry.cmp(&projected[b].entry))
        });
        cull_row(projected, members, selected, measure, config, &mut out);
    }
    out
}

fn cull_row(
    projected: &[ProjectedRecord],
    members: &[usize],
    selected: Option<usize>,
    measure: &dyn TextMeasure,
    config: &TimelineConfig,
    out: &mut Visibility,
) {
    let Some((&first, rest)) = members.split_first() else {
        return;
    };
    out.visible.push(first);
    let mut anchor = first;
    let mut run: Vec<usize> = Vec::new();

    for &idx in rest {
        let p = &projected[idx];
        let clear = p.rect.x >= projected[anchor].rect.right() + config.collision_gap_px;
        let forced = selected == Some(p.record);
        if clear || forced {
            if let Some(badge) = fold_run(projected, anchor, &run, measure, config) {
                out.badges.push(badge);
            }
            run.clear();
            out.visible.push(idx);
            anchor = idx;
        } else {
            run.push(idx);
        }
    }
    if let Some(badge) = fold_run(projected, anchor, &run, measure, config) {
        out.badges.push(badge);
    }
}

fn fold_run(
    projected: &[ProjectedRecord],
    anchor: usize,
    run: &[usize],
    measure: &dyn TextMeasure,
    config: &TimelineConfig,
) -> Option<Badge> {
    if run.is_empty() {
        return None;
    }
    let a = &projected[anchor];
    let year_min = run
        .iter()
        .map(|&i| projected[i].start_year)
        .fold(a.start_year, i32::min);
    let year_max = run
        .iter()
        .map(|&i| projected[i].end_year.max(projected[i].start_year))
        .max()
        .unwrap_or(a.start_year);

    let label = format!("+{}", run.len());
    let width = measure.measure(&label, config.badge_font_size) + 2.0 * config.badge_padding;
    let rect = Rect::new(
        a.rect.right() + config.badge_margin,
        a.rect.y,
        width,
        a.rect.height,
    );
    Some(Badge {
        group: a.group,
        row: a.row,
        count: run.len(),
        year_min,
        year_max,
        members: run.to_vec(),
        rect,
    })
}
