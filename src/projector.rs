//! Layout plus camera to pixel rectangles.
//!
//! A pure function of its inputs: the same layout and camera always project
//! to the same rectangles, and nothing is cached between frames.

use crate::camera::Camera;
use crate::data_types::{ProjectedRecord, Record, RecordKind, Rect, TimelineConfig};
use crate::layout::StableLayout;

/// Screen-space top of a row at the camera's current state.
pub fn row_top(
    layout: &StableLayout,
    camera: &Camera,
    config: &TimelineConfig,
    group: usize,
    row: usize,
) -> f64 {
    layout.row_top(group, row, config) + camera.current().offset_y + camera.vertical_inset()
}

/// Projects every layout entry at the camera's current state, in entry order.
pub fn project(
    layout: &StableLayout,
    records: &[Record],
    camera: &Camera,
    config: &TimelineConfig,
) -> Vec<ProjectedRecord> {
    let state = camera.current();
    let ppy = camera.px_per_year(&state);
    layout
        .entries
        .iter()
        .enumerate()
        .map(|(entry_idx, entry)| {
            let record = &records[entry.record];
            let start = record.ordering_year();
            let end = record.end_ordering_year();
            let x = camera.year_to_x(start as f64);
            let width = match record.kind() {
                RecordKind::Period => ((end as f64 - start as f64) * ppy).max(entry.label_width),
                RecordKind::Event => entry.label_width,
            };
            let y = row_top(layout, camera, config, entry.group, entry.row) + config.row_padding;
            ProjectedRecord {
                entry: entry_idx,
                record: entry.record,
                group: entry.group,
                row: entry.row,
                rect: Rect::new(x, y, width, config.row_height - 2.0 * config.row_padding),
                label_width: entry.label_width,
                start_year: start,
                end_year: end,
            }
        })
        .collect()
}
