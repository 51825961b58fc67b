//! Stable row layout.
//!
//! Records are split into groups by the active [`GroupingMode`] and packed into
//! rows with a greedy first-fit over per-row "occupied until" cursors. Label
//! widths are converted to years at a fixed reference scale, never the live
//! camera scale, so a record keeps its row while the user zooms and pans.

use crate::data_types::{GroupingMode, Record, RecordId, RecordKind, TimelineConfig};
use crate::text::TextMeasure;
use crate::utils::date_formatter::record_label;
use rayon::prelude::*;
use std::collections::HashMap;

/// Year range used when there is nothing to lay out.
pub const EMPTY_YEAR_RANGE: (i32, i32) = (0, 100);

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub key: String,
    /// Entry indices, ascending by ordering year, ties in input order.
    pub entries: Vec<usize>,
    /// Entry indices per row, each ascending by ordering year.
    pub rows: Vec<Vec<usize>>,
    pub min_year: i32,
    /// Top of the band in content space (below the axis).
    pub y_offset: f64,
    pub height: f64,
}

impl Group {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutEntry {
    /// Index into the record slice the layout was computed from.
    pub record: usize,
    pub group: usize,
    pub row: usize,
    pub label_width: f64,
}

#[derive(Clone, Debug)]
pub struct StableLayout {
    pub mode: GroupingMode,
    pub groups: Vec<Group>,
    pub entries: Vec<LayoutEntry>,
    /// Record index to entry index.
    by_record: Vec<usize>,
    by_id: HashMap<RecordId, usize>,
    pub year_range: (i32, i32),
    pub content_height: f64,
}

/// Pixel width of a record's label including the glyph inset.
pub fn label_width(record: &Record, measure: &dyn TextMeasure, config: &TimelineConfig) -> f64 {
    config.glyph_inset
        + measure.measure(&record_label(record), config.label_font_size)
        + config.label_padding
}

impl StableLayout {
    pub fn compute(
        records: &[Record],
        mode: GroupingMode,
        measure: &dyn TextMeasure,
        config: &TimelineConfig,
    ) -> Self {
        // Group membership in first-appearance order.
        let mut keys: Vec<(String, Vec<usize>)> = Vec::new();
        let mut key_index: HashMap<&str, usize> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            let key = record.group_key(mode);
            let slot = *key_index.entry(key).or_insert_with(|| {
                keys.push((key.to_string(), Vec::new()));
                keys.len() - 1
            });
            keys[slot].1.push(idx);
        }

        for (_, members) in keys.iter_mut() {
            // Stable: equal years keep input order.
            members.sort_by_key(|&i| records[i].ordering_year());
        }
        keys.sort_by_key(|(_, members)| {
            members
                .first()
                .map(|&i| records[i].ordering_year())
                .unwrap_or(i32::MAX)
        });

        let ppy = config
            .px_per_year_at(config.layout_reference_scale)
            .max(f64::EPSILON);
        let gap_years = config.layout_gap_px / ppy;

        let packed: Vec<Vec<(usize, usize, f64)>> = keys
            .par_iter()
            .map(|(_, members)| pack_rows(records, members, measure, config, ppy, gap_years))
            .collect();

        let mut groups = Vec::with_capacity(keys.len());
        let mut entries = Vec::with_capacity(records.len());
        let mut by_record = vec![usize::MAX; records.len()];
        let mut y = config.axis_height;

        for (group_idx, ((key, members), rows)) in keys.into_iter().zip(packed).enumerate() {
            let row_count = rows.iter().map(|&(_, row, _)| row + 1).max().unwrap_or(1);
            let mut group_rows = vec![Vec::new(); row_count];
            let mut group_entries = Vec::with_capacity(rows.len());
            for (record, row, width) in rows {
                let entry_idx = entries.len();
                entries.push(LayoutEntry {
                    record,
                    group: group_idx,
                    row,
                    label_width: width,
                });
                by_record[record] = entry_idx;
                group_rows[row].push(entry_idx);
                group_entries.push(entry_idx);
            }
            let height = row_count as f64 * config.row_height;
            groups.push(Group {
                key,
                entries: group_entries,
                rows: group_rows,
                min_year: members
                    .first()
                    .map(|&i| records[i].ordering_year())
                    .unwrap_or(0),
                y_offset: y,
                height,
            });
            y += height;
        }

        let year_range = records
            .iter()
            .fold(None, |acc: Option<(i32, i32)>, r| {
                let (lo, hi) = (r.ordering_year(), r.end_ordering_year());
                Some(match acc {
                    Some((a, b)) => (a.min(lo), b.max(hi)),
                    None => (lo, hi),
                })
            })
            .unwrap_or(EMPTY_YEAR_RANGE);

        let by_id = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), by_record[i]))
            .collect();

        tracing::info!(
            records = records.len(),
            groups = groups.len(),
            rows = groups.iter().map(Group::row_count).sum::<usize>(),
            ?mode,
            "stable layout computed"
        );

        Self {
            mode,
            groups,
            entries,
            by_record,
            by_id,
            year_range,
            content_height: y,
        }
    }

    pub fn entry_for_record(&self, record: usize) -> Option<&LayoutEntry> {
        self.by_record
            .get(record)
            .and_then(|&e| self.entries.get(e))
    }

    pub fn entry_index_for_id(&self, id: &RecordId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Entry indices sharing the row of `entry`, ascending by year.
    pub fn row_of(&self, entry: usize) -> &[usize] {
        let e = &self.entries[entry];
        &self.groups[e.group].rows[e.row]
    }

    /// Top of a row in content space.
    pub fn row_top(&self, group: usize, row: usize, config: &TimelineConfig) -> f64 {
        self.groups[group].y_offset + row as f64 * config.row_height
    }

    pub fn total_rows(&self) -> usize {
        self.groups.iter().map(Group::row_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First-fit packing of one group. Returns `(record, row, label_width)` in year order.
fn pack_rows(
    records: &[Record],
    members: &[usize],
    measure: &dyn TextMeasure,
    config: &TimelineConfig,
    ppy: f64,
    gap_years: f64,
) -> Vec<(usize, usize, f64)> {
    let mut cursors: Vec<f64> = Vec::new();
    let mut out = Vec::with_capacity(members.len());
    for &idx in members {
        let record = &records[idx];
        let width = label_width(record, measure, config);
        let (start, end) = occupied_years(record, width / ppy);
        let row = match cursors.iter().position(|&c| c <= start - gap_years) {
            Some(row) => row,
            None => {
                cursors.push(f64::NEG_INFINITY);
                cursors.len() - 1
            }
        };
        cursors[row] = end + gap_years;
        out.push((idx, row, width));
    }
    out
}

/// Year span a record occupies at the reference scale.
pub fn occupied_years(record: &Record, label_years: f64) -> (f64, f64) {
    let start = record.ordering_year() as f64;
    let label_end = start + label_years;
    match record.kind() {
        RecordKind::Event => (start, label_end),
        RecordKind::Period => (start, (record.end_ordering_year() as f64).max(label_end)),
    }
}
