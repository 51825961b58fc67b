use crate::aggregation::{cull, Visibility};
use crate::camera::{Camera, CameraState};
use crate::data_types::{Badge, ProjectedRecord, Record, TimelineConfig};
use crate::layout::StableLayout;
use crate::projector::project;
use crate::text::TextMeasure;

/// Everything derived for one paint: projection, culling and z-order.
///
/// Rebuilt from the layout and camera on every paint and never mutated
/// afterwards, so hit-testing always sees a complete frame.
#[derive(Clone, Debug)]
pub struct Frame {
    pub camera: CameraState,
    pub projected: Vec<ProjectedRecord>,
    pub visibility: Visibility,
    /// Visible projected indices back to front: later-starting records first,
    /// the selected record last.
    pub paint_order: Vec<usize>,
    pub selected: Option<usize>,
}

impl Frame {
    pub fn build(
        layout: &StableLayout,
        records: &[Record],
        camera: &Camera,
        selected: Option<usize>,
        measure: &dyn TextMeasure,
        config: &TimelineConfig,
    ) -> Self {
        let projected = project(layout, records, camera, config);
        let visibility = cull(&projected, selected, measure, config);

        let mut paint_order = visibility.visible.clone();
        paint_order.sort_by(|&a, &b| {
            projected[b]
                .start_year
                .cmp(&projected[a].start_year)
                .then(projected[a].entry.cmp(&projected[b].entry))
        });
        if let Some(sel) = selected {
            if let Some(pos) = paint_order.iter().position(|&i| projected[i].record == sel) {
                let idx = paint_order.remove(pos);
                paint_order.push(idx);
            }
        }

        Self {
            camera: camera.current(),
            projected,
            visibility,
            paint_order,
            selected,
        }
    }

    pub fn badges(&self) -> &[Badge] {
        &self.visibility.badges
    }

    pub fn is_visible(&self, record: usize) -> bool {
        self.visibility
            .visible
            .iter()
            .any(|&i| self.projected[i].record == record)
    }

    pub fn projected_for_record(&self, record: usize) -> Option<&ProjectedRecord> {
        self.projected.iter().find(|p| p.record == record)
    }
}
