//! gpui_timeline crate for zoomable historical timelines in GPUI

pub mod aggregation;
pub mod axis_renderer;
pub mod camera;
pub mod data_types;
pub mod engine;
pub mod frame;
pub mod image_cache;
pub mod interaction;
pub mod layout;
pub mod projector;
pub mod rendering;
pub mod scheduler;
pub mod text;
pub mod theme;
pub mod timeline_view;
pub mod utils;
pub mod view_controller;

pub use camera::{Camera, CameraPhase, CameraState};
pub use data_types::{
    load_records, records_from_json, GroupingMode, Record, RecordId, TimelineConfig, Viewport,
};
pub use engine::{TickOutcome, TimelineEngine};
pub use layout::StableLayout;
pub use rendering::{DrawCommand, Scene};
pub use timeline_view::{init, TimelineEvent, TimelineView};
