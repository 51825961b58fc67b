pub mod geometry;
pub mod record;
pub mod state;

// Re-export everything for convenience
pub use geometry::*;
pub use record::*;
pub use state::*;

use serde::{Deserialize, Serialize};

/// Which record field selects the horizontal band a record lives in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    #[default]
    Dynasty,
    Era,
}
