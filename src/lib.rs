//! Wind field derivation for SAR ocean wind products.
//!
//! The numeric core ([`grid`], [`time`], [`kinematics`], [`stats`], [`subset`],
//! [`georef`]) is pure and works on in-memory `ndarray` arrays. The
//! [`readers`], [`export`] and [`batch_runner`] modules wrap it with GDAL
//! input/output for the `sswind` binary.

pub mod batch_runner;
pub mod bbox;
pub mod config;
pub mod error;
pub mod export;
pub mod georef;
pub mod grid;
pub mod kinematics;
pub mod readers;
pub mod stats;
pub mod subset;
pub mod time;

pub use bbox::Bbox;
pub use error::InvalidInputError;
pub use georef::{Gcp, geotransform_from_gcps, grid_corner_gcps};
pub use grid::{Grid, normalize_longitude, normalized_longitude};
pub use kinematics::{components_to_direction, speed_direction_to_components};
pub use stats::{RegionSummary, direction_std};
pub use subset::{point_in_box, select_in_box, select_speed_direction_in_box};
pub use time::{datetime_to_compact_string, seconds_to_datetime};
