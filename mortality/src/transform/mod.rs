//! Transformation module.
//!
//! - [`classify`]: file name to granularity tag
//! - [`period`]: `YYYY-Wnn` period labels to year and week
//! - [`reshape`]: wide source table to long records
//! - [`pipeline`]: the ordered run over all expected files

pub mod classify;
pub mod period;
pub mod pipeline;
pub mod reshape;

pub use classify::detect_granularity;
pub use period::parse_period;
pub use pipeline::*;
pub use reshape::reshape;
