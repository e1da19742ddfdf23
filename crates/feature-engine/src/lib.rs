//! Feature Engineering Engine
//!
//! Turns a raw per-game box-score line into the eight engineered features the
//! career-length classifier was fitted on.

mod advanced;
mod features;
mod stats;

pub use advanced::AdvancedStats;
pub use features::{derive, DerivedFeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use stats::{RawPlayerStats, StatField};
