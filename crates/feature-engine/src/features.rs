//! Feature Vector Assembly

use crate::stats::RawPlayerStats;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Number of features in the vector
pub const FEATURE_COUNT: usize = 8;

/// Feature names in vector order.
///
/// The fitted scaler and classifier address features by position, so this
/// order must match the column order used at training time.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "FG%",
    "FT%",
    "TOTAL_POINTS",
    "EFFICIENCY",
    "DEFENSIVE_IMPACT",
    "AST_TOV_RATIO",
    "OREB_SHARE",
    "GAME_IMPACT",
];

/// Engineered feature vector fed to the scaler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl DerivedFeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// `(name, value)` pairs in vector order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    pub fn field_goal_pct(&self) -> f64 {
        self.values[0]
    }

    pub fn free_throw_pct(&self) -> f64 {
        self.values[1]
    }

    pub fn total_points(&self) -> f64 {
        self.values[2]
    }

    pub fn efficiency(&self) -> f64 {
        self.values[3]
    }

    pub fn defensive_impact(&self) -> f64 {
        self.values[4]
    }

    pub fn ast_tov_ratio(&self) -> f64 {
        self.values[5]
    }

    pub fn oreb_share(&self) -> f64 {
        self.values[6]
    }

    pub fn game_impact(&self) -> f64 {
        self.values[7]
    }
}

/// Division that resolves a zero denominator to `0`.
///
/// Keeps predictions available for edge-case lines such as a player with
/// zero minutes or zero turnovers.
#[inline]
fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Derive the engineered feature vector from a raw stat line.
///
/// Pure and deterministic: identical input always yields a bit-identical
/// vector.
pub fn derive(stats: &RawPlayerStats) -> DerivedFeatureVector {
    let total_points = stats.games_played * stats.points;
    let efficiency = ratio_or_zero(stats.points, stats.minutes);
    let rebounds = stats.rebounds();
    let defensive_impact = stats.blocks + rebounds + stats.steals;
    let ast_tov_ratio = ratio_or_zero(stats.assists, stats.turnovers);
    let oreb_share = ratio_or_zero(stats.offensive_rebounds, rebounds);
    let game_impact = ratio_or_zero(stats.assists + rebounds, stats.minutes);

    let values = [
        stats.field_goal_pct,
        stats.free_throw_pct,
        total_points,
        efficiency,
        defensive_impact,
        ast_tov_ratio,
        oreb_share,
        game_impact,
    ];
    trace!("Derived features: {:?}", values);

    DerivedFeatureVector { values }
}
