//! Advanced Stats Summary

use crate::features::derive;
use crate::stats::RawPlayerStats;
use serde::{Deserialize, Serialize};

/// Display-oriented summary of the engineered stats.
///
/// Mirrors the feature vector but expresses the offensive rebound share as a
/// percentage and carries total rebounds, which the vector only uses as an
/// intermediate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvancedStats {
    /// Season points (`GP * PTS`)
    pub total_points: f64,
    /// Points per minute
    pub scoring_efficiency: f64,
    /// Total rebounds per game
    pub rebounds: f64,
    /// Blocks + rebounds + steals
    pub defensive_impact: f64,
    /// Assist-to-turnover ratio
    pub ast_tov_ratio: f64,
    /// Share of rebounds that are offensive, 0-100
    pub offensive_rebound_pct: f64,
    /// Assists + rebounds per minute
    pub impact_per_minute: f64,
}

impl AdvancedStats {
    pub fn from_stats(stats: &RawPlayerStats) -> Self {
        let features = derive(stats);
        Self {
            total_points: features.total_points(),
            scoring_efficiency: features.efficiency(),
            rebounds: stats.rebounds(),
            defensive_impact: features.defensive_impact(),
            ast_tov_ratio: features.ast_tov_ratio(),
            offensive_rebound_pct: features.oreb_share() * 100.0,
            impact_per_minute: features.game_impact(),
        }
    }

    /// Formatted `(label, value)` rows for dashboards
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Season Total Points", format!("{:.1}", self.total_points)),
            ("Scoring Efficiency", format!("{:.2} pts/min", self.scoring_efficiency)),
            ("Defensive Impact", format!("{:.1}", self.defensive_impact)),
            ("AST/TOV Ratio", format!("{:.2}", self.ast_tov_ratio)),
            ("Offensive Rebound %", format!("{:.1}%", self.offensive_rebound_pct)),
            ("Impact per Minute", format!("{:.2}", self.impact_per_minute)),
        ]
    }
}
