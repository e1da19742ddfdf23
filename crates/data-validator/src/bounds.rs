//! Dashboard Input Bounds

use feature_engine::{RawPlayerStats, StatField};
use serde::{Deserialize, Serialize};

/// Slider/number-input bounds offered to the user for one statistic.
///
/// These are presentation hints. Contract validation lives in
/// [`crate::Validator`] and is looser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl FieldBounds {
    const fn new(min: f64, max: f64, default: f64) -> Self {
        Self {
            min,
            max,
            default,
            step: 0.1,
        }
    }

    /// Bounds for a field on the input form
    pub fn for_field(field: StatField) -> Self {
        match field {
            StatField::GamesPlayed => Self { step: 1.0, ..Self::new(0.0, 82.0, 70.0) },
            StatField::Points => Self::new(0.0, 40.0, 15.0),
            StatField::Minutes => Self::new(0.0, 48.0, 25.0),
            StatField::FieldGoalPct => Self::new(0.0, 100.0, 45.0),
            StatField::FreeThrowPct => Self::new(0.0, 100.0, 75.0),
            StatField::OffensiveRebounds => Self::new(0.0, 10.0, 1.5),
            StatField::DefensiveRebounds => Self::new(0.0, 15.0, 4.0),
            StatField::Assists => Self::new(0.0, 15.0, 3.5),
            StatField::Steals => Self::new(0.0, 5.0, 1.0),
            StatField::Blocks => Self::new(0.0, 5.0, 0.5),
            StatField::Turnovers => Self::new(0.1, 10.0, 2.0),
        }
    }
}

/// Stat line pre-filled on the input form
pub fn default_player() -> RawPlayerStats {
    let d = |field| FieldBounds::for_field(field).default;
    RawPlayerStats {
        games_played: d(StatField::GamesPlayed),
        points: d(StatField::Points),
        minutes: d(StatField::Minutes),
        field_goal_pct: d(StatField::FieldGoalPct),
        free_throw_pct: d(StatField::FreeThrowPct),
        offensive_rebounds: d(StatField::OffensiveRebounds),
        defensive_rebounds: d(StatField::DefensiveRebounds),
        assists: d(StatField::Assists),
        steals: d(StatField::Steals),
        blocks: d(StatField::Blocks),
        turnovers: d(StatField::Turnovers),
    }
}
