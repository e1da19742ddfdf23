//! Raw Box-Score Statistics

use serde::{Deserialize, Serialize};

/// Per-game box-score line for one player, as entered by the user.
///
/// Serialized with the stat abbreviations used on the input form
/// (`GP`, `FG%`, ...), so JSON payloads and form posts share one key set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPlayerStats {
    /// Games played
    #[serde(rename = "GP")]
    pub games_played: f64,
    /// Points per game
    #[serde(rename = "PTS")]
    pub points: f64,
    /// Minutes per game
    #[serde(rename = "MIN")]
    pub minutes: f64,
    /// Field-goal percentage, 0-100
    #[serde(rename = "FG%")]
    pub field_goal_pct: f64,
    /// Free-throw percentage, 0-100
    #[serde(rename = "FT%")]
    pub free_throw_pct: f64,
    /// Offensive rebounds per game
    #[serde(rename = "OREB")]
    pub offensive_rebounds: f64,
    /// Defensive rebounds per game
    #[serde(rename = "DREB")]
    pub defensive_rebounds: f64,
    /// Assists per game
    #[serde(rename = "AST")]
    pub assists: f64,
    /// Steals per game
    #[serde(rename = "STL")]
    pub steals: f64,
    /// Blocks per game
    #[serde(rename = "BLK")]
    pub blocks: f64,
    /// Turnovers per game
    #[serde(rename = "TOV")]
    pub turnovers: f64,
}

impl RawPlayerStats {
    /// Read a single statistic by field
    pub fn get(&self, field: StatField) -> f64 {
        match field {
            StatField::GamesPlayed => self.games_played,
            StatField::Points => self.points,
            StatField::Minutes => self.minutes,
            StatField::FieldGoalPct => self.field_goal_pct,
            StatField::FreeThrowPct => self.free_throw_pct,
            StatField::OffensiveRebounds => self.offensive_rebounds,
            StatField::DefensiveRebounds => self.defensive_rebounds,
            StatField::Assists => self.assists,
            StatField::Steals => self.steals,
            StatField::Blocks => self.blocks,
            StatField::Turnovers => self.turnovers,
        }
    }

    /// Total rebounds per game (`OREB + DREB`)
    pub fn rebounds(&self) -> f64 {
        self.defensive_rebounds + self.offensive_rebounds
    }
}

/// The eleven statistics collected for a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatField {
    GamesPlayed,
    Points,
    Minutes,
    FieldGoalPct,
    FreeThrowPct,
    OffensiveRebounds,
    DefensiveRebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
}

impl StatField {
    /// All fields in form order
    pub const ALL: [StatField; 11] = [
        StatField::GamesPlayed,
        StatField::Points,
        StatField::Minutes,
        StatField::FieldGoalPct,
        StatField::FreeThrowPct,
        StatField::OffensiveRebounds,
        StatField::DefensiveRebounds,
        StatField::Assists,
        StatField::Steals,
        StatField::Blocks,
        StatField::Turnovers,
    ];

    /// Wire key used by forms and JSON payloads
    pub fn key(&self) -> &'static str {
        match self {
            StatField::GamesPlayed => "GP",
            StatField::Points => "PTS",
            StatField::Minutes => "MIN",
            StatField::FieldGoalPct => "FG%",
            StatField::FreeThrowPct => "FT%",
            StatField::OffensiveRebounds => "OREB",
            StatField::DefensiveRebounds => "DREB",
            StatField::Assists => "AST",
            StatField::Steals => "STL",
            StatField::Blocks => "BLK",
            StatField::Turnovers => "TOV",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            StatField::GamesPlayed => "Games Played",
            StatField::Points => "Points per Game",
            StatField::Minutes => "Minutes per Game",
            StatField::FieldGoalPct => "Field Goal %",
            StatField::FreeThrowPct => "Free Throw %",
            StatField::OffensiveRebounds => "Offensive Rebounds",
            StatField::DefensiveRebounds => "Defensive Rebounds",
            StatField::Assists => "Assists",
            StatField::Steals => "Steals",
            StatField::Blocks => "Blocks",
            StatField::Turnovers => "Turnovers",
        }
    }

    /// Whether the field is a shooting percentage bounded to [0, 100]
    pub fn is_percentage(&self) -> bool {
        matches!(self, StatField::FieldGoalPct | StatField::FreeThrowPct)
    }
}
