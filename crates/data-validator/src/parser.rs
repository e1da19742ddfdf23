//! Raw Input Parsing

use crate::error::ValidationError;
use feature_engine::{RawPlayerStats, StatField};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A statistic as supplied by a client: either a JSON number or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

/// Parse one textual statistic
pub fn parse_value(field: StatField, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::Parse {
            field: field.key(),
            value: raw.to_string(),
        })
}

/// Build a stat line from urlencoded form fields keyed by stat abbreviation
pub fn parse_form(form: &HashMap<String, String>) -> Result<RawPlayerStats, ValidationError> {
    assemble(|field| {
        let raw = form
            .get(field.key())
            .ok_or(ValidationError::MissingField(field.key()))?;
        parse_value(field, raw)
    })
}

/// Build a stat line from JSON values that may be numbers or numeric strings
pub fn parse_values(values: &HashMap<String, RawValue>) -> Result<RawPlayerStats, ValidationError> {
    assemble(|field| match values.get(field.key()) {
        Some(RawValue::Number(n)) => Ok(*n),
        Some(RawValue::Text(text)) => parse_value(field, text),
        None => Err(ValidationError::MissingField(field.key())),
    })
}

fn assemble<F>(mut value_of: F) -> Result<RawPlayerStats, ValidationError>
where
    F: FnMut(StatField) -> Result<f64, ValidationError>,
{
    Ok(RawPlayerStats {
        games_played: value_of(StatField::GamesPlayed)?,
        points: value_of(StatField::Points)?,
        minutes: value_of(StatField::Minutes)?,
        field_goal_pct: value_of(StatField::FieldGoalPct)?,
        free_throw_pct: value_of(StatField::FreeThrowPct)?,
        offensive_rebounds: value_of(StatField::OffensiveRebounds)?,
        defensive_rebounds: value_of(StatField::DefensiveRebounds)?,
        assists: value_of(StatField::Assists)?,
        steals: value_of(StatField::Steals)?,
        blocks: value_of(StatField::Blocks)?,
        turnovers: value_of(StatField::Turnovers)?,
    })
}
