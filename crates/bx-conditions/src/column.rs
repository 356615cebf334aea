//! Structured condition-column names.
//!
//! Every condition column is named `PREFIX.label[.unit]`. `ENV.temperature`
//! and `ENV.pressure` are reserved and always present; everything else is a
//! free-form rate-parameter or auxiliary name tied to a mechanism's reaction
//! labels. Older files use a bracketed-unit spelling which
//! [`normalize_column`] translates before names reach the manager.

use crate::error::{ConditionError, ConditionResult};
use std::fmt;

/// The time column, in seconds.
pub const TIME_COLUMN: &str = "time.s";

/// Reserved temperature column, in Kelvin.
pub const TEMPERATURE_COLUMN: &str = "ENV.temperature.K";

/// Reserved pressure column, in Pascals.
pub const PRESSURE_COLUMN: &str = "ENV.pressure.Pa";

/// Condition-column prefixes, one per condition type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    Env,
    Conc,
    Emis,
    Photo,
    Loss,
    User,
    Surf,
}

impl Prefix {
    pub const ALL: [Prefix; 7] = [
        Prefix::Env,
        Prefix::Conc,
        Prefix::Emis,
        Prefix::Photo,
        Prefix::Loss,
        Prefix::User,
        Prefix::Surf,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ENV" => Some(Prefix::Env),
            "CONC" => Some(Prefix::Conc),
            "EMIS" => Some(Prefix::Emis),
            "PHOTO" => Some(Prefix::Photo),
            "LOSS" => Some(Prefix::Loss),
            "USER" => Some(Prefix::User),
            "SURF" => Some(Prefix::Surf),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Prefix::Env => "ENV",
            Prefix::Conc => "CONC",
            Prefix::Emis => "EMIS",
            Prefix::Photo => "PHOTO",
            Prefix::Loss => "LOSS",
            Prefix::User => "USER",
            Prefix::Surf => "SURF",
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `PREFIX.label[.unit]` column name.
///
/// Labels may not contain dots; a unit may (`SURF.x.particle number
/// concentration.# m-3` has label `x` and everything after it as the unit).
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionName {
    pub prefix: Prefix,
    pub label: String,
    pub unit: Option<String>,
}

impl ConditionName {
    pub fn parse(raw: &str) -> ConditionResult<Self> {
        let mut parts = raw.splitn(3, '.');
        let prefix = parts
            .next()
            .and_then(Prefix::parse)
            .ok_or_else(|| ConditionError::InvalidColumnFormat {
                name: raw.to_string(),
            })?;
        let label = parts
            .next()
            .filter(|label| !label.is_empty())
            .ok_or_else(|| ConditionError::InvalidColumnFormat {
                name: raw.to_string(),
            })?;
        let unit = parts.next().map(str::to_string);
        Ok(Self {
            prefix,
            label: label.to_string(),
            unit,
        })
    }
}

impl fmt::Display for ConditionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{}.{}.{}", self.prefix, self.label, unit),
            None => write!(f, "{}.{}", self.prefix, self.label),
        }
    }
}

/// Translate a legacy column name into the canonical `PREFIX.label.unit`
/// spelling.
///
/// Applied rules, in order:
/// - `"PREFIX.label [unit]"` becomes `"PREFIX.label.unit"`
/// - a name already carrying three or more dot-separated segments passes
///   through unchanged
/// - environment aliases containing `temperature`/`pressure` map to the
///   reserved columns regardless of original spelling
/// - a unit-less `CONC.<species>` gains the default `mol m-3` unit
pub fn normalize_column(raw: &str) -> String {
    let trimmed = raw.trim();
    let name = match bracket_unit(trimmed) {
        Some((base, unit)) => format!("{base}.{unit}"),
        None => trimmed.to_string(),
    };

    if name.split('.').count() >= 3 {
        return name;
    }

    let lower = name.to_ascii_lowercase();
    if lower.contains("temperature") {
        return TEMPERATURE_COLUMN.to_string();
    }
    if lower.contains("pressure") {
        return PRESSURE_COLUMN.to_string();
    }
    if let Some(species) = name.strip_prefix("CONC.") {
        if !species.is_empty() {
            return format!("CONC.{species}.mol m-3");
        }
    }
    name
}

fn bracket_unit(name: &str) -> Option<(&str, &str)> {
    let open = name.find(" [")?;
    let rest = &name[open + 2..];
    let unit = rest.strip_suffix(']')?;
    Some((&name[..open], unit))
}
