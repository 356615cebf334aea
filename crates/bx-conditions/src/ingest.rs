//! Inline condition data blocks.
//!
//! Config collaborators hand conditions over as one of two block shapes,
//! resolved once at ingestion instead of being sniffed from key presence
//! downstream. Both convert into a normalized [`Table`] ready for
//! [`ConditionsManager::add_from_table`].
//!
//! [`ConditionsManager::add_from_table`]: crate::ConditionsManager::add_from_table

use crate::column::{normalize_column, TIME_COLUMN};
use crate::error::{ConditionError, ConditionResult};
use bx_core::Table;
use serde::{Deserialize, Serialize};

/// A block of condition data in either supported layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum DataBlock {
    /// Older single-row initial conditions: bracket-unit column names and
    /// exactly one row of values, applied at time zero.
    Legacy {
        headers: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
    },
    /// The unified layout: canonical column names, any number of rows, and
    /// an explicit `time.s` column.
    Unified {
        headers: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
    },
}

impl DataBlock {
    /// Convert the block into a table with canonical column names.
    ///
    /// Legacy blocks are limited to a single data row (`TooManyRows`
    /// otherwise) and gain a `time.s = 0` column when they do not carry
    /// one, since legacy initial conditions always describe the start of a
    /// run.
    pub fn into_table(self) -> ConditionResult<Table> {
        match self {
            DataBlock::Legacy { headers, rows } => {
                if rows.len() > 1 {
                    return Err(ConditionError::TooManyRows { rows: rows.len() });
                }
                let mut table = normalized_table(&headers, &rows)?;
                if !table.has_column(TIME_COLUMN) && !table.is_empty() {
                    table.add_column(TIME_COLUMN);
                    table.set(0, TIME_COLUMN, 0.0)?;
                }
                Ok(table)
            }
            DataBlock::Unified { headers, rows } => normalized_table(&headers, &rows),
        }
    }
}

fn normalized_table(headers: &[String], rows: &[Vec<Option<f64>>]) -> ConditionResult<Table> {
    let canonical: Vec<String> = headers.iter().map(|h| normalize_column(h)).collect();
    let mut table = Table::from_headers(canonical);
    for row in rows {
        table.push_row(row.clone())?;
    }
    Ok(table)
}
