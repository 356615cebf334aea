//! Sparse condition storage with step interpolation and exact-time
//! concentration events.
//!
//! Environmental and rate-parameter conditions are regimes that persist
//! until changed, so a query resolves them to the most recent value at or
//! before the query time. Species concentrations are instantaneous
//! overrides (an injection pulse, say); re-applying an old one at every
//! later query would double-count mass, so they live in a separate map and
//! are only visible at their exact time.

use crate::column::{ConditionName, PRESSURE_COLUMN, TEMPERATURE_COLUMN, TIME_COLUMN};
use crate::error::{ConditionError, ConditionResult};
use crate::time_key::TimeKey;
use crate::update::ConditionUpdate;
use bx_core::{Mechanism, ReactionKind, Table, TableResult};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Default temperature when no condition is in effect (K).
pub const DEFAULT_TEMPERATURE: f64 = 298.15;

/// Default pressure when no condition is in effect (Pa).
pub const DEFAULT_PRESSURE: f64 = 101_325.0;

/// Default concentration for species without a time=0 event (mol m-3).
pub const DEFAULT_CONCENTRATION: f64 = 0.0;

/// The conditions in effect at one query time.
///
/// Constructed per query and never persisted; `species_concentrations` is
/// populated only when the query time has an exact concentration event.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSnapshot {
    pub temperature: f64,
    pub pressure: f64,
    pub rate_parameters: BTreeMap<String, f64>,
    pub species_concentrations: BTreeMap<String, f64>,
}

/// Single source of truth for how simulation inputs vary over time.
#[derive(Debug, Clone, Default)]
pub struct ConditionsManager {
    /// Sparse storage, one row per user-specified time. Holds ENV.* and
    /// rate-parameter columns, never concentrations.
    table: Table,
    /// Exact-time concentration events: time -> species -> mol m-3.
    events: BTreeMap<TimeKey, BTreeMap<String, f64>>,
    mechanism: Option<Mechanism>,
}

impl ConditionsManager {
    pub fn new() -> Self {
        Self {
            table: Table::from_headers([TIME_COLUMN]),
            events: BTreeMap::new(),
            mechanism: None,
        }
    }

    pub fn with_mechanism(mechanism: Mechanism) -> Self {
        let mut manager = Self::new();
        manager.mechanism = Some(mechanism);
        manager
    }

    /// Attach a mechanism used to validate species names and derive
    /// template columns.
    pub fn set_mechanism(&mut self, mechanism: Mechanism) {
        self.mechanism = Some(mechanism);
    }

    pub fn mechanism(&self) -> Option<&Mechanism> {
        self.mechanism.as_ref()
    }

    /// Set conditions at a specific time, chainable.
    ///
    /// Upserts the row at `time`; omitted fields leave existing values
    /// untouched. Concentrations are written to the event map at exactly
    /// `time`. Rate-parameter keys must be valid `PREFIX.label[.unit]`
    /// names; species names are checked against the mechanism when one is
    /// attached. Validation happens before any mutation.
    pub fn set_condition(
        &mut self,
        time: f64,
        update: ConditionUpdate,
    ) -> ConditionResult<&mut Self> {
        for name in update.rate_parameters.keys() {
            ConditionName::parse(name)?;
        }
        let mut species_values = Vec::with_capacity(update.concentrations.len());
        for (key, value) in &update.concentrations {
            let species = normalize_species_key(key);
            self.validate_species(&species)?;
            species_values.push((species, *value));
        }

        let row = self.row_for_time(time)?;
        if let Some(temperature) = update.temperature {
            self.table
                .set_or_insert(row, TEMPERATURE_COLUMN, temperature)?;
        }
        if let Some(pressure) = update.pressure {
            self.table.set_or_insert(row, PRESSURE_COLUMN, pressure)?;
        }
        for (name, value) in &update.rate_parameters {
            self.table.set_or_insert(row, name, *value)?;
        }
        if !species_values.is_empty() {
            let event = self.events.entry(TimeKey::new(time)).or_default();
            for (species, value) in species_values {
                event.insert(species, value);
            }
        }
        Ok(self)
    }

    /// Replace all conditions from a table. Must have a `time.s` column.
    ///
    /// `CONC.*` columns are routed to the event map (exact time only); all
    /// other columns replace the sparse table verbatim, time-sorted.
    pub fn set_from_table(&mut self, table: &Table) -> ConditionResult<&mut Self> {
        Self::require_time_column(table)?;
        Self::validate_columns(table)?;

        let conc_columns: Vec<String> = table
            .headers()
            .iter()
            .filter(|h| h.starts_with("CONC."))
            .map(|h| h.to_string())
            .collect();
        let other_columns: Vec<String> = table
            .headers()
            .iter()
            .filter(|h| !h.starts_with("CONC."))
            .map(|h| h.to_string())
            .collect();

        let mut sparse = Table::from_headers(other_columns.iter().map(String::as_str));
        let mut events: BTreeMap<TimeKey, BTreeMap<String, f64>> = BTreeMap::new();
        for row in 0..table.n_rows() {
            let Some(time) = table.get(row, TIME_COLUMN) else {
                warn!("Skipping condition row {row} with a missing time value");
                continue;
            };
            let cells = other_columns
                .iter()
                .map(|name| table.get(row, name))
                .collect();
            sparse.push_row(cells)?;

            let mut concentrations = BTreeMap::new();
            for name in &conc_columns {
                if let Some(value) = table.get(row, name) {
                    concentrations.insert(species_from_column(name), value);
                }
            }
            if !concentrations.is_empty() {
                events.insert(TimeKey::new(time), concentrations);
            }
        }
        sparse.sort_rows_by(TIME_COLUMN)?;

        self.table = sparse;
        self.events = events;
        Ok(self)
    }

    /// Merge conditions from a table into the existing store.
    ///
    /// Rows are matched by exact time; only non-missing cells overwrite.
    /// Rows at new times are appended. Concentration cells are merged into
    /// the event map per species, last write wins.
    pub fn add_from_table(&mut self, table: &Table) -> ConditionResult<&mut Self> {
        Self::require_time_column(table)?;
        Self::validate_columns(table)?;

        let headers: Vec<String> = table.headers().iter().map(|h| h.to_string()).collect();
        for row in 0..table.n_rows() {
            let Some(time) = table.get(row, TIME_COLUMN) else {
                warn!("Skipping condition row {row} with a missing time value");
                continue;
            };
            let target = self.row_for_time(time)?;
            for name in &headers {
                if name == TIME_COLUMN {
                    continue;
                }
                let Some(value) = table.get(row, name) else {
                    continue;
                };
                if name.starts_with("CONC.") {
                    self.events
                        .entry(TimeKey::new(time))
                        .or_default()
                        .insert(species_from_column(name), value);
                } else {
                    self.table.set_or_insert(target, name, value)?;
                }
            }
        }
        Ok(self)
    }

    /// Conditions in effect at `time`.
    ///
    /// Temperature, pressure, and rate parameters resolve by step
    /// interpolation (most recent value at or before `time`), falling back
    /// to the built-in defaults when nothing has been set yet.
    /// Concentrations are returned only for an exact event at `time`.
    pub fn get_conditions_at_time(&self, time: f64) -> ConditionSnapshot {
        let rows = self.rows_at_or_before(time);

        let temperature = self
            .most_recent(&rows, TEMPERATURE_COLUMN)
            .unwrap_or(DEFAULT_TEMPERATURE);
        let pressure = self
            .most_recent(&rows, PRESSURE_COLUMN)
            .unwrap_or(DEFAULT_PRESSURE);

        let mut rate_parameters = BTreeMap::new();
        for name in self.table.headers() {
            if !is_rate_parameter_column(name) {
                continue;
            }
            if let Some(value) = self.most_recent(&rows, name) {
                rate_parameters.insert(name.to_string(), value);
            }
        }

        let species_concentrations = self
            .events
            .get(&TimeKey::new(time))
            .cloned()
            .unwrap_or_default();

        ConditionSnapshot {
            temperature,
            pressure,
            rate_parameters,
            species_concentrations,
        }
    }

    /// Materialize a dense table with one row per `output_step` tick from 0
    /// to `simulation_length` inclusive, every non-concentration column
    /// resolved by step interpolation.
    ///
    /// Validates the time=0 row first: synthesizes it if absent and fills
    /// missing temperature/pressure (and missing time=0 entries for species
    /// that have later events) with defaults, warning for each repair.
    pub fn get_interpolated(
        &mut self,
        simulation_length: f64,
        output_step: f64,
    ) -> ConditionResult<Table> {
        debug_assert!(output_step > 0.0, "output_step must be positive");
        self.validate_initial_conditions()?;

        let n_ticks = ((simulation_length / output_step) + 1e-9).floor() as usize;
        let ticks: Vec<f64> = (0..=n_ticks).map(|i| i as f64 * output_step).collect();

        let mut result = Table::from_headers([TIME_COLUMN]);
        for &tick in &ticks {
            let row = result.push_empty_row();
            result.set(row, TIME_COLUMN, tick)?;
        }

        let time_cells = self.table.column(TIME_COLUMN).unwrap_or(&[]);
        for name in self.table.headers() {
            if name == TIME_COLUMN {
                continue;
            }
            result.add_column(name);

            let cells = self.table.column(name).unwrap_or(&[]);
            let mut points: Vec<(f64, f64)> = time_cells
                .iter()
                .zip(cells)
                .filter_map(|(time, value)| Some(((*time)?, (*value)?)))
                .collect();
            points.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut cursor = 0;
            let mut held = None;
            for (row, &tick) in ticks.iter().enumerate() {
                while cursor < points.len() && points[cursor].0 <= tick {
                    held = Some(points[cursor].1);
                    cursor += 1;
                }
                if let Some(value) = held {
                    result.set(row, name, value)?;
                }
            }
        }
        Ok(result)
    }

    /// Template table with every expected column for the attached
    /// mechanism, and a single all-missing row for producers to fill in.
    pub fn get_template(&self) -> Table {
        let mut headers = vec![
            TIME_COLUMN.to_string(),
            TEMPERATURE_COLUMN.to_string(),
            PRESSURE_COLUMN.to_string(),
        ];
        if let Some(mechanism) = &self.mechanism {
            for species in &mechanism.species {
                headers.push(format!("CONC.{}.mol m-3", species.name));
            }
            for reaction in &mechanism.reactions {
                match reaction.kind {
                    ReactionKind::Emission => {
                        headers.push(format!("EMIS.{}.mol m-3 s-1", reaction.name));
                    }
                    ReactionKind::Photolysis => {
                        headers.push(format!("PHOTO.{}.s-1", reaction.name));
                    }
                    ReactionKind::FirstOrderLoss => {
                        headers.push(format!("LOSS.{}.s-1", reaction.name));
                    }
                    ReactionKind::Surface => {
                        headers.push(format!(
                            "SURF.{}.particle number concentration.# m-3",
                            reaction.name
                        ));
                        headers.push(format!("SURF.{}.effective radius.m", reaction.name));
                    }
                    ReactionKind::UserDefined => {}
                }
            }
        }
        let mut table = Table::from_headers(headers);
        table.push_empty_row();
        table
    }

    /// Whether any condition has been set, at any time.
    pub fn has_conditions(&self) -> bool {
        self.len() > 0 || !self.events.is_empty()
    }

    /// Times where conditions are specified, sorted ascending: the union of
    /// sparse-table times and concentration-event times, without
    /// duplicates.
    pub fn get_times(&self) -> Vec<f64> {
        let mut keys: BTreeSet<TimeKey> = self
            .table
            .column(TIME_COLUMN)
            .unwrap_or(&[])
            .iter()
            .flatten()
            .map(|&t| TimeKey::new(t))
            .collect();
        keys.extend(self.events.keys().copied());
        keys.into_iter().map(TimeKey::value).collect()
    }

    /// Number of time points in the sparse table.
    pub fn len(&self) -> usize {
        self.table
            .column(TIME_COLUMN)
            .unwrap_or(&[])
            .iter()
            .flatten()
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the raw sparse table (user-specified times only, no
    /// concentrations).
    pub fn raw(&self) -> Table {
        self.table.clone()
    }

    /// Per-time sparse updates: only the cells explicitly set at each time,
    /// plus that time's exact concentration event. This is what the driver
    /// turns into its evolving-condition schedule.
    pub fn evolving_entries(&self) -> Vec<(f64, ConditionUpdate)> {
        let time_cells = self.table.column(TIME_COLUMN).unwrap_or(&[]);
        let mut entries = Vec::new();
        for time in self.get_times() {
            let mut update = ConditionUpdate::new();
            let row = time_cells.iter().position(|cell| *cell == Some(time));
            if let Some(row) = row {
                for name in self.table.headers() {
                    let Some(value) = self.table.get(row, name) else {
                        continue;
                    };
                    if name == TEMPERATURE_COLUMN {
                        update.temperature = Some(value);
                    } else if name == PRESSURE_COLUMN {
                        update.pressure = Some(value);
                    } else if is_rate_parameter_column(name) {
                        update.rate_parameters.insert(name.to_string(), value);
                    }
                }
            }
            if let Some(event) = self.events.get(&TimeKey::new(time)) {
                update.concentrations = event.clone();
            }
            entries.push((time, update));
        }
        entries
    }

    fn require_time_column(table: &Table) -> ConditionResult<()> {
        if table.has_column(TIME_COLUMN) {
            Ok(())
        } else {
            Err(ConditionError::MissingTimeColumn {
                expected: TIME_COLUMN,
            })
        }
    }

    fn validate_columns(table: &Table) -> ConditionResult<()> {
        for name in table.headers() {
            if name == TIME_COLUMN {
                continue;
            }
            ConditionName::parse(name)?;
        }
        Ok(())
    }

    fn validate_species(&self, species: &str) -> ConditionResult<()> {
        match &self.mechanism {
            Some(mechanism) if !mechanism.has_species(species) => {
                Err(ConditionError::UnknownSpecies {
                    species: species.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Row index for `time`, inserting a new row in sorted position if no
    /// row exists at exactly that time.
    fn row_for_time(&mut self, time: f64) -> TableResult<usize> {
        let (existing, insert_at) = {
            let times = self.table.column(TIME_COLUMN).unwrap_or(&[]);
            let existing = times.iter().position(|cell| *cell == Some(time));
            let insert_at = times
                .iter()
                .position(|cell| cell.is_none_or(|t| t > time))
                .unwrap_or(times.len());
            (existing, insert_at)
        };
        if let Some(row) = existing {
            return Ok(row);
        }
        self.table.insert_row(insert_at)?;
        self.table.set(insert_at, TIME_COLUMN, time)?;
        Ok(insert_at)
    }

    /// Rows with a time at or before `time`, ordered ascending by time.
    fn rows_at_or_before(&self, time: f64) -> Vec<usize> {
        let times = self.table.column(TIME_COLUMN).unwrap_or(&[]);
        let mut rows: Vec<(f64, usize)> = times
            .iter()
            .enumerate()
            .filter_map(|(row, cell)| cell.map(|t| (t, row)))
            .filter(|(t, _)| *t <= time)
            .collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        rows.into_iter().map(|(_, row)| row).collect()
    }

    /// Most recent non-missing value of a column over the given rows.
    fn most_recent(&self, rows: &[usize], name: &str) -> Option<f64> {
        let cells = self.table.column(name)?;
        rows.iter()
            .rev()
            .find_map(|&row| cells.get(row).copied().flatten())
    }

    fn validate_initial_conditions(&mut self) -> ConditionResult<()> {
        let has_zero = self
            .table
            .column(TIME_COLUMN)
            .unwrap_or(&[])
            .iter()
            .any(|cell| *cell == Some(0.0));
        if !has_zero {
            warn!("No conditions specified at time=0; adding a default row");
        }
        let row = self.row_for_time(0.0)?;

        if self.table.get(row, TEMPERATURE_COLUMN).is_none() {
            warn!("No initial temperature; defaulting to {DEFAULT_TEMPERATURE} K");
            self.table
                .set_or_insert(row, TEMPERATURE_COLUMN, DEFAULT_TEMPERATURE)?;
        }
        if self.table.get(row, PRESSURE_COLUMN).is_none() {
            warn!("No initial pressure; defaulting to {DEFAULT_PRESSURE} Pa");
            self.table
                .set_or_insert(row, PRESSURE_COLUMN, DEFAULT_PRESSURE)?;
        }

        let known_species: BTreeSet<String> = self
            .events
            .values()
            .flat_map(|event| event.keys().cloned())
            .collect();
        if !known_species.is_empty() {
            let zero = self.events.entry(TimeKey::new(0.0)).or_default();
            for species in known_species {
                if !zero.contains_key(&species) {
                    warn!(
                        "No initial concentration for '{species}'; defaulting to \
                         {DEFAULT_CONCENTRATION} mol m-3"
                    );
                    zero.insert(species, DEFAULT_CONCENTRATION);
                }
            }
        }
        Ok(())
    }
}

/// Rate-parameter columns are everything except time, the reserved ENV
/// pair, concentrations, and other ENV.* columns (a recorded air density is
/// computed output, not input).
fn is_rate_parameter_column(name: &str) -> bool {
    name != TIME_COLUMN
        && name != TEMPERATURE_COLUMN
        && name != PRESSURE_COLUMN
        && !name.starts_with("CONC.")
        && !name.starts_with("ENV.")
}

/// Strip a `CONC.<species>[.unit]` column down to the species name.
fn species_from_column(name: &str) -> String {
    name.split('.').nth(1).unwrap_or(name).to_string()
}

/// Strip an optional `CONC.` prefix from a species key given to
/// `set_condition`.
fn normalize_species_key(key: &str) -> String {
    if key.starts_with("CONC.") {
        species_from_column(key)
    } else {
        key.to_string()
    }
}
