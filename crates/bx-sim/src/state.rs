//! Running state owned by the driver during a simulation.

use bx_conditions::{ConditionSnapshot, ConditionUpdate};
use std::collections::BTreeMap;

/// Ephemeral per-run state: the conditions currently in effect plus the
/// driver's cursors into the evolving-condition schedule and the output
/// cadence. Created when a run starts and dropped when it completes.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Current simulated time (seconds)
    pub current_time: f64,
    /// Current temperature (K)
    pub temperature: f64,
    /// Current pressure (Pa)
    pub pressure: f64,
    /// Species name to concentration (mol m-3)
    pub concentrations: BTreeMap<String, f64>,
    /// Rate-parameter name to value
    pub rate_parameters: BTreeMap<String, f64>,
    /// Index of the next unapplied evolving-condition entry
    pub next_condition_index: usize,
    /// Next output boundary (seconds)
    pub next_output_time: f64,
}

impl SimulationState {
    /// Seed the state at time zero from an initial snapshot.
    pub fn from_snapshot(snapshot: ConditionSnapshot) -> Self {
        Self {
            current_time: 0.0,
            temperature: snapshot.temperature,
            pressure: snapshot.pressure,
            concentrations: snapshot.species_concentrations,
            rate_parameters: snapshot.rate_parameters,
            next_condition_index: 0,
            next_output_time: 0.0,
        }
    }

    /// Merge an evolving condition into the state: present fields
    /// overwrite, absent fields are left unchanged.
    pub fn apply(&mut self, update: &ConditionUpdate) {
        if let Some(temperature) = update.temperature {
            self.temperature = temperature;
        }
        if let Some(pressure) = update.pressure {
            self.pressure = pressure;
        }
        for (species, value) in &update.concentrations {
            self.concentrations.insert(species.clone(), *value);
        }
        for (name, value) in &update.rate_parameters {
            self.rate_parameters.insert(name.clone(), *value);
        }
    }
}
