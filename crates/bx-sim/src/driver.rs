//! Simulation runner: the fixed-step time loop.

use crate::error::{SimError, SimResult};
use crate::integrator::ChemicalIntegrator;
use crate::options::BoxModelOptions;
use crate::output::{output_headers, push_output_row};
use crate::state::SimulationState;
use bx_conditions::{ConditionsManager, EvolvingConditions};
use bx_core::constants::GAS_CONSTANT;
use bx_core::{Mechanism, Table};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Progress snapshot handed to the callback at each output boundary.
#[derive(Debug, Clone, Copy)]
pub struct SimProgress {
    /// Current simulated time (seconds)
    pub current_time: f64,
    /// Total simulation length (seconds)
    pub simulation_length: f64,
    /// Chemistry steps completed so far
    pub steps_completed: usize,
}

/// Drives a box-model run: advances simulated time in chemistry steps,
/// applies evolving conditions as their times are reached, feeds ordered
/// vectors to the external integrator, and assembles the output table.
pub struct SimulationDriver<I> {
    options: Option<BoxModelOptions>,
    integrator: Option<I>,
    conditions: ConditionsManager,
    mechanism: Option<Mechanism>,
}

impl<I> Default for SimulationDriver<I> {
    fn default() -> Self {
        Self {
            options: None,
            integrator: None,
            conditions: ConditionsManager::new(),
            mechanism: None,
        }
    }
}

impl<I: ChemicalIntegrator> SimulationDriver<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: BoxModelOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_integrator(mut self, integrator: I) -> Self {
        self.integrator = Some(integrator);
        self
    }

    pub fn with_conditions(mut self, conditions: ConditionsManager) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_mechanism(mut self, mechanism: Mechanism) -> Self {
        self.mechanism = Some(mechanism);
        self
    }

    pub fn conditions(&self) -> &ConditionsManager {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut ConditionsManager {
        &mut self.conditions
    }

    /// Run the simulation, returning the output table.
    pub fn run(&mut self) -> SimResult<Table> {
        self.run_with_progress(|_| {})
    }

    /// Run the simulation, invoking `progress` at every output boundary.
    pub fn run_with_progress<F>(&mut self, mut progress: F) -> SimResult<Table>
    where
        F: FnMut(&SimProgress),
    {
        let options = self.options.clone().ok_or(SimError::NotConfigured {
            what: "box model options",
        })?;
        options.validate()?;
        if self.integrator.is_none() {
            return Err(SimError::NotConfigured { what: "integrator" });
        }
        if let Some(mechanism) = &self.mechanism {
            if let Some(name) = mechanism.duplicate_reaction_name() {
                return Err(SimError::DuplicateReactionName {
                    name: name.to_string(),
                });
            }
        }

        let schedule = EvolvingConditions::from_manager(&self.conditions);
        let mut state =
            SimulationState::from_snapshot(self.conditions.get_conditions_at_time(0.0));
        // Entries at time zero are already folded into the initial snapshot
        state.next_condition_index = schedule
            .entries()
            .iter()
            .take_while(|(time, _)| *time <= 0.0)
            .count();

        let integrator = self.integrator.as_mut().ok_or(SimError::NotConfigured {
            what: "integrator",
        })?;
        let mut species_ordering = integrator.species_ordering();
        let mut rate_ordering = integrator.rate_parameter_ordering();
        let mut output = Table::from_headers(output_headers(&species_ordering));
        let mut steps_completed = 0;

        while state.current_time <= options.simulation_length {
            // Apply every evolving condition due at or before this tick,
            // each exactly once.
            let mut applied = false;
            while let Some((time, update)) = schedule.get(state.next_condition_index) {
                if *time > state.current_time {
                    break;
                }
                debug!("Applying evolving conditions scheduled for t={time} s");
                state.apply(update);
                state.next_condition_index += 1;
                applied = true;
            }
            if applied {
                // A newly active condition block can carry rate-parameter
                // names the integrator has not reported indices for yet.
                species_ordering = integrator.species_ordering();
                rate_ordering = integrator.rate_parameter_ordering();
            }

            // Ideal gas law, in mol m-3
            let air_density = state.pressure / (GAS_CONSTANT * state.temperature);

            let concentrations =
                ordered_vector(&state.concentrations, &species_ordering, "species")?;
            let rate_parameters =
                ordered_vector(&state.rate_parameters, &rate_ordering, "rate parameter")?;

            if state.next_output_time <= state.current_time {
                push_output_row(
                    &mut output,
                    state.next_output_time,
                    &state,
                    air_density,
                    &concentrations,
                )?;
                state.next_output_time += options.output_step_time;
                progress(&SimProgress {
                    current_time: state.current_time,
                    simulation_length: options.simulation_length,
                    steps_completed,
                });
            }

            if concentrations.is_empty() {
                warn!(
                    "Concentration vector is empty at t={} s; stepping anyway",
                    state.current_time
                );
            }
            let updated = integrator.advance(
                options.chem_step_time,
                state.temperature,
                state.pressure,
                air_density,
                &concentrations,
                &rate_parameters,
            )?;
            if updated.len() != concentrations.len() {
                return Err(SimError::Backend {
                    message: format!(
                        "integrator returned {} concentrations, expected {}",
                        updated.len(),
                        concentrations.len()
                    ),
                });
            }
            for (name, &index) in &species_ordering {
                state.concentrations.insert(name.clone(), updated[index]);
            }

            state.current_time += options.chem_step_time;
            steps_completed += 1;
        }

        Ok(output)
    }
}

/// Lay values out in the integrator's index order.
///
/// A name the integrator does not recognize is an error; an index the state
/// supplies no value for defaults to zero.
fn ordered_vector(
    values: &BTreeMap<String, f64>,
    ordering: &HashMap<String, usize>,
    kind: &'static str,
) -> SimResult<Vec<f64>> {
    for name in values.keys() {
        if !ordering.contains_key(name) {
            return Err(SimError::UnmappedQuantity {
                kind,
                name: name.clone(),
            });
        }
    }
    let len = ordering.values().map(|&index| index + 1).max().unwrap_or(0);
    let mut vector = vec![0.0; len];
    for (name, &index) in ordering {
        if let Some(&value) = values.get(name) {
            vector[index] = value;
        }
    }
    Ok(vector)
}
