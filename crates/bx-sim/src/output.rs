//! Output-row assembly.
//!
//! One row per output boundary: time, the environment scalars, the derived
//! air density, and the concentration vector in integrator order.

use crate::state::SimulationState;
use bx_core::{Table, TableResult};
use std::collections::HashMap;

/// Output headers: `time`, the ENV columns, then one `CONC.<species>`
/// column per mechanism species in integrator-reported index order.
pub(crate) fn output_headers(species_ordering: &HashMap<String, usize>) -> Vec<String> {
    let mut headers = vec![
        "time".to_string(),
        "ENV.temperature".to_string(),
        "ENV.pressure".to_string(),
        "ENV.number_density_air".to_string(),
    ];
    let mut species: Vec<(&String, &usize)> = species_ordering.iter().collect();
    species.sort_by_key(|&(_, &index)| index);
    for (name, _) in species {
        headers.push(format!("CONC.{name}"));
    }
    headers
}

/// Append one output row using the state as of the start of the tick.
pub(crate) fn push_output_row(
    table: &mut Table,
    time: f64,
    state: &SimulationState,
    air_density: f64,
    concentrations: &[f64],
) -> TableResult<()> {
    let mut cells = Vec::with_capacity(4 + concentrations.len());
    cells.push(Some(time));
    cells.push(Some(state.temperature));
    cells.push(Some(state.pressure));
    cells.push(Some(air_density));
    cells.extend(concentrations.iter().map(|&value| Some(value)));
    table.push_row(cells)
}
