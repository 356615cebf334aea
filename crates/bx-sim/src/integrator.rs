//! ChemicalIntegrator trait for the external kinetics solver.

use crate::error::SimResult;
use std::collections::HashMap;

/// Trait for the external chemical-kinetics integrator.
///
/// The integrator owns the mechanism's vector layouts: the driver asks it
/// which index each species and rate-parameter name occupies, builds flat
/// vectors in that order, and calls [`advance`] once per chemistry step.
/// The orderings are re-queried after every evolving-condition application
/// that could introduce previously-unseen rate-parameter names, so an
/// implementation must not assume they are read only once.
///
/// [`advance`]: ChemicalIntegrator::advance
pub trait ChemicalIntegrator {
    /// Species name to concentration-vector index.
    fn species_ordering(&self) -> HashMap<String, usize>;

    /// Rate-parameter name to rate-parameter-vector index.
    fn rate_parameter_ordering(&self) -> HashMap<String, usize>;

    /// Advance the chemistry by `dt` seconds.
    ///
    /// `concentrations` and `rate_parameters` follow the orderings reported
    /// above; the returned vector is the updated concentrations in the same
    /// species order. Blocking and synchronous; a failure aborts the run.
    fn advance(
        &mut self,
        dt: f64,
        temperature: f64,
        pressure: f64,
        air_density: f64,
        concentrations: &[f64],
        rate_parameters: &[f64],
    ) -> SimResult<Vec<f64>>;
}
