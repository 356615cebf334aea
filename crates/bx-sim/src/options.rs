//! Options for box-model simulation runs.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Options for a box-model run. All times are seconds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoxModelOptions {
    /// Time step for chemistry integration (seconds)
    pub chem_step_time: f64,
    /// Time step between output rows (seconds)
    pub output_step_time: f64,
    /// Total simulation length (seconds)
    pub simulation_length: f64,
    /// Grid type; only "box" is meaningful here
    pub grid: String,
}

impl Default for BoxModelOptions {
    fn default() -> Self {
        Self {
            chem_step_time: 1.0,
            output_step_time: 60.0,
            simulation_length: 3600.0,
            grid: "box".to_string(),
        }
    }
}

impl BoxModelOptions {
    pub fn validate(&self) -> SimResult<()> {
        if self.chem_step_time <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "chem_step_time must be positive",
            });
        }
        if self.output_step_time <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "output_step_time must be positive",
            });
        }
        if self.simulation_length < 0.0 {
            return Err(SimError::InvalidArg {
                what: "simulation_length must be non-negative",
            });
        }
        Ok(())
    }
}
