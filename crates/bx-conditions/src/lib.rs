//! Condition storage and querying for box-model simulations.
//!
//! Provides:
//! - structured condition-column names and legacy-name normalization
//! - the sparse condition table with step (hold-previous) interpolation
//! - exact-time concentration events, never interpolated
//! - dense-table materialization and condition templates
//! - the evolving-condition schedule consumed by the simulation driver

pub mod column;
pub mod error;
pub mod ingest;
pub mod manager;
pub mod schedule;
pub mod update;

mod time_key;

// Re-exports for public API
pub use column::{
    normalize_column, ConditionName, Prefix, PRESSURE_COLUMN, TEMPERATURE_COLUMN, TIME_COLUMN,
};
pub use error::{ConditionError, ConditionResult};
pub use ingest::DataBlock;
pub use manager::{ConditionSnapshot, ConditionsManager};
pub use schedule::EvolvingConditions;
pub use update::ConditionUpdate;
