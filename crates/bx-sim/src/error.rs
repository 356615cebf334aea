//! Error types for simulation runs.

use thiserror::Error;

/// Errors encountered while configuring or running a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Not configured: {what} must be provided before running")]
    NotConfigured { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("{kind} '{name}' is not known to the integrator")]
    UnmappedQuantity { kind: &'static str, name: String },

    #[error("Duplicate reaction name '{name}' makes rate-parameter ordering ambiguous")]
    DuplicateReactionName { name: String },

    #[error("Integrator error: {message}")]
    Backend { message: String },

    #[error(transparent)]
    Condition(#[from] bx_conditions::ConditionError),

    #[error(transparent)]
    Table(#[from] bx_core::TableError),
}

pub type SimResult<T> = Result<T, SimError>;
