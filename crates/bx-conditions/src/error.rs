//! Error types for condition storage and ingestion.

use bx_core::TableError;
use thiserror::Error;

pub type ConditionResult<T> = Result<T, ConditionError>;

#[derive(Error, Debug)]
pub enum ConditionError {
    #[error(
        "Invalid column format: '{name}'. Expected PREFIX.label[.unit] with \
         PREFIX one of ENV, CONC, EMIS, PHOTO, LOSS, USER, SURF"
    )]
    InvalidColumnFormat { name: String },

    #[error("Unknown species: '{species}' is not part of the attached mechanism")]
    UnknownSpecies { species: String },

    #[error("Table must have a '{expected}' column")]
    MissingTimeColumn { expected: &'static str },

    #[error("Initial conditions may only have one row of data, found {rows}")]
    TooManyRows { rows: usize },

    #[error(transparent)]
    Table(#[from] TableError),
}
