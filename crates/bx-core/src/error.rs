use thiserror::Error;

pub type TableResult<T> = Result<T, TableError>;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("No column named '{name}'")]
    NoSuchColumn { name: String },

    #[error("Row has {len} cells, expected {expected}")]
    RowLengthMismatch { len: usize, expected: usize },

    #[error("Row index out of bounds: index={index}, len={len}")]
    RowIndexOob { index: usize, len: usize },

    #[error("Cell at row {row} of column '{column}' is not numeric: '{value}'")]
    ParseCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
