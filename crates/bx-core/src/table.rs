//! Column-oriented numeric tables.
//!
//! `Table` is the repository's tabular workhorse: named columns of optional
//! `f64` cells, all the same length. A missing cell means "unspecified",
//! which is distinct from zero. The sparse condition store, the dense
//! interpolated output, condition templates, and simulation output rows are
//! all `Table`s, so CSV round-tripping lives here once.

use crate::error::{TableError, TableResult};
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
struct Column {
    name: String,
    cells: Vec<Option<f64>>,
}

/// A table of named columns holding optional numeric cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with the given column names.
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for name in headers {
            table.add_column(&name.into());
        }
        table
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Column names in order.
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Cells of a column, or `None` if no such column exists.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.column_index(name)
            .map(|i| self.columns[i].cells.as_slice())
    }

    /// Add a column of missing cells if it is not already present.
    pub fn add_column(&mut self, name: &str) {
        if self.has_column(name) {
            return;
        }
        let cells = vec![None; self.n_rows()];
        self.columns.push(Column {
            name: name.to_string(),
            cells,
        });
    }

    /// Append a row. The cell count must match the column count.
    pub fn push_row(&mut self, cells: Vec<Option<f64>>) -> TableResult<()> {
        if cells.len() != self.n_columns() {
            return Err(TableError::RowLengthMismatch {
                len: cells.len(),
                expected: self.n_columns(),
            });
        }
        for (column, cell) in self.columns.iter_mut().zip(cells) {
            column.cells.push(cell);
        }
        Ok(())
    }

    /// Append a row of missing cells, returning its index.
    pub fn push_empty_row(&mut self) -> usize {
        let index = self.n_rows();
        for column in &mut self.columns {
            column.cells.push(None);
        }
        index
    }

    /// Insert a row of missing cells at `index`, shifting later rows down.
    pub fn insert_row(&mut self, index: usize) -> TableResult<()> {
        if index > self.n_rows() {
            return Err(TableError::RowIndexOob {
                index,
                len: self.n_rows(),
            });
        }
        for column in &mut self.columns {
            column.cells.insert(index, None);
        }
        Ok(())
    }

    /// Cell value, or `None` for a missing cell, unknown column, or
    /// out-of-range row.
    pub fn get(&self, row: usize, name: &str) -> Option<f64> {
        self.column(name)?.get(row).copied().flatten()
    }

    /// Set a cell in an existing column.
    pub fn set(&mut self, row: usize, name: &str, value: f64) -> TableResult<()> {
        let n_rows = self.n_rows();
        let index = self
            .column_index(name)
            .ok_or_else(|| TableError::NoSuchColumn {
                name: name.to_string(),
            })?;
        let cells = &mut self.columns[index].cells;
        match cells.get_mut(row) {
            Some(cell) => {
                *cell = Some(value);
                Ok(())
            }
            None => Err(TableError::RowIndexOob { index: row, len: n_rows }),
        }
    }

    /// Set a cell, creating the column first if necessary.
    pub fn set_or_insert(&mut self, row: usize, name: &str, value: f64) -> TableResult<()> {
        self.add_column(name);
        self.set(row, name, value)
    }

    /// Stable-sort rows ascending by the named column, missing cells last.
    pub fn sort_rows_by(&mut self, name: &str) -> TableResult<()> {
        let key = self
            .column(name)
            .ok_or_else(|| TableError::NoSuchColumn {
                name: name.to_string(),
            })?
            .to_vec();
        let mut order: Vec<usize> = (0..key.len()).collect();
        order.sort_by(|&a, &b| match (key[a], key[b]) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        for column in &mut self.columns {
            column.cells = order.iter().map(|&i| column.cells[i]).collect();
        }
        Ok(())
    }

    /// Read a table from CSV. Empty cells become missing cells.
    pub fn from_csv_reader<R: Read>(reader: R) -> TableResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut table = Table::from_headers(headers.iter());
        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            let mut cells = Vec::with_capacity(record.len());
            for (field, name) in record.iter().zip(headers.iter()) {
                if field.is_empty() {
                    cells.push(None);
                } else {
                    let value =
                        field
                            .parse::<f64>()
                            .map_err(|_| TableError::ParseCell {
                                row,
                                column: name.to_string(),
                                value: field.to_string(),
                            })?;
                    cells.push(Some(value));
                }
            }
            table.push_row(cells)?;
        }
        Ok(table)
    }

    pub fn read_csv(path: impl AsRef<Path>) -> TableResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Write the table as CSV. Missing cells become empty fields.
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> TableResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.headers())?;
        for row in 0..self.n_rows() {
            let record: Vec<String> = self
                .columns
                .iter()
                .map(|c| match c.cells[row] {
                    Some(value) => value.to_string(),
                    None => String::new(),
                })
                .collect();
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> TableResult<()> {
        let file = std::fs::File::create(path)?;
        self.to_csv_writer(file)
    }
}
