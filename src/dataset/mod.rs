//! In-memory tabular dataset
//!
//! A [`Dataset`] is a list of equally long, named, typed columns. It is built
//! fresh by an extractor, handed by value through the transformers, and
//! consumed by a loader.

mod column;
mod value;

pub use column::Column;
pub use value::{DataType, Value};

use eyre::{Result, ensure};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Create a dataset from columns of equal length
    ///
    /// # Errors
    /// Returns an error if the column lengths differ or a name repeats
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map_or(0, Column::len);
        for (i, column) in columns.iter().enumerate() {
            ensure!(
                column.len() == rows,
                "column `{}` has {} rows, expected {}",
                column.name(),
                column.len(),
                rows
            );
            ensure!(
                !columns[..i].iter().any(|c| c.name() == column.name()),
                "duplicate column `{}`",
                column.name()
            );
        }
        Ok(Self { columns, rows })
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name() == name)
    }

    /// Remove a column, returning it if it existed
    pub fn drop_column(&mut self, name: &str) -> Option<Column> {
        let index = self.columns.iter().position(|c| c.name() == name)?;
        Some(self.columns.remove(index))
    }

    /// Add a column at the end, or replace a column of the same name in place
    ///
    /// # Errors
    /// Returns an error if the column length does not match the row count
    pub fn insert_column(&mut self, column: Column) -> Result<()> {
        ensure!(
            self.columns.is_empty() || column.len() == self.rows,
            "column `{}` has {} rows, expected {}",
            column.name(),
            column.len(),
            self.rows
        );
        if self.columns.is_empty() {
            self.rows = column.len();
        }

        match self.column_mut(column.name()) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Total number of missing cells across all columns
    pub fn missing_count(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }

    /// Iterate rows as cell references in column order
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.rows).map(move |r| self.columns.iter().map(|c| &c.values()[r]).collect())
    }
}
