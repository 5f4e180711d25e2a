// file: src/dataset/table.rs
// description: immutable datasets and the per-request working set that narrows them
// reference: filtering operates on a view, never on the loaded rows

use crate::dataset::column::{Column, Record};
use std::collections::BTreeSet;

/// Case-insensitive literal substring containment.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone)]
pub struct Dataset<R> {
    records: Vec<R>,
    columns: BTreeSet<Column>,
}

impl<R: Record> Dataset<R> {
    /// Dataset carrying every column of its record type.
    pub fn new(records: Vec<R>) -> Self {
        Self::with_columns(records, R::COLUMNS.iter().copied())
    }

    /// Dataset carrying only the given columns; stages needing other
    /// columns are skipped.
    pub fn with_columns(records: Vec<R>, columns: impl IntoIterator<Item = Column>) -> Self {
        let columns = columns
            .into_iter()
            .filter(|c| R::COLUMNS.contains(c))
            .collect();
        Self { records, columns }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().copied()
    }

    pub fn working_set(&self) -> WorkingSet<'_, R> {
        WorkingSet {
            source: self,
            rows: self
                .records
                .iter()
                .enumerate()
                .map(|(index, record)| Row {
                    index,
                    record,
                    distance: None,
                })
                .collect(),
        }
    }
}

/// One dataset row as seen by a request, with optional ranking metadata.
#[derive(Debug)]
pub struct Row<'a, R> {
    /// Position in the source dataset.
    pub index: usize,
    pub record: &'a R,
    pub distance: Option<f64>,
}

impl<R> Clone for Row<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Row<'_, R> {}

impl<'a, R: Record> Row<'a, R> {
    pub fn field(&self, column: Column) -> &'a str {
        self.record.field(column).unwrap_or("")
    }

    pub fn name(&self) -> &'a str {
        self.record.name()
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }
}

/// Ordered subset of a dataset. Narrowing never touches the source.
#[derive(Debug, Clone)]
pub struct WorkingSet<'a, R> {
    source: &'a Dataset<R>,
    rows: Vec<Row<'a, R>>,
}

impl<'a, R: Record> WorkingSet<'a, R> {
    pub fn from_rows(source: &'a Dataset<R>, rows: Vec<Row<'a, R>>) -> Self {
        Self { source, rows }
    }

    pub fn source(&self) -> &'a Dataset<R> {
        self.source
    }

    pub fn rows(&self) -> &[Row<'a, R>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row<'a, R>> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.source.has_column(column)
    }

    /// Dataset positions of the current rows, in order.
    pub fn indices(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.index).collect()
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.rows.iter().map(Row::name).collect()
    }

    pub fn retain(mut self, mut keep: impl FnMut(&Row<'a, R>) -> bool) -> Self {
        self.rows.retain(|row| keep(row));
        self
    }

    /// True when any present column of `row` contains `needle`.
    pub fn row_matches_any(&self, row: &Row<'a, R>, columns: &[Column], needle: &str) -> bool {
        columns
            .iter()
            .filter(|c| self.has_column(**c))
            .any(|c| contains_ci(row.field(*c), needle))
    }

    /// OR-match `needle` across `columns`; absent columns never match.
    pub fn filter_any(self, columns: &[Column], needle: &str) -> Self {
        let columns: Vec<Column> = columns
            .iter()
            .copied()
            .filter(|c| self.has_column(*c))
            .collect();
        let needle = needle.to_lowercase();

        self.retain(|row| {
            columns
                .iter()
                .any(|c| row.field(*c).to_lowercase().contains(&needle))
        })
    }

    pub fn truncate(mut self, len: usize) -> Self {
        self.rows.truncate(len);
        self
    }

    /// Same source, no rows.
    pub fn emptied(&self) -> Self {
        Self {
            source: self.source,
            rows: Vec::new(),
        }
    }

    /// Runs `strategies` in order and keeps the first non-empty result.
    pub fn first_non_empty(&self, strategies: &[&dyn Fn(&Self) -> Self]) -> Self {
        for strategy in strategies {
            let narrowed = strategy(self);
            if !narrowed.is_empty() {
                return narrowed;
            }
        }
        self.emptied()
    }
}
