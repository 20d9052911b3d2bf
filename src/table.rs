//! In-memory columnar table backed by a CSV file.
//!
//! This module provides the tabular store the rest of the application is
//! built on:
//! - [`Table`]: an immutable, ordered collection of rows sharing one schema
//! - Column queries: [`Table::value_counts`], [`Table::filter_equals`]
//! - Aggregation: [`Table::group_sum`]
//! - Cross-referencing: [`Table::left_join`]
//!
//! Cells are stored as `Option<String>`; empty CSV fields load as `None` and
//! numeric interpretation happens at the point of use. Rows with unparseable
//! values are never rejected at load time; they surface as null/zero in
//! downstream aggregations.

use std::collections::HashMap;
use std::path::Path;

use csv::ReaderBuilder;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::error::NewsDataError;

/// A row of nullable text cells. Width always matches the table schema.
pub type Row = Vec<Option<String>>;

/// An ordered, immutable table of nullable text cells.
///
/// A `Table` is loaded once (from a CSV file or built by the record
/// normalizer) and never mutated; every query returns a derived value or a
/// new sub-table. Row order is always the order of the backing data.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table from a schema and pre-shaped rows.
    ///
    /// Rows narrower than the schema are padded with `None`; extra cells are
    /// dropped, so every stored row has exactly one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Load a table eagerly from a CSV file.
    ///
    /// The first record is taken as the header row. Empty fields become
    /// `None`; short and long records are tolerated and reshaped to the
    /// header width.
    ///
    /// # Errors
    ///
    /// Returns [`NewsDataError::NotFound`] naming the path when the file does
    /// not exist, or [`NewsDataError::Csv`] when the file cannot be parsed as
    /// CSV at all.
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, NewsDataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NewsDataError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: Row = record
                .iter()
                .map(|field| (!field.is_empty()).then(|| field.to_string()))
                .collect();
            rows.push(row);
        }

        debug!(rows = rows.len(), columns = columns.len(), "Loaded CSV table");
        Ok(Self::new(columns, rows))
    }

    /// The column names, in schema order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The rows, in source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the schema contains the named column.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Index of the named column, or [`NewsDataError::MissingColumn`].
    ///
    /// Queries against an absent column fail fast rather than returning an
    /// empty result.
    pub fn column_index(&self, name: &str) -> Result<usize, NewsDataError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| NewsDataError::MissingColumn(name.to_string()))
    }

    /// All cells of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<Option<&str>>, NewsDataError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_deref()).collect())
    }

    /// Count occurrences of each distinct non-null value in a column.
    ///
    /// Returns `(value, count)` pairs sorted by count descending; ties are
    /// broken by first-encountered order in the source data. The result is
    /// truncated to `top_n` entries. Null cells are skipped entirely.
    pub fn value_counts(
        &self,
        column: &str,
        top_n: usize,
    ) -> Result<Vec<(String, usize)>, NewsDataError> {
        let idx = self.column_index(column)?;

        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        let mut next_seen = 0usize;
        for row in &self.rows {
            let Some(value) = row[idx].as_deref() else {
                continue;
            };
            counts
                .entry(value)
                .and_modify(|(count, _)| *count += 1)
                .or_insert_with(|| {
                    next_seen += 1;
                    (1, next_seen)
                });
        }

        Ok(counts
            .into_iter()
            .sorted_by(|(_, (ca, sa)), (_, (cb, sb))| cb.cmp(ca).then(sa.cmp(sb)))
            .take(top_n)
            .map(|(value, (count, _))| (value.to_string(), count))
            .collect())
    }

    /// Sub-table of rows whose column equals `value` exactly.
    ///
    /// Matching is case-sensitive; null cells never match. Row order is
    /// preserved, and no match yields an empty table, not an error.
    pub fn filter_equals(&self, column: &str, value: &str) -> Result<Table, NewsDataError> {
        let idx = self.column_index(column)?;
        let rows = self
            .rows
            .iter()
            .filter(|row| row[idx].as_deref() == Some(value))
            .cloned()
            .collect();
        Ok(Table {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Sum a numeric column per distinct group key.
    ///
    /// Missing or non-numeric cells in the sum column contribute zero for
    /// their row; rows with a null group key are skipped.
    pub fn group_sum(
        &self,
        group_column: &str,
        sum_column: &str,
    ) -> Result<HashMap<String, f64>, NewsDataError> {
        let group_idx = self.column_index(group_column)?;
        let sum_idx = self.column_index(sum_column)?;

        let mut sums: HashMap<String, f64> = HashMap::new();
        for row in &self.rows {
            let Some(key) = row[group_idx].as_deref() else {
                continue;
            };
            let value = row[sum_idx].as_deref().and_then(parse_number).unwrap_or(0.0);
            *sums.entry(key.to_string()).or_insert(0.0) += value;
        }
        Ok(sums)
    }

    /// Left-outer join against another table on key equality.
    ///
    /// Every left row appears exactly once in the output, with the right
    /// table's columns appended: matched on `left_key` = `right_key` where a
    /// match exists, null-filled where none does. When several right rows
    /// share a key the first one wins, so the join never multiplies left
    /// rows. The right table's columns keep their names; on a name collision
    /// [`Table::column_index`] resolves to the left occurrence.
    pub fn left_join(
        &self,
        other: &Table,
        left_key: &str,
        right_key: &str,
    ) -> Result<Table, NewsDataError> {
        let left_idx = self.column_index(left_key)?;
        let right_idx = other.column_index(right_key)?;

        let mut by_key: HashMap<&str, &Row> = HashMap::new();
        for row in &other.rows {
            if let Some(key) = row[right_idx].as_deref() {
                by_key.entry(key).or_insert(row);
            }
        }

        let columns: Vec<String> = self
            .columns
            .iter()
            .chain(other.columns.iter())
            .cloned()
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|left_row| {
                let mut joined = left_row.clone();
                match left_row[left_idx].as_deref().and_then(|k| by_key.get(k)) {
                    Some(right_row) => joined.extend(right_row.iter().cloned()),
                    None => joined.resize(columns.len(), None),
                }
                joined
            })
            .collect();

        Ok(Table { columns, rows })
    }
}

/// Parse a cell as a finite number, tolerating surrounding whitespace.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn sources_table() -> Table {
        Table::new(
            vec!["source_name".to_string(), "link_count".to_string()],
            vec![
                vec![cell("cnn"), cell("3")],
                vec![cell("bbc"), cell("1")],
                vec![cell("cnn"), cell("2")],
                vec![None, cell("9")],
                vec![cell("npr"), None],
            ],
        )
    }

    #[test]
    fn test_value_counts_sorts_by_count_then_first_seen() {
        let table = sources_table();
        let counts = table.value_counts("source_name", 10).unwrap();
        // cnn has 2 rows; bbc and npr tie at 1 and bbc was seen first.
        assert_eq!(
            counts,
            vec![
                ("cnn".to_string(), 2),
                ("bbc".to_string(), 1),
                ("npr".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_value_counts_skips_nulls_and_truncates() {
        let table = sources_table();
        let counts = table.value_counts("source_name", 1).unwrap();
        assert_eq!(counts, vec![("cnn".to_string(), 2)]);

        let total: usize = table
            .value_counts("source_name", 10)
            .unwrap()
            .iter()
            .map(|(_, c)| c)
            .sum();
        assert!(total <= table.len());
    }

    #[test]
    fn test_filter_equals_preserves_order() {
        let table = sources_table();
        let cnn = table.filter_equals("source_name", "cnn").unwrap();
        assert_eq!(cnn.len(), 2);
        assert_eq!(cnn.rows()[0][1], cell("3"));
        assert_eq!(cnn.rows()[1][1], cell("2"));
    }

    #[test]
    fn test_filter_equals_no_match_is_empty_not_error() {
        let table = sources_table();
        let none = table.filter_equals("source_name", "CNN").unwrap();
        assert!(none.is_empty());
        assert_eq!(none.columns(), table.columns());
    }

    #[test]
    fn test_filter_equals_is_idempotent() {
        let table = sources_table();
        let once = table.filter_equals("source_name", "cnn").unwrap();
        let twice = once.filter_equals("source_name", "cnn").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_group_sum_treats_missing_as_zero_and_skips_null_keys() {
        let table = sources_table();
        let sums = table.group_sum("source_name", "link_count").unwrap();
        assert_eq!(sums.get("cnn"), Some(&5.0));
        assert_eq!(sums.get("bbc"), Some(&1.0));
        assert_eq!(sums.get("npr"), Some(&0.0));
        assert_eq!(sums.len(), 3);
    }

    #[test]
    fn test_group_sum_non_numeric_is_zero() {
        let table = Table::new(
            vec!["k".to_string(), "v".to_string()],
            vec![
                vec![cell("a"), cell("not a number")],
                vec![cell("a"), cell("2")],
            ],
        );
        let sums = table.group_sum("k", "v").unwrap();
        assert_eq!(sums.get("a"), Some(&2.0));
    }

    #[test]
    fn test_left_join_keeps_all_left_rows() {
        let left = sources_table();
        let right = Table::new(
            vec!["Domain".to_string(), "GlobalRank".to_string()],
            vec![
                vec![cell("cnn"), cell("12")],
                vec![cell("npr"), cell("40")],
            ],
        );

        let joined = left.left_join(&right, "source_name", "Domain").unwrap();
        assert_eq!(joined.len(), left.len());
        assert_eq!(joined.columns().len(), 4);

        let ranks = joined.column("GlobalRank").unwrap();
        assert_eq!(ranks, vec![Some("12"), None, Some("12"), None, Some("40")]);
    }

    #[test]
    fn test_left_join_first_right_match_wins() {
        let left = Table::new(
            vec!["source_name".to_string()],
            vec![vec![cell("cnn")]],
        );
        let right = Table::new(
            vec!["Domain".to_string(), "GlobalRank".to_string()],
            vec![
                vec![cell("cnn"), cell("12")],
                vec![cell("cnn"), cell("99")],
            ],
        );
        let joined = left.left_join(&right, "source_name", "Domain").unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined.column("GlobalRank").unwrap(), vec![Some("12")]);
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let table = sources_table();
        let err = table.value_counts("no_such_column", 3).unwrap_err();
        assert!(matches!(err, NewsDataError::MissingColumn(c) if c == "no_such_column"));
    }

    #[test]
    fn test_from_csv_path_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.csv");
        let err = Table::from_csv_path(&missing).unwrap_err();
        match err {
            NewsDataError::NotFound { path } => assert_eq!(path, missing),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_from_csv_path_loads_empty_fields_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "source_name,category").unwrap();
        writeln!(file, "cnn,tech").unwrap();
        writeln!(file, ",sports").unwrap();

        let table = Table::from_csv_path(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("source_name").unwrap(), vec![Some("cnn"), None]);
    }

    #[test]
    fn test_from_csv_path_reshapes_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "a,b,c").unwrap();
        writeln!(file, "1,2").unwrap();
        writeln!(file, "1,2,3,4").unwrap();

        let table = Table::from_csv_path(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], vec![cell("1"), cell("2"), None]);
        assert_eq!(table.rows()[1], vec![cell("1"), cell("2"), cell("3")]);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("3"), Some(3.0));
        assert_eq!(parse_number(" 2.5 "), Some(2.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
    }
}
