//! Flat tabular view over JSON API responses.
//!
//! Nested objects are flattened into dotted column names (`project.id`,
//! `issue.name`); arrays stay as cell values. A row that does not carry a
//! column reads as absent, and `null` cells are treated the same way.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

/// Column name used for list elements that are not objects.
pub const SCALAR_COLUMN: &str = "0";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Zero rows, zero columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize a JSON body: an object is one row, an array is one row per
    /// element, `null` is an empty table.
    pub fn from_json(value: Value) -> Self {
        let rows = match value {
            Value::Array(items) => items.into_iter().map(flatten_record).collect(),
            Value::Null => Vec::new(),
            other => vec![flatten_record(other)],
        };
        Self::from_rows(rows)
    }

    /// Build a table from already-flat rows; columns appear in first-seen order.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Value at (row, column); absent and `null` cells both return `None`.
    pub fn cell(&self, index: usize, column: &str) -> Option<&Value> {
        self.rows.get(index).and_then(|row| present(row, column))
    }

    /// One entry per row, `None` where the row has no value for `name`.
    pub fn column(&self, name: &str) -> Vec<Option<&Value>> {
        self.rows.iter().map(|row| present(row, name)).collect()
    }

    /// Integer values of a column, skipping rows where it is absent or not an integer.
    pub fn column_i64(&self, name: &str) -> Vec<i64> {
        self.column(name)
            .into_iter()
            .flatten()
            .filter_map(Value::as_i64)
            .collect()
    }

    /// Stack tables vertically. Columns are the union in first-seen order and
    /// rows keep the order of `tables`.
    pub fn concat(tables: Vec<Table>) -> Table {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        let mut rows = Vec::new();
        for table in tables {
            for column in table.columns {
                if seen.insert(column.clone()) {
                    columns.push(column);
                }
            }
            rows.extend(table.rows);
        }
        Table { columns, rows }
    }

    /// Remove every column that has no non-null value in any row.
    pub fn drop_all_null_columns(mut self) -> Self {
        let dropped: Vec<String> = self
            .columns
            .iter()
            .filter(|c| self.rows.iter().all(|row| present(row, c).is_none()))
            .cloned()
            .collect();
        if dropped.is_empty() {
            return self;
        }
        self.columns.retain(|c| !dropped.contains(c));
        for row in &mut self.rows {
            for column in &dropped {
                row.remove(column);
            }
        }
        self
    }

    /// Rename a column in place, keeping its position. No-op when `from` is missing.
    pub fn rename_column(mut self, from: &str, to: &str) -> Self {
        let Some(pos) = self.columns.iter().position(|c| c == from) else {
            return self;
        };
        self.columns[pos] = to.to_string();
        if let Some(dup) = self.columns.iter().enumerate().position(|(i, c)| i != pos && c == to) {
            self.columns.remove(dup);
        }
        for row in &mut self.rows {
            if let Some(value) = row.remove(from) {
                row.insert(to.to_string(), value);
            }
        }
        self
    }

    /// Keep only the named columns that exist, in the given order.
    pub fn select_columns(mut self, order: &[&str]) -> Self {
        let columns: Vec<String> = order
            .iter()
            .filter(|name| self.has_column(name))
            .map(|name| name.to_string())
            .collect();
        for row in &mut self.rows {
            row.retain(|key, _| columns.contains(key));
        }
        self.columns = columns;
        self
    }

    /// Rows for which `keep` returns true, with the column set unchanged.
    pub fn filter_rows<F>(&self, keep: F) -> Table
    where
        F: Fn(&Row) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        }
    }

    /// Add (or overwrite) a column computed from each row.
    pub fn with_column<F>(mut self, name: &str, derive: F) -> Self
    where
        F: Fn(&Row) -> Value,
    {
        for row in &mut self.rows {
            let value = derive(row);
            row.insert(name.to_string(), value);
        }
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
        self
    }

    /// Partition rows by a column's value.
    ///
    /// Groups come back sorted by key (numbers before text); rows whose key is
    /// absent or `null` are left out, and row order within a group is kept.
    pub fn group_by(&self, column: &str) -> Vec<(Value, Table)> {
        let mut groups: Vec<(Value, Vec<Row>)> = Vec::new();
        for row in &self.rows {
            let Some(key) = present(row, column) else {
                continue;
            };
            match groups.iter_mut().find(|(k, _)| k == key) {
                Some((_, rows)) => rows.push(row.clone()),
                None => groups.push((key.clone(), vec![row.clone()])),
            }
        }
        groups.sort_by(|(a, _), (b, _)| compare_values(a, b));
        groups
            .into_iter()
            .map(|(key, rows)| {
                (
                    key,
                    Table {
                        columns: self.columns.clone(),
                        rows,
                    },
                )
            })
            .collect()
    }
}

/// Text form of a cell for display and comparisons: strings unquoted,
/// everything else as compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn present<'a>(row: &'a Row, column: &str) -> Option<&'a Value> {
    row.get(column).filter(|v| !v.is_null())
}

fn flatten_record(value: Value) -> Row {
    let mut out = Row::new();
    match value {
        Value::Object(map) => flatten_into("", map, &mut out),
        scalar => {
            out.insert(SCALAR_COLUMN.to_string(), scalar);
        }
    }
    out
}

fn flatten_into(prefix: &str, map: Map<String, Value>, out: &mut Row) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => flatten_into(&path, inner, out),
            other => {
                out.insert(path, other);
            }
        }
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Bool(_) => 0,
            Value::Number(_) => 1,
            Value::String(_) => 2,
            _ => 3,
        }
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a)
            .cmp(&rank(b))
            .then_with(|| value_text(a).cmp(&value_text(b))),
    }
}
