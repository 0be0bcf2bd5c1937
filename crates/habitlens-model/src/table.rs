#![deny(unsafe_code)]

use std::collections::HashMap;

use crate::Value;

/// One decoded document: field names paired with tagged values, in document
/// order. Immutable once read.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new(fields: Vec<(String, Value)>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

impl From<bson::Document> for Record {
    fn from(document: bson::Document) -> Self {
        let fields = document
            .into_iter()
            .map(|(name, raw)| (name, Value::from(raw)))
            .collect();
        Self { fields }
    }
}

/// Column-oriented materialization of one collection.
///
/// Columns are the union of every field name observed across the records,
/// ordered by first appearance. Every column holds exactly `row_count`
/// values; cells a record never carried are `Value::Null`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    cells: Vec<Vec<Value>>,
    row_count: usize,
}

impl Table {
    pub fn from_records(name: impl Into<String>, records: Vec<Record>) -> Self {
        let mut builder = TableBuilder::new(name);
        for record in records {
            builder.push_record(record);
        }
        builder.finish()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Returns the aligned value sequence for a column, or `None` when the
    /// column was never observed.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        let index = self.columns.iter().position(|column| column == name)?;
        Some(&self.cells[index])
    }

    /// Row-major view used by the export writer: one stringifiable cell per
    /// column, in column order.
    pub fn row(&self, index: usize) -> Vec<&Value> {
        self.cells.iter().map(|column| &column[index]).collect()
    }
}

/// Incremental [`Table`] construction preserving the union-of-columns and
/// uniform-row-count invariants.
#[derive(Debug)]
pub struct TableBuilder {
    name: String,
    columns: Vec<String>,
    index: HashMap<String, usize>,
    cells: Vec<Vec<Value>>,
    row_count: usize,
}

impl TableBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            index: HashMap::new(),
            cells: Vec::new(),
            row_count: 0,
        }
    }

    /// Appends one record as a row. Columns first seen here are back-filled
    /// with nulls for all prior rows; columns this record lacks receive a
    /// null for the new row.
    pub fn push_record(&mut self, record: Record) {
        for (name, value) in record.fields {
            let column_index = match self.index.get(&name) {
                Some(existing) => *existing,
                None => {
                    let column_index = self.columns.len();
                    self.columns.push(name.clone());
                    self.index.insert(name, column_index);
                    self.cells.push(vec![Value::Null; self.row_count]);
                    column_index
                }
            };
            self.cells[column_index].push(value);
        }
        self.row_count += 1;
        for column in &mut self.cells {
            if column.len() < self.row_count {
                column.push(Value::Null);
            }
        }
    }

    pub fn finish(self) -> Table {
        Table {
            name: self.name,
            columns: self.columns,
            cells: self.cells,
            row_count: self.row_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, Value)]) -> Record {
        Record::new(
            fields
                .iter()
                .map(|(name, value)| ((*name).to_string(), value.clone()))
                .collect(),
        )
    }

    #[test]
    fn column_union_preserves_first_seen_order() {
        let table = Table::from_records(
            "users",
            vec![
                record(&[("name", Value::Text("ada".into())), ("age", Value::Int(36))]),
                record(&[("name", Value::Text("grace".into())), ("city", Value::Text("nyc".into()))]),
            ],
        );
        assert_eq!(table.columns(), ["name", "age", "city"]);
    }

    #[test]
    fn every_column_holds_row_count_values() {
        let table = Table::from_records(
            "users",
            vec![
                record(&[("a", Value::Int(1))]),
                record(&[("b", Value::Int(2))]),
                record(&[("a", Value::Int(3)), ("c", Value::Int(4))]),
            ],
        );
        assert_eq!(table.row_count(), 3);
        for column in table.columns() {
            assert_eq!(table.column(column).unwrap().len(), 3, "column {column}");
        }
    }

    #[test]
    fn missing_cells_are_null() {
        let table = Table::from_records(
            "users",
            vec![
                record(&[("a", Value::Int(1))]),
                record(&[("b", Value::Text("x".into()))]),
            ],
        );
        assert_eq!(table.column("a").unwrap()[1], Value::Null);
        assert_eq!(table.column("b").unwrap()[0], Value::Null);
    }

    #[test]
    fn absent_column_is_none() {
        let table = Table::from_records("users", vec![record(&[("a", Value::Int(1))])]);
        assert!(table.column("missing").is_none());
        assert!(!table.has_column("missing"));
    }

    #[test]
    fn empty_collection_builds_empty_table() {
        let table = Table::from_records("users", Vec::new());
        assert_eq!(table.row_count(), 0);
        assert!(table.columns().is_empty());
    }
}
