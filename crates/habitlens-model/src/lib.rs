//! Shared data model for the HabitLens analysis pipeline.
//!
//! Collections arrive as BSON document streams with no schema contract, so
//! the model is deliberately dynamic: a tagged [`Value`] sum type per cell, a
//! [`Record`] per document, and a column-oriented [`Table`] per collection.
//! Classification tags and aggregate carriers live here so the analyze and
//! report crates can exchange them without depending on each other.

pub mod aggregate;
pub mod classify;
pub mod table;
pub mod value;

pub use aggregate::{CategoryCounts, DailyCounts, NumericSample};
pub use classify::Classification;
pub use table::{Record, Table, TableBuilder};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Value::Int(42)).expect("serialize value");
        let round: Value = serde_json::from_str(&json).expect("deserialize value");
        assert_eq!(round, Value::Int(42));
        assert!(json.contains("\"kind\""));
    }

    #[test]
    fn category_counts_top_keeps_leading_entries() {
        let counts = CategoryCounts {
            entries: vec![
                ("fitness".to_string(), 5),
                ("reading".to_string(), 3),
                ("music".to_string(), 1),
            ],
        };
        let top = counts.top(2);
        assert_eq!(
            top.entries,
            vec![("fitness".to_string(), 5), ("reading".to_string(), 3)]
        );
        assert!(counts.top(0).is_empty());
    }
}
