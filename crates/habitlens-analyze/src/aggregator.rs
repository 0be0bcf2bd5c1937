#![deny(unsafe_code)]

use std::collections::{BTreeMap, HashMap};

use habitlens_model::{CategoryCounts, DailyCounts, NumericSample, Table};

use crate::classifier::parse_timestamp;

/// Counts distinct stringified values of a column.
///
/// Nulls are skipped. The full distribution is returned, ordered
/// count-descending with ties kept in first-occurrence order; any top-N
/// window is the caller's cut. Absent or all-null columns produce an empty
/// result, never an error.
pub fn count_values(table: &Table, column: &str) -> CategoryCounts {
    let Some(values) = table.column(column) else {
        return CategoryCounts::default();
    };
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();
    for value in values {
        if value.is_null() {
            continue;
        }
        let key = value.to_string();
        match counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                counts.insert(key.clone(), 1);
                order.push(key);
            }
        }
    }
    let mut entries: Vec<(String, u64)> = order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            (key, count)
        })
        .collect();
    // Stable sort preserves first-occurrence order between equal counts.
    entries.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    CategoryCounts { entries }
}

/// Counts records per day for a temporal column, ascending by day.
///
/// Timestamps are truncated to day granularity; days with no records are
/// absent from the result (no gap filling). Cells that fail to parse are
/// skipped, so a column the classifier never approved still aggregates
/// defensively instead of failing.
pub fn count_per_day(table: &Table, column: &str) -> DailyCounts {
    let Some(values) = table.column(column) else {
        return DailyCounts::default();
    };
    let mut per_day = BTreeMap::new();
    for value in values {
        let Some(timestamp) = parse_timestamp(value) else {
            continue;
        };
        *per_day.entry(timestamp.date_naive()).or_insert(0u64) += 1;
    }
    DailyCounts {
        entries: per_day.into_iter().collect(),
    }
}

/// Raw non-null numeric values of a column, for downstream histogram
/// binning. No aggregation happens here.
pub fn numeric_values(table: &Table, column: &str) -> NumericSample {
    let Some(values) = table.column(column) else {
        return NumericSample::default();
    };
    NumericSample {
        values: values.iter().filter_map(|value| value.as_f64()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use habitlens_model::{Record, Value};

    use super::*;

    fn table_of(name: &str, column: &str, values: Vec<Value>) -> Table {
        Table::from_records(
            name,
            values
                .into_iter()
                .map(|value| Record::new(vec![(column.to_string(), value)]))
                .collect(),
        )
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn counts_sort_descending_with_stable_ties() {
        let table = table_of(
            "challenges",
            "category",
            vec![
                text("reading"),
                text("fitness"),
                text("music"),
                text("fitness"),
                text("music"),
            ],
        );
        let counts = count_values(&table, "category");
        // "fitness" and "music" tie at 2; "reading" appeared first overall
        // but counts less. Ties keep first-occurrence order.
        assert_eq!(
            counts.entries,
            vec![
                ("fitness".to_string(), 2),
                ("music".to_string(), 2),
                ("reading".to_string(), 1),
            ]
        );
    }

    #[test]
    fn challenge_category_scenario() {
        let table = table_of(
            "challenges",
            "category",
            vec![text("fitness"), text("fitness"), text("reading")],
        );
        assert_eq!(
            count_values(&table, "category").entries,
            vec![("fitness".to_string(), 2), ("reading".to_string(), 1)]
        );
    }

    #[test]
    fn nulls_and_absent_columns_count_to_empty() {
        let table = table_of("challenges", "category", vec![Value::Null, Value::Null]);
        assert!(count_values(&table, "category").is_empty());
        assert!(count_values(&table, "missing").is_empty());
    }

    #[test]
    fn users_per_day_scenario() {
        let day = |d| Value::Timestamp(Utc.with_ymd_and_hms(2024, 1, d, 9, 30, 0).unwrap());
        let table = table_of("users", "createdAt", vec![day(1), day(1), day(2)]);
        let daily = count_per_day(&table, "createdAt");
        assert_eq!(
            daily.entries,
            vec![
                (NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 2),
                (NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 1),
            ]
        );
    }

    #[test]
    fn per_day_counts_are_sparse_over_observed_days() {
        let day = |d| Value::Timestamp(Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap());
        let table = table_of("users", "createdAt", vec![day(1), day(9)]);
        let daily = count_per_day(&table, "createdAt");
        assert_eq!(daily.entries.len(), 2, "gap days are not filled");
    }

    #[test]
    fn numeric_values_pass_through_non_null_cells() {
        let table = table_of(
            "users",
            "streak",
            vec![Value::Int(3), Value::Null, Value::Float(1.5)],
        );
        assert_eq!(numeric_values(&table, "streak").values, vec![3.0, 1.5]);
        assert!(numeric_values(&table, "missing").is_empty());
    }
}
