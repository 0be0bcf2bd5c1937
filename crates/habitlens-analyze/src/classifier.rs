#![deny(unsafe_code)]

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::debug;

use habitlens_model::{Classification, Table, Value};

/// Timestamp-like column names, in trial order. The first candidate present
/// in a table whose values uniformly parse as timestamps wins.
pub const TEMPORAL_CANDIDATES: [&str; 4] = ["createdAt", "created_at", "date", "created"];

/// Category-like column names, in trial order. Only the first match is ever
/// analyzed, even when several candidates coexist — a known limitation kept
/// for fidelity with the source data's conventions (`category` shadows
/// `type` when both are present).
pub const CATEGORICAL_CANDIDATES: [&str; 3] = ["category", "categories", "type"];

/// Columns never aggregated or charted regardless of their value types:
/// the document identifier and the internal version marker.
pub const EXCLUDED_COLUMNS: [&str; 2] = ["_id", "__v"];

pub fn is_excluded(column: &str) -> bool {
    EXCLUDED_COLUMNS.contains(&column)
}

/// Timestamp view of one cell. Native timestamps pass through; text is
/// accepted only as RFC 3339 or a plain `%Y-%m-%d` date. Parsing is kept
/// deliberately narrow: a silent wrong temporal classification produces a
/// misleading chart, a miss merely skips one.
pub(crate) fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Timestamp(ts) => Some(*ts),
        Value::Text(text) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Some(parsed.with_timezone(&Utc));
            }
            let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
            Some(date.and_time(NaiveTime::MIN).and_utc())
        }
        _ => None,
    }
}

fn is_uniformly_temporal(table: &Table, column: &str) -> bool {
    let Some(values) = table.column(column) else {
        return false;
    };
    let mut non_null = 0usize;
    for value in values {
        if value.is_null() {
            continue;
        }
        if parse_timestamp(value).is_none() {
            return false;
        }
        non_null += 1;
    }
    non_null > 0
}

fn is_uniformly_numeric(table: &Table, column: &str) -> bool {
    if is_excluded(column) {
        return false;
    }
    let Some(values) = table.column(column) else {
        return false;
    };
    let mut non_null = 0usize;
    for value in values {
        if value.is_null() {
            continue;
        }
        // Mixed columns are never coerced.
        if value.as_f64().is_none() {
            return false;
        }
        non_null += 1;
    }
    non_null > 0
}

/// First temporal candidate present in the table whose values uniformly
/// parse as timestamps. A candidate that is present but unparseable fails
/// silently and the next candidate is tried.
pub fn find_temporal_column(table: &Table) -> Option<&'static str> {
    for candidate in TEMPORAL_CANDIDATES {
        if !table.has_column(candidate) {
            continue;
        }
        if is_uniformly_temporal(table, candidate) {
            debug!(collection = table.name(), column = candidate, "temporal column");
            return Some(candidate);
        }
    }
    None
}

/// First categorical candidate present in the table. Presence alone decides;
/// an all-null match simply aggregates to nothing downstream.
pub fn find_categorical_column(table: &Table) -> Option<&'static str> {
    CATEGORICAL_CANDIDATES
        .into_iter()
        .find(|candidate| table.has_column(candidate))
}

/// Every non-excluded column whose non-null values are uniformly numeric,
/// in table column order.
pub fn numeric_columns(table: &Table) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|column| is_uniformly_numeric(table, column.as_str()))
        .cloned()
        .collect()
}

/// Classifies one column by name and observed value types.
///
/// Absent and all-null columns yield `None` — "nothing to chart", never an
/// error.
pub fn classify(table: &Table, column: &str) -> Option<Classification> {
    if is_excluded(column) {
        return Some(Classification::Excluded);
    }
    if !table.has_column(column) {
        return None;
    }
    if TEMPORAL_CANDIDATES.contains(&column) && is_uniformly_temporal(table, column) {
        return Some(Classification::Temporal);
    }
    if CATEGORICAL_CANDIDATES.contains(&column) {
        return Some(Classification::Categorical);
    }
    if is_uniformly_numeric(table, column) {
        return Some(Classification::Numeric);
    }
    None
}
