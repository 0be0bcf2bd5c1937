//! Schema-agnostic column analysis for HabitLens.
//!
//! Two stages operate over a loaded [`habitlens_model::Table`]:
//!
//! 1. **Classifier**: ordered first-match-wins candidate lists decide which
//!    column is temporal, which is categorical, and which columns are worth
//!    histogramming. The candidate tables are public constants so the
//!    first-match policy stays auditable.
//! 2. **Aggregator**: computes the (key, count) distribution or raw value
//!    sample each chart type needs. Absent and all-null columns aggregate to
//!    empty results — a valid terminal state the renderer treats as a no-op.

pub mod aggregator;
pub mod classifier;

pub use aggregator::{count_per_day, count_values, numeric_values};
pub use classifier::{
    CATEGORICAL_CANDIDATES, EXCLUDED_COLUMNS, TEMPORAL_CANDIDATES, classify,
    find_categorical_column, find_temporal_column, is_excluded, numeric_columns,
};
