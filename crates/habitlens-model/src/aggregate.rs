#![deny(unsafe_code)]

use chrono::NaiveDate;

/// Distinct-value counts for a categorical column.
///
/// Entries are ordered count-descending; equal counts keep the order in
/// which the values were first observed. Always the full distribution —
/// top-N truncation is the caller's decision, applied via [`Self::top`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryCounts {
    pub entries: Vec<(String, u64)>,
}

impl CategoryCounts {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The leading `n` entries as a new distribution.
    pub fn top(&self, n: usize) -> CategoryCounts {
        CategoryCounts {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }
}

/// Per-day record counts for a temporal column, ascending by day.
///
/// Sparse over observed days only: days with zero records are absent, not
/// zero-valued.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DailyCounts {
    pub entries: Vec<(NaiveDate, u64)>,
}

impl DailyCounts {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Raw non-null numeric values passed through for histogram binning.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NumericSample {
    pub values: Vec<f64>,
}

impl NumericSample {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
