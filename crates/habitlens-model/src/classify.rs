#![deny(unsafe_code)]

use std::fmt;

/// Analytical role inferred for a column.
///
/// Assigned once by the classifier and never mutated; downstream stages
/// dispatch on the tag to pick an aggregate and chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Classification {
    /// Uniformly timestamp-valued; charted as a per-day trend line.
    Temporal,
    /// Uniformly integer or float valued; charted as a histogram.
    Numeric,
    /// Label-like column from the known candidate list; charted as a
    /// ranked bar chart.
    Categorical,
    /// Identifier or internal version marker; never aggregated or charted.
    Excluded,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Temporal => "temporal",
            Classification::Numeric => "numeric",
            Classification::Categorical => "categorical",
            Classification::Excluded => "excluded",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
