use serde::{Deserialize, Serialize};

use crate::comparator::{ExactComparator, ScalarComparator, ToleranceComparator};

/// Configuration for the differencer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Absolute tolerance for number comparison. `None` (the default) means
    /// numbers must be exactly equal.
    pub number_tolerance: Option<f64>,
}

impl DiffConfig {
    /// Exact comparison for every scalar.
    pub fn exact() -> Self {
        Self::default()
    }

    /// Numbers within `epsilon` of each other count as unchanged.
    pub fn with_tolerance(epsilon: f64) -> Self {
        Self {
            number_tolerance: Some(epsilon),
        }
    }

    /// The comparator these settings describe.
    pub fn comparator(&self) -> Box<dyn ScalarComparator + Send + Sync> {
        match self.number_tolerance {
            Some(epsilon) => Box::new(ToleranceComparator::new(epsilon)),
            None => Box::new(ExactComparator),
        }
    }
}
