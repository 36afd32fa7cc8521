use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::normalize::ColumnSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Length of the recommendation list and the map's candidate set.
    pub top_n: usize,
    pub category_top_n: usize,
    /// Snapshots kept before the oldest is evicted.
    pub history_capacity: usize,
    pub columns: ColumnSchema,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            category_top_n: 20,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            columns: ColumnSchema::default(),
        }
    }
}
