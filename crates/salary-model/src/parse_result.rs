use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::education::Column;

/// Structured grid produced from pasted schedule text.
///
/// On failure `success` is false, `error` carries the reason and the grid
/// fields are empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParseResult {
    pub success: bool,
    pub columns: Vec<Column>,
    /// Step numbers, ascending.
    pub steps: Vec<u32>,
    /// step -> column key -> salary
    pub data: BTreeMap<u32, BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParseResult {
    pub fn parsed(columns: Vec<Column>, data: BTreeMap<u32, BTreeMap<String, f64>>) -> Self {
        let steps = data.keys().copied().collect();
        Self {
            success: true,
            columns,
            steps,
            data,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn value(&self, step: u32, key: &str) -> Option<f64> {
        self.data.get(&step).and_then(|row| row.get(key)).copied()
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.key == key)
    }

    /// Number of populated cells.
    pub fn cell_count(&self) -> usize {
        self.data.values().map(BTreeMap::len).sum()
    }
}
