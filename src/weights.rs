//! Weight table loading
//!
//! ```json
//! {
//!   "homework_name": "hw1",
//!   "testsuites": [
//!     { "testsuite": "ShapeTest", "score": 40 },
//!     { "testsuite": "AreaTest", "score": 12.5 }
//!   ]
//! }
//! ```
//!
//! Weights are kept as `f64`; fractional weights are never truncated.

use crate::document;
use crate::error::GradeResult;
use crate::models::SuiteWeight;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Group name to weight
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    weights: HashMap<String, f64>,
}

impl WeightTable {
    /// Build a table from a parsed weight document
    pub fn load(doc: &Value) -> GradeResult<Self> {
        let mut table = WeightTable::default();
        for (i, entry) in document::array(doc, "testsuites", "")?.iter().enumerate() {
            let at = document::index("", "testsuites", i);
            let name = document::string(entry, "testsuite", &at)?;
            let weight = document::number(entry, "score", &at)?;
            table.insert(SuiteWeight {
                name: name.to_string(),
                weight,
            });
        }
        debug!("Loaded {} weights", table.len());
        Ok(table)
    }

    /// Read and load a weight document from disk
    pub fn from_path(path: &Path) -> GradeResult<Self> {
        let doc = document::load(path)?;
        Self::load(&doc).map_err(|e| e.at_path(path))
    }

    /// Insert an entry; a repeated name replaces the earlier weight
    pub fn insert(&mut self, entry: SuiteWeight) {
        if let Some(previous) = self.weights.insert(entry.name.clone(), entry.weight) {
            warn!(
                "Duplicate weight for '{}': {} replaces {}",
                entry.name, entry.weight, previous
            );
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<SuiteWeight> for WeightTable {
    fn from_iter<I: IntoIterator<Item = SuiteWeight>>(iter: I) -> Self {
        let mut table = WeightTable::default();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}
