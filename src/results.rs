//! Test report loading
//!
//! Reads the GoogleTest `--gtest_output=json` layout:
//!
//! ```json
//! {
//!   "testsuites": [
//!     {
//!       "name": "ShapeTest",
//!       "testsuite": [
//!         { "name": "Area", "status": "RUN" },
//!         { "name": "Perimeter", "failures": [ { "failure": "..." } ] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! A record fails when it carries a `failures` or `errors` key. The value is
//! not inspected, so even an empty `failures` array fails the record.

use crate::document;
use crate::error::GradeResult;
use crate::models::{GroupRun, SuiteRun, TestCaseOutcome};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Keys whose presence marks a suite record as failing
const FAILURE_MARKERS: &[&str] = &["failures", "errors"];

/// Groups from a result document, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    groups: Vec<GroupRun>,
}

impl ResultSet {
    /// Build a result set from a parsed result document
    pub fn load(doc: &Value) -> GradeResult<Self> {
        let entries = document::array(doc, "testsuites", "")?;
        let mut groups = Vec::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            let at = document::index("", "testsuites", i);
            let name = document::string(entry, "name", &at)?;
            let records = document::array(entry, "testsuite", &at)?;

            let mut suites = Vec::with_capacity(records.len());
            for (j, record) in records.iter().enumerate() {
                let record_at = document::index(&at, "testsuite", j);
                suites.push(classify(record, &record_at)?);
            }

            let group = GroupRun::new(name, suites);
            debug!(
                "Group '{}': {} passed, {} failed",
                group.name,
                group.passing(),
                group.failing()
            );
            groups.push(group);
        }

        Ok(Self { groups })
    }

    /// Read and load a result document from disk
    pub fn from_path(path: &Path) -> GradeResult<Self> {
        let doc = document::load(path)?;
        Self::load(&doc).map_err(|e| e.at_path(path))
    }

    pub fn groups(&self) -> &[GroupRun] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<GroupRun> {
        self.groups
    }
}

fn classify(record: &Value, at: &str) -> GradeResult<SuiteRun> {
    let fields = document::object(record, at)?;
    let failed = FAILURE_MARKERS.iter().any(|k| document::has_key(record, k));
    let name = fields.get("name").and_then(Value::as_str).unwrap_or_default();
    let outcome = if failed {
        TestCaseOutcome::FAIL
    } else {
        TestCaseOutcome::PASS
    };
    Ok(SuiteRun::new(name, outcome))
}
