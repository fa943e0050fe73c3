//! Core data models for gtest-grader
//!
//! A result document is a list of named groups, each holding the suite
//! records that ran under it. Every suite record is either a pass or a
//! failure; there is no skipped state.

/// Outcome of one suite record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCaseOutcome {
    pub passed: bool,
}

impl TestCaseOutcome {
    pub const PASS: TestCaseOutcome = TestCaseOutcome { passed: true };
    pub const FAIL: TestCaseOutcome = TestCaseOutcome { passed: false };
}

/// One suite record under a group
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteRun {
    /// Record name, empty when the report omits it
    pub name: String,
    pub outcome: TestCaseOutcome,
}

impl SuiteRun {
    pub fn new(name: impl Into<String>, outcome: TestCaseOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }
}

/// A named group from the result document
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRun {
    pub name: String,
    pub suites: Vec<SuiteRun>,
}

impl GroupRun {
    pub fn new(name: impl Into<String>, suites: Vec<SuiteRun>) -> Self {
        Self {
            name: name.into(),
            suites,
        }
    }

    /// Number of passing suite records
    pub fn passing(&self) -> usize {
        self.suites.iter().filter(|s| s.outcome.passed).count()
    }

    /// Number of failing suite records
    pub fn failing(&self) -> usize {
        self.suites.len() - self.passing()
    }

    /// Fraction of passing records; an empty group scores 0
    pub fn pass_ratio(&self) -> f64 {
        let passing = self.passing() as f64;
        let total = passing + self.failing() as f64;
        if total > 0.0 {
            passing / total
        } else {
            0.0
        }
    }
}

/// A weight-table entry
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteWeight {
    pub name: String,
    pub weight: f64,
}
