//! gtest-grader - weighted scoring for GoogleTest JSON reports
//!
//! Scores a test run by weighting each test group's pass ratio with a rubric
//! weight, and keeps the best score seen across runs in a score file.
//!
//! ```rust,ignore
//! use gtest_grader::{results::ResultSet, scoring::aggregate, store::ScoreStore, weights::WeightTable};
//!
//! let weights = WeightTable::from_path("rubric.json".as_ref())?;
//! let results = ResultSet::from_path("report.json".as_ref())?;
//! let score = aggregate(results.groups(), &weights);
//! ScoreStore::new("score.txt").update(score)?;
//! ```

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod results;
pub mod scoring;
pub mod store;
pub mod weights;

pub use error::{GradeError, GradeResult};
