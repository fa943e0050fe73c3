//! Weighted pass-ratio scoring
//!
//! Every group in the result document earns a share of its rubric weight
//! equal to the fraction of its suite records that passed.
//!
//! # Scoring Formula
//!
//! ```text
//! Score = Σ ratio(g) × weight(g)
//!
//! Where for each group g:
//!   ratio(g)  = passing / (passing + failing), or 0 for an empty group
//!   weight(g) = rubric weight for g's name, or 0 when the rubric omits it
//! ```
//!
//! # Example
//!
//! Rubric `GroupA = 50`, report with `GroupA` holding one passing and one
//! failing record:
//!
//! ```text
//! Score = 1/2 × 50 = 25
//! ```
//!
//! No rounding happens here. The score is only rounded when it is written
//! to the score file (see [`crate::store`]).

mod aggregator;

pub use aggregator::{aggregate, GroupScore, ScoreAggregator, ScoreBreakdown};
