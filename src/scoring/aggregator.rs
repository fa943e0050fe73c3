//! Score aggregation over a result set and a weight table

use crate::error::{GradeError, GradeResult};
use crate::models::GroupRun;
use crate::weights::WeightTable;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Contribution of a single group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupScore {
    /// Group name
    pub name: String,
    /// Passing suite records
    pub passing: usize,
    /// Failing suite records
    pub failing: usize,
    /// passing / (passing + failing), 0 for an empty group
    pub ratio: f64,
    /// Rubric weight, `None` when the rubric has no entry for this group
    pub weight: Option<f64>,
    /// ratio × weight, 0 without a weight
    pub contribution: f64,
}

/// Complete score breakdown for transparency
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Aggregate score (sum of contributions, in group order)
    pub total: f64,
    /// One entry per group, in report order
    pub groups: Vec<GroupScore>,
    /// Rubric entries that matched no group in the report
    pub unmatched_weights: Vec<String>,
}

impl ScoreBreakdown {
    /// The total, rejected when weights are large enough to overflow `f64`
    pub fn finite_total(&self) -> GradeResult<f64> {
        if self.total.is_finite() {
            Ok(self.total)
        } else {
            Err(GradeError::malformed(format!(
                "weights overflow: aggregate score is {}",
                self.total
            )))
        }
    }
}

/// Weighted pass-ratio scorer
pub struct ScoreAggregator<'a> {
    weights: &'a WeightTable,
}

impl<'a> ScoreAggregator<'a> {
    pub fn new(weights: &'a WeightTable) -> Self {
        Self { weights }
    }

    /// Aggregate score for `groups`
    pub fn aggregate(&self, groups: &[GroupRun]) -> f64 {
        self.breakdown(groups).total
    }

    /// Calculate the aggregate score with a per-group breakdown
    pub fn breakdown(&self, groups: &[GroupRun]) -> ScoreBreakdown {
        let mut total = 0.0;
        let mut scored = Vec::with_capacity(groups.len());

        for group in groups {
            let passing = group.passing();
            let failing = group.failing();
            let ratio = group.pass_ratio();
            let weight = self.weights.get(&group.name);

            let contribution = match weight {
                Some(w) => ratio * w,
                None => {
                    warn!("No weight for group '{}', it does not count", group.name);
                    0.0
                }
            };
            total += contribution;

            debug!(
                "Group '{}': {}/{} passed, ratio={:.3}, weight={:?}, contribution={}",
                group.name,
                passing,
                passing + failing,
                ratio,
                weight,
                contribution
            );

            scored.push(GroupScore {
                name: group.name.clone(),
                passing,
                failing,
                ratio,
                weight,
                contribution,
            });
        }

        let seen: HashSet<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        let mut unmatched_weights: Vec<String> = self
            .weights
            .iter()
            .filter(|(name, _)| !seen.contains(name))
            .map(|(name, _)| name.to_string())
            .collect();
        unmatched_weights.sort();
        for name in &unmatched_weights {
            debug!("Weight for '{}' matches no group in the report", name);
        }

        info!("Score: {} across {} groups", total, groups.len());

        ScoreBreakdown {
            total,
            groups: scored,
            unmatched_weights,
        }
    }

    /// Generate human-readable explanation of the score
    pub fn explain(&self, breakdown: &ScoreBreakdown) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Score: {}", breakdown.total));
        lines.push(String::new());

        let width = breakdown
            .groups
            .iter()
            .map(|g| g.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Group".len());

        lines.push(format!(
            "{:<width$}  {:>9}  {:>7}  {:>8}  {:>12}",
            "Group",
            "Passed",
            "Ratio",
            "Weight",
            "Contribution",
            width = width
        ));
        for g in &breakdown.groups {
            let weight = match g.weight {
                Some(w) => format!("{:.2}", w),
                None => "-".to_string(),
            };
            lines.push(format!(
                "{:<width$}  {:>9}  {:>6.1}%  {:>8}  {:>12.2}",
                g.name,
                format!("{}/{}", g.passing, g.passing + g.failing),
                g.ratio * 100.0,
                weight,
                g.contribution,
                width = width
            ));
        }

        let unweighted: Vec<&str> = breakdown
            .groups
            .iter()
            .filter(|g| g.weight.is_none())
            .map(|g| g.name.as_str())
            .collect();
        if !unweighted.is_empty() {
            lines.push(String::new());
            lines.push(format!("Not in rubric (scored 0): {}", unweighted.join(", ")));
        }
        if !breakdown.unmatched_weights.is_empty() {
            lines.push(format!(
                "Rubric entries with no results: {}",
                breakdown.unmatched_weights.join(", ")
            ));
        }

        lines.join("\n")
    }
}

/// Aggregate score for `groups` under `weights`
pub fn aggregate(groups: &[GroupRun], weights: &WeightTable) -> f64 {
    ScoreAggregator::new(weights).aggregate(groups)
}
