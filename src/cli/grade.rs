//! Grade command - score a report and update the best score

use crate::artifacts::copy_report;
use crate::results::ResultSet;
use crate::scoring::ScoreAggregator;
use crate::store::ScoreStore;
use crate::weights::WeightTable;
use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;
use tracing::{debug, info};

/// Resolved settings for one grading run
#[derive(Debug, Clone, PartialEq)]
pub struct GradeOptions {
    pub results: PathBuf,
    pub weights: PathBuf,
    pub score_file: PathBuf,
    pub message_file: Option<PathBuf>,
    pub explain: bool,
}

/// Run the grade command
pub fn run(options: &GradeOptions) -> Result<()> {
    // Inputs are all-or-nothing: nothing is printed or written until both load
    let weights = WeightTable::from_path(&options.weights).context("Failed to load rubric")?;
    let results =
        ResultSet::from_path(&options.results).context("Failed to load test report")?;
    debug!(
        "{} groups in report, {} weighted groups in rubric",
        results.groups().len(),
        weights.len()
    );

    let scorer = ScoreAggregator::new(&weights);
    let breakdown = scorer.breakdown(results.groups());
    let total = breakdown
        .finite_total()
        .map_err(|e| e.at_path(&options.weights))
        .context("Failed to score test report")?;

    if options.explain {
        let text = scorer.explain(&breakdown);
        let mut lines = text.lines();
        if let Some(header) = lines.next() {
            eprintln!("{}", style(header).bold().for_stderr());
        }
        for line in lines {
            eprintln!("{}", line);
        }
    }

    println!("{}", total);

    let store = ScoreStore::new(&options.score_file);
    let update = store.update(total)?;
    if update.written {
        info!("New best score {:.2} (was {:.2})", update.new, update.old);
    }

    if let Some(dest) = &options.message_file {
        copy_report(&options.results, dest)?;
    }

    Ok(())
}
