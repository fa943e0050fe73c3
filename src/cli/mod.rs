//! CLI definition and entry point

pub(crate) mod grade;

use crate::config::{load_config, load_config_file, GraderConfig};
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

/// gtest-grader - weighted scoring for GoogleTest JSON reports
#[derive(Parser, Debug)]
#[command(name = "gtest-grader")]
#[command(
    version,
    about = "Score a GoogleTest JSON report against a weighted rubric and keep the best score",
    long_about = "Reads a GoogleTest JSON report (--gtest_output=json) and a rubric that assigns \
a weight to each test group. Each group earns its weight times the fraction of its test \
records that passed. The total is printed to stdout and the best total seen so far is \
kept in a score file.",
    after_help = "\
Examples:
  gtest-grader report.json rubric.json                           Score, update score.txt
  gtest-grader report.json rubric.json --score-file ../score.txt  Keep the best score elsewhere
  gtest-grader report.json rubric.json --message-file message.txt Also copy the report
  gtest-grader report.json rubric.json --explain                  Per-group breakdown on stderr"
)]
pub struct Cli {
    /// GoogleTest JSON report
    #[arg(value_name = "RESULTS")]
    pub results: PathBuf,

    /// Rubric JSON with a weight per test group
    #[arg(value_name = "WEIGHTS")]
    pub weights: PathBuf,

    /// Best-score file (default: from config, else score.txt)
    #[arg(long, env = "GTEST_GRADER_SCORE_FILE", value_name = "PATH")]
    pub score_file: Option<PathBuf>,

    /// Copy the report verbatim to this file
    #[arg(long, env = "GTEST_GRADER_MESSAGE_FILE", value_name = "PATH")]
    pub message_file: Option<PathBuf>,

    /// Skip the report copy even if configured
    #[arg(long)]
    pub no_message: bool,

    /// Config file (default: gtest-grader.toml or .gtest-graderrc.json in the current directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the per-group score breakdown to stderr
    #[arg(long)]
    pub explain: bool,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

impl Cli {
    /// Merge flags over loaded config
    fn grade_options(&self, config: &GraderConfig) -> grade::GradeOptions {
        let score_file = self
            .score_file
            .clone()
            .unwrap_or_else(|| config.store.path.clone());

        let message_file = if self.no_message {
            None
        } else {
            self.message_file
                .clone()
                .or_else(|| config.message_path().map(Path::to_path_buf))
        };

        grade::GradeOptions {
            results: self.results.clone(),
            weights: self.weights.clone(),
            score_file,
            message_file,
            explain: self.explain,
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => load_config(Path::new(".")),
    };
    tracing::debug!("Effective config: {:?}", config);

    let options = cli.grade_options(&config);
    grade::run(&options)
}
