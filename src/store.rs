//! Best-score persistence
//!
//! The score file holds a single number with two decimals, e.g. `87.50`.
//! Each run raises it to the new score if that is higher and otherwise
//! leaves the file alone. An unchanged score never rewrites the file, so its
//! modification time only moves when the best score improves.
//!
//! Reads are permissive: a missing, unreadable or garbled file counts as a
//! previous best of `0.0`.

use crate::error::{GradeError, GradeResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Score file name used when nothing else is configured
pub const DEFAULT_SCORE_FILE: &str = "score.txt";

/// Outcome of a read-modify-write on the score file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreUpdate {
    /// Best score before this run
    pub old: f64,
    /// Best score after this run
    pub new: f64,
    /// Whether the file was rewritten
    pub written: bool,
}

/// Persisted best score at a fixed location
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current best score, 0.0 when absent or unparseable
    pub fn read(&self) -> f64 {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No score file at {}, starting from 0", self.path.display());
                return 0.0;
            }
            Err(e) => {
                warn!("Cannot read {}: {}, starting from 0", self.path.display(), e);
                return 0.0;
            }
        };

        match parse_score(&content) {
            Some(score) => score,
            None => {
                warn!(
                    "Ignoring unparseable score file {}: {:?}",
                    self.path.display(),
                    content.lines().next().unwrap_or_default()
                );
                0.0
            }
        }
    }

    /// Keep the higher of the stored score and `score`
    pub fn update(&self, score: f64) -> GradeResult<ScoreUpdate> {
        let old = self.read();
        let new = old.max(score);

        if new == old {
            debug!("Best score stays at {:.2} (this run: {})", old, score);
            return Ok(ScoreUpdate {
                old,
                new,
                written: false,
            });
        }

        std::fs::write(&self.path, format_score(new)).map_err(|source| {
            GradeError::StorageWrite {
                path: self.path.clone(),
                source,
            }
        })?;
        info!(
            "Best score raised from {:.2} to {:.2} in {}",
            old,
            new,
            self.path.display()
        );

        Ok(ScoreUpdate {
            old,
            new,
            written: true,
        })
    }
}

/// Fixed-point, two decimals, newline-terminated
pub fn format_score(score: f64) -> String {
    format!("{:.2}\n", score)
}

/// First whitespace-delimited token of the first line, as a finite number
fn parse_score(content: &str) -> Option<f64> {
    content
        .lines()
        .next()?
        .split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
