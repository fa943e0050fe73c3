//! Message artifact: a verbatim copy of the test report
//!
//! The judge front end shows this file to the submitter. It is copied byte
//! for byte and plays no part in scoring.

use crate::error::{GradeError, GradeResult};
use std::path::Path;
use tracing::{info, warn};

/// Message file name used when the copy is enabled without a path
pub const DEFAULT_MESSAGE_FILE: &str = "message.txt";

/// Copy `source` to `dest`, returning the number of bytes copied
///
/// When `dest` already is `source` the file is left untouched, since copying
/// a file onto itself truncates it.
pub fn copy_report(source: &Path, dest: &Path) -> GradeResult<u64> {
    let copy_err = |e: std::io::Error| GradeError::ArtifactCopy {
        source_path: source.to_path_buf(),
        dest: dest.to_path_buf(),
        source: e,
    };

    if same_file(source, dest) {
        let bytes = std::fs::metadata(source).map_err(copy_err)?.len();
        warn!(
            "Message file {} is the report itself, leaving it as is",
            dest.display()
        );
        return Ok(bytes);
    }

    let bytes = std::fs::copy(source, dest).map_err(copy_err)?;
    info!(
        "Copied {} bytes from {} to {}",
        bytes,
        source.display(),
        dest.display()
    );
    Ok(bytes)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
