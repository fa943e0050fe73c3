//! CLI contract tests
//!
//! Runs the built binary in a scratch directory and checks stdout, the exit
//! code, the score file and the message artifact.

use std::path::Path;
use std::process::Command;

const RUBRIC: &str = r#"{"homework_name": "hw1", "testsuites": [{"testsuite": "GroupA", "score": 50}]}"#;
const HALF_PASSING: &str = r#"{"testsuites": [{"name": "GroupA", "testsuite": [{}, {"failures": true}]}]}"#;

fn grader_bin() -> &'static str {
    env!("CARGO_BIN_EXE_gtest-grader")
}

fn setup(report: &str, rubric: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("report.json"), report).unwrap();
    std::fs::write(dir.path().join("rubric.json"), rubric).unwrap();
    dir
}

fn run_grader(dir: &Path, extra_args: &[&str]) -> (i32, String, String) {
    run_grader_with_env(dir, extra_args, &[])
}

fn run_grader_with_env(
    dir: &Path,
    extra_args: &[&str],
    envs: &[(&str, &str)],
) -> (i32, String, String) {
    let mut cmd = Command::new(grader_bin());
    cmd.current_dir(dir)
        .arg("report.json")
        .arg("rubric.json")
        .env_remove("GTEST_GRADER_SCORE_FILE")
        .env_remove("GTEST_GRADER_MESSAGE_FILE")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.join("xdg"));
    for arg in extra_args {
        cmd.arg(arg);
    }
    for (key, value) in envs {
        cmd.env(key, value);
    }
    let output = cmd.output().expect("Failed to run gtest-grader");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn score_file(dir: &Path) -> Option<String> {
    std::fs::read_to_string(dir.join("score.txt")).ok()
}

// ============================================================================
// Scoring
// ============================================================================

#[test]
fn test_half_passing_group() {
    let dir = setup(HALF_PASSING, RUBRIC);
    let (code, stdout, _) = run_grader(dir.path(), &[]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "25\n");
    assert_eq!(score_file(dir.path()).as_deref(), Some("25.00\n"));
}

#[test]
fn test_empty_group_scores_zero() {
    let dir = setup(r#"{"testsuites": [{"name": "GroupA", "testsuite": []}]}"#, RUBRIC);
    let (code, stdout, _) = run_grader(dir.path(), &[]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "0\n");
    // 0 is not an improvement over the implicit 0, so nothing is written
    assert_eq!(score_file(dir.path()), None);
}

#[test]
fn test_unweighted_group_ignored() {
    let report = r#"{"testsuites": [
        {"name": "GroupA", "testsuite": [{}, {}]},
        {"name": "GroupB", "testsuite": [{}, {}, {}]}
    ]}"#;
    let dir = setup(report, RUBRIC);
    let (code, stdout, _) = run_grader(dir.path(), &[]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "50\n");
}

#[test]
fn test_fractional_weights() {
    let rubric = r#"{"testsuites": [
        {"testsuite": "A", "score": 12.5},
        {"testsuite": "B", "score": 7.25}
    ]}"#;
    let report = r#"{"testsuites": [
        {"name": "A", "testsuite": [{}]},
        {"name": "B", "testsuite": [{}, {"errors": []}]}
    ]}"#;
    let dir = setup(report, rubric);
    let (code, stdout, _) = run_grader(dir.path(), &[]);
    assert_eq!(code, 0);
    let score: f64 = stdout.trim().parse().unwrap();
    assert!((score - 16.125).abs() < 1e-9, "score={}", score);
    assert_eq!(score_file(dir.path()).as_deref(), Some(format!("{:.2}\n", 16.125).as_str()));
}

// ============================================================================
// Score file
// ============================================================================

#[test]
fn test_improvement_updates_score_file() {
    let dir = setup(HALF_PASSING, RUBRIC);
    std::fs::write(dir.path().join("score.txt"), "10.00").unwrap();
    let (code, _, _) = run_grader(dir.path(), &[]);
    assert_eq!(code, 0);
    assert_eq!(score_file(dir.path()).as_deref(), Some("25.00\n"));
}

#[test]
fn test_lower_score_keeps_best() {
    let dir = setup(HALF_PASSING, RUBRIC);
    std::fs::write(dir.path().join("score.txt"), "30.00").unwrap();
    let (code, stdout, _) = run_grader(dir.path(), &[]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "25\n");
    assert_eq!(score_file(dir.path()).as_deref(), Some("30.00"));
}

#[test]
fn test_garbage_score_file_is_replaced() {
    let dir = setup(HALF_PASSING, RUBRIC);
    std::fs::write(dir.path().join("score.txt"), "???\n").unwrap();
    let (code, _, _) = run_grader(dir.path(), &[]);
    assert_eq!(code, 0);
    assert_eq!(score_file(dir.path()).as_deref(), Some("25.00\n"));
}

#[test]
fn test_score_file_flag() {
    let dir = setup(HALF_PASSING, RUBRIC);
    std::fs::create_dir(dir.path().join("work")).unwrap();
    let (code, _, _) = run_grader(dir.path(), &["--score-file", "work/best.txt"]);
    assert_eq!(code, 0);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("work/best.txt")).unwrap(),
        "25.00\n"
    );
    assert_eq!(score_file(dir.path()), None);
}

#[test]
fn test_score_file_from_config() {
    let dir = setup(HALF_PASSING, RUBRIC);
    std::fs::write(
        dir.path().join("gtest-grader.toml"),
        "[store]\npath = \"kept.txt\"\n",
    )
    .unwrap();
    let (code, _, _) = run_grader(dir.path(), &[]);
    assert_eq!(code, 0);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("kept.txt")).unwrap(),
        "25.00\n"
    );
}

#[test]
fn test_unwritable_score_file_after_printing() {
    let dir = setup(HALF_PASSING, RUBRIC);
    let (code, stdout, stderr) = run_grader(dir.path(), &["--score-file", "no/such/dir/score.txt"]);
    assert_eq!(code, 1);
    assert_eq!(stdout, "25\n", "score is printed before the write fails");
    assert!(stderr.contains("Failed to write score"), "stderr: {}", stderr);
}

// ============================================================================
// Message artifact
// ============================================================================

#[test]
fn test_message_copy() {
    let dir = setup(HALF_PASSING, RUBRIC);
    let (code, stdout, _) = run_grader(dir.path(), &["--message-file", "message.txt"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "25\n");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("message.txt")).unwrap(),
        HALF_PASSING
    );
}

#[test]
fn test_message_file_is_the_report() {
    let dir = setup(HALF_PASSING, RUBRIC);
    let (code, stdout, _) = run_grader(dir.path(), &["--message-file", "report.json"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "25\n");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("report.json")).unwrap(),
        HALF_PASSING
    );
}

#[test]
fn test_message_from_config_and_no_message() {
    let dir = setup(HALF_PASSING, RUBRIC);
    std::fs::write(
        dir.path().join(".gtest-graderrc.json"),
        r#"{"message": {"enabled": true}}"#,
    )
    .unwrap();

    let (code, _, _) = run_grader(dir.path(), &["--no-message"]);
    assert_eq!(code, 0);
    assert!(!dir.path().join("message.txt").exists());

    let (code, _, _) = run_grader(dir.path(), &[]);
    assert_eq!(code, 0);
    assert!(dir.path().join("message.txt").exists());
}

#[test]
fn test_no_message_by_default() {
    let dir = setup(HALF_PASSING, RUBRIC);
    run_grader(dir.path(), &[]);
    assert!(!dir.path().join("message.txt").exists());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_wrong_argument_count() {
    let dir = setup(HALF_PASSING, RUBRIC);
    let output = Command::new(grader_bin())
        .current_dir(dir.path())
        .arg("report.json")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    assert_eq!(score_file(dir.path()), None);
}

#[test]
fn test_missing_report() {
    let dir = setup(HALF_PASSING, RUBRIC);
    std::fs::remove_file(dir.path().join("report.json")).unwrap();
    let (code, stdout, stderr) = run_grader(dir.path(), &[]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("report.json"), "stderr: {}", stderr);
    assert_eq!(score_file(dir.path()), None);
}

#[test]
fn test_malformed_rubric() {
    let dir = setup(HALF_PASSING, r#"{"testsuites": [{"testsuite": "GroupA", "score": "fifty"}]}"#);
    std::fs::write(dir.path().join("score.txt"), "10.00").unwrap();
    let (code, stdout, stderr) = run_grader(dir.path(), &[]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("testsuites[0].score"), "stderr: {}", stderr);
    assert_eq!(score_file(dir.path()).as_deref(), Some("10.00"));
}

#[test]
fn test_invalid_json_report() {
    let dir = setup("{\"testsuites\": [", RUBRIC);
    let (code, stdout, stderr) = run_grader(dir.path(), &[]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("invalid JSON"), "stderr: {}", stderr);
}

#[test]
fn test_overflowing_weights_rejected() {
    let dir = setup(
        r#"{"testsuites": [
            {"name": "A", "testsuite": [{}]},
            {"name": "B", "testsuite": [{}]}
        ]}"#,
        r#"{"testsuites": [
            {"testsuite": "A", "score": 1e308},
            {"testsuite": "B", "score": 1e308}
        ]}"#,
    );
    let (code, stdout, stderr) = run_grader(dir.path(), &[]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("weights overflow"), "stderr: {}", stderr);
    assert_eq!(score_file(dir.path()), None);
}

// ============================================================================
// Explain
// ============================================================================

#[test]
fn test_explain_goes_to_stderr() {
    let dir = setup(HALF_PASSING, RUBRIC);
    let (code, stdout, stderr) = run_grader(dir.path(), &["--explain"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "25\n");
    assert!(stderr.contains("GroupA"), "stderr: {}", stderr);
    assert!(stderr.contains("1/2"), "stderr: {}", stderr);
}

#[test]
fn test_verbose_logging_keeps_stdout_clean() {
    let dir = setup(HALF_PASSING, RUBRIC);
    let (code, stdout, stderr) = run_grader(dir.path(), &["--log-level", "trace"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "25\n");
    assert!(stderr.contains("GroupA"), "stderr: {}", stderr);

    let (code, stdout, stderr) = run_grader_with_env(dir.path(), &[], &[("RUST_LOG", "debug")]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "25\n");
    assert!(stderr.contains("GroupA"), "stderr: {}", stderr);
}
