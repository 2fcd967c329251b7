//! certquiz-archive — Immutable result records with JSON persistence.
//!
//! Each completed test becomes one `test_<timestamp>.json` file. The
//! timestamp keeps the `%Y-%m-%d %H:%M:%S` format inside the record, where
//! lexicographic order is chronological order; the file name carries a
//! sanitized copy safe for any filesystem.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use certquiz_core::scoring::{is_passing, percentage, ScoreOutcome, WrongQuestion};

/// The persisted outcome of one completed test. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Who took the test.
    pub name: String,
    /// Completion timestamp, `%Y-%m-%d %H:%M:%S`.
    pub date: String,
    /// Number of correct answers.
    pub score: u32,
    /// Number of questions in the test.
    pub total: u32,
    /// score / total * 100, rounded to two decimals.
    pub percentage: f64,
    /// Incorrect questions in test order, with the user's actual answers.
    pub wrong_questions: Vec<WrongQuestion>,
}

impl TestResult {
    /// Build a result record from a scoring outcome.
    pub fn from_outcome(name: &str, outcome: ScoreOutcome, total: usize, date: String) -> Self {
        Self {
            name: name.to_string(),
            date,
            score: outcome.correct as u32,
            total: total as u32,
            percentage: percentage(outcome.correct, total),
            wrong_questions: outcome.wrong,
        }
    }

    /// Whether this result meets the pass threshold.
    pub fn passed(&self) -> bool {
        is_passing(self.percentage)
    }

    /// Deterministic file name derived from the sanitized timestamp.
    pub fn file_name(&self) -> String {
        format!("test_{}.json", sanitize_timestamp(&self.date))
    }
}

/// Replace the characters of a `%Y-%m-%d %H:%M:%S` timestamp that are unsafe
/// in file names: colons become dashes, spaces become underscores.
pub fn sanitize_timestamp(date: &str) -> String {
    date.replace(':', "-").replace(' ', "_")
}

/// Current local time in the record format.
pub fn current_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Directory-backed archive of test results.
#[derive(Debug, Clone)]
pub struct ResultArchive {
    dir: PathBuf,
}

impl ResultArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist one result. Creates the archive directory on first use.
    ///
    /// A write failure is returned to the caller so the session's saved flag
    /// stays unset and a retry remains possible.
    pub fn save(&self, result: &TestResult) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create results directory: {}", self.dir.display())
        })?;

        let path = self.dir.join(result.file_name());
        let json = serde_json::to_string_pretty(result).context("failed to serialize result")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;

        tracing::info!(path = %path.display(), "result saved");
        Ok(path)
    }

    /// Enumerate all persisted results, most recent first.
    ///
    /// A missing archive directory yields an empty list. Records that fail
    /// to parse are skipped with a warning so one corrupt file cannot take
    /// down result browsing.
    pub fn list_all(&self) -> Result<Vec<TestResult>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut results = Vec::new();
        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read results directory: {}", self.dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.starts_with("test_") || !file_name.ends_with(".json") {
                continue;
            }

            match read_result(&path) {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "skipping malformed result: {e:#}");
                }
            }
        }

        results.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(results)
    }
}

fn read_result(path: &Path) -> Result<TestResult> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read result from {}", path.display()))?;
    serde_json::from_str(&content).context("failed to parse result JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use certquiz_core::model::{Answer, AnswerOption, CorrectAnswer};

    fn make_result(name: &str, date: &str, score: u32, total: u32) -> TestResult {
        TestResult {
            name: name.into(),
            date: date.into(),
            score,
            total,
            percentage: percentage(score as usize, total as usize),
            wrong_questions: vec![WrongQuestion {
                question: "Which one?".into(),
                options: vec![
                    AnswerOption {
                        letter: 'A',
                        text: "first".into(),
                    },
                    AnswerOption {
                        letter: 'B',
                        text: "second".into(),
                    },
                ],
                user_answer: Some(Answer::Single('B')),
                correct_answer: CorrectAnswer::Single('A'),
                is_multiple: false,
            }],
        }
    }

    #[test]
    fn sanitize_replaces_colons_and_spaces() {
        assert_eq!(
            sanitize_timestamp("2024-01-01 10:00:00"),
            "2024-01-01_10-00-00"
        );
    }

    #[test]
    fn file_name_is_deterministic() {
        let result = make_result("Alice", "2024-01-01 10:00:00", 30, 40);
        assert_eq!(result.file_name(), "test_2024-01-01_10-00-00.json");
    }

    #[test]
    fn save_then_list_roundtrips_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ResultArchive::new(dir.path().join("results"));

        let result = make_result("Alice", "2024-01-01 10:00:00", 30, 40);
        let path = archive.save(&result).unwrap();
        assert!(path.exists());

        let listed = archive.list_all().unwrap();
        assert_eq!(listed, vec![result]);
    }

    #[test]
    fn list_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ResultArchive::new(dir.path().join("never-created"));
        assert!(archive.list_all().unwrap().is_empty());
    }

    #[test]
    fn list_sorts_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ResultArchive::new(dir.path());

        archive
            .save(&make_result("Alice", "2024-01-01 10:00:00", 30, 40))
            .unwrap();
        archive
            .save(&make_result("Bob", "2024-03-01 09:00:00", 20, 40))
            .unwrap();

        let listed = archive.list_all().unwrap();
        assert_eq!(listed[0].name, "Bob");
        assert_eq!(listed[1].name, "Alice");
    }

    #[test]
    fn list_skips_malformed_records() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ResultArchive::new(dir.path());

        archive
            .save(&make_result("Alice", "2024-01-01 10:00:00", 30, 40))
            .unwrap();
        std::fs::write(dir.path().join("test_corrupt.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("unrelated.txt"), "ignored").unwrap();

        let listed = archive.list_all().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Alice");
    }

    #[test]
    fn from_outcome_computes_percentage() {
        let outcome = ScoreOutcome {
            correct: 28,
            wrong: vec![],
        };
        let result = TestResult::from_outcome("Alice", outcome, 40, current_timestamp());
        assert_eq!(result.percentage, 70.0);
        assert!(result.passed());
    }

    #[test]
    fn save_fails_on_unwritable_directory() {
        // A file where the directory should be makes create_dir_all fail.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("results");
        std::fs::write(&blocker, "occupied").unwrap();

        let archive = ResultArchive::new(&blocker);
        let result = make_result("Alice", "2024-01-01 10:00:00", 30, 40);
        assert!(archive.save(&result).is_err());
    }
}
