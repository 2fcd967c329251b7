//! certquiz-store — Question bank loading and validation.
//!
//! The bank is a JSON array of question records. Absence of the bank file is
//! not an error: `load_questions` returns `Ok(None)` and the caller decides
//! how to tell the user. A bank whose correct answers reference letters that
//! are not among the options is rejected outright.

use std::path::Path;

use anyhow::{Context, Result};

use certquiz_core::model::Question;

/// Load the question bank from a JSON file.
///
/// Returns `Ok(None)` when the file does not exist, `Err` when it exists but
/// cannot be read or parsed.
pub fn load_questions(path: &Path) -> Result<Option<Vec<Question>>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "question bank not found");
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    let questions = parse_question_bank(&content)
        .with_context(|| format!("failed to parse question bank: {}", path.display()))?;

    Ok(Some(questions))
}

/// Parse a JSON string into a question bank (useful for testing).
///
/// Enforces the structural invariant that every correct letter appears among
/// the question's options.
pub fn parse_question_bank(content: &str) -> Result<Vec<Question>> {
    let questions: Vec<Question> =
        serde_json::from_str(content).context("question bank is not valid JSON")?;

    for (i, q) in questions.iter().enumerate() {
        if !q.correct_answer_in_options() {
            anyhow::bail!(
                "question {} ('{}'): correct answer '{}' is not among the options",
                i + 1,
                truncate(&q.text, 40),
                q.correct
            );
        }
    }

    Ok(questions)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Zero-based index of the offending question, if applicable.
    pub question_index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common authoring issues.
///
/// These are soft problems a bank can live with, as opposed to the hard
/// correct-answer invariant enforced at parse time.
pub fn validate_question_bank(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (i, q) in questions.iter().enumerate() {
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_index: Some(i),
                message: "question text is empty".into(),
            });
        }

        if q.options.len() < 2 {
            warnings.push(ValidationWarning {
                question_index: Some(i),
                message: format!("only {} option(s); at least 2 expected", q.options.len()),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for opt in &q.options {
            if !seen.insert(opt.letter) {
                warnings.push(ValidationWarning {
                    question_index: Some(i),
                    message: format!("duplicate option letter: {}", opt.letter),
                });
            }
            if opt.text.trim().is_empty() {
                warnings.push(ValidationWarning {
                    question_index: Some(i),
                    message: format!("option {} has empty text", opt.letter),
                });
            }
        }

        if q.is_multiple() && q.correct.letters().len() == q.options.len() {
            warnings.push(ValidationWarning {
                question_index: Some(i),
                message: "every option is correct; question cannot discriminate".into(),
            });
        }
    }

    // Duplicate question texts across the bank.
    let mut seen_texts = std::collections::HashSet::new();
    for (i, q) in questions.iter().enumerate() {
        if !seen_texts.insert(q.text.trim()) {
            warnings.push(ValidationWarning {
                question_index: Some(i),
                message: "duplicate question text".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use certquiz_core::model::CorrectAnswer;

    const VALID_BANK: &str = r#"[
        {
            "question": "Which service provides object storage?",
            "options": [
                {"letter": "A", "text": "S3"},
                {"letter": "B", "text": "EC2"},
                {"letter": "C", "text": "RDS"}
            ],
            "correct_answer": "A"
        },
        {
            "question": "Which two services are serverless?",
            "options": [
                {"letter": "A", "text": "Lambda"},
                {"letter": "B", "text": "EC2"},
                {"letter": "C", "text": "Fargate"}
            ],
            "correct_answer": ["A", "C"]
        }
    ]"#;

    #[test]
    fn parse_valid_bank() {
        let questions = parse_question_bank(VALID_BANK).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct, CorrectAnswer::Single('A'));
        assert!(questions[1].is_multiple());
    }

    #[test]
    fn parse_rejects_correct_answer_outside_options() {
        let bank = r#"[
            {
                "question": "Broken question",
                "options": [
                    {"letter": "A", "text": "first"},
                    {"letter": "B", "text": "second"}
                ],
                "correct_answer": "D"
            }
        ]"#;
        let err = parse_question_bank(bank).unwrap_err();
        assert!(err.to_string().contains("not among the options"));
    }

    #[test]
    fn parse_malformed_json() {
        assert!(parse_question_bank("not json {").is_err());
    }

    #[test]
    fn load_missing_bank_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_questions(&dir.path().join("questions.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn load_existing_bank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, VALID_BANK).unwrap();

        let questions = load_questions(&path).unwrap().unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn load_unparsable_bank_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, "[{\"broken\": true}]").unwrap();

        assert!(load_questions(&path).is_err());
    }

    #[test]
    fn validate_clean_bank_has_no_warnings() {
        let questions = parse_question_bank(VALID_BANK).unwrap();
        assert!(validate_question_bank(&questions).is_empty());
    }

    #[test]
    fn validate_flags_duplicate_letters_and_empty_text() {
        let bank = r#"[
            {
                "question": "  ",
                "options": [
                    {"letter": "A", "text": "first"},
                    {"letter": "A", "text": ""}
                ],
                "correct_answer": "A"
            }
        ]"#;
        let questions = parse_question_bank(bank).unwrap();
        let warnings = validate_question_bank(&questions);
        assert!(warnings.iter().any(|w| w.message.contains("empty")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("duplicate option letter")));
    }

    #[test]
    fn validate_flags_duplicate_questions() {
        let bank = r#"[
            {
                "question": "Same text",
                "options": [
                    {"letter": "A", "text": "first"},
                    {"letter": "B", "text": "second"}
                ],
                "correct_answer": "A"
            },
            {
                "question": "Same text",
                "options": [
                    {"letter": "A", "text": "first"},
                    {"letter": "B", "text": "second"}
                ],
                "correct_answer": "B"
            }
        ]"#;
        let questions = parse_question_bank(bank).unwrap();
        let warnings = validate_question_bank(&questions);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("duplicate question text")));
    }
}
