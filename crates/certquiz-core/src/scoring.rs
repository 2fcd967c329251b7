//! Scoring of a finished answer set.
//!
//! `score` is a pure function: no I/O, deterministic given identical inputs.
//! Multi-select questions require an exact set match in both directions; no
//! partial credit.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::{Answer, AnswerOption, CorrectAnswer, Question};

/// Passing score in percent.
pub const PASS_THRESHOLD_PCT: f64 = 70.0;

/// One incorrectly answered question, kept in original test order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrongQuestion {
    /// The question text.
    pub question: String,
    /// The full option list as shown to the user.
    pub options: Vec<AnswerOption>,
    /// What the user picked; `None` when the question was left unanswered.
    pub user_answer: Option<Answer>,
    /// The expected answer.
    pub correct_answer: CorrectAnswer,
    /// Whether the question was multi-select.
    pub is_multiple: bool,
}

/// Outcome of scoring a completed test.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    /// Number of correctly answered questions.
    pub correct: usize,
    /// Incorrect questions, in test order.
    pub wrong: Vec<WrongQuestion>,
}

/// Score a completed answer set against the selected questions.
///
/// A question with no recorded answer counts as wrong. On a multi-select
/// question a single-letter answer is treated as the empty set; on a
/// single-select question a multi-letter answer is simply wrong.
pub fn score(questions: &[Question], answers: &HashMap<usize, Answer>) -> ScoreOutcome {
    let mut correct = 0usize;
    let mut wrong = Vec::new();

    for (i, question) in questions.iter().enumerate() {
        let user = answers.get(&i);
        let is_correct = match &question.correct {
            CorrectAnswer::Multiple(want) => {
                let got = match user {
                    Some(Answer::Multiple(set)) => set.clone(),
                    _ => BTreeSet::new(),
                };
                got == *want
            }
            CorrectAnswer::Single(want) => {
                matches!(user, Some(Answer::Single(l)) if l == want)
            }
        };

        if is_correct {
            correct += 1;
        } else {
            wrong.push(WrongQuestion {
                question: question.text.clone(),
                options: question.options.clone(),
                user_answer: user.cloned(),
                correct_answer: question.correct.clone(),
                is_multiple: question.is_multiple(),
            });
        }
    }

    ScoreOutcome { correct, wrong }
}

/// Percentage of `correct` out of `total`, rounded to two decimals.
pub fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (correct as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
}

/// Whether a percentage meets the pass threshold.
pub fn is_passing(pct: f64) -> bool {
    pct >= PASS_THRESHOLD_PCT
}
