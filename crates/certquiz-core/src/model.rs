//! Question and answer types.
//!
//! The question bank stores a correct answer either as a bare letter ("B")
//! or as an array of letters (["A", "C"]). Both are decoded into tagged
//! variants here so the rest of the system never inspects wire shapes.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Option letter (e.g. 'A').
    pub letter: char,
    /// Option text.
    pub text: String,
}

/// Wire shape shared by correct answers and user answers: a single letter
/// string or an array of letter strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum LetterRepr {
    One(char),
    Many(Vec<char>),
}

/// The correct answer of a question.
///
/// A one-element array in the bank normalizes to `Single`: only answers with
/// two or more letters make a question multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LetterRepr", into = "LetterRepr")]
pub enum CorrectAnswer {
    Single(char),
    Multiple(BTreeSet<char>),
}

impl CorrectAnswer {
    /// Whether this answer makes its question multi-select.
    pub fn is_multiple(&self) -> bool {
        matches!(self, CorrectAnswer::Multiple(_))
    }

    /// All correct letters.
    pub fn letters(&self) -> BTreeSet<char> {
        match self {
            CorrectAnswer::Single(l) => BTreeSet::from([*l]),
            CorrectAnswer::Multiple(set) => set.clone(),
        }
    }
}

impl TryFrom<LetterRepr> for CorrectAnswer {
    type Error = String;

    fn try_from(repr: LetterRepr) -> Result<Self, Self::Error> {
        match repr {
            LetterRepr::One(l) => Ok(CorrectAnswer::Single(l)),
            LetterRepr::Many(letters) => {
                let set: BTreeSet<char> = letters.into_iter().collect();
                match set.len() {
                    0 => Err("correct_answer must not be empty".into()),
                    1 => Ok(CorrectAnswer::Single(set.into_iter().next().unwrap())),
                    _ => Ok(CorrectAnswer::Multiple(set)),
                }
            }
        }
    }
}

impl From<CorrectAnswer> for LetterRepr {
    fn from(answer: CorrectAnswer) -> Self {
        match answer {
            CorrectAnswer::Single(l) => LetterRepr::One(l),
            CorrectAnswer::Multiple(set) => LetterRepr::Many(set.into_iter().collect()),
        }
    }
}

impl fmt::Display for CorrectAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectAnswer::Single(l) => write!(f, "{l}"),
            CorrectAnswer::Multiple(set) => {
                let joined: Vec<String> = set.iter().map(|l| l.to_string()).collect();
                write!(f, "{}", joined.join(", "))
            }
        }
    }
}

/// An answer given by the user for one question.
///
/// Unlike [`CorrectAnswer`], a one-letter selection on a multi-select
/// question stays `Multiple` so the persisted record reflects what the user
/// actually picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LetterRepr", into = "LetterRepr")]
pub enum Answer {
    Single(char),
    Multiple(BTreeSet<char>),
}

impl Answer {
    /// The selected letters as a set.
    pub fn letters(&self) -> BTreeSet<char> {
        match self {
            Answer::Single(l) => BTreeSet::from([*l]),
            Answer::Multiple(set) => set.clone(),
        }
    }
}

impl TryFrom<LetterRepr> for Answer {
    type Error = String;

    fn try_from(repr: LetterRepr) -> Result<Self, Self::Error> {
        match repr {
            LetterRepr::One(l) => Ok(Answer::Single(l)),
            LetterRepr::Many(letters) => {
                let set: BTreeSet<char> = letters.into_iter().collect();
                if set.is_empty() {
                    Err("answer must not be empty".into())
                } else {
                    Ok(Answer::Multiple(set))
                }
            }
        }
    }
}

impl From<Answer> for LetterRepr {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Single(l) => LetterRepr::One(l),
            Answer::Multiple(set) => LetterRepr::Many(set.into_iter().collect()),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Single(l) => write!(f, "{l}"),
            Answer::Multiple(set) => {
                let joined: Vec<String> = set.iter().map(|l| l.to_string()).collect();
                write!(f, "{}", joined.join(", "))
            }
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    #[serde(rename = "question")]
    pub text: String,
    /// Ordered answer options.
    pub options: Vec<AnswerOption>,
    /// The correct answer.
    #[serde(rename = "correct_answer")]
    pub correct: CorrectAnswer,
}

impl Question {
    /// Whether this question requires selecting multiple letters.
    pub fn is_multiple(&self) -> bool {
        self.correct.is_multiple()
    }

    /// The letters of all options, in option order.
    pub fn option_letters(&self) -> BTreeSet<char> {
        self.options.iter().map(|o| o.letter).collect()
    }

    /// Whether every correct letter appears among the options.
    pub fn correct_answer_in_options(&self) -> bool {
        let letters = self.option_letters();
        self.correct.letters().iter().all(|l| letters.contains(l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_json(correct: &str) -> String {
        format!(
            r#"{{
                "question": "Which service stores objects?",
                "options": [
                    {{"letter": "A", "text": "S3"}},
                    {{"letter": "B", "text": "EC2"}},
                    {{"letter": "C", "text": "Lambda"}}
                ],
                "correct_answer": {correct}
            }}"#
        )
    }

    #[test]
    fn deserialize_single_correct_answer() {
        let q: Question = serde_json::from_str(&question_json(r#""A""#)).unwrap();
        assert_eq!(q.correct, CorrectAnswer::Single('A'));
        assert!(!q.is_multiple());
    }

    #[test]
    fn deserialize_multiple_correct_answer() {
        let q: Question = serde_json::from_str(&question_json(r#"["A", "C"]"#)).unwrap();
        assert_eq!(
            q.correct,
            CorrectAnswer::Multiple(BTreeSet::from(['A', 'C']))
        );
        assert!(q.is_multiple());
    }

    #[test]
    fn one_element_array_normalizes_to_single() {
        let q: Question = serde_json::from_str(&question_json(r#"["B"]"#)).unwrap();
        assert_eq!(q.correct, CorrectAnswer::Single('B'));
        assert!(!q.is_multiple());
    }

    #[test]
    fn empty_correct_answer_rejected() {
        assert!(serde_json::from_str::<Question>(&question_json("[]")).is_err());
    }

    #[test]
    fn correct_answer_serde_roundtrip() {
        let single = CorrectAnswer::Single('B');
        assert_eq!(serde_json::to_string(&single).unwrap(), r#""B""#);

        let multi = CorrectAnswer::Multiple(BTreeSet::from(['C', 'A']));
        let json = serde_json::to_string(&multi).unwrap();
        assert_eq!(json, r#"["A","C"]"#);
        assert_eq!(serde_json::from_str::<CorrectAnswer>(&json).unwrap(), multi);
    }

    #[test]
    fn user_answer_keeps_one_element_set() {
        let answer: Answer = serde_json::from_str(r#"["C"]"#).unwrap();
        assert_eq!(answer, Answer::Multiple(BTreeSet::from(['C'])));
    }

    #[test]
    fn correct_answer_in_options_detects_mismatch() {
        let q: Question = serde_json::from_str(&question_json(r#""D""#)).unwrap();
        assert!(!q.correct_answer_in_options());

        let q: Question = serde_json::from_str(&question_json(r#"["A", "C"]"#)).unwrap();
        assert!(q.correct_answer_in_options());
    }

    #[test]
    fn display_formats() {
        assert_eq!(CorrectAnswer::Single('B').to_string(), "B");
        assert_eq!(
            CorrectAnswer::Multiple(BTreeSet::from(['C', 'A'])).to_string(),
            "A, C"
        );
        assert_eq!(Answer::Multiple(BTreeSet::from(['B'])).to_string(), "B");
    }
}
