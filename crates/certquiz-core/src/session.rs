//! The test session state machine.
//!
//! A [`Session`] moves through `NotStarted -> InProgress -> Completed` via
//! explicit calls; there is no ambient or global state. The presentation
//! layer owns one session per user interaction and invokes these operations
//! after each user action.

use std::collections::HashMap;
use std::fmt;

use rand::seq::SliceRandom;

use crate::error::SessionError;
use crate::model::{Answer, Question};

/// How many questions a full test draws from the bank.
pub const QUESTIONS_PER_TEST: usize = 40;

/// Maximum stored length of the user name, after trimming.
pub const MAX_NAME_LEN: usize = 50;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not started"),
            SessionState::InProgress => write!(f, "in progress"),
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// Mutable state of one test attempt.
///
/// The selected questions are fixed at [`Session::start_new_test`] and never
/// change afterwards; answers may be overwritten freely until
/// [`Session::submit`].
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    user_name: String,
    selected: Vec<Question>,
    current: usize,
    answers: HashMap<usize, Answer>,
    result_saved: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// The questions selected for this test, in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.selected
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question currently shown, if a test is underway.
    pub fn current_question(&self) -> Option<&Question> {
        self.selected.get(self.current)
    }

    pub fn answers(&self) -> &HashMap<usize, Answer> {
        &self.answers
    }

    pub fn answer_for(&self, index: usize) -> Option<&Answer> {
        self.answers.get(&index)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Whether the completed result has already been handed to the archive.
    pub fn result_saved(&self) -> bool {
        self.result_saved
    }

    /// Start a new test with the default question count.
    ///
    /// Selects `min(QUESTIONS_PER_TEST, bank.len())` distinct questions
    /// uniformly at random and transitions `NotStarted -> InProgress`.
    pub fn start_new_test(&mut self, bank: &[Question], name: &str) -> Result<(), SessionError> {
        self.start_new_test_with(bank, name, QUESTIONS_PER_TEST)
    }

    /// Start a new test drawing at most `per_test` questions.
    pub fn start_new_test_with(
        &mut self,
        bank: &[Question],
        name: &str,
        per_test: usize,
    ) -> Result<(), SessionError> {
        if self.state != SessionState::NotStarted {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                operation: "start_new_test",
            });
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if bank.is_empty() || per_test == 0 {
            return Err(SessionError::EmptyBank);
        }

        let count = per_test.min(bank.len());
        let mut rng = rand::thread_rng();
        let selected: Vec<Question> = bank.choose_multiple(&mut rng, count).cloned().collect();

        self.user_name = name.chars().take(MAX_NAME_LEN).collect();
        self.selected = selected;
        self.current = 0;
        self.answers.clear();
        self.result_saved = false;
        self.state = SessionState::InProgress;

        tracing::debug!(
            user = %self.user_name,
            questions = self.selected.len(),
            "test started"
        );
        Ok(())
    }

    /// Move the current position by `delta`, clamped to the test bounds.
    /// Returns the new index.
    pub fn advance(&mut self, delta: isize) -> Result<usize, SessionError> {
        if self.state != SessionState::InProgress {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                operation: "advance",
            });
        }
        let last = self.selected.len() as isize - 1;
        self.current = (self.current as isize + delta).clamp(0, last) as usize;
        Ok(self.current)
    }

    /// Record (or overwrite) the answer for a question index.
    pub fn record_answer(&mut self, index: usize, answer: Answer) -> Result<(), SessionError> {
        if self.state != SessionState::InProgress {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                operation: "record_answer",
            });
        }
        if index >= self.selected.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                total: self.selected.len(),
            });
        }
        self.answers.insert(index, answer);
        Ok(())
    }

    /// Finish the test: `InProgress -> Completed`. Questions and answers are
    /// frozen afterwards.
    pub fn submit(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::InProgress {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                operation: "submit",
            });
        }
        self.state = SessionState::Completed;
        tracing::debug!(
            user = %self.user_name,
            answered = self.answers.len(),
            total = self.selected.len(),
            "test submitted"
        );
        Ok(())
    }

    /// Abandon the test: `InProgress -> NotStarted`. All session state is
    /// discarded; nothing is ever persisted for an abandoned attempt.
    pub fn quit(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::InProgress {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                operation: "quit",
            });
        }
        *self = Session::new();
        Ok(())
    }

    /// Clear a completed session in preparation for a new test:
    /// `Completed -> NotStarted`.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Completed {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                operation: "reset",
            });
        }
        *self = Session::new();
        Ok(())
    }

    /// One-shot guard against duplicate result persistence.
    ///
    /// Returns `true` exactly once per completed session. Callers must save
    /// the result first and mark only on success, so a failed save stays
    /// retryable.
    pub fn mark_result_saved(&mut self) -> Result<bool, SessionError> {
        if self.state != SessionState::Completed {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                operation: "mark_result_saved",
            });
        }
        let first = !self.result_saved;
        self.result_saved = true;
        Ok(first)
    }
}
