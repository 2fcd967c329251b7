//! Session error types.
//!
//! Defined in `certquiz-core` so callers can distinguish a programming
//! invariant violation (`InvalidTransition`) from ordinary user input
//! problems without string matching.

use thiserror::Error;

use crate::session::SessionState;

/// Errors that can occur when driving a test session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation was attempted in a lifecycle state that does not allow
    /// it. The sanctioned call sequence makes this unreachable, so hitting
    /// it indicates a bug in the caller.
    #[error("'{operation}' is not allowed while the session is {from}")]
    InvalidTransition {
        from: SessionState,
        operation: &'static str,
    },

    /// The user name was empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// A test was started against an empty question bank.
    #[error("cannot start a test without questions")]
    EmptyBank,

    /// An answer was recorded for a question index outside the test.
    #[error("question index {index} out of range (test has {total} questions)")]
    IndexOutOfRange { index: usize, total: usize },
}
