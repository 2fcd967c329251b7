//! certquiz-core — Core data model, session state machine, and scoring.
//!
//! This crate defines the fundamental types that the entire certquiz system
//! uses to represent questions, answers, and a test session in flight.

pub mod error;
pub mod model;
pub mod scoring;
pub mod session;
