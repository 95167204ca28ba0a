//! Observability subsystem
//!
//! Structured one-line JSON logging for catalog lifecycle and mutation
//! outcomes.
//!
//! # Principles
//!
//! 1. Observability is read-only, no side effects on catalog state
//! 2. No async or background threads
//! 3. Deterministic output, one line per event
//! 4. A logging failure never fails the operation being logged

mod logger;

pub use logger::{Logger, Severity};
