//! Full-text search over finished JEP bodies.
//!
//! # Responsibility
//! - Substring search over a read-only snapshot of JEPs.
//! - Shape context snippets around every match inside core.
//!
//! The snapshot is never mutated after construction, so one index can serve
//! any number of readers.

pub mod corpus;
