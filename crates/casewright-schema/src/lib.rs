//! Canonical record types for the casewright pipeline.
//!
//! Defines the issue input, validation point buckets, generated test cases,
//! learned patterns, quality feedback, and the recoverable warnings a batch
//! carries. All other crates depend on these types.

pub mod case;
pub mod feedback;
pub mod issue;
pub mod pattern;
pub mod validation;
pub mod warning;
