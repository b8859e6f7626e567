//! Shared test utilities for jobsetup integration tests.
//!
//! This module provides:
//! - `TestHarness` wiring the pipeline to a real SQLite database and a
//!   temp-directory blob store
//! - Builders for valid forms and raw multipart bodies

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::*;
