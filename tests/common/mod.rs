//! Common test utilities for golive scenario and property tests.
//!
//! This module provides:
//! - `GoProject`: a temp directory holding real Go entry files
//! - `MapResolver`: an in-memory stand-in for `go list`
//! - `RecordingSink`: captures watch events for assertions

#![allow(dead_code)]

pub mod fakes;

pub use fakes::*;
pub use project::*;
